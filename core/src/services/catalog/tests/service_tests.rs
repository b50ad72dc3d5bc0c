//! Unit tests for the catalog service

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::Actor;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::MockServiceCategoryRepository;
use crate::services::catalog::CatalogService;

fn service() -> CatalogService<MockServiceCategoryRepository> {
    CatalogService::new(Arc::new(MockServiceCategoryRepository::new()))
}

fn admin() -> Actor {
    Actor::resolve(User::admin("admin"), None)
}

#[tokio::test]
async fn test_list_is_ordered_by_name() {
    let catalog = service();
    catalog.create_service(&admin(), "Plumbing", "Pipes").await.unwrap();
    catalog.create_service(&admin(), "Electricity", "Wiring").await.unwrap();

    let names: Vec<String> = catalog
        .list_service()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Electricity", "Plumbing"]);
}

#[tokio::test]
async fn test_get_unknown_service() {
    let result = service().get_service(Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { ref resource }) if resource == "Service"));
}

#[tokio::test]
async fn test_create_requires_admin() {
    let client = Actor::resolve(User::new("client"), None);
    let result = service().create_service(&client, "Plumbing", "Pipes").await;
    assert!(matches!(result, Err(DomainError::Forbidden { .. })));
}

#[tokio::test]
async fn test_create_validates_name() {
    let catalog = service();

    let result = catalog.create_service(&admin(), "  ", "Nothing").await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::RequiredField { .. }))
    ));

    let long_name = "p".repeat(101);
    let result = catalog.create_service(&admin(), &long_name, "Too long").await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::TooLong { max: 100, .. }))
    ));
}
