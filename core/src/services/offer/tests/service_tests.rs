//! Unit tests for the offer book service

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::errors::{DomainError, ValidationError};
use crate::services::order::tests::mocks::{provider_id, Marketplace};

#[tokio::test]
async fn test_create_offer() {
    let m = Marketplace::strict().await;
    let client = m.client("salma").await;
    let provider = m.provider("hedi").await;
    let order = m.order(&client).await;

    let offer = m
        .offer_service
        .create_offer(&provider, order.order.id, Some(dec!(80)), Some("Can come today".to_string()))
        .await
        .unwrap();

    assert!(offer.accepted);
    assert_eq!(offer.order_id, order.order.id);
    assert_eq!(offer.provider_id, provider_id(&provider));
    assert_eq!(offer.proposed_price, Some(dec!(80)));
}

#[tokio::test]
async fn test_create_offer_errors() {
    let m = Marketplace::strict().await;
    let client = m.client("salma").await;
    let provider = m.provider("hedi").await;
    let order = m.order(&client).await;

    assert!(matches!(
        m.offer_service
            .create_offer(&provider, Uuid::new_v4(), Some(dec!(80)), None)
            .await,
        Err(DomainError::NotFound { ref resource }) if resource == "Order"
    ));
    assert!(matches!(
        m.offer_service
            .create_offer(&provider, order.order.id, Some(dec!(-5)), None)
            .await,
        Err(DomainError::Validation(ValidationError::NegativeAmount { .. }))
    ));
    assert!(matches!(
        m.offer_service
            .create_offer(&provider, order.order.id, Some(dec!(100000000)), None)
            .await,
        Err(DomainError::Validation(ValidationError::TooLarge { ref field, .. }))
            if field == "proposed_price"
    ));
    assert!(matches!(
        m.offer_service
            .create_offer(&client, order.order.id, Some(dec!(80)), None)
            .await,
        Err(DomainError::NotFound { ref resource }) if resource == "Provider"
    ));
}

#[tokio::test]
async fn test_create_offer_has_no_duplicate_check() {
    let m = Marketplace::strict().await;
    let client = m.client("salma").await;
    let provider = m.provider("hedi").await;
    let order = m.order(&client).await;

    for price in [dec!(80), dec!(70)] {
        m.offer_service
            .create_offer(&provider, order.order.id, Some(price), None)
            .await
            .unwrap();
    }

    let offers = m
        .offer_service
        .list_order_offers(order.order.id)
        .await
        .unwrap();
    assert_eq!(offers.len(), 2);
}

#[tokio::test]
async fn test_list_order_offers_in_creation_order() {
    let m = Marketplace::strict().await;
    let client = m.client("salma").await;
    let first = m.provider("hedi").await;
    let second = m.provider("sami").await;
    let order = m.order(&client).await;

    m.offer_service
        .create_offer(&first, order.order.id, Some(dec!(90)), None)
        .await
        .unwrap();
    m.offer_service
        .create_offer(&second, order.order.id, Some(dec!(85)), None)
        .await
        .unwrap();

    let offers = m
        .offer_service
        .list_order_offers(order.order.id)
        .await
        .unwrap();
    let names: Vec<&str> = offers.iter().map(|v| v.provider_name.as_str()).collect();
    assert_eq!(names, vec!["hedi", "sami"]);

    assert!(matches!(
        m.offer_service.list_order_offers(Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_reject_offer_records_decline() {
    let m = Marketplace::strict().await;
    let client = m.client("salma").await;
    let provider = m.provider("hedi").await;
    let order = m.order(&client).await;

    let decline = m
        .offer_service
        .reject_offer(&provider, order.order.id)
        .await
        .unwrap();
    assert_eq!(decline.order_id, order.order.id);
    assert_eq!(decline.provider_id, provider_id(&provider));
    assert_eq!(m.offers.decline_count().await, 1);

    // declines are not bids
    let offers = m
        .offer_service
        .list_order_offers(order.order.id)
        .await
        .unwrap();
    assert!(offers.is_empty());

    let available = m
        .order_service
        .list_provider_available_orders(&provider)
        .await
        .unwrap();
    assert!(available.is_empty());
}

#[tokio::test]
async fn test_reject_offer_twice() {
    let m = Marketplace::strict().await;
    let client = m.client("salma").await;
    let provider = m.provider("hedi").await;
    let order = m.order(&client).await;

    m.offer_service
        .reject_offer(&provider, order.order.id)
        .await
        .unwrap();
    let again = m.offer_service.reject_offer(&provider, order.order.id).await;
    assert!(matches!(
        again,
        Err(DomainError::Validation(ValidationError::DuplicateDecline))
    ));
    assert_eq!(m.offers.decline_count().await, 1);
}

#[tokio::test]
async fn test_reject_unknown_order() {
    let m = Marketplace::strict().await;
    let provider = m.provider("hedi").await;

    let result = m.offer_service.reject_offer(&provider, Uuid::new_v4()).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
