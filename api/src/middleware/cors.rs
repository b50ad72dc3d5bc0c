//! CORS configuration for browser clients.
//!
//! Development accepts any origin. Other environments only accept the
//! origins listed in `ALLOWED_ORIGINS` (comma separated).

use actix_cors::Cors;
use actix_web::http::{header, Method};
use mp_shared::Environment;
use std::env;

const DEFAULT_MAX_AGE: usize = 3600;

/// Creates the CORS middleware for `environment`
///
/// `CORS_MAX_AGE` overrides the preflight cache lifetime (seconds).
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_AGE);

    if environment.is_development() {
        log::info!("Configuring CORS for development environment");
        return base_cors(max_age).allow_any_origin().supports_credentials();
    }

    log::info!("Configuring CORS for {:?} environment", environment);
    allowed_origins(env::var("ALLOWED_ORIGINS").ok().as_deref())
        .into_iter()
        .fold(base_cors(max_age), |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(&origin)
        })
}

fn base_cors(max_age: usize) -> Cors {
    Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

/// Parses a comma separated origin list, skipping blanks
fn allowed_origins(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_parsing() {
        let origins = allowed_origins(Some("https://app.example.com, ,https://admin.example.com"));
        assert_eq!(
            origins,
            vec!["https://app.example.com", "https://admin.example.com"]
        );
        assert!(allowed_origins(None).is_empty());
    }

    #[test]
    fn test_create_cors_for_each_environment() {
        let _development = create_cors(Environment::Development);
        let _production = create_cors(Environment::Production);
    }
}
