//! Row decoding helpers shared by the MySQL repositories.
//!
//! Every SQLx failure is reported as `DomainError::Internal` with the
//! column or operation that failed.

use mp_core::errors::DomainError;
use sqlx::mysql::MySqlRow;
use sqlx::{Decode, MySql, Row, Type};
use uuid::Uuid;

/// Read a column, mapping decode failures to `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, MySql> + Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    parse_uuid(&raw, name)
}

/// Read a nullable `CHAR(36)` column as a UUID
pub(crate) fn optional_uuid_column(row: &MySqlRow, name: &str) -> Result<Option<Uuid>, DomainError> {
    let raw: Option<String> = column(row, name)?;
    raw.map(|value| parse_uuid(&value, name)).transpose()
}

pub(crate) fn parse_uuid(raw: &str, name: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|e| DomainError::internal(format!("Invalid {} UUID: {}", name, e)))
}

/// Map a query failure to `DomainError::Internal`
pub(crate) fn query_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::internal(format!("Failed to {}: {}", action, e))
}

/// Whether the error is a unique key violation
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "id").unwrap(), id);

        let err = parse_uuid("not-a-uuid", "order_id").unwrap_err();
        assert!(err.to_string().contains("Invalid order_id UUID"));
    }

    #[test]
    fn test_query_error_message() {
        let err = query_error("find order")(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Internal { ref message } if message.starts_with("Failed to find order")));
    }

    #[test]
    fn test_row_not_found_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
