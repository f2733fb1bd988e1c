//! Input checks shared by the create and update operations.
//!
//! Each helper returns a [`ToggleError::Validation`] carrying the message
//! sent back to the client.

use chrono::{NaiveDate, NaiveDateTime};

use super::{CreateToggle, DATETIME_FORMAT, DATE_FORMAT};
use crate::error::ToggleError;

pub const INVALID_DATETIME: &str = "Invalid date format. Please use YYYY-MM-DD HH:MM:SS";
pub const INVALID_DATE: &str = "Invalid date format, use YYYY-MM-DD";
pub const INVERTED_RANGE: &str = "Beginning date must be before expiration date";

/// A create request with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCreate {
    pub package: String,
    pub name: String,
    pub description: String,
    pub beginning_date: NaiveDateTime,
    pub expiration_date: NaiveDateTime,
}

pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, ToggleError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        .map_err(|_| ToggleError::validation(INVALID_DATETIME))
}

/// Parse a `YYYY-MM-DD` day into its midnight.
pub fn parse_date(value: &str) -> Result<NaiveDateTime, ToggleError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ToggleError::validation(INVALID_DATE))
}

pub fn check_range(beginning: NaiveDateTime, expiration: NaiveDateTime) -> Result<(), ToggleError> {
    if beginning > expiration {
        return Err(ToggleError::validation(INVERTED_RANGE));
    }
    Ok(())
}

/// Reject empty and whitespace-only names. The name itself is kept as sent.
pub fn check_name(name: Option<&str>) -> Result<&str, ToggleError> {
    let name = name.ok_or_else(|| ToggleError::validation("Name is required"))?;
    if name.trim().is_empty() {
        return Err(ToggleError::validation("Name cannot be empty"));
    }
    Ok(name)
}

pub fn validate_create(request: CreateToggle) -> Result<ValidCreate, ToggleError> {
    let CreateToggle {
        package_name: Some(package),
        name: Some(name),
        description: Some(description),
        beginning_date: Some(beginning),
        expiration_date: Some(expiration),
    } = request
    else {
        return Err(ToggleError::validation("Invalid request"));
    };

    if package.is_empty() {
        return Err(ToggleError::validation("Invalid request"));
    }
    check_name(Some(name.as_str()))?;

    let beginning_date = parse_datetime(&beginning)?;
    let expiration_date = parse_datetime(&expiration)?;
    check_range(beginning_date, expiration_date)?;

    Ok(ValidCreate {
        package,
        name,
        description,
        beginning_date,
        expiration_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateToggle {
        CreateToggle {
            package_name: Some("checkout".into()),
            name: Some("one-click".into()),
            description: Some("One click purchase".into()),
            beginning_date: Some("2024-01-01 00:00:00".into()),
            expiration_date: Some("2024-12-31 23:59:59".into()),
        }
    }

    fn message(err: ToggleError) -> String {
        match err {
            ToggleError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_request() {
        let valid = validate_create(request()).unwrap();
        assert_eq!(valid.package, "checkout");
        assert_eq!(valid.beginning_date, parse_datetime("2024-01-01 00:00:00").unwrap());
    }

    #[test]
    fn missing_field_is_invalid_request() {
        for strip in 0..5 {
            let mut req = request();
            match strip {
                0 => req.package_name = None,
                1 => req.name = None,
                2 => req.description = None,
                3 => req.beginning_date = None,
                _ => req.expiration_date = None,
            }
            assert_eq!(message(validate_create(req).unwrap_err()), "Invalid request");
        }
    }

    #[test]
    fn date_without_time_is_rejected() {
        let mut req = request();
        req.beginning_date = Some("2024-01-01".into());
        assert_eq!(message(validate_create(req).unwrap_err()), INVALID_DATETIME);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut req = request();
        req.beginning_date = Some("2025-01-01 00:00:00".into());
        assert_eq!(message(validate_create(req).unwrap_err()), INVERTED_RANGE);
    }

    #[test]
    fn equal_bounds_are_allowed() {
        let mut req = request();
        req.expiration_date = req.beginning_date.clone();
        assert!(validate_create(req).is_ok());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(message(check_name(None).unwrap_err()), "Name is required");
        assert_eq!(message(check_name(Some("")).unwrap_err()), "Name cannot be empty");
        assert_eq!(message(check_name(Some(" \t ")).unwrap_err()), "Name cannot be empty");
        assert_eq!(check_name(Some(" beta ")).unwrap(), " beta ");
    }

    #[test]
    fn parse_date_yields_midnight() {
        assert_eq!(
            parse_date("2024-01-01").unwrap(),
            parse_datetime("2024-01-01 00:00:00").unwrap()
        );
        assert_eq!(message(parse_date("").unwrap_err()), INVALID_DATE);
        assert_eq!(message(parse_date("01/02/2024").unwrap_err()), INVALID_DATE);
    }
}
