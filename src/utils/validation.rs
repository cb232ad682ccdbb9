use crate::utils::error::{PetError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PetError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PetError::MissingConfigError {
            field: field_name.to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dog_api.base_url", "https://api.thedogapi.com/v1").is_ok());
        assert!(validate_url("dog_api.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("dog_api.base_url", "").is_err());
        assert!(validate_url("dog_api.base_url", "invalid-url").is_err());
        assert!(validate_url("dog_api.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        assert_eq!(
            validate_required_field("petfinder.client_id", &Some(" abc ".to_string())).unwrap(),
            "abc"
        );
        assert!(validate_required_field("petfinder.client_id", &Some("  ".to_string())).is_err());
        assert!(matches!(
            validate_required_field("petfinder.client_id", &None),
            Err(PetError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("limit", 6, 1, 100).is_ok());
        assert!(validate_range("limit", 0, 1, 100).is_err());
        assert!(validate_range("limit", 101, 1, 100).is_err());
    }
}
