use crate::utils::error::{LoginError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LoginError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LoginError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LoginError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LoginError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LoginError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| LoginError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// 密碼等敏感欄位請傳入 `redacted = true`，錯誤訊息中不會出現原值
pub fn validate_non_empty_string(field_name: &str, value: &str, redacted: bool) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LoginError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: if redacted {
                "***".to_string()
            } else {
                value.to_string()
            },
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
        return Err(LoginError::InvalidConfigValueError {
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
        assert!(validate_url("target.url", "https://example.com").is_ok());
        assert!(validate_url("target.url", "http://localhost:9515").is_ok());
        assert!(validate_url("target.url", "").is_err());
        assert!(validate_url("target.url", "invalid-url").is_err());
        assert!(validate_url("target.url", "file:///tmp/index.html").is_err());
    }

    #[test]
    fn test_validate_non_empty_string_redacts() {
        assert!(validate_non_empty_string("credentials.email", "a@b.c", false).is_ok());

        match validate_non_empty_string("credentials.password", "   ", true) {
            Err(LoginError::InvalidConfigValueError { value, .. }) => assert_eq!(value, "***"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("wait.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("wait.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("wait.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.report_path", "report.json").is_ok());
        assert!(validate_path("output.report_path", "").is_err());
        assert!(validate_path("output.report_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("chromedriver".to_string());
        let absent: Option<String> = None;
        assert_eq!(
            validate_required_field("driver.path", &present).unwrap(),
            "chromedriver"
        );
        assert!(validate_required_field("driver.path", &absent).is_err());
    }
}
