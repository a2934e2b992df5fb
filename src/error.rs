use thiserror::Error;

/// Failures surfaced by the tracking core and the record store.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Machine-readable code used in the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_error",
        }
    }

    /// HTTP-equivalent status for the failure class.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("missing required parameter: {}", field))
    }

    /// Reject NaN and infinities, which cannot be stored as JSON numbers.
    pub fn require_finite(field: &str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::Validation(format!("{} must be a finite number: {}", field, value)))
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AppError::missing("user").http_status(), 400);
        assert_eq!(AppError::NotFound("x".into()).http_status(), 404);
        assert_eq!(AppError::Storage("x".into()).http_status(), 500);
        assert_eq!(
            AppError::missing("user").to_string(),
            "missing required parameter: user"
        );
    }

    #[test]
    fn non_finite_values_are_validation_errors() {
        assert_eq!(AppError::require_finite("calories", 12.5).unwrap(), 12.5);
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(AppError::require_finite("calories", v).unwrap_err().http_status(), 400);
        }
    }
}
