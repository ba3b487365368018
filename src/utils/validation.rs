use crate::domain::model::{InputField, UserInput};
use crate::utils::error::{Result, SwotError};
use url::Url;

/// Minimum trimmed length of every input field.
pub const MIN_DETAIL_CHARS: usize = 10;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort,
}

impl FieldError {
    pub fn message(self) -> &'static str {
        match self {
            FieldError::Required => "Este campo é obrigatório.",
            FieldError::TooShort => {
                "Por favor, forneça um pouco mais de detalhes (mínimo de 10 caracteres)."
            }
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Rule applied to every business-idea field, on blur and again on submit.
pub fn validate_detail_field(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::Required);
    }
    if trimmed.chars().count() < MIN_DETAIL_CHARS {
        return Some(FieldError::TooShort);
    }
    None
}

impl Validate for UserInput {
    fn validate(&self) -> Result<()> {
        for field in InputField::ALL {
            if let Some(error) = validate_detail_field(self.get(field)) {
                return Err(SwotError::ValidationError {
                    field: field.key().to_string(),
                    message: error.message().to_string(),
                });
            }
        }
        Ok(())
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SwotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SwotError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SwotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SwotError::InvalidConfigValueError {
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
        return Err(SwotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
