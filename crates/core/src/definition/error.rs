//! Error types for definition parsing and validation.

use thiserror::Error;

/// Errors produced while parsing or validating an indexer definition.
///
/// Every variant maps to a stable snake_case tag via [`DefinitionError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The document could not be decoded.
    #[error("Failed to parse definition: {0}")]
    ParseError(String),

    #[error("Definition has neither search.path nor search.paths")]
    MissingSearchPath,

    #[error("Definition is missing search.rows")]
    MissingRowsSelector,

    #[error("Definition is missing search.fields")]
    MissingFields,

    #[error("search.fields must be a mapping")]
    InvalidFieldsFormat,

    /// A selector value was neither a string nor a mapping.
    #[error("Invalid selector for '{0}'")]
    InvalidSelector(String),

    #[error("Login block is missing a method")]
    MissingLoginMethod,

    #[error("Login block must be a mapping")]
    InvalidLoginConfig,

    #[error("Definition is missing caps")]
    MissingCapabilities,

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Unknown indexer type: {0}")]
    InvalidType(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Missing required fields: [{}]", .0.join(", "))]
    MissingRequiredFields(Vec<String>),

    #[error("Missing search fields: [{}]", .0.join(", "))]
    MissingSearchFields(Vec<String>),

    #[error("caps does not declare any modes")]
    MissingCapabilitiesModes,
}

impl DefinitionError {
    /// Stable tag identifying the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ParseError(_) => "parse_error",
            Self::MissingSearchPath => "missing_search_path",
            Self::MissingRowsSelector => "missing_rows_selector",
            Self::MissingFields => "missing_fields",
            Self::InvalidFieldsFormat => "invalid_fields_format",
            Self::InvalidSelector(_) => "invalid_selector",
            Self::MissingLoginMethod => "missing_login_method",
            Self::InvalidLoginConfig => "invalid_login_config",
            Self::MissingCapabilities => "missing_capabilities",
            Self::InvalidSetting(_) => "invalid_setting",
            Self::InvalidType(_) => "invalid_type",
            Self::MissingRequiredField(_) => "missing_required_field",
            Self::MissingRequiredFields(_) => "missing_required_fields",
            Self::MissingSearchFields(_) => "missing_search_fields",
            Self::MissingCapabilitiesModes => "missing_capabilities_modes",
        }
    }

    /// Tag including the payload, e.g. `missing_required_field:id` or
    /// `missing_search_fields:[size,seeders]`.
    pub fn tag(&self) -> String {
        match self {
            Self::MissingRequiredField(name) | Self::InvalidSelector(name) => {
                format!("{}:{}", self.code(), name)
            }
            Self::MissingRequiredFields(names) | Self::MissingSearchFields(names) => {
                format!("{}:[{}]", self.code(), names.join(","))
            }
            _ => self.code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DefinitionError::MissingRequiredField("id".to_string());
        assert_eq!(err.to_string(), "Missing required field: id");

        let err = DefinitionError::MissingSearchFields(vec!["size".into(), "seeders".into()]);
        assert_eq!(err.to_string(), "Missing search fields: [size, seeders]");
    }

    #[test]
    fn test_codes() {
        assert_eq!(DefinitionError::MissingCapabilities.code(), "missing_capabilities");
        assert_eq!(
            DefinitionError::ParseError("bad".into()).code(),
            "parse_error"
        );
    }

    #[test]
    fn test_tags_include_payload() {
        assert_eq!(
            DefinitionError::MissingRequiredField("name".into()).tag(),
            "missing_required_field:name"
        );
        assert_eq!(
            DefinitionError::MissingRequiredFields(vec!["id".into(), "links".into()]).tag(),
            "missing_required_fields:[id,links]"
        );
        assert_eq!(DefinitionError::MissingRowsSelector.tag(), "missing_rows_selector");
    }
}
