//! Semantic validation of parsed definitions.

use super::{Definition, DefinitionError};

/// Search fields every definition must extract.
pub const REQUIRED_SEARCH_FIELDS: [&str; 3] = ["title", "size", "seeders"];

/// Validate a parsed definition.
///
/// Checks run in a fixed order and stop at the first failing category:
/// required top-level fields, then required search fields, then
/// capability modes. Callers are expected to fix and retry.
pub fn validate_definition(definition: &Definition) -> Result<(), DefinitionError> {
    let missing = missing_required_fields(definition);
    if !missing.is_empty() {
        return Err(DefinitionError::MissingRequiredFields(missing));
    }

    let missing: Vec<String> = REQUIRED_SEARCH_FIELDS
        .iter()
        .filter(|field| !definition.search.fields.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DefinitionError::MissingSearchFields(missing));
    }

    match &definition.capabilities.modes {
        Some(modes) if !modes.is_empty() => Ok(()),
        _ => Err(DefinitionError::MissingCapabilitiesModes),
    }
}

fn missing_required_fields(definition: &Definition) -> Vec<String> {
    let scalars = [
        ("id", &definition.id),
        ("name", &definition.name),
        ("description", &definition.description),
        ("language", &definition.language),
        ("encoding", &definition.encoding),
    ];

    let mut missing: Vec<String> = scalars
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

    if definition.links.iter().all(|link| link.trim().is_empty()) {
        missing.push("links".to_string());
    }
    missing
}
