//! Input normalization for request bodies.
//!
//! Text fields are trimmed before they are checked or stored. Optional profile fields treat
//! an empty value as "clear this field".

use crate::server::error::validation::ValidationError;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_CONTENT_LEN: usize = 5000;
pub const MAX_BIO_LEN: usize = 1000;
pub const MAX_URL_LEN: usize = 2048;

/// Trims `value` and rejects it when empty or longer than `max` characters.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(value.to_string())
}

/// Trims `value`; an empty result becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(Some(value.to_string()))
}

/// Joins expertise tags into the stored comma list, dropping blanks and duplicates.
pub fn expertise_list(tags: &[String]) -> Result<Option<String>, ValidationError> {
    let mut cleaned: Vec<&str> = Vec::new();
    for tag in tags {
        let tag = tag.trim().trim_matches(',').trim();
        if tag.is_empty() || cleaned.contains(&tag) {
            continue;
        }
        if tag.contains(',') {
            return Err(ValidationError::InvalidCharacter {
                field: "expertise",
                character: ',',
            });
        }
        if tag.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "expertise",
                max: MAX_NAME_LEN,
            });
        }
        cleaned.push(tag);
    }

    if cleaned.is_empty() {
        Ok(None)
    } else {
        Ok(Some(cleaned.join(",")))
    }
}

/// Splits a stored comma list back into tags.
pub fn split_expertise(stored: Option<&str>) -> Vec<String> {
    stored
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
