//! Raw spell attribute input from JSON files.
//!
//! A file holds either a single object or an array of objects. Values are
//! strings; numbers are accepted and stringified so `"level-wizard": 3`
//! works, and `null` is treated as an empty field.

use std::path::Path;

use serde_json::Value;
use spellgen_domain::SpellAttributeSet;
use thiserror::Error;

/// Errors that can occur while reading spell input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object or an array of objects")]
    NotAnObject,
    #[error("Spell {index}: value of `{key}` must be a string or a number")]
    UnsupportedValue { index: usize, key: String },
}

/// Parse spell attribute sets from JSON text.
pub fn parse_spell_inputs(text: &str) -> Result<Vec<SpellAttributeSet>, InputError> {
    let value: Value = serde_json::from_str(text)?;
    let objects = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => return Err(InputError::NotAnObject),
    };

    objects
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(fields) = item else {
                return Err(InputError::NotAnObject);
            };
            let mut attributes = SpellAttributeSet::new();
            for (key, value) in fields {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Null => String::new(),
                    _ => return Err(InputError::UnsupportedValue { index, key }),
                };
                attributes.insert(key, text);
            }
            Ok(attributes)
        })
        .collect()
}

/// Read spell attribute sets from a JSON file.
pub fn read_spell_inputs(path: &Path) -> Result<Vec<SpellAttributeSet>, InputError> {
    let text = std::fs::read_to_string(path)?;
    let spells = parse_spell_inputs(&text)?;
    tracing::debug!(path = %path.display(), count = spells.len(), "Read spell input");
    Ok(spells)
}
