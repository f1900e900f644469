//! Common utilities for the domain layer.

mod string;

pub use string::{capitalize_first, flatten_separators, slug, spell_key, RESERVED_KEY_CHARS};
