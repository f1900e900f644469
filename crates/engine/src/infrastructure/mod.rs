//! Infrastructure implementations.
//!
//! File formats and settings storage. Everything here does blocking
//! `std::fs` I/O.

pub mod export;
pub mod importers;
pub mod settings;
