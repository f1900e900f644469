//! Spellgen engine library.
//!
//! Turns spell attributes into PCGen homebrew data files.
//!
//! ## Structure
//!
//! - `use_cases/` - Check, load and generate spells; remembered settings
//! - `infrastructure/` - JSON input, `.lst`/`.pcc` files, settings storage
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
