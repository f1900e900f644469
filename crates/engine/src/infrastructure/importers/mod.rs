//! Readers for spell data.
//!
//! JSON files carry raw attributes entered by the user; `.lst` files carry
//! spells previously written for PCGen.

mod lst;
mod spell_input;

pub use lst::{parse_lst, read_lst, LstDocument, LstError, MOD_MARKER};
pub use spell_input::{parse_spell_inputs, read_spell_inputs, InputError};
