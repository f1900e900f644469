//! Writers for PCGen data files.

mod lst_writer;
mod pcc;

pub use lst_writer::{
    default_header, default_header_today, is_homebrew_lst, render_lst, with_lst_extension,
    write_lst, MODS_MARKER,
};
pub use pcc::{
    ensure_pcc_references, find_pcc, references_lst, render_pcc, sync_pcc, with_pcc_extension,
    PccError, PccOutcome,
};
