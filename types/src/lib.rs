//! Core domain types for slurp.
//!
//! This crate contains pure domain types with no IO and no async.
//! Everything here can be used from any layer of the application.

mod entry;
mod filekind;
mod format;
mod relpath;
mod signal;

pub use entry::FileEntry;
pub use filekind::{FileKind, PreviewStyle};
pub use format::format_size;
pub use relpath::{RelPath, RelPathError};
pub use signal::PageSignal;
