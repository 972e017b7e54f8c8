//! Filesystem primitives shared by the unpacker.
//!
//! Currently this is the recursive remover used to roll back a failed or
//! unwanted installation tree.

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::{RemovalReport, remove_dir_recursive};
