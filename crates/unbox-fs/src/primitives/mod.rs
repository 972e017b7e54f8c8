pub mod remove_dir;

pub use remove_dir::{RemovalReport, remove_dir_recursive};
