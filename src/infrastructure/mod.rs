//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where the roster keeps its data file and log file.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, DATA_DIR_ENV, DATA_FILE_NAME, LOG_FILE_NAME};
