//! Reading and saving text files under a resolved encoding.
//!
//! This module provides:
//! - Whole-file reads with detection or an explicit encoding
//! - Line-break normalization to `\n`
//! - Saves with parent-directory creation and optional BOM / atomic rename
//!
//! Every call is synchronous and holds its file handle only for its own
//! duration. Concurrent writers to one path must be serialized by the caller.

pub mod eol;
pub mod load;
pub mod save;

pub use load::{
    FileContent, FileLoadConfig, load_file, load_file_with_config, read_text,
    read_text_with_config, try_read_text,
};
pub use save::{
    FileSaveConfig, FileSaveResult, save_file, save_file_with_config, try_write_text, write_text,
    write_text_with_config,
};
