//! Integration tests for the typed settings facade

#[path = "../common/mod.rs"]
mod common;

mod directory;
mod format_delete;
mod typed_access;
mod write_path;
