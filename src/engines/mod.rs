// gitscrub-core/src/engines/mod.rs
//! This module contains blob sanitizer implementations.
//!
//! Each engine is a separate file within this directory and implements the
//! `BlobSanitizer` trait. To add a new engine, create a new file, define its
//! logic, and declare it here using `pub mod <engine_name>;`.

pub mod regex_engine;
