// src/fetch/mod.rs

/// Module for downloading the source CSV to disk
pub mod download;
