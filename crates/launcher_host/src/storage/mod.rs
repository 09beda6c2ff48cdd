//! Key-value preference storage.

pub mod file_prefs;
pub mod prefs;
