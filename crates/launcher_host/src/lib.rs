//! Host-domain storage contracts used by the launcher runtime.
//!
//! This crate is the API-first boundary for durable preferences. It exposes the object-safe
//! [`PrefsStore`] trait, an in-memory adapter shared between sessions and tests, and a
//! file-backed adapter for native hosts. The launcher model and placement rules live in
//! `launcher_runtime`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::file_prefs::FilePrefsStore;
pub use storage::prefs::{MemoryPrefsStore, PrefsStore, PrefsStoreFuture};
