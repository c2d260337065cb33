//! folioverse - Preview studio for FolioVerse animated portfolio backgrounds.
//!
//! This crate renders the engine's backgrounds offline: SVG snapshots, a preset
//! gallery, preference file editing and a live-reloading preview server.

pub mod gallery;
pub mod prefs;
pub mod render;
pub mod server;
pub mod svg;
