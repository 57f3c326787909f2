//! Markdown image-reference handling for upload-path images.
//!
//! The host content system stores user images under `/uploads/` and embeds
//! them with standard `![alt](path)` markup. This crate finds those
//! references and swaps the markup for replacement text.

pub mod image_refs;

pub use image_refs::{extract_upload_images, replace_image_markup};
