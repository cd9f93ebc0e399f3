//! Uploader capability for handing finished artifacts to a hosting service.
//!
//! The generation engine performs no network I/O; uploads happen through the
//! injected [`uploader::Uploader`] trait.

/// Uploader trait and built-in implementations.
pub mod uploader;
