//! Request boundary object and the synchronous generation facade.

/// `CoverRequest` and `Generator`.
pub mod generator;
