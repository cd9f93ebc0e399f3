//! Size-budget driven re-encoding of rendered artifacts.

/// Two-pass quality/resolution search against a byte budget.
pub mod optimize;
