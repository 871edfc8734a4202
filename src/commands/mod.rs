/// The pre-publish check.
pub mod check;

/// Inspect the patterns of an ignore file.
pub mod patterns;
