//! Similarity scoring entry points.
//!
//! # Responsibility
//! - Expose pure scoring functions used by the duplicate-check path.
//! - Keep threshold and weighting constants in one place.

pub mod scorer;
