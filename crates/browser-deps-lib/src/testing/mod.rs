//! Test helpers for building package trees on disk
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! downstream test crates.

pub mod filesystem;

pub use filesystem::PackageTreeFixture;
