//! Test utilities for the osm-client crate
//!
//! This module provides builders and mocks for testing.

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
