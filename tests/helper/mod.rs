//! Shared test utilities

pub mod source;

#[allow(unused_imports)]
pub use source::{FakeSource, create_test_resolver, packages, targets};
