//! Test support utilities for rancher-ecr-sync integration tests.
//!
//! Provides fixtures, a canned ECR source, and a mock Rancher server wrapper.

#![allow(dead_code)]

pub mod fixtures;
pub mod rancher;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use rancher::*;
