//! Core library components.
//!
//! Configuration, the ECR fetcher, the Rancher client and the reconcile
//! loop that ties them together.

pub mod config;
pub mod constants;
pub mod dotenv;
pub mod ecr;
pub mod rancher;
pub mod scheduler;
pub mod sync;
pub mod types;
