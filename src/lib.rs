//! rancher-ecr-sync - keeps a Rancher registry credential in step with ECR.
//!
//! ECR hands out registry passwords that expire after twelve hours. This job
//! fetches a fresh one, finds the Rancher project's docker credential for the
//! registry host, and creates or updates it, then sleeps and does it again.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── main.rs           # Logging, config check, runtime, loop start
//! ├── error.rs          # Error types
//! └── core/
//!     ├── config        # Immutable job configuration
//!     ├── dotenv        # .env fallback for unset variables
//!     ├── constants     # Env var names, wire literals, intervals
//!     ├── types         # RegistryCredential, SyncOutcome
//!     ├── ecr           # Credential fetcher
//!     ├── rancher/      # Rancher API client and wire schemas
//!     ├── sync          # One reconcile pass
//!     └── scheduler     # Running/Idle loop
//! ```

pub mod core;
pub mod error;

pub use crate::core::config::{Config, Schedule};
pub use crate::core::scheduler::{Scheduler, Sleeper, State, TokioSleeper};
pub use crate::core::sync::{Reconcile, Reconciler};
pub use crate::core::types::{RegistryCredential, SyncOutcome};
pub use crate::error::{Error, Result};
