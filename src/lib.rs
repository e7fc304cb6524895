//! md-provision: bulk provisioning of MotherDuck service accounts and tokens
//!
//! One-shot operator tool that creates one service account per store and
//! mints a read-write token for each, against the MotherDuck admin REST
//! API.
//!
//! # Architecture
//!
//! - **Executor**: sends bearer-authenticated JSON requests and logs full
//!   request/response detail with the credential masked.
//! - **Provisioning**: account creation, token issuance, and the
//!   per-store loop that isolates failures to a single store.
//! - **Report**: renders the env-file lines and summary printed at the
//!   end of a run.

pub mod error;
pub mod executor;
pub mod provision;
pub mod report;

pub use error::{ProvisionError, Result};
