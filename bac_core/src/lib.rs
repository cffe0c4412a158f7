#![forbid(unsafe_code)]

//! Core domain model and business logic for the BAC estimator.
//!
//! This crate provides:
//! - Domain types (drinks, subject, intake, results)
//! - The built-in drink catalog
//! - Widmark estimation and penalty classification
//! - Decay-curve sampling
//! - Form input validation and state echo
//! - Reporting (JSON bundle, CSV curve export)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod engine;
pub mod curve;
pub mod form;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::build_default_catalog;
pub use config::Config;
pub use engine::{classify, estimate, SAFE_DRIVING_LIMIT};
pub use curve::{decay_curve, CurveSettings};
pub use form::{FormInput, FormState};
pub use report::EstimateReport;
