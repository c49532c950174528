//! Embeddable core library for beanwire.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a build driver or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`ClassSource`](ports::ClassSource) loads class batches
//! - [`WritePort`](ports::WritePort) writes files and creates directories
//!
//! The [`adapters`] module provides filesystem-backed and in-memory implementations.
//!
//! # Entry points
//!
//! - [`run_plan`](pipeline::run_plan) classifies every class and builds a report
//! - [`write_plan_artifacts`](pipeline::write_plan_artifacts) writes the outcome to disk

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the domain's mode so callers don't need beanwire-domain directly.
pub use beanwire_domain::ProcessingMode;
