//! Integration test suite for kube-chartgen
//!
//! End-to-end tests over the public library entry point and the `chartgen`
//! binary, each in its own scratch directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate**: `extract_and_generate` from manifest bytes to chart tree
//! - **cli**: the `chartgen` binary, its output and exit status

mod cli;
mod generate;
