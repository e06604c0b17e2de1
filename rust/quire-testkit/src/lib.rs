//! Test utilities and helpers for the Quire project.
//!
//! This crate provides:
//! - Deterministic generation of synthetic verse text
//! - Scratch directory management for module-building tests
//!
//! It is intended for use within the project's test suites and
//! development tools.

pub mod data_gen;
pub mod dirs;
