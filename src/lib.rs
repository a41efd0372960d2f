//! regrminer - Regression-chain dataset mining
//!
//! Mines public GitHub history for regression chains (pairs of a
//! Bug-Fixing Commit, BFC, and the Bug-Introducing Commit, BIC, its
//! message points back at), validates them structurally, and labels the
//! underlying defect with a fixed memory-safety taxonomy. Output is CSV
//! rows for an offline research pipeline.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod github;
pub mod mining;
pub mod models;
