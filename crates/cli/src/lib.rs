//! # CLM CLI
//!
//! Command implementations behind the `clm` binary.

pub mod commands;
pub mod context;
