//! pmd-report core library.
//!
//! Translates PMD analysis results into uniform error records and reports
//! them.
//!
//! High-level modules:
//! - `record`: the `ErrorRecord` contract and its three PMD-backed variants.
//! - `models`: PMD report shapes and printable record/summary structs.
//! - `check`: One check run, its output mode and exit code.
//! - `collect`: Report loading, translation, exclusions and ordering.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Human/JSON printers.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Error type for everything around the record core.
pub mod check;
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod record;
