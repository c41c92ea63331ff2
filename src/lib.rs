//! Core library for the `tpdash` CLI.
//!
//! The pipeline fetches tracking-protection histogram evolutions for each
//! version of a release channel, reduces them into nine dashboard series, and
//! hands the normalized series to a rendering sink in a single publish. The
//! primary user-facing interface is the `tpdash` command-line application.
pub mod aggregate;
pub mod args;
pub mod charts;
pub mod config;
pub mod domain;
pub mod entry;
pub mod error;
pub mod histogram;
mod logger;
pub mod orchestrator;
pub mod series;
pub mod sinks;
pub mod source;
