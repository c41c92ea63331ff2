//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;


pub use cli::{DashArgs, SourceChoice};

#[cfg(test)]
pub(crate) use defaults::default_charts_path;
pub(crate) use parsers::{parse_date, parse_duration};
