use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ValidationError;

/// How the refresh barrier treats failed branches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinPolicy {
    /// Any failed list or fetch aborts the publish.
    AllSucceed,
    /// Publish whatever the successful branches produced and report the rest.
    #[default]
    AllSettled,
}

impl JoinPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllSucceed => "all-succeed",
            Self::AllSettled => "all-settled",
        }
    }
}

impl fmt::Display for JoinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinPolicy {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all-succeed" | "all_succeed" | "strict" => Ok(Self::AllSucceed),
            "all-settled" | "all_settled" | "tolerant" => Ok(Self::AllSettled),
            _ => Err(ValidationError::InvalidJoinPolicy {
                value: value.to_owned(),
            }),
        }
    }
}
