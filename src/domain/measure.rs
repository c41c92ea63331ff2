use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The closed set of telemetry measures the pipeline knows how to reduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasureKind {
    /// Shield state per page load: not shown, loaded, blocked, mixed content.
    Shield,
    /// Whether protection was enabled for a session: disabled, enabled.
    Enabled,
    /// Shield doorhanger actions: no action, disable click, re-enable click.
    Events,
}

impl MeasureKind {
    pub const ALL: [Self; 3] = [Self::Shield, Self::Enabled, Self::Events];

    /// Number of categories a histogram of this kind carries.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Shield => 4,
            Self::Enabled => 2,
            Self::Events => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shield => "shield",
            Self::Enabled => "enabled",
            Self::Events => "events",
        }
    }

    /// Name the telemetry source uses for this measure unless configured otherwise.
    #[must_use]
    pub const fn default_measure_name(self) -> &'static str {
        match self {
            Self::Shield => "TRACKING_PROTECTION_SHIELD",
            Self::Enabled => "TRACKING_PROTECTION_ENABLED",
            Self::Events => "TRACKING_PROTECTION_EVENTS",
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasureKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "shield" => Ok(Self::Shield),
            "enabled" => Ok(Self::Enabled),
            "events" => Ok(Self::Events),
            _ => Err(ValidationError::InvalidMeasureKind {
                value: value.to_owned(),
            }),
        }
    }
}

/// Maps source measure names onto reducer kinds.
///
/// Every kind is mapped exactly once; names the source lists that are not in
/// the registry are ignored by the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureRegistry {
    names: BTreeMap<String, MeasureKind>,
}

impl MeasureRegistry {
    /// Builds a registry from a name -> kind mapping.
    ///
    /// # Errors
    ///
    /// Returns an error when a kind is missing or mapped more than once.
    pub fn try_new(names: BTreeMap<String, MeasureKind>) -> Result<Self, ValidationError> {
        for kind in MeasureKind::ALL {
            let count = names.values().filter(|mapped| **mapped == kind).count();
            if count != 1 {
                return Err(ValidationError::MeasureKindMapping {
                    kind: kind.as_str().to_owned(),
                    count,
                });
            }
        }
        Ok(Self { names })
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<MeasureKind> {
        self.names.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = (&str, MeasureKind)> {
        self.names.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}

impl Default for MeasureRegistry {
    fn default() -> Self {
        let names = MeasureKind::ALL
            .into_iter()
            .map(|kind| (kind.default_measure_name().to_owned(), kind))
            .collect();
        Self { names }
    }
}
