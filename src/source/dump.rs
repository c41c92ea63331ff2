use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::histogram::HistogramEvolution;

use super::{MeasureDescriptor, MeasureListing};

/// On-disk / over-the-wire layout of a telemetry export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryDump {
    #[serde(default)]
    pub versions: BTreeMap<String, BTreeMap<String, MeasureDump>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureDump {
    #[serde(default)]
    pub descriptor: MeasureDescriptor,
    #[serde(default)]
    pub evolution: HistogramEvolution,
}

impl TelemetryDump {
    #[must_use]
    pub fn listing(&self, version: &str) -> Option<MeasureListing> {
        self.versions.get(version).map(|measures| {
            measures
                .iter()
                .map(|(name, dump)| (name.clone(), dump.descriptor.clone()))
                .collect()
        })
    }

    #[must_use]
    pub fn evolution(&self, version: &str, measure: &str) -> Option<&HistogramEvolution> {
        self.versions
            .get(version)
            .and_then(|measures| measures.get(measure))
            .map(|dump| &dump.evolution)
    }
}
