use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

/// Writes a telemetry dump whose versions each carry one in-window day of
/// shield, enabled, and event histograms.
///
/// # Errors
///
/// Returns an error if the dump cannot be serialized or written.
pub fn write_dump(path: &Path, versions: &[&str]) -> Result<(), String> {
    let mut entries = serde_json::Map::new();
    for version in versions {
        entries.insert(
            (*version).to_owned(),
            serde_json::json!({
                "TRACKING_PROTECTION_SHIELD": {
                    "descriptor": { "kind": "enumerated" },
                    "evolution": [evolution_day(&[150, 400, 450, 50])]
                },
                "TRACKING_PROTECTION_ENABLED": {
                    "evolution": [evolution_day(&[1200, 300])]
                },
                "TRACKING_PROTECTION_EVENTS": {
                    "evolution": [evolution_day(&[40, 6, 2])]
                },
                "UNRELATED_PROBE": { "evolution": [] }
            }),
        );
    }
    let dump = serde_json::json!({ "versions": entries });
    let bytes =
        serde_json::to_vec_pretty(&dump).map_err(|err| format!("serialize dump failed: {}", err))?;
    std::fs::write(path, bytes).map_err(|err| format!("write dump failed: {}", err))
}

fn evolution_day(counts: &[u64]) -> serde_json::Value {
    let buckets: Vec<serde_json::Value> = counts
        .iter()
        .enumerate()
        .map(|(start, count)| serde_json::json!({ "start": start, "count": count }))
        .collect();
    serde_json::json!({ "date": "2014-12-28T00:00:00Z", "buckets": buckets })
}

/// Runs the `tpdash` binary with quiet logging.
///
/// # Errors
///
/// Returns an error if the binary cannot be located or spawned.
pub fn run_tpdash<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = tpdash_bin()?;
    Command::new(bin)
        .args(args)
        .env_remove("TPDASH_LOG")
        .env_remove("TPDASH_CONFIG")
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run tpdash failed: {}", err))
}

fn tpdash_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_tpdash").map_or_else(
        || Err("CARGO_BIN_EXE_tpdash missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}
