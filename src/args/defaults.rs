use std::path::PathBuf;

pub(crate) const DEFAULT_CHANNEL: &str = "nightly";
pub(crate) const DEFAULT_MIN_DATE: &str = "2014-12-24";
pub(crate) const DEFAULT_END_DATE: &str = "2015-01-01";
pub(crate) const DEFAULT_FETCH_TIMEOUT: &str = "30s";

pub(crate) fn default_charts_path() -> String {
    default_base_dir()
        .join("charts")
        .to_string_lossy()
        .into_owned()
}

fn default_base_dir() -> PathBuf {
    if let Some(home) = user_home_dir() {
        return home.join(".tpdash");
    }

    PathBuf::from(".tpdash")
}

fn user_home_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        if let Some(value) = std::env::var_os("USERPROFILE") {
            return Some(PathBuf::from(value));
        }
    }

    std::env::var_os("HOME").map(PathBuf::from)
}
