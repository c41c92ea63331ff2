use std::collections::BTreeMap;

use crate::error::ValidationError;

/// Static channel -> version list configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    channels: BTreeMap<String, Vec<String>>,
}

impl ChannelMap {
    /// Builds a channel map.
    ///
    /// # Errors
    ///
    /// Returns an error when the map is empty or any channel has no versions.
    pub fn try_new(channels: BTreeMap<String, Vec<String>>) -> Result<Self, ValidationError> {
        if channels.is_empty() {
            return Err(ValidationError::NoChannels);
        }
        if let Some((channel, _)) = channels.iter().find(|(_, versions)| versions.is_empty()) {
            return Err(ValidationError::EmptyChannel {
                channel: channel.clone(),
            });
        }
        Ok(Self { channels })
    }

    #[must_use]
    pub fn versions(&self, channel: &str) -> Option<&[String]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        let channels = [
            ("nightly", 35..=38),
            ("aurora", 35..=37),
            ("beta", 35..=36),
        ]
        .into_iter()
        .map(|(channel, range)| {
            let versions = range.map(|number| format!("{}/{}", channel, number)).collect();
            (channel.to_owned(), versions)
        })
        .collect();
        Self { channels }
    }
}
