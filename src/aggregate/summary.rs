/// Running totals over the reporting window. These feed the textual summary
/// only and never the chart series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    pub shield: ShieldTotals,
    pub enabled: EnabledTotals,
    pub events: EventTotals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShieldTotals {
    pub loads: u64,
    pub loaded: u64,
    pub blocked: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnabledTotals {
    pub sessions: u64,
    pub enabled_sessions: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTotals {
    pub disabled_clicks: u64,
    pub reenabled_clicks: u64,
}

impl ShieldTotals {
    pub const fn add(&mut self, loads: u64, loaded: u64, blocked: u64) {
        self.loads = self.loads.saturating_add(loads);
        self.loaded = self.loaded.saturating_add(loaded);
        self.blocked = self.blocked.saturating_add(blocked);
    }
}

impl EnabledTotals {
    pub const fn add(&mut self, sessions: u64, enabled_sessions: u64) {
        self.sessions = self.sessions.saturating_add(sessions);
        self.enabled_sessions = self.enabled_sessions.saturating_add(enabled_sessions);
    }
}

impl EventTotals {
    pub const fn add(&mut self, disabled_clicks: u64, reenabled_clicks: u64) {
        self.disabled_clicks = self.disabled_clicks.saturating_add(disabled_clicks);
        self.reenabled_clicks = self.reenabled_clicks.saturating_add(reenabled_clicks);
    }
}

impl SummaryTotals {
    /// Human-readable summary lines; sections with no data are omitted.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.shield.loads != 0 {
            lines.push(format!("Total loads: {}", self.shield.loads));
            lines.push(format!("Blocked (shield showing): {}", self.shield.blocked));
            lines.push(format!(
                "Loaded (strike shield showing): {}",
                self.shield.loaded
            ));
        }
        if self.enabled.enabled_sessions != 0 {
            lines.push(format!("Total sessions: {}", self.enabled.sessions));
            lines.push(format!(
                "Enabled sessions: {}",
                self.enabled.enabled_sessions
            ));
        }
        if self.events.disabled_clicks != 0 {
            lines.push(format!("Disabled clicks: {}", self.events.disabled_clicks));
            lines.push(format!(
                "Re-enabled clicks: {}",
                self.events.reenabled_clicks
            ));
        }
        lines
    }
}
