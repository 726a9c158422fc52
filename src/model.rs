//! Simulation record types.

use std::fmt;

/// Metrics for a single month of the growth loop simulation.
///
/// Fully determined by the configuration and the population state entering
/// the month; immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMetrics {
    /// Month index, starting at 1.
    pub month: u32,

    /// Hosts ever acquired.
    pub total_hosts: u64,
    /// Hosts active at the end of the month.
    pub active_hosts: u64,
    /// App users ever acquired.
    pub total_app_users: u64,

    /// Events created this month.
    pub events_created: u64,
    /// Attendees across all events this month.
    pub total_attendees: u64,
    /// Installs by event attendees who lacked the app.
    pub installs_from_events: u64,

    /// Post-reveal premium upgrades this month.
    pub premium_upgrades: u64,
    /// Upgrade revenue this month.
    pub revenue: f64,
    /// Upgrade revenue since month 1.
    pub cumulative_revenue: f64,

    /// Web albums shared by premium hosts.
    pub web_albums_shared: u64,
    /// Views of shared albums by non-app users.
    pub web_album_views: u64,
    /// Photo downloads by album viewers.
    pub web_downloads: u64,
    /// Installs by downloaders.
    pub installs_from_web: u64,
    /// Web installs that became hosts.
    pub new_hosts_from_web: u64,

    /// Upgrades per event (0 when no events).
    pub conversion_rate: f64,
    /// New hosts per pre-existing active host (0 when none).
    pub viral_coefficient: f64,
}

/// Go-to-market phase a given month falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Seeding the app with the founding friend group.
    Seed,
    /// B2B partnership test with an event organizer.
    B2bTest,
    /// Organic TikTok/UGC ramp.
    TikTok,
    /// Festival partnership on top of the running channels.
    FestivalAndTikTok,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Seed => "Seed (friends)",
            Phase::B2bTest => "B2B test",
            Phase::TikTok => "TikTok/UGC",
            Phase::FestivalAndTikTok => "Festival + TikTok",
        };
        write!(f, "{name}")
    }
}

/// Metrics for a single month of the go-to-market simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct GtmMonthlyMetrics {
    /// Month index, starting at 1.
    pub month: u32,
    /// Phase this month falls in.
    pub phase: Phase,

    /// New users from the seed group this month.
    pub new_users_from_seed: u64,
    /// New users from partner events this month.
    pub new_users_from_b2b: u64,
    /// New users from TikTok/UGC this month.
    pub new_users_from_tiktok: u64,
    /// New users from the festival this month.
    pub new_users_from_festival: u64,

    /// Users ever acquired, across all channels.
    pub total_users: u64,
    /// Users counted as active at the end of the month.
    pub active_users: u64,
    /// Events created this month.
    pub events_created: u64,
    /// Premium upgrades this month.
    pub premium_upgrades: u64,
    /// Upgrade revenue this month.
    pub revenue: f64,
    /// Upgrade revenue since month 1.
    pub cumulative_revenue: f64,

    /// Views of shared web albums by non-app users.
    pub web_album_views: u64,
    /// Installs attributed to the web album loop.
    pub installs_from_web: u64,
}
