use crate::config::GrowthConfig;
use crate::model::MonthlyMetrics;

/// Growth loop simulation engine.
///
/// Holds the configuration and the population accumulators threaded from one
/// month to the next, and advances the model one month at a time. The model
/// is deterministic: re-running with the same configuration reproduces
/// identical output.
pub struct Engine {
    cfg: GrowthConfig,
    month: u32,
    total_hosts: u64,
    active_hosts: u64,
    total_app_users: u64,
    cumulative_revenue: f64,
}

impl Engine {
    /// Create a new `Engine` seeded with the configured initial hosts.
    pub fn new(cfg: GrowthConfig) -> Self {
        let initial_hosts = cfg.initial_hosts;
        Self {
            cfg,
            month: 0,
            total_hosts: initial_hosts,
            active_hosts: initial_hosts,
            total_app_users: initial_hosts,
            cumulative_revenue: 0.0,
        }
    }

    /// Advance the model by one month and record the resulting metrics.
    ///
    /// Every count-times-rate product truncates toward zero immediately;
    /// rounding bias therefore compounds across months.
    pub fn advance_month(&mut self) -> MonthlyMetrics {
        self.month += 1;

        // Event creation.
        let events_created = scale(self.active_hosts, self.cfg.events_per_host_per_month);
        let total_attendees = events_created * self.cfg.avg_attendees_per_event;

        // Attendees who lacked the app may install it after the event.
        let attendees_without_app =
            scale(total_attendees, 1.0 - self.cfg.attendees_already_have_app);
        let installs_from_events =
            scale(attendees_without_app, self.cfg.event_invite_install_rate);

        // Post-reveal monetization.
        let premium_upgrades = scale(events_created, self.cfg.post_reveal_upgrade_rate);
        let revenue = premium_upgrades as f64 * self.cfg.premium_price;
        self.cumulative_revenue += revenue;

        // Web album loop: share, view, download, install, host.
        let web_albums_shared = scale(premium_upgrades, self.cfg.web_album_share_rate);
        let web_album_views = web_albums_shared * self.cfg.viewers_per_share;
        let web_downloads = scale(web_album_views, self.cfg.web_download_rate);
        let installs_from_web = scale(web_downloads, self.cfg.download_to_install_rate);
        let new_hosts_from_web = scale(installs_from_web, self.cfg.install_to_host_rate);

        // Retention decay, then new hosts from both channels.
        self.active_hosts = scale(self.active_hosts, self.cfg.host_monthly_retention);

        let new_hosts_from_events =
            scale(installs_from_events, self.cfg.event_install_to_host_rate);
        let new_hosts = new_hosts_from_web + new_hosts_from_events;

        self.total_hosts += new_hosts;
        self.active_hosts += new_hosts;
        self.total_app_users += installs_from_events + installs_from_web;

        // Derived ratios, zero when the denominator is zero.
        let conversion_rate = ratio(premium_upgrades, events_created);
        let viral_coefficient = ratio(new_hosts, self.active_hosts - new_hosts);

        MonthlyMetrics {
            month: self.month,
            total_hosts: self.total_hosts,
            active_hosts: self.active_hosts,
            total_app_users: self.total_app_users,
            events_created,
            total_attendees,
            installs_from_events,
            premium_upgrades,
            revenue,
            cumulative_revenue: self.cumulative_revenue,
            web_albums_shared,
            web_album_views,
            web_downloads,
            installs_from_web,
            new_hosts_from_web,
            conversion_rate,
            viral_coefficient,
        }
    }
}

/// Run the growth simulation for the given number of months.
///
/// A zero month count yields an empty sequence.
pub fn simulate(cfg: &GrowthConfig, months: u32) -> Vec<MonthlyMetrics> {
    let mut engine = Engine::new(cfg.clone());
    (0..months).map(|_| engine.advance_month()).collect()
}

/// Scale a count by a rate, truncating toward zero.
pub(crate) fn scale(count: u64, rate: f64) -> u64 {
    (count as f64 * rate) as u64
}

/// Quotient of two counts, 0 when the denominator is 0.
pub(crate) fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_months_yields_empty_sequence() {
        let results = simulate(&GrowthConfig::default(), 0);
        assert!(results.is_empty());
    }

    #[test]
    fn first_month_matches_launch_model() {
        let results = simulate(&GrowthConfig::default(), 1);
        let first = &results[0];

        assert_eq!(first.events_created, 40);
        assert_eq!(first.total_attendees, 320);
        assert_eq!(first.premium_upgrades, 10);
        assert!((first.revenue - 79.9).abs() < 1e-9);
        assert!((first.conversion_rate - 0.25).abs() < 1e-12);

        // 50 hosts decay to 42, then 26 of the 133 event installs host.
        assert_eq!(first.installs_from_events, 133);
        assert_eq!(first.active_hosts, 68);
        assert_eq!(first.total_hosts, 76);
        assert_eq!(first.total_app_users, 184);
    }

    #[test]
    fn zero_initial_population_stays_at_zero() {
        let cfg = GrowthConfig {
            initial_hosts: 0,
            ..GrowthConfig::default()
        };

        for metrics in simulate(&cfg, 12) {
            assert_eq!(metrics.events_created, 0);
            assert_eq!(metrics.premium_upgrades, 0);
            assert_eq!(metrics.revenue, 0.0);
            assert_eq!(metrics.viral_coefficient, 0.0);
        }
    }

    #[test]
    fn events_bounded_by_entering_population() {
        let cfg = GrowthConfig::default();
        let mut entering = cfg.initial_hosts;

        for metrics in simulate(&cfg, 24) {
            assert!(metrics.events_created <= entering);
            entering = metrics.active_hosts;
        }
    }

    #[test]
    fn cumulative_revenue_is_non_decreasing() {
        let results = simulate(&GrowthConfig::default(), 24);
        for pair in results.windows(2) {
            assert!(pair[1].cumulative_revenue >= pair[0].cumulative_revenue);
        }
    }

    #[test]
    fn identical_inputs_reproduce_identical_output() {
        let cfg = GrowthConfig::default();
        assert_eq!(simulate(&cfg, 18), simulate(&cfg, 18));
    }

    #[test]
    fn retention_truncates_toward_zero() {
        // 50 * 0.85 = 42.5 must floor to 42, not round to 43.
        assert_eq!(scale(50, 0.85), 42);
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(5, 0), 0.0);
        assert_eq!(ratio(0, 0), 0.0);
        assert!((ratio(1, 4) - 0.25).abs() < 1e-12);
    }
}
