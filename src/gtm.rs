use crate::config::GtmConfig;
use crate::engine::scale;
use crate::model::{GtmMonthlyMetrics, Phase};
use clap::ValueEnum;
use std::fmt;

/// Last month of the seed phase.
const SEED_PHASE_END: u32 = 2;
/// Last month of the B2B partnership test.
const B2B_TEST_END: u32 = 4;
/// Last month of the TikTok ramp phase.
const TIKTOK_RAMP_END: u32 = 6;
/// Month the festival partnership fires, once.
const FESTIVAL_MONTH: u32 = 7;

/// TikTok installs run at half rate in their first month.
const TIKTOK_RAMP_FACTOR: f64 = 0.5;
/// Share of non-host users counted as active each month.
const NON_HOST_ACTIVITY: f64 = 0.3;

/// Assumed TikTok/UGC performance tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TikTokScenario {
    Low,
    Mid,
    High,
}

impl TikTokScenario {
    /// Monthly installs this tier assumes, before the first-month ramp.
    pub fn monthly_installs(self, cfg: &GtmConfig) -> u64 {
        match self {
            TikTokScenario::Low => cfg.tiktok_installs_low,
            TikTokScenario::Mid => cfg.tiktok_installs_mid,
            TikTokScenario::High => cfg.tiktok_installs_high,
        }
    }
}

impl fmt::Display for TikTokScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TikTokScenario::Low => "low",
            TikTokScenario::Mid => "mid",
            TikTokScenario::High => "high",
        };
        write!(f, "{name}")
    }
}

/// Go-to-market simulation engine.
///
/// Tracks users per acquisition channel and hosts in two pools: seed hosts
/// (the founding friend group, churning at half the general rate) and
/// organic hosts (everyone acquired through B2B, TikTok, the festival or the
/// web album loop). Deterministic, like [`crate::engine::Engine`].
pub struct GtmEngine {
    cfg: GtmConfig,
    scenario: TikTokScenario,
    month: u32,

    seed_users: u64,
    b2b_users: u64,
    tiktok_users: u64,
    festival_users: u64,
    web_loop_users: u64,

    seed_hosts: u64,
    organic_hosts: u64,

    cumulative_revenue: f64,
}

impl GtmEngine {
    pub fn new(cfg: GtmConfig, scenario: TikTokScenario) -> Self {
        Self {
            cfg,
            scenario,
            month: 0,
            seed_users: 0,
            b2b_users: 0,
            tiktok_users: 0,
            festival_users: 0,
            web_loop_users: 0,
            seed_hosts: 0,
            organic_hosts: 0,
            cumulative_revenue: 0.0,
        }
    }

    /// Advance the model by one month and record the resulting metrics.
    pub fn advance_month(&mut self) -> GtmMonthlyMetrics {
        self.month += 1;
        let month = self.month;

        let mut new_users_from_seed = 0;
        let mut new_users_from_b2b = 0;
        let mut new_users_from_tiktok = 0;
        let mut new_users_from_festival = 0;

        // Per-phase acquisition inputs.
        let phase = if month <= SEED_PHASE_END {
            if month == 1 {
                // Every seed user starts out as a potential host.
                new_users_from_seed = self.cfg.seed_users;
                self.seed_users = self.cfg.seed_users;
                self.seed_hosts = self.cfg.seed_users;
            }
            Phase::Seed
        } else if month <= B2B_TEST_END {
            new_users_from_b2b = self.add_b2b_installs(1);
            Phase::B2bTest
        } else if month <= TIKTOK_RAMP_END {
            let ramp = if month == B2B_TEST_END + 1 {
                TIKTOK_RAMP_FACTOR
            } else {
                1.0
            };
            new_users_from_tiktok =
                self.add_tiktok_installs(scale(self.scenario.monthly_installs(&self.cfg), ramp));
            Phase::TikTok
        } else {
            new_users_from_tiktok =
                self.add_tiktok_installs(self.scenario.monthly_installs(&self.cfg));

            if month == FESTIVAL_MONTH {
                let installs = scale(self.cfg.festival_attendees, self.cfg.festival_install_rate);
                new_users_from_festival = installs;
                self.festival_users += installs;
                self.organic_hosts += scale(installs, self.cfg.festival_host_conversion_rate);
            }
            Phase::FestivalAndTikTok
        };

        // The partnership channel keeps running after the test, with a
        // second partner from the festival phase on.
        if month > B2B_TEST_END {
            let partners = if month <= TIKTOK_RAMP_END { 1 } else { 2 };
            new_users_from_b2b = self.add_b2b_installs(partners);
        }

        // Churn. Friends churn at half the general rate.
        self.seed_hosts = scale(self.seed_hosts, 1.0 - self.cfg.monthly_churn_rate * 0.5);
        self.organic_hosts = scale(self.organic_hosts, 1.0 - self.cfg.monthly_churn_rate);

        // Events and upgrades, per host pool.
        let seed_events = scale(self.seed_hosts, self.cfg.seed_events_per_host_per_month);
        let organic_events = scale(self.organic_hosts, self.cfg.events_per_host_per_month);
        let events_created = seed_events + organic_events;

        let premium_upgrades = scale(seed_events, self.cfg.seed_upgrade_rate)
            + scale(organic_events, self.cfg.general_upgrade_rate);

        let revenue = premium_upgrades as f64 * self.cfg.premium_price;
        self.cumulative_revenue += revenue;

        // Web album loop.
        let web_albums_shared = scale(premium_upgrades, self.cfg.web_share_rate);
        let web_album_views = web_albums_shared * self.cfg.web_viewers_per_share;
        let web_downloads = scale(web_album_views, self.cfg.web_download_rate);
        let installs_from_web = scale(web_downloads, self.cfg.web_download_to_install_rate);

        self.web_loop_users += installs_from_web;
        self.organic_hosts += scale(installs_from_web, self.cfg.web_install_to_host_rate);

        // Totals. Non-host users count as partially active.
        let total_users = self.seed_users
            + self.b2b_users
            + self.tiktok_users
            + self.festival_users
            + self.web_loop_users;
        let hosts = self.seed_hosts + self.organic_hosts;
        let active_users = hosts + scale(total_users.saturating_sub(hosts), NON_HOST_ACTIVITY);

        GtmMonthlyMetrics {
            month,
            phase,
            new_users_from_seed,
            new_users_from_b2b,
            new_users_from_tiktok,
            new_users_from_festival,
            total_users,
            active_users,
            events_created,
            premium_upgrades,
            revenue,
            cumulative_revenue: self.cumulative_revenue,
            web_album_views,
            installs_from_web,
        }
    }

    fn add_b2b_installs(&mut self, partners: u64) -> u64 {
        let attendees = self.cfg.b2b_attendees_per_event * self.cfg.b2b_events_per_month * partners;
        let installs = scale(attendees, self.cfg.b2b_install_rate);
        self.b2b_users += installs;
        self.organic_hosts += scale(installs, self.cfg.b2b_host_conversion_rate);
        installs
    }

    fn add_tiktok_installs(&mut self, installs: u64) -> u64 {
        self.tiktok_users += installs;
        self.organic_hosts += scale(installs, self.cfg.tiktok_host_conversion_rate);
        installs
    }
}

/// Run the go-to-market simulation for the given number of months.
///
/// A zero month count yields an empty sequence.
pub fn simulate(
    cfg: &GtmConfig,
    months: u32,
    scenario: TikTokScenario,
) -> Vec<GtmMonthlyMetrics> {
    let mut engine = GtmEngine::new(cfg.clone(), scenario);
    (0..months).map(|_| engine.advance_month()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Dyadic rates and zero churn, so every truncation is exact.
    fn test_cfg() -> GtmConfig {
        GtmConfig {
            seed_users: 16,
            seed_events_per_host_per_month: 1.0,
            seed_upgrade_rate: 0.5,
            b2b_attendees_per_event: 64,
            b2b_events_per_month: 1,
            b2b_install_rate: 0.25,
            b2b_host_conversion_rate: 0.5,
            tiktok_installs_low: 8,
            tiktok_installs_mid: 16,
            tiktok_installs_high: 32,
            tiktok_host_conversion_rate: 0.5,
            tiktok_upgrade_rate: 0.25,
            festival_attendees: 128,
            festival_install_rate: 0.25,
            festival_host_conversion_rate: 0.5,
            events_per_host_per_month: 0.5,
            general_upgrade_rate: 0.5,
            monthly_churn_rate: 0.0,
            premium_price: 2.0,
            web_share_rate: 0.5,
            web_viewers_per_share: 2,
            web_download_rate: 0.5,
            web_download_to_install_rate: 0.5,
            web_install_to_host_rate: 0.5,
        }
    }

    #[test]
    fn zero_months_yields_empty_sequence() {
        let results = simulate(&GtmConfig::default(), 0, TikTokScenario::Mid);
        assert!(results.is_empty());
    }

    #[test]
    fn phases_follow_the_schedule() {
        let results = simulate(&GtmConfig::default(), 9, TikTokScenario::Mid);
        let phases: Vec<_> = results.iter().map(|m| m.phase).collect();

        assert_eq!(
            phases,
            [
                Phase::Seed,
                Phase::Seed,
                Phase::B2bTest,
                Phase::B2bTest,
                Phase::TikTok,
                Phase::TikTok,
                Phase::FestivalAndTikTok,
                Phase::FestivalAndTikTok,
                Phase::FestivalAndTikTok,
            ]
        );
    }

    #[test]
    fn seed_pool_arrives_in_month_one_only() {
        let results = simulate(&test_cfg(), 4, TikTokScenario::Mid);

        assert_eq!(results[0].new_users_from_seed, 16);
        for metrics in &results[1..] {
            assert_eq!(metrics.new_users_from_seed, 0);
        }
    }

    #[test]
    fn festival_fires_once_in_month_seven() {
        let results = simulate(&test_cfg(), 10, TikTokScenario::Mid);

        for metrics in &results {
            let expected = if metrics.month == 7 { 32 } else { 0 };
            assert_eq!(metrics.new_users_from_festival, expected);
        }
    }

    #[test]
    fn tiktok_ramps_at_half_rate_in_month_five() {
        let results = simulate(&test_cfg(), 8, TikTokScenario::Mid);

        assert_eq!(results[3].new_users_from_tiktok, 0);
        assert_eq!(results[4].new_users_from_tiktok, 8);
        assert_eq!(results[5].new_users_from_tiktok, 16);
        assert_eq!(results[6].new_users_from_tiktok, 16);
    }

    #[test]
    fn b2b_doubles_with_the_second_partner() {
        let results = simulate(&test_cfg(), 8, TikTokScenario::Mid);

        assert_eq!(results[1].new_users_from_b2b, 0);
        assert_eq!(results[2].new_users_from_b2b, 16);
        assert_eq!(results[4].new_users_from_b2b, 16);
        assert_eq!(results[6].new_users_from_b2b, 32);
    }

    #[test]
    fn early_months_match_hand_computation() {
        let results = simulate(&test_cfg(), 3, TikTokScenario::Mid);

        // Month 1: 16 seed hosts create 16 events, 8 upgrades at 2.0 each;
        // the web loop yields 4 shares, 8 views, 4 downloads, 2 installs.
        let m1 = &results[0];
        assert_eq!(m1.events_created, 16);
        assert_eq!(m1.premium_upgrades, 8);
        assert_eq!(m1.revenue, 16.0);
        assert_eq!(m1.web_album_views, 8);
        assert_eq!(m1.installs_from_web, 2);
        assert_eq!(m1.total_users, 18);

        // Month 2: one web-loop host now contributes organic events.
        let m2 = &results[1];
        assert_eq!(m2.events_created, 16);
        assert_eq!(m2.cumulative_revenue, 32.0);
        assert_eq!(m2.total_users, 20);

        // Month 3: 16 B2B installs, 8 of them future hosts.
        let m3 = &results[2];
        assert_eq!(m3.new_users_from_b2b, 16);
        assert_eq!(m3.events_created, 21);
        assert_eq!(m3.premium_upgrades, 10);
        assert_eq!(m3.cumulative_revenue, 52.0);
        assert_eq!(m3.total_users, 38);
    }

    #[test]
    fn cumulative_revenue_is_non_decreasing() {
        let results = simulate(&GtmConfig::default(), 18, TikTokScenario::High);
        for pair in results.windows(2) {
            assert!(pair[1].cumulative_revenue >= pair[0].cumulative_revenue);
        }
    }

    #[test]
    fn identical_inputs_reproduce_identical_output() {
        let cfg = GtmConfig::default();
        assert_eq!(
            simulate(&cfg, 12, TikTokScenario::Mid),
            simulate(&cfg, 12, TikTokScenario::Mid)
        );
    }
}
