//! Derived analyses over configurations and simulation results.

use crate::config::{GrowthConfig, GtmConfig};
use crate::engine;
use crate::gtm::{self, TikTokScenario};
use crate::model::{GtmMonthlyMetrics, MonthlyMetrics, Phase};

/// Assumed active lifetime of a host, in months.
const HOST_LIFETIME_MONTHS: f64 = 6.0;
/// Assumed steady-state viral coefficient for the LTV adjustment.
const ASSUMED_VIRAL_K: f64 = 0.1;
/// Sustainable LTV:CAC ratio used for the acquisition ceiling.
const LTV_CAC_RATIO: f64 = 3.0;

/// Months covered by the preset scenario comparison.
pub const SCENARIO_MONTHS: u32 = 12;

/// Host lifetime value and the acquisition cost it can support.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitEconomics {
    pub avg_events_per_host: f64,
    pub avg_upgrades_per_host: f64,
    pub ltv_direct: f64,
    pub viral_multiplier: f64,
    pub ltv_with_virality: f64,
    pub cac_ceiling: f64,
}

impl UnitEconomics {
    pub fn for_config(cfg: &GrowthConfig) -> Self {
        let avg_events_per_host = cfg.events_per_host_per_month * HOST_LIFETIME_MONTHS;
        let avg_upgrades_per_host = avg_events_per_host * cfg.post_reveal_upgrade_rate;
        let ltv_direct = avg_upgrades_per_host * cfg.premium_price;

        // Each host brings in more hosts through the web loop; a geometric
        // series at the assumed coefficient folds that into the LTV.
        let viral_multiplier = 1.0 / (1.0 - ASSUMED_VIRAL_K);
        let ltv_with_virality = ltv_direct * viral_multiplier;
        let cac_ceiling = ltv_with_virality / LTV_CAC_RATIO;

        Self {
            avg_events_per_host,
            avg_upgrades_per_host,
            ltv_direct,
            viral_multiplier,
            ltv_with_virality,
            cac_ceiling,
        }
    }
}

/// The growth loop funnel evaluated per 100 events, in floating point.
///
/// Keeps fractional counts, unlike the month-by-month engine.
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelBreakdown {
    pub events: f64,
    pub upgrades: f64,
    pub upgrade_revenue: f64,
    pub albums_shared: f64,
    pub album_views: f64,
    pub downloads: f64,
    pub installs: f64,
    pub new_hosts: f64,
    /// New hosts per existing host per month at these rates.
    pub viral_coefficient: f64,
}

impl FunnelBreakdown {
    pub fn for_config(cfg: &GrowthConfig) -> Self {
        const EVENTS: f64 = 100.0;

        let upgrades = EVENTS * cfg.post_reveal_upgrade_rate;
        let upgrade_revenue = upgrades * cfg.premium_price;
        let albums_shared = upgrades * cfg.web_album_share_rate;
        let album_views = albums_shared * cfg.viewers_per_share as f64;
        let downloads = album_views * cfg.web_download_rate;
        let installs = downloads * cfg.download_to_install_rate;
        let new_hosts = installs * cfg.install_to_host_rate;

        let new_hosts_per_event = new_hosts / EVENTS;
        let viral_coefficient = new_hosts_per_event * cfg.events_per_host_per_month;

        Self {
            events: EVENTS,
            upgrades,
            upgrade_revenue,
            albums_shared,
            album_views,
            downloads,
            installs,
            new_hosts,
            viral_coefficient,
        }
    }
}

/// Run the named what-if presets of the growth model, 12 months each.
pub fn growth_scenarios(base: &GrowthConfig) -> Vec<(String, Vec<MonthlyMetrics>)> {
    let presets = [
        ("Base case".to_string(), base.clone()),
        (
            "Conservative".to_string(),
            GrowthConfig {
                post_reveal_upgrade_rate: 0.15,
                web_album_share_rate: 0.5,
                download_to_install_rate: 0.10,
                install_to_host_rate: 0.2,
                ..base.clone()
            },
        ),
        (
            "Optimistic".to_string(),
            GrowthConfig {
                post_reveal_upgrade_rate: 0.35,
                web_album_share_rate: 0.85,
                download_to_install_rate: 0.20,
                install_to_host_rate: 0.4,
                avg_attendees_per_event: 12,
                ..base.clone()
            },
        ),
        (
            "200 initial hosts".to_string(),
            GrowthConfig {
                initial_hosts: 200,
                ..base.clone()
            },
        ),
        (
            "£4.99 @ 40% conv".to_string(),
            GrowthConfig {
                premium_price: 4.99,
                post_reveal_upgrade_rate: 0.40,
                ..base.clone()
            },
        ),
        (
            "£12.99 @ 15% conv".to_string(),
            GrowthConfig {
                premium_price: 12.99,
                post_reveal_upgrade_rate: 0.15,
                ..base.clone()
            },
        ),
    ];

    presets
        .into_iter()
        .map(|(name, cfg)| (name, engine::simulate(&cfg, SCENARIO_MONTHS)))
        .collect()
}

/// Per-channel install and host yields with the revenue a host is worth.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelEconomics {
    pub seed_ltv_per_user: f64,

    pub b2b_installs_per_event: f64,
    pub b2b_hosts_per_event: f64,
    /// LTV of an organically-acquired host at the general rates.
    pub host_ltv: f64,
    pub b2b_ltv_per_event: f64,

    pub tiktok_hosts_per_100_installs: f64,
    pub tiktok_host_ltv: f64,
    pub tiktok_ltv_per_100_installs: f64,

    pub festival_installs: f64,
    pub festival_hosts: f64,
    pub festival_ltv: f64,
}

impl ChannelEconomics {
    pub fn for_config(cfg: &GtmConfig) -> Self {
        let seed_ltv_per_user = cfg.seed_events_per_host_per_month
            * HOST_LIFETIME_MONTHS
            * cfg.seed_upgrade_rate
            * cfg.premium_price;

        let host_ltv = cfg.events_per_host_per_month
            * HOST_LIFETIME_MONTHS
            * cfg.general_upgrade_rate
            * cfg.premium_price;

        let b2b_installs_per_event = cfg.b2b_attendees_per_event as f64 * cfg.b2b_install_rate;
        let b2b_hosts_per_event = b2b_installs_per_event * cfg.b2b_host_conversion_rate;
        let b2b_ltv_per_event = b2b_hosts_per_event * host_ltv;

        let tiktok_hosts_per_100_installs = 100.0 * cfg.tiktok_host_conversion_rate;
        let tiktok_host_ltv = cfg.events_per_host_per_month
            * HOST_LIFETIME_MONTHS
            * cfg.tiktok_upgrade_rate
            * cfg.premium_price;
        let tiktok_ltv_per_100_installs = tiktok_hosts_per_100_installs * tiktok_host_ltv;

        let festival_installs = cfg.festival_attendees as f64 * cfg.festival_install_rate;
        let festival_hosts = festival_installs * cfg.festival_host_conversion_rate;
        let festival_ltv = festival_hosts * host_ltv;

        Self {
            seed_ltv_per_user,
            b2b_installs_per_event,
            b2b_hosts_per_event,
            host_ltv,
            b2b_ltv_per_event,
            tiktok_hosts_per_100_installs,
            tiktok_host_ltv,
            tiktok_ltv_per_100_installs,
            festival_installs,
            festival_hosts,
            festival_ltv,
        }
    }
}

/// A user or revenue target and the month it was first reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub label: String,
    pub reached: Option<(u32, Phase)>,
}

/// First months reaching the standard user and revenue targets.
pub fn milestones(results: &[GtmMonthlyMetrics]) -> Vec<Milestone> {
    const USER_TARGETS: [u64; 4] = [100, 500, 1_000, 5_000];
    const REVENUE_TARGETS: [f64; 3] = [1_000.0, 5_000.0, 10_000.0];

    let mut milestones = Vec::new();

    for target in USER_TARGETS {
        let reached = results
            .iter()
            .find(|m| m.total_users >= target)
            .map(|m| (m.month, m.phase));
        milestones.push(Milestone {
            label: format!("{target} users"),
            reached,
        });
    }

    for target in REVENUE_TARGETS {
        let reached = results
            .iter()
            .find(|m| m.cumulative_revenue >= target)
            .map(|m| (m.month, m.phase));
        milestones.push(Milestone {
            label: format!("£{target:.0} revenue"),
            reached,
        });
    }

    milestones
}

/// Run all three TikTok tiers over the same configuration.
pub fn gtm_scenarios(
    cfg: &GtmConfig,
    months: u32,
) -> Vec<(TikTokScenario, Vec<GtmMonthlyMetrics>)> {
    [TikTokScenario::Low, TikTokScenario::Mid, TikTokScenario::High]
        .into_iter()
        .map(|scenario| (scenario, gtm::simulate(cfg, months, scenario)))
        .collect()
}

/// Final user count and revenue of one what-if run.
#[derive(Debug, Clone, PartialEq)]
pub struct WhatIfOutcome {
    pub label: String,
    pub total_users: u64,
    pub cumulative_revenue: f64,
}

/// The base case and its single-parameter what-if variants.
#[derive(Debug, Clone, PartialEq)]
pub struct WhatIfReport {
    pub base: WhatIfOutcome,
    pub variants: Vec<WhatIfOutcome>,
}

/// Compare the mid-scenario base against four single-parameter variants.
pub fn what_if(cfg: &GtmConfig, months: u32) -> WhatIfReport {
    let base = run_what_if("Base case".to_string(), cfg, months, TikTokScenario::Mid);

    let variants = vec![
        run_what_if(
            format!(
                "800-person partner events (not {})",
                cfg.b2b_attendees_per_event
            ),
            &GtmConfig {
                b2b_attendees_per_event: 800,
                ..cfg.clone()
            },
            months,
            TikTokScenario::Mid,
        ),
        run_what_if(
            format!(
                "TikTok goes viral ({}/month)",
                cfg.tiktok_installs_high
            ),
            cfg,
            months,
            TikTokScenario::High,
        ),
        run_what_if(
            "35% general upgrade rate (not 25%)".to_string(),
            &GtmConfig {
                general_upgrade_rate: 0.35,
                ..cfg.clone()
            },
            months,
            TikTokScenario::Mid,
        ),
        run_what_if(
            format!(
                "15,000-person festival (not {})",
                cfg.festival_attendees
            ),
            &GtmConfig {
                festival_attendees: 15_000,
                ..cfg.clone()
            },
            months,
            TikTokScenario::Mid,
        ),
    ];

    WhatIfReport { base, variants }
}

fn run_what_if(
    label: String,
    cfg: &GtmConfig,
    months: u32,
    scenario: TikTokScenario,
) -> WhatIfOutcome {
    let results = gtm::simulate(cfg, months, scenario);
    let (total_users, cumulative_revenue) = results
        .last()
        .map(|m| (m.total_users, m.cumulative_revenue))
        .unwrap_or((0, 0.0));

    WhatIfOutcome {
        label,
        total_users,
        cumulative_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_economics_match_baseline_assumptions() {
        let econ = UnitEconomics::for_config(&GrowthConfig::default());

        assert!((econ.avg_events_per_host - 4.8).abs() < 1e-9);
        assert!((econ.avg_upgrades_per_host - 1.2).abs() < 1e-9);
        assert!((econ.ltv_direct - 9.588).abs() < 1e-9);
        assert!((econ.viral_multiplier - 1.0 / 0.9).abs() < 1e-12);
        assert!((econ.cac_ceiling - econ.ltv_with_virality / 3.0).abs() < 1e-12);
    }

    #[test]
    fn funnel_breakdown_matches_baseline_assumptions() {
        let funnel = FunnelBreakdown::for_config(&GrowthConfig::default());

        assert!((funnel.upgrades - 25.0).abs() < 1e-9);
        assert!((funnel.albums_shared - 17.5).abs() < 1e-9);
        assert!((funnel.album_views - 87.5).abs() < 1e-9);
        assert!((funnel.downloads - 35.0).abs() < 1e-9);
        assert!((funnel.installs - 5.25).abs() < 1e-9);
        assert!((funnel.new_hosts - 1.575).abs() < 1e-9);
        assert!((funnel.viral_coefficient - 0.0126).abs() < 1e-9);
    }

    #[test]
    fn growth_scenarios_cover_the_presets() {
        let scenarios = growth_scenarios(&GrowthConfig::default());

        assert_eq!(scenarios.len(), 6);
        assert_eq!(scenarios[0].0, "Base case");
        for (_, results) in &scenarios {
            assert_eq!(results.len(), SCENARIO_MONTHS as usize);
        }
    }

    #[test]
    fn milestones_report_first_reaching_month() {
        let results = gtm::simulate(&GtmConfig::default(), 12, TikTokScenario::Mid);
        let milestones = milestones(&results);

        let hundred_users = &milestones[0];
        assert_eq!(hundred_users.label, "100 users");
        let (month, _) = hundred_users.reached.expect("target never reached");
        assert!(results[month as usize - 1].total_users >= 100);
        if month > 1 {
            assert!(results[month as usize - 2].total_users < 100);
        }
    }

    #[test]
    fn milestones_handle_unreached_targets() {
        let milestones = milestones(&[]);
        assert!(milestones.iter().all(|m| m.reached.is_none()));
    }

    #[test]
    fn what_if_compares_against_mid_base() {
        let report = what_if(&GtmConfig::default(), 12);

        assert_eq!(report.variants.len(), 4);
        // The viral-TikTok variant strictly dominates the mid base.
        let viral = &report.variants[1];
        assert!(viral.total_users > report.base.total_users);
        assert!(viral.cumulative_revenue >= report.base.cumulative_revenue);
    }
}
