//! Console reporting over simulation results and analyses.

use crate::analysis::{
    ChannelEconomics, FunnelBreakdown, Milestone, UnitEconomics, WhatIfReport,
};
use crate::config::{GrowthConfig, GtmConfig};
use crate::gtm::TikTokScenario;
use crate::model::{GtmMonthlyMetrics, MonthlyMetrics};

const RULE_WIDTH: usize = 90;

fn banner(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn rule() {
    println!("{}", "-".repeat(RULE_WIDTH));
}

/// Display the month-by-month growth table and end-of-run summary.
pub fn display_growth_results(results: &[MonthlyMetrics], cfg: &GrowthConfig) {
    banner("GROWTH SIMULATION");

    println!("\nConfiguration:");
    println!("  Initial hosts: {}", cfg.initial_hosts);
    println!("  Events per host/month: {}", cfg.events_per_host_per_month);
    println!("  Avg attendees: {}", cfg.avg_attendees_per_event);
    println!(
        "  Post-reveal upgrade rate: {:.0}%",
        cfg.post_reveal_upgrade_rate * 100.0
    );
    println!("  Premium price: £{}", cfg.premium_price);

    println!();
    rule();
    println!(
        "{:>5} | {:>7} | {:>6} | {:>8} | {:>11} | {:>11} | {:>8} | {:>9}",
        "Month", "Active", "Events", "Upgrades", "Revenue (£)", "Cumul (£)", "Web", "New hosts"
    );
    println!(
        "{:>5} | {:>7} | {:>6} | {:>8} | {:>11} | {:>11} | {:>8} | {:>9}",
        "", "hosts", "", "", "", "", "installs", "(web)"
    );
    rule();

    for m in results {
        println!(
            "{:>5} | {:>7} | {:>6} | {:>8} | {:>11.0} | {:>11.0} | {:>8} | {:>9}",
            m.month,
            m.active_hosts,
            m.events_created,
            m.premium_upgrades,
            m.revenue,
            m.cumulative_revenue,
            m.installs_from_web,
            m.new_hosts_from_web,
        );
    }
    rule();

    let Some(last) = results.last() else {
        return;
    };

    println!("\nAfter {} months:", results.len());
    println!("  Total app users: {}", last.total_app_users);
    println!("  Active hosts: {}", last.active_hosts);
    println!("  Cumulative revenue: £{:.0}", last.cumulative_revenue);
    println!(
        "  Total premium upgrades: {}",
        results.iter().map(|m| m.premium_upgrades).sum::<u64>()
    );
    println!(
        "  Total events created: {}",
        results.iter().map(|m| m.events_created).sum::<u64>()
    );
    println!(
        "  Total attendees: {}",
        results.iter().map(|m| m.total_attendees).sum::<u64>()
    );
    println!(
        "  App installs from events: {}",
        results.iter().map(|m| m.installs_from_events).sum::<u64>()
    );

    println!("\nGrowth loop effectiveness:");
    println!(
        "  Web albums shared: {}",
        results.iter().map(|m| m.web_albums_shared).sum::<u64>()
    );
    println!(
        "  Photo downloads: {}",
        results.iter().map(|m| m.web_downloads).sum::<u64>()
    );
    println!(
        "  App installs from web albums: {}",
        results.iter().map(|m| m.installs_from_web).sum::<u64>()
    );
    println!(
        "  New hosts from web loop: {}",
        results.iter().map(|m| m.new_hosts_from_web).sum::<u64>()
    );
    println!(
        "  Final conversion rate: {:.1}%",
        last.conversion_rate * 100.0
    );
    println!("  Final viral coefficient: {:.3}", last.viral_coefficient);
}

/// Display the preset scenario comparison table.
pub fn display_growth_scenario_comparison(scenarios: &[(String, Vec<MonthlyMetrics>)]) {
    banner("SCENARIO COMPARISON (12 months)");

    println!(
        "\n{:<25} | {:>12} | {:>10} | {:>12} | {:>10}",
        "Scenario", "Active hosts", "App users", "Revenue (£)", "Viral coef"
    );
    rule();

    for (name, results) in scenarios {
        let Some(last) = results.last() else {
            continue;
        };
        println!(
            "{:<25} | {:>12} | {:>10} | {:>12.0} | {:>10.3}",
            name,
            last.active_hosts,
            last.total_app_users,
            last.cumulative_revenue,
            last.viral_coefficient,
        );
    }
}

/// Display LTV and the acquisition cost ceiling.
pub fn display_unit_economics(cfg: &GrowthConfig, econ: &UnitEconomics) {
    banner("UNIT ECONOMICS");

    println!("\nAssumptions:");
    println!("  Events per host/month: {}", cfg.events_per_host_per_month);
    println!("  Average host lifetime: 6 months");
    println!(
        "  Upgrade rate: {:.0}%",
        cfg.post_reveal_upgrade_rate * 100.0
    );
    println!("  Premium price: £{}", cfg.premium_price);

    println!("\nCalculations:");
    println!(
        "  Average events per host lifetime: {:.1}",
        econ.avg_events_per_host
    );
    println!(
        "  Average upgrades per host: {:.2}",
        econ.avg_upgrades_per_host
    );
    println!("  Direct LTV: £{:.2}", econ.ltv_direct);
    println!("  Viral multiplier: {:.2}x", econ.viral_multiplier);
    println!("  LTV with virality: £{:.2}", econ.ltv_with_virality);
    println!("  Max CAC (3:1 ratio): £{:.2}", econ.cac_ceiling);
}

/// Display the per-100-events funnel with its per-step rates.
pub fn display_funnel_breakdown(cfg: &GrowthConfig, funnel: &FunnelBreakdown) {
    banner("GROWTH LOOP FUNNEL (per 100 events)");

    println!("\n  {:.0} events created", funnel.events);
    println!("    | {:.0}% upgrade", cfg.post_reveal_upgrade_rate * 100.0);
    println!(
        "  {:.0} premium upgrades (£{:.0} revenue)",
        funnel.upgrades, funnel.upgrade_revenue
    );
    println!("    | {:.0}% share web album", cfg.web_album_share_rate * 100.0);
    println!("  {:.0} web albums shared", funnel.albums_shared);
    println!("    | {} non-app viewers each", cfg.viewers_per_share);
    println!("  {:.0} web album views", funnel.album_views);
    println!("    | {:.0}% download a photo", cfg.web_download_rate * 100.0);
    println!("  {:.0} downloads", funnel.downloads);
    println!(
        "    | {:.0}% install app",
        cfg.download_to_install_rate * 100.0
    );
    println!("  {:.0} app installs from web", funnel.installs);
    println!("    | {:.0}% become hosts", cfg.install_to_host_rate * 100.0);
    println!("  {:.1} new hosts", funnel.new_hosts);

    println!(
        "\n  Viral coefficient (k): {:.3}",
        funnel.viral_coefficient
    );
    println!("  (k > 1 = exponential growth, k < 1 = needs paid acquisition)");

    if funnel.viral_coefficient >= 1.0 {
        println!("  Self-sustaining growth at these rates.");
    } else {
        println!(
            "  Each host generates {:.2} new hosts; paid acquisition must fill a {:.2} gap per host.",
            funnel.viral_coefficient,
            1.0 - funnel.viral_coefficient
        );
    }
}

/// Display the month-by-month go-to-market table and summary.
pub fn display_gtm_results(
    results: &[GtmMonthlyMetrics],
    cfg: &GtmConfig,
    scenario: TikTokScenario,
) {
    banner(&format!(
        "GTM SIMULATION ({scenario} TikTok scenario)"
    ));

    println!("\nConfiguration:");
    println!("  Seed users: {}", cfg.seed_users);
    println!(
        "  Partner event size: {} attendees",
        cfg.b2b_attendees_per_event
    );
    println!(
        "  TikTok installs/month: {}",
        scenario.monthly_installs(cfg)
    );
    println!("  Festival size: {} attendees", cfg.festival_attendees);
    println!("  Premium price: £{}", cfg.premium_price);

    println!();
    rule();
    println!(
        "{:>5} | {:<20} | {:>7} | {:>6} | {:>8} | {:>11} | {:>11}",
        "Month", "Phase", "Users", "Events", "Upgrades", "Revenue (£)", "Cumul (£)"
    );
    rule();

    for m in results {
        println!(
            "{:>5} | {:<20} | {:>7} | {:>6} | {:>8} | {:>11.0} | {:>11.0}",
            m.month,
            m.phase.to_string(),
            m.total_users,
            m.events_created,
            m.premium_upgrades,
            m.revenue,
            m.cumulative_revenue,
        );
    }
    rule();

    let Some(last) = results.last() else {
        return;
    };

    println!("\nAfter {} months:", results.len());
    println!("  Total users: {}", last.total_users);
    println!("  Active users: {}", last.active_users);
    println!(
        "  Total events: {}",
        results.iter().map(|m| m.events_created).sum::<u64>()
    );
    println!(
        "  Total upgrades: {}",
        results.iter().map(|m| m.premium_upgrades).sum::<u64>()
    );
    println!("  Total revenue: £{:.0}", last.cumulative_revenue);
    println!(
        "  Web album views: {}",
        results.iter().map(|m| m.web_album_views).sum::<u64>()
    );

    println!("\nUser acquisition by channel:");
    println!(
        "  Seed (friends): {}",
        results.iter().map(|m| m.new_users_from_seed).sum::<u64>()
    );
    println!(
        "  B2B partners: {}",
        results.iter().map(|m| m.new_users_from_b2b).sum::<u64>()
    );
    println!(
        "  TikTok/UGC: {}",
        results.iter().map(|m| m.new_users_from_tiktok).sum::<u64>()
    );
    println!(
        "  Festival: {}",
        results
            .iter()
            .map(|m| m.new_users_from_festival)
            .sum::<u64>()
    );
    println!(
        "  Web album loop: {}",
        results.iter().map(|m| m.installs_from_web).sum::<u64>()
    );
}

/// Display per-channel unit economics.
pub fn display_channel_economics(cfg: &GtmConfig, econ: &ChannelEconomics) {
    banner("CHANNEL UNIT ECONOMICS");

    println!("\n1. SEED (friends)");
    println!("   Users: {}", cfg.seed_users);
    println!(
        "   Events/user/month: {}",
        cfg.seed_events_per_host_per_month
    );
    println!("   Upgrade rate: {:.0}%", cfg.seed_upgrade_rate * 100.0);
    println!("   LTV per user: £{:.2}", econ.seed_ltv_per_user);

    println!("\n2. B2B PARTNER EVENTS");
    println!("   Attendees per event: {}", cfg.b2b_attendees_per_event);
    println!(
        "   App installs per event: {:.0} ({:.0}%)",
        econ.b2b_installs_per_event,
        cfg.b2b_install_rate * 100.0
    );
    println!(
        "   Become hosts: {:.0} ({:.0}%)",
        econ.b2b_hosts_per_event,
        cfg.b2b_host_conversion_rate * 100.0
    );
    println!("   LTV per host: £{:.2}", econ.host_ltv);
    println!("   Total LTV per event: £{:.0}", econ.b2b_ltv_per_event);

    println!("\n3. TIKTOK/UGC");
    println!(
        "   Hosts per 100 installs: {:.0}",
        econ.tiktok_hosts_per_100_installs
    );
    println!("   Upgrade rate: {:.0}%", cfg.tiktok_upgrade_rate * 100.0);
    println!("   LTV per host: £{:.2}", econ.tiktok_host_ltv);
    println!(
        "   LTV per 100 installs: £{:.0}",
        econ.tiktok_ltv_per_100_installs
    );

    println!("\n4. FESTIVAL");
    println!("   Attendees: {}", cfg.festival_attendees);
    println!(
        "   App installs: {:.0} ({:.0}%)",
        econ.festival_installs,
        cfg.festival_install_rate * 100.0
    );
    println!(
        "   Become hosts: {:.0} ({:.0}%)",
        econ.festival_hosts,
        cfg.festival_host_conversion_rate * 100.0
    );
    println!("   Total LTV: £{:.0}", econ.festival_ltv);
}

/// Display the milestone timeline.
pub fn display_milestones(milestones: &[Milestone]) {
    banner("KEY MILESTONES");

    println!("\n{:<25} | {:>6} | {:<20}", "Milestone", "Month", "Phase");
    println!("{}", "-".repeat(60));

    for milestone in milestones {
        match &milestone.reached {
            Some((month, phase)) => {
                println!(
                    "{:<25} | {:>6} | {:<20}",
                    milestone.label,
                    month,
                    phase.to_string()
                );
            }
            None => {
                println!(
                    "{:<25} | {:>6} | {:<20}",
                    milestone.label, "N/A", "Not reached"
                );
            }
        }
    }
}

/// Display the TikTok tier comparison.
pub fn display_gtm_scenario_comparison(
    cfg: &GtmConfig,
    scenarios: &[(TikTokScenario, Vec<GtmMonthlyMetrics>)],
) {
    banner("SCENARIO COMPARISON");

    println!(
        "\n{:<20} | {:>12} | {:>13} | {:>10} | {:>10}",
        "TikTok scenario", "Total users", "Revenue (£)", "Events", "Upgrades"
    );
    rule();

    for (scenario, results) in scenarios {
        let Some(last) = results.last() else {
            continue;
        };
        let label = format!("{scenario} ({}/mo)", scenario.monthly_installs(cfg));
        println!(
            "{:<20} | {:>12} | {:>13.0} | {:>10} | {:>10}",
            label,
            last.total_users,
            last.cumulative_revenue,
            results.iter().map(|m| m.events_created).sum::<u64>(),
            results.iter().map(|m| m.premium_upgrades).sum::<u64>(),
        );
    }
}

/// Display the what-if deltas against the base case.
pub fn display_what_if(report: &WhatIfReport) {
    banner("WHAT-IF ANALYSIS");

    println!(
        "\nBase case: {} users, £{:.0} revenue",
        report.base.total_users, report.base.cumulative_revenue
    );

    for variant in &report.variants {
        println!("\n{}:", variant.label);
        println!(
            "  {} users ({:+})",
            variant.total_users,
            variant.total_users as i64 - report.base.total_users as i64
        );
        println!(
            "  £{:.0} revenue ({:+.0})",
            variant.cumulative_revenue,
            variant.cumulative_revenue - report.base.cumulative_revenue
        );
    }
}
