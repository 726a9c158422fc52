mod analysis;
mod config;
mod engine;
mod gtm;
mod model;
mod report;

use crate::analysis::{ChannelEconomics, FunnelBreakdown, UnitEconomics};
use crate::config::Config;
use crate::gtm::TikTokScenario;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// TOML file overriding the baseline model parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate the organic growth loop from an initial host base.
    Growth {
        #[arg(long, default_value_t = 12)]
        months: u32,

        #[arg(long)]
        initial_hosts: Option<u64>,

        /// Also run the preset scenarios and compare them.
        #[arg(long)]
        scenarios: bool,
    },

    /// Simulate the phased go-to-market plan.
    Gtm {
        #[arg(long, default_value_t = 12)]
        months: u32,

        #[arg(long)]
        b2b_event_size: Option<u64>,

        #[arg(long)]
        festival_size: Option<u64>,

        #[arg(long, value_enum, default_value_t = TikTokScenario::Mid)]
        tiktok: TikTokScenario,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = match &args.config {
        Some(file) => Config::from_file(file).context("failed to construct cfg")?,
        None => Config::default(),
    };
    log::info!("{cfg:#?}");

    match args.command {
        Command::Growth {
            months,
            initial_hosts,
            scenarios,
        } => run_growth(cfg, months, initial_hosts, scenarios),
        Command::Gtm {
            months,
            b2b_event_size,
            festival_size,
            tiktok,
        } => run_gtm(cfg, months, b2b_event_size, festival_size, tiktok),
    }
}

fn run_growth(
    cfg: Config,
    months: u32,
    initial_hosts: Option<u64>,
    scenarios: bool,
) -> Result<()> {
    let mut cfg = cfg.growth;
    if let Some(initial_hosts) = initial_hosts {
        cfg.initial_hosts = initial_hosts;
    }
    cfg.validate().context("invalid growth parameters")?;

    report::display_funnel_breakdown(&cfg, &FunnelBreakdown::for_config(&cfg));
    report::display_unit_economics(&cfg, &UnitEconomics::for_config(&cfg));

    let results = engine::simulate(&cfg, months);
    report::display_growth_results(&results, &cfg);

    if scenarios {
        report::display_growth_scenario_comparison(&analysis::growth_scenarios(&cfg));
    }

    Ok(())
}

fn run_gtm(
    cfg: Config,
    months: u32,
    b2b_event_size: Option<u64>,
    festival_size: Option<u64>,
    tiktok: TikTokScenario,
) -> Result<()> {
    let mut cfg = cfg.gtm;
    if let Some(b2b_event_size) = b2b_event_size {
        cfg.b2b_attendees_per_event = b2b_event_size;
    }
    if let Some(festival_size) = festival_size {
        cfg.festival_attendees = festival_size;
    }
    cfg.validate().context("invalid gtm parameters")?;

    let results = gtm::simulate(&cfg, months, tiktok);
    report::display_gtm_results(&results, &cfg, tiktok);
    report::display_channel_economics(&cfg, &ChannelEconomics::for_config(&cfg));
    report::display_milestones(&analysis::milestones(&results));
    report::display_gtm_scenario_comparison(&cfg, &analysis::gtm_scenarios(&cfg, months));
    report::display_what_if(&analysis::what_if(&cfg, months));

    Ok(())
}
