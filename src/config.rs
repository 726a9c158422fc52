use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Simulation configuration parameters.
///
/// Loaded from a TOML file with optional `[growth]` and `[gtm]` sections;
/// omitted values fall back to the launch-model baseline assumptions.
/// Validated before use. See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Parameters for the growth loop simulation.
    pub growth: GrowthConfig,
    /// Parameters for the go-to-market simulation.
    pub gtm: GtmConfig,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded. Performs validation on all parameters
    /// before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.growth.validate().context("invalid [growth] section")?;
        self.gtm.validate().context("invalid [gtm] section")?;
        Ok(())
    }
}

/// Parameters of the growth loop simulation.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrowthConfig {
    /// Seed hosts at launch.
    pub initial_hosts: u64,

    /// Events created per active host per month.
    pub events_per_host_per_month: f64,
    /// Average group size per event.
    pub avg_attendees_per_event: u64,
    /// Fraction of attendees who already have the app.
    pub attendees_already_have_app: f64,
    /// Fraction of app-lacking attendees who install after the event.
    pub event_invite_install_rate: f64,
    /// Fraction of event installs who go on to host.
    pub event_install_to_host_rate: f64,

    /// Fraction of hosts who upgrade after the reveal.
    pub post_reveal_upgrade_rate: f64,

    /// Fraction of premium hosts who share their web album.
    pub web_album_share_rate: f64,
    /// Non-app viewers per shared album.
    pub viewers_per_share: u64,
    /// Fraction of album viewers who download a photo.
    pub web_download_rate: f64,
    /// Fraction of downloaders who install the app.
    pub download_to_install_rate: f64,
    /// Fraction of web installs who become hosts.
    pub install_to_host_rate: f64,

    /// Fraction of hosts who remain active each month.
    pub host_monthly_retention: f64,

    /// Premium upgrade price, GBP.
    pub premium_price: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            initial_hosts: 50,
            events_per_host_per_month: 0.8,
            avg_attendees_per_event: 8,
            attendees_already_have_app: 0.3,
            event_invite_install_rate: 0.6,
            event_install_to_host_rate: 0.2,
            post_reveal_upgrade_rate: 0.25,
            web_album_share_rate: 0.7,
            viewers_per_share: 5,
            web_download_rate: 0.4,
            download_to_install_rate: 0.15,
            install_to_host_rate: 0.3,
            host_monthly_retention: 0.85,
            premium_price: 7.99,
        }
    }
}

impl GrowthConfig {
    pub fn validate(&self) -> Result<()> {
        check_num(self.initial_hosts, 0..1_000_000).context("invalid initial number of hosts")?;

        check_num(self.events_per_host_per_month, 0.0..=10.0)
            .context("invalid events per host per month")?;
        check_num(self.avg_attendees_per_event, 0..10_000)
            .context("invalid average attendees per event")?;
        check_num(self.attendees_already_have_app, 0.0..=1.0)
            .context("invalid fraction of attendees with the app")?;
        check_num(self.event_invite_install_rate, 0.0..=1.0)
            .context("invalid event invite install rate")?;
        check_num(self.event_install_to_host_rate, 0.0..=1.0)
            .context("invalid event install to host rate")?;

        check_num(self.post_reveal_upgrade_rate, 0.0..=1.0)
            .context("invalid post-reveal upgrade rate")?;

        check_num(self.web_album_share_rate, 0.0..=1.0).context("invalid web album share rate")?;
        check_num(self.viewers_per_share, 0..10_000).context("invalid viewers per share")?;
        check_num(self.web_download_rate, 0.0..=1.0).context("invalid web download rate")?;
        check_num(self.download_to_install_rate, 0.0..=1.0)
            .context("invalid download to install rate")?;
        check_num(self.install_to_host_rate, 0.0..=1.0).context("invalid install to host rate")?;

        check_num(self.host_monthly_retention, 0.0..=1.0)
            .context("invalid host monthly retention")?;

        check_num(self.premium_price, 0.0..1_000.0).context("invalid premium price")?;

        Ok(())
    }
}

/// Parameters of the go-to-market simulation.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GtmConfig {
    /// Seed users from the founding friend group.
    pub seed_users: u64,
    /// Events per seed host per month; friends are engaged and host more.
    pub seed_events_per_host_per_month: f64,
    /// Upgrade rate of seed hosts.
    pub seed_upgrade_rate: f64,

    /// Attendees per partner event.
    pub b2b_attendees_per_event: u64,
    /// Partner events per month.
    pub b2b_events_per_month: u64,
    /// Fraction of partner event attendees who install the app.
    pub b2b_install_rate: f64,
    /// Fraction of partner installs who later host their own events.
    pub b2b_host_conversion_rate: f64,

    /// TikTok installs per month, conservative tier.
    pub tiktok_installs_low: u64,
    /// TikTok installs per month, mid tier.
    pub tiktok_installs_mid: u64,
    /// TikTok installs per month if something goes viral.
    pub tiktok_installs_high: u64,
    /// Fraction of TikTok installs who become hosts.
    pub tiktok_host_conversion_rate: f64,
    /// Upgrade rate of TikTok-acquired hosts.
    pub tiktok_upgrade_rate: f64,

    /// Festival attendance.
    pub festival_attendees: u64,
    /// Fraction of festival attendees who install the app.
    pub festival_install_rate: f64,
    /// Fraction of festival installs who become hosts.
    pub festival_host_conversion_rate: f64,

    /// Events per organic host per month.
    pub events_per_host_per_month: f64,
    /// Upgrade rate of organic hosts.
    pub general_upgrade_rate: f64,
    /// Fraction of hosts who go inactive each month.
    pub monthly_churn_rate: f64,

    /// Premium upgrade price, GBP.
    pub premium_price: f64,

    /// Fraction of premium hosts who share their web album.
    pub web_share_rate: f64,
    /// Non-app viewers per shared album.
    pub web_viewers_per_share: u64,
    /// Fraction of album viewers who download a photo.
    pub web_download_rate: f64,
    /// Fraction of downloaders who install the app.
    pub web_download_to_install_rate: f64,
    /// Fraction of web installs who become hosts.
    pub web_install_to_host_rate: f64,
}

impl Default for GtmConfig {
    fn default() -> Self {
        Self {
            seed_users: 50,
            seed_events_per_host_per_month: 1.2,
            seed_upgrade_rate: 0.35,
            b2b_attendees_per_event: 400,
            b2b_events_per_month: 2,
            b2b_install_rate: 0.25,
            b2b_host_conversion_rate: 0.05,
            tiktok_installs_low: 50,
            tiktok_installs_mid: 200,
            tiktok_installs_high: 1_000,
            tiktok_host_conversion_rate: 0.15,
            tiktok_upgrade_rate: 0.20,
            festival_attendees: 5_000,
            festival_install_rate: 0.10,
            festival_host_conversion_rate: 0.03,
            events_per_host_per_month: 0.6,
            general_upgrade_rate: 0.25,
            monthly_churn_rate: 0.15,
            premium_price: 7.99,
            web_share_rate: 0.70,
            web_viewers_per_share: 5,
            web_download_rate: 0.40,
            web_download_to_install_rate: 0.15,
            web_install_to_host_rate: 0.25,
        }
    }
}

impl GtmConfig {
    pub fn validate(&self) -> Result<()> {
        check_num(self.seed_users, 0..1_000_000).context("invalid number of seed users")?;
        check_num(self.seed_events_per_host_per_month, 0.0..=10.0)
            .context("invalid seed events per host per month")?;
        check_num(self.seed_upgrade_rate, 0.0..=1.0).context("invalid seed upgrade rate")?;

        check_num(self.b2b_attendees_per_event, 0..1_000_000)
            .context("invalid attendees per partner event")?;
        check_num(self.b2b_events_per_month, 0..1_000)
            .context("invalid partner events per month")?;
        check_num(self.b2b_install_rate, 0.0..=1.0).context("invalid partner install rate")?;
        check_num(self.b2b_host_conversion_rate, 0.0..=1.0)
            .context("invalid partner host conversion rate")?;

        check_num(self.tiktok_installs_low, 0..1_000_000)
            .context("invalid low TikTok installs per month")?;
        check_num(self.tiktok_installs_mid, 0..1_000_000)
            .context("invalid mid TikTok installs per month")?;
        check_num(self.tiktok_installs_high, 0..1_000_000)
            .context("invalid high TikTok installs per month")?;
        check_num(self.tiktok_host_conversion_rate, 0.0..=1.0)
            .context("invalid TikTok host conversion rate")?;
        check_num(self.tiktok_upgrade_rate, 0.0..=1.0).context("invalid TikTok upgrade rate")?;

        check_num(self.festival_attendees, 0..10_000_000)
            .context("invalid festival attendance")?;
        check_num(self.festival_install_rate, 0.0..=1.0)
            .context("invalid festival install rate")?;
        check_num(self.festival_host_conversion_rate, 0.0..=1.0)
            .context("invalid festival host conversion rate")?;

        check_num(self.events_per_host_per_month, 0.0..=10.0)
            .context("invalid events per host per month")?;
        check_num(self.general_upgrade_rate, 0.0..=1.0).context("invalid general upgrade rate")?;
        check_num(self.monthly_churn_rate, 0.0..=1.0).context("invalid monthly churn rate")?;

        check_num(self.premium_price, 0.0..1_000.0).context("invalid premium price")?;

        check_num(self.web_share_rate, 0.0..=1.0).context("invalid web album share rate")?;
        check_num(self.web_viewers_per_share, 0..10_000).context("invalid viewers per share")?;
        check_num(self.web_download_rate, 0.0..=1.0).context("invalid web download rate")?;
        check_num(self.web_download_to_install_rate, 0.0..=1.0)
            .context("invalid download to install rate")?;
        check_num(self.web_install_to_host_rate, 0.0..=1.0)
            .context("invalid install to host rate")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn rejects_out_of_range_rate() {
        let mut config = Config::default();
        config.growth.post_reveal_upgrade_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.gtm.monthly_churn_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_sectioned_toml_with_defaults() {
        let config: Config = toml::from_str(
            "[growth]\n\
             initial_hosts = 200\n\
             \n\
             [gtm]\n\
             seed_users = 40\n",
        )
        .unwrap();

        assert_eq!(config.growth.initial_hosts, 200);
        assert_eq!(config.growth.avg_attendees_per_event, 8);
        assert_eq!(config.gtm.seed_users, 40);
        assert_eq!(config.gtm.tiktok_installs_mid, 200);
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<Config, _> = toml::from_str("[growth]\nintial_hosts = 200\n");
        assert!(result.is_err());
    }
}
