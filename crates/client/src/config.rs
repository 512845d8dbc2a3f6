//! Shell configuration read from the environment.
use std::env;
use std::time::Duration;

/// Console shell configuration.
///
/// Game rules never read the environment; only pacing, seeding and log
/// placement are configurable here.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Delay between characters of typewriter output.
    pub type_delay: Duration,
    /// Delay between characters of the start-up banner.
    pub banner_delay: Duration,
    /// Fixed RNG seed. Drawn at random when absent.
    pub seed: Option<u64>,
    /// Name of the log session directory.
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(15),
            banner_delay: Duration::from_millis(5),
            seed: None,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct the configuration from environment variables.
    ///
    /// Environment variables:
    /// - `OTHERSIDE_TYPE_DELAY_MS` - typewriter delay per character (default: 15)
    /// - `OTHERSIDE_BANNER_DELAY_MS` - banner delay per character (default: 5)
    /// - `OTHERSIDE_SEED` - fixed RNG seed for reproducible games
    /// - `OTHERSIDE_SESSION_ID` - log session name (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("OTHERSIDE_TYPE_DELAY_MS") {
            config.type_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("OTHERSIDE_BANNER_DELAY_MS") {
            config.banner_delay = Duration::from_millis(ms);
        }
        config.seed = read_env("OTHERSIDE_SEED");
        config.session_id = env::var("OTHERSIDE_SESSION_ID")
            .ok()
            .filter(|id| !id.trim().is_empty());

        config
    }

    /// Configuration with no output delays, for tests.
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            type_delay: Duration::ZERO,
            banner_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
