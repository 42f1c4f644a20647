use std::{env, error::Error, fmt, path::PathBuf, time::Duration};

/// Runtime configuration, read from the environment. Every knob has a
/// default, so the service starts against the Vitalis feed with no
/// environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub stops_file: PathBuf,
    pub lines_file: PathBuf,
}

#[derive(Debug)]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.name, self.value)
    }
}

impl Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            feed_url: env::var("FEED_URL")
                .unwrap_or_else(|_| gtfs::sources::VITALIS_POITIERS_REALTIME.to_owned()),
            poll_interval: seconds_from_env("POLL_INTERVAL_SECS", 10)?,
            request_timeout: seconds_from_env("REQUEST_TIMEOUT_SECS", 8)?,
            stops_file: path_from_env("STOPS_FILE", "resources/stops.json"),
            lines_file: path_from_env("LINES_FILE", "resources/lines.json"),
        })
    }
}

fn path_from_env(name: &str, default: &str) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

fn seconds_from_env(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_seconds(name, &value),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

fn parse_seconds(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .parse()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError {
            name,
            value: value.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_seconds() {
        assert_eq!(
            parse_seconds("POLL_INTERVAL_SECS", "30").unwrap(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn rejects_non_numbers() {
        let why = parse_seconds("POLL_INTERVAL_SECS", "soon").unwrap_err();
        assert_eq!(why.name, "POLL_INTERVAL_SECS");
        assert_eq!(why.value, "soon");
    }
}
