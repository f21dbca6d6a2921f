use std::path::{Path, PathBuf};

use connscan_core::loading::gtfs::discover_feed_dirs;
use connscan_core::{Error, NetworkConfig, TransitModelConfig};
use serde::Deserialize;

use crate::cli::Cli;

const DEFAULT_FEED_ROOT: &str = "data";

/// Contents of the `--config` TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Feed directories or feed roots
    pub feeds: Vec<PathBuf>,
    /// Root holding one directory per operator
    pub feed_root: Option<PathBuf>,
    pub network: NetworkConfig,
}

impl FileConfig {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
            .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Merges the config file with command line flags, flags winning, and
/// expands every feed location into operator directories.
pub fn resolve(cli: &Cli) -> Result<TransitModelConfig, Error> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_path(path)?,
        None => FileConfig::default(),
    };

    let mut network = file.network;
    if let Some(distance) = cli.max_foot_distance {
        network.max_foot_distance = distance;
    }
    if let Some(speed) = cli.walking_speed {
        network.walking_speed = speed;
    }
    if let Some(capacity) = cli.leaf_capacity {
        network.leaf_capacity = capacity;
    }

    let locations = if !cli.feeds.is_empty() {
        cli.feeds.clone()
    } else if !file.feeds.is_empty() {
        file.feeds
    } else {
        vec![
            file.feed_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FEED_ROOT)),
        ]
    };

    let mut feed_dirs = Vec::new();
    for location in &locations {
        if !location.is_dir() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Feed directory not found: {}", location.display()),
            )));
        }
        feed_dirs.extend(discover_feed_dirs(location)?);
    }

    let config = TransitModelConfig { feed_dirs, network };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_a_full_file() {
        let file = FileConfig::from_toml(
            r#"
            feeds = ["data/SNCB", "data/STIB"]

            [network]
            max_foot_distance = 300.0
            walking_speed = 1.4
            "#,
        )
        .unwrap();

        assert_eq!(file.feeds.len(), 2);
        assert_eq!(file.network.max_foot_distance, 300.0);
        assert_eq!(file.network.walking_speed, 1.4);
        assert_eq!(file.network.leaf_capacity, NetworkConfig::default().leaf_capacity);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("feed = \"data\"").is_err());
    }

    #[test]
    fn flags_override_the_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let feed = dir.path().join("tec");
        std::fs::create_dir(&feed).unwrap();
        std::fs::write(feed.join("stops.csv"), "stop_id,stop_name,stop_lat,stop_lon\n").unwrap();

        let config_path = dir.path().join("connscan.toml");
        std::fs::write(
            &config_path,
            format!(
                "feed_root = {:?}\n[network]\nwalking_speed = 2.0\nleaf_capacity = 4\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let cli = Cli::parse_from([
            "connscan",
            "--config",
            config_path.to_str().unwrap(),
            "--leaf-size",
            "16",
        ]);
        let config = resolve(&cli).unwrap();

        assert_eq!(config.feed_dirs, vec![feed]);
        assert_eq!(config.network.walking_speed, 2.0);
        assert_eq!(config.network.leaf_capacity, 16);
    }

    #[test]
    fn missing_feed_location_is_reported() {
        let cli = Cli::parse_from(["connscan", "--feed", "/no/such/feed"]);
        assert!(matches!(resolve(&cli), Err(Error::IoError(_))));
    }
}
