use std::path::PathBuf;

use serde::Deserialize;

use crate::Error;

/// Parameters of the one-time network build
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Longest walking transfer between two stops, meters
    pub max_foot_distance: f64,
    /// Average pedestrian speed, meters per second
    pub walking_speed: f64,
    /// Stops per ball tree leaf. Larger leaves give a shallower tree,
    /// smaller ones prune more precisely.
    pub leaf_capacity: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_foot_distance: 500.0,
            walking_speed: 1.0,
            leaf_capacity: 30,
        }
    }
}

impl NetworkConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.max_foot_distance.is_finite() || self.max_foot_distance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_foot_distance must be a finite, non-negative number of meters, got {}",
                self.max_foot_distance
            )));
        }
        if !self.walking_speed.is_finite() || self.walking_speed <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "walking_speed must be a positive number of m/s, got {}",
                self.walking_speed
            )));
        }
        if self.leaf_capacity == 0 {
            return Err(Error::InvalidConfig(
                "leaf_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything needed to build a network from feeds on disk
#[derive(Debug, Clone, Default)]
pub struct TransitModelConfig {
    /// One directory per operator feed
    pub feed_dirs: Vec<PathBuf>,
    pub network: NetworkConfig,
}

impl TransitModelConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.feed_dirs.is_empty() {
            return Err(Error::InvalidConfig(
                "No feed directories provided in the configuration".to_string(),
            ));
        }

        for dir in &self.feed_dirs {
            if !dir.is_dir() {
                return Err(Error::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Feed directory not found: {}", dir.display()),
                )));
            }
        }

        self.network.validate()
    }
}
