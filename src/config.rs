//! Configuration module for the NHTSA harvester
//!
//! This module defines the configuration structure for the vPIC API client,
//! the harvested year range, and the output location. Every field has a
//! default so the harvester runs without a configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// vPIC API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the vPIC API (e.g., "https://vpic.nhtsa.dot.gov/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Fixed pause before every specification fetch, in milliseconds
    #[serde(default = "default_spec_fetch_delay_ms")]
    pub spec_fetch_delay_ms: u64,
    /// Pause after the makes listing call, in milliseconds
    #[serde(default = "default_makes_listing_pause_ms")]
    pub makes_listing_pause_ms: u64,
}

/// Year range to harvest (inclusive on both ends)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// First model year to process
    #[serde(default = "default_start_year")]
    pub start_year: u16,
    /// Last model year to process (inclusive)
    #[serde(default = "default_end_year")]
    pub end_year: u16,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base output directory; one subdirectory per make, one {year}.json per year
    #[serde(default = "default_output_path")]
    pub path: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_base_url() -> String {
    "https://vpic.nhtsa.dot.gov/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_spec_fetch_delay_ms() -> u64 {
    250
}

fn default_makes_listing_pause_ms() -> u64 {
    200
}

fn default_start_year() -> u16 {
    1990
}

fn default_end_year() -> u16 {
    2020
}

fn default_output_path() -> String {
    "./nhtsa-vehicles".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            spec_fetch_delay_ms: default_spec_fetch_delay_ms(),
            makes_listing_pause_ms: default_makes_listing_pause_ms(),
        }
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl HarvestConfig {
    /// Inclusive year range, empty if end_year < start_year
    pub fn years(&self) -> RangeInclusive<u16> {
        self.start_year..=self.end_year
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config YAML")?;

        Ok(config)
    }
}
