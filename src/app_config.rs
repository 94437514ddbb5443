use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Sentence segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for the sentence boundary heuristic
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SegmentationConfig {
    /// Title abbreviations that suppress a sentence boundary when they
    /// appear right before a terminal punctuation mark
    #[serde(default = "default_abbreviations")]
    pub abbreviations: Vec<String>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            abbreviations: default_abbreviations(),
        }
    }
}

/// Settings for the JSON cell output
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    // @field: Pretty-print the JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,

    // @field: Suffix appended to the input file stem for the output file
    #[serde(default = "default_output_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            extension: default_output_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_abbreviations() -> Vec<String> {
    vec!["Mr".to_string(), "Ms".to_string(), "Mrs".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_output_extension() -> String {
    "cells.json".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        for abbreviation in &self.segmentation.abbreviations {
            if abbreviation.trim().is_empty() {
                return Err(anyhow!("Abbreviation entries must not be empty"));
            }
            if !abbreviation.chars().all(|c| c.is_alphabetic()) {
                return Err(anyhow!(
                    "Abbreviation '{}' must be alphabetic (the trailing period is implied)",
                    abbreviation
                ));
            }
        }

        if self.output.extension.trim().is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            segmentation: SegmentationConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
