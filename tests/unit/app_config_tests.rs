/*!
 * Tests for application configuration
 */

use anyhow::Result;
use cellscribe::app_config::{Config, LogLevel};

/// Test the default configuration values
#[test]
fn test_default_config_withNoInput_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.segmentation.abbreviations, vec!["Mr", "Ms", "Mrs"]);
    assert!(config.output.pretty);
    assert_eq!(config.output.extension, "cells.json");
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that the default configuration validates
#[test]
fn test_validate_withDefaultConfig_shouldPass() -> Result<()> {
    Config::default().validate()
}

/// Test serde round-trip through JSON
#[test]
fn test_config_serialization_withRoundTrip_shouldPreserveValues() -> Result<()> {
    let mut config = Config::default();
    config.segmentation.abbreviations.push("Dr".to_string());
    config.output.pretty = false;
    config.log_level = LogLevel::Debug;

    let json = serde_json::to_string(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(
        parsed.segmentation.abbreviations,
        config.segmentation.abbreviations
    );
    assert!(!parsed.output.pretty);
    assert_eq!(parsed.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that missing fields fall back to defaults
#[test]
fn test_config_deserialization_withEmptyObject_shouldUseDefaults() -> Result<()> {
    let config: Config = serde_json::from_str("{}")?;

    assert_eq!(config.segmentation.abbreviations, vec!["Mr", "Ms", "Mrs"]);
    assert_eq!(config.log_level, LogLevel::Info);
    Ok(())
}

/// Test validation rejects an empty abbreviation entry
#[test]
fn test_validate_withEmptyAbbreviation_shouldFail() {
    let mut config = Config::default();
    config.segmentation.abbreviations.push("  ".to_string());

    assert!(config.validate().is_err());
}

/// Test validation rejects a punctuated abbreviation entry
#[test]
fn test_validate_withPunctuatedAbbreviation_shouldFail() {
    let mut config = Config::default();
    config.segmentation.abbreviations.push("Mr.".to_string());

    assert!(config.validate().is_err());
}

/// Test validation rejects an empty output extension
#[test]
fn test_validate_withEmptyExtension_shouldFail() {
    let mut config = Config::default();
    config.output.extension = String::new();

    assert!(config.validate().is_err());
}
