//! A module for validating and managing the session configuration of the
//! shaft fatigue calculator.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::input::ShaftInputs;

/// Represents an error that can occur during validation of configuration data.
#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a given message.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error.
    pub fn new(message: &str) -> ValidationError {
        ValidationError {
            message: message.to_owned(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Represents the configuration for one calculator session: the output
/// settings plus the raw shaft parameters that seed the input widgets.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub output: Output,
    pub shaft: ShaftInputs,
}

impl Config {
    /// Validates the entire configuration.
    ///
    /// Checks the output settings and the declared minimums of every raw
    /// shaft field.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if all sections are valid. Otherwise returns a
    /// `ValidationError` detailing the first issue found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.output.validate()?;
        self.shaft
            .validate()
            .map_err(|e| ValidationError::new(&e.to_string()))?;
        Ok(())
    }
}

/// Represents the output settings for a calculator session.
#[derive(Debug, Deserialize)]
pub struct Output {
    /// The desired output format. Valid values are "TABLE" and "JSON".
    pub format: String,
    /// Whether to write the CSV input snapshot next to the configuration file.
    pub csv: bool,
}

impl Output {
    /// Validates the `Output` settings.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if the format is one of the supported values.
    ///
    /// # Examples
    ///
    /// ```
    /// use shaft_fatigue::config::Output;
    ///
    /// let output = Output { format: String::from("JSON"), csv: false };
    /// assert!(output.validate().is_ok());
    ///
    /// let output = Output { format: String::from("XML"), csv: false };
    /// assert!(output.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "TABLE" | "JSON" => Ok(()),
            _ => Err(ValidationError::new(&format!(
                "format must be TABLE or JSON, got {}",
                self.format
            ))),
        }
    }
}

/// Loads the configuration from a YAML file.
///
/// # Arguments
///
/// * `config_path` - A path reference to the configuration file.
///
/// # Returns
///
/// This function returns a `Result` containing either the loaded `Config` or an error.
///
/// # Errors
///
/// This function will return an error if reading or parsing the configuration file fails,
/// including when a required shaft field is missing from the file.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Config> {
    let content = fs::read_to_string(config_path)?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        let config_path = "tests/config.yaml";
        let config = load_config(config_path).expect("Failed to load config");
        assert!(
            config.validate().is_ok(),
            "Expected Ok(()) but got Err with {:?}",
            config.validate()
        );
        assert_eq!(config.shaft, ShaftInputs::default());
        assert_eq!(config.output.format, "TABLE");
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        // Leaving out a required shaft field must fail at deserialization,
        // not silently default.
        let yaml = "
output:
  format: TABLE
  csv: false
shaft:
  da: 38.0
  db: 32.0
";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_out_of_range_field_fails_validation() {
        let yaml = "
output:
  format: TABLE
  csv: false
shaft:
  da: 38.0
  db: 0.05
  l: 550.0
  r: 3.0
  lfa: 225.0
  lfb: 300.0
  fa: 1000.0
  fb: 1500.0
  uts: 690.0
  sy: 490.0
  a: 4.51
  b: -0.265
";
        let config: Config = serde_yaml::from_str(yaml).expect("well-formed YAML");
        assert!(config.validate().is_err());
    }
}
