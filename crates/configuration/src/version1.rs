//! Version 1 of the configuration format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};

pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// The configuration as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: Version,
    /// How plans are printed.
    #[serde(default)]
    pub output: OutputSettings,
    /// What to do with UPDATE and DELETE statements that have no WHERE clause.
    #[serde(default)]
    pub mass_mutations: MassMutations,
    /// Settings for translating several statements at once.
    #[serde(default)]
    pub batch: BatchSettings,
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration {
            version: Version::This,
            output: OutputSettings::default(),
            mass_mutations: MassMutations::default(),
            batch: BatchSettings::default(),
        }
    }
}

impl Default for ParsedConfiguration {
    fn default() -> Self {
        Self::initial()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum Version {
    #[serde(rename = "1")]
    This,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutputSettings {
    /// Indent printed JSON.
    #[serde(default = "pretty_default")]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            pretty: pretty_default(),
        }
    }
}

fn pretty_default() -> bool {
    true
}

/// Policy for UPDATE and DELETE plans whose filter matches every document.
/// Such plans are always produced; the policy decides how they are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MassMutations {
    /// Report nothing.
    Allow,
    /// Log a warning.
    #[default]
    Warn,
    /// Treat the statement as an error.
    Deny,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSettings {
    /// Stop at the first statement that fails, rather than translating every statement.
    #[serde(default)]
    pub stop_on_error: bool,
}

/// Parse the configuration format from a directory.
///
/// A directory without a configuration file yields the initial configuration.
pub fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);
    if !configuration_file.exists() {
        return Ok(ParsedConfiguration::initial());
    }

    let configuration_file_contents =
        std::fs::read_to_string(&configuration_file).map_err(|inner| {
            ParseConfigurationError::IoError {
                file_path: configuration_file.clone(),
                inner,
            }
        })?;

    serde_json::from_str(&configuration_file_contents).map_err(|error| {
        ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    })
}

/// Write the parsed configuration, and the JSON schema describing it, into a directory on disk.
pub fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    // create the configuration file
    std::fs::write(
        out_dir.join(CONFIGURATION_FILENAME),
        serde_json::to_string_pretty(parsed_config)? + "\n",
    )?;

    // create the jsonschema file
    let output = schemars::schema_for!(ParsedConfiguration);
    std::fs::write(
        out_dir.join(CONFIGURATION_JSONSCHEMA_FILENAME),
        serde_json::to_string_pretty(&output)? + "\n",
    )?;

    Ok(())
}
