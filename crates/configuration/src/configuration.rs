//! Configuration for the request-serving layer.

use crate::version1::{MassMutations, ParsedConfiguration};

/// The 'Configuration' type collects all the information necessary to serve requests at runtime.
///
/// 'ParsedConfiguration' is the versioned format stored on disk, and each version is responsible
/// for interpreting its serialized format into the current 'Configuration'. Values of this type
/// are produced from a 'ParsedConfiguration' using 'make_runtime_configuration'.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub pretty_output: bool,
    pub mass_mutations: MassMutations,
    pub stop_batch_on_error: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        make_runtime_configuration(ParsedConfiguration::initial())
    }
}

/// Turn a parsed configuration into a runtime configuration.
pub fn make_runtime_configuration(parsed_config: ParsedConfiguration) -> Configuration {
    Configuration {
        pretty_output: parsed_config.output.pretty,
        mass_mutations: parsed_config.mass_mutations,
        stop_batch_on_error: parsed_config.batch.stop_on_error,
    }
}
