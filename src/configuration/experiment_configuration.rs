use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/**
 * Tolerance used when checking that candidate probabilities sum to one.
 */
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/**
 * Errors raised while reading a configuration file.
 */
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("could not read configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/**
 * Wrapper for the experiment configurations.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Configuration {
    ///Seed of the random source used for default intervention values.
    pub seed: u64,

    ///Allowed distance between one and the sum of the candidate probabilities.
    pub probability_tolerance: f64,

    ///Parameters of the random DAG generator.
    pub generation: Generation,
}

impl Configuration {
    /**
     * Returns a random source seeded with the configured seed.
     */
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            seed: 0,
            probability_tolerance: PROBABILITY_TOLERANCE,
            generation: Generation::default(),
        }
    }
}

/**
 * Configuration parameters for random DAG generation.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Generation {
    ///Number of nodes of every generated graph.
    pub num_nodes: usize,

    ///Probability of an edge between two nodes that respect the drawn order.
    pub edge_probability: f64,
}

impl Default for Generation {
    fn default() -> Generation {
        Generation {
            num_nodes: 5,
            edge_probability: 0.3,
        }
    }
}

/**
 * Reads the experiment configuration from a TOML file. Missing keys take
 * their default value.
 *
 * # Arguments
 *
 * `configuration_file_path` - path to the TOML configuration file.
 */
pub fn read_configuration_file<P: AsRef<Path>>(
    configuration_file_path: P,
) -> Result<Configuration, ConfigurationError> {
    let configuration_string = fs::read_to_string(configuration_file_path)?;

    parse_configuration(&configuration_string)
}

/**
 * Parses an experiment configuration from TOML text.
 *
 * # Arguments
 *
 * `configuration_string` - TOML document.
 */
pub fn parse_configuration(configuration_string: &str) -> Result<Configuration, ConfigurationError> {
    let configuration: Configuration = toml::from_str(configuration_string)?;

    Ok(configuration)
}
