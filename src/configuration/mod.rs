/**
 * Experiment configuration read from TOML.
 */
pub mod experiment_configuration;
