use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to initialise MIDI input: {0}")]
    MidiInit(String),
    #[error("no MIDI input port matching \"{0}\" was found")]
    PortNotFound(String),
    #[error("failed to open MIDI connection: {0}")]
    Connection(String),
    #[error("input thread error: {0}")]
    Thread(String),
}
