use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Malformed selection policy
    #[error("Policy error: {0}")]
    Policy(#[from] rom_cull_core::PolicyError),

    /// Dat file error
    #[error("Dat error: {0}")]
    Dat(#[from] rom_cull_dat::DatError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
