use std::path::PathBuf;

/// Errors raised while loading or validating tuning data.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tuning field `{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("tuning field `{field}` is out of range: {reason} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },

    #[error("invalid gravity curve: {0}")]
    InvalidCurve(String),

    #[error("failed to read tuning file '{0}': {1}")]
    ReadFailed(PathBuf, std::io::Error),

    #[error("failed to parse tuning file '{0}': {1}")]
    ParseFailed(PathBuf, String),

    #[error("unsupported tuning file extension for '{0}' (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

/// Errors raised by the respawn sequencer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RespawnError {
    #[error("a respawn is already in progress")]
    AlreadyRespawning,

    #[error("respawn sequencer is missing its {0}")]
    MissingCollaborator(&'static str),

    #[error("respawn delay must be finite and non-negative")]
    InvalidDelay,
}

/// Errors raised at the per-tick boundary, before the controller runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TickError {
    #[error("tick delta must be finite and positive, got {0}")]
    InvalidDelta(f32),
}
