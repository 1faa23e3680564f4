use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer length does not match its dimensions.
    #[error("Buffer invalide : {actual} octets, {expected} attendus")]
    InvalidBuffer {
        /// Expected byte count (width × height × channels).
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },

    /// A color literal could not be parsed.
    #[error("Couleur invalide : {0}")]
    InvalidColor(String),

    /// Unknown processor name.
    #[error("Processeur inconnu : {0}")]
    UnknownProcessor(String),
}
