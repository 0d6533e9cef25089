//! SDK error type.

use crate::types::Symbol;

/// All errors returned by the Ones swap SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Pool lookup ──────────────────────────────────────────────────────────
    /// No pool record exists for the given pair id.
    #[error("OnesLibrary: INVALID_PAIR_ID {0}")]
    NotFound(u64),

    /// The requested sort symbol is neither token of the pair.
    #[error("Pair symbols don't match: pair {pair_id} has no token {symbol}")]
    SymbolMismatch { pair_id: u64, symbol: Symbol },

    // ── Reward estimation ────────────────────────────────────────────────────
    /// The global config record is absent; rewards cannot be estimated.
    #[error("Global config record is missing; reward estimation is undefined")]
    ConfigurationMissing,

    /// The trade quantizes into more compounding steps than the configured bound.
    #[error("Trade too large: {steps} compounding steps exceeds max_steps={max}")]
    TradeTooLarge { steps: u64, max: u64 },

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in reward math")]
    MathOverflow,

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Deployment parameters failed validation.
    #[error("Invalid market params: {0}")]
    InvalidParams(String),

    // ── Record / snapshot parsing ────────────────────────────────────────────
    /// A stored pool record violates the reserve/token symbol invariant.
    #[error("Corrupt pool record {pair_id}: {reason}")]
    CorruptRecord { pair_id: u64, reason: String },

    /// Two pool records in one snapshot share a pair id.
    #[error("Duplicate pair id {0} in snapshot")]
    DuplicatePair(u64),

    /// A symbol, name or asset string could not be parsed.
    #[error("Parse error in {input:?}: {reason}")]
    ParseError { input: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Error::ParseError { input: input.to_string(), reason: reason.into() }
    }
}
