use std::path::PathBuf;

use thiserror::Error;



/// Request could not be completed at transport level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("could not read response body: {0}")]
    Body(String),
}



/// Why a single attempt did not produce a usable response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttemptFailure {
    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Transport(#[from] TransportError),
}



#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("gave up after {attempts} attempt(s), last failure: {last}")]
    Exhausted {
        attempts: u32,
        last: AttemptFailure,
    },
}



/// Reasons a response body holds no usable series.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("data mismatch: requested {requested}, got {found}")]
    CurrencyMismatch {
        requested: String,
        found: String,
    },

    #[error("no chart data block found")]
    NoDataBlock,

    #[error("data inconsistency: {dates} date(s) but {prices} price(s)")]
    LengthMismatch {
        dates: usize,
        prices: usize,
    },

    #[error("invalid date label '{0}'")]
    InvalidDate(String),

    #[error("invalid price value '{0}'")]
    InvalidPrice(String),

    #[error("chart data block is empty")]
    EmptySeries,
}



#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode series: {0}")]
    Encode(#[from] serde_json::Error),
}



#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue {
        name: &'static str,
        value: String,
    },

    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),

    #[error("unknown period '{0}'")]
    UnknownPeriod(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
