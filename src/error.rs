//! Defines the error type shared by all the Naive Bayes models.

use thiserror::Error;

use std::io;
use std::path::PathBuf;


/// Errors returned by the ingestion and persistence methods.
/// `fit` and `predict` never fail.
#[derive(Error, Debug)]
pub enum NaiveBayesError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file the operation was addressed to.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },


    /// The file was read, but its contents are not a valid
    /// parameter bundle for the model.
    #[error("Corrupt parameter file {}: {reason}", .path.display())]
    Corrupt {
        /// The file being restored.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },


    /// A parameter table could not be encoded.
    #[error("Failed to encode a parameter table: {0}")]
    Encode(#[from] bincode::Error),


    /// `BernoulliNB` accepts only `0` and `1`.
    #[error(
        "Unknown value {value} at position {position} for label {label:?}; \
        expected 0 or 1"
    )]
    InvalidFeatureValue {
        /// The label the rejected instance was given for.
        label: String,
        /// Index of the first offending value in the instance.
        position: usize,
        /// The offending value.
        value: i64,
    },
}


impl NaiveBayesError {
    /// Returns `true` if the error comes from the persistence layer,
    /// i.e., the file is missing, unreadable, or malformed.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Corrupt { .. })
    }
}


/// A `Result` alias whose error type is [`NaiveBayesError`].
pub type Result<T> = std::result::Result<T, NaiveBayesError>;
