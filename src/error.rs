//! Error types for the qualitative reasoner.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum QrError {
    /// An algebra description failed a structural check during loading.
    #[error("malformed algebra: {reason}")]
    MalformedAlgebra {
        /// Human-readable description of what failed.
        reason: String,
    },

    /// A relation symbol is not part of the algebra's vocabulary.
    #[error("unknown relation: {symbol}")]
    UnknownRelation {
        /// The offending symbol.
        symbol: String,
    },

    /// An ontological-class tag is not recognized.
    #[error("unknown ontological class: {tag}")]
    UnknownClass {
        /// The offending tag.
        tag: String,
    },

    /// Two RelationSets from different algebras were combined.
    #[error("relation sets belong to different algebras")]
    AlgebraMismatch,

    /// Path-consistency propagation found an empty composition.
    ///
    /// Never crosses the public boundary of [`crate::network::Network::propagate`];
    /// it is caught internally and reported as `false`.
    #[error("network is inconsistent")]
    Inconsistent,

    /// `get_entity_by_name` found no matching entity.
    #[error("no such entity: {name}")]
    NoSuchEntity {
        /// The name that was looked up.
        name: String,
    },

    /// Wraps file I/O failures encountered while loading/saving descriptions.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps JSON (de)serialization failures.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the crate.
pub type QrResult<T> = Result<T, QrError>;
