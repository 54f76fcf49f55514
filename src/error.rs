use thiserror::Error;

/// Errors surfaced by the matcher and sampler constructors.
///
/// Constructors validate their inputs up front and fail fast: no partially
/// built acceptor is ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightedAutomatonError {
    /// A substring pattern was shorter than a bigram, or a trie pattern was
    /// empty.
    #[error("pattern must contain at least {min} symbols, got {len}")]
    InvalidPattern { len: usize, min: usize },

    /// The vocabulary contained no symbols.
    #[error("vocabulary must not be empty")]
    EmptyVocabulary,

    /// A masked-mode symbol had no labels.
    #[error("symbol {symbol} has no labels in masked vocabulary")]
    InconsistentMask { symbol: String },

    /// The underlying acceptor builder rejected an operation (out of range
    /// state, duplicate input label under `arc_sort_input`, etc).
    #[error("acceptor backend rejected the operation: {0}")]
    BackendFailure(String),

    /// The sampler's precondition was violated: the acceptor is not
    /// connected, or the totals vector length mismatches the state count.
    #[error("sampler precondition violated: {0}")]
    SamplerPrecondition(String),

    /// Two patterns in a pattern set shared the same key.
    #[error("duplicate pattern key in pattern set")]
    DuplicatePattern,
}

pub type Result<T> = std::result::Result<T, WeightedAutomatonError>;
