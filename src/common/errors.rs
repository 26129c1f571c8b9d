//! Error types for network construction and sampling-based inference.

use std::fmt;

use thiserror::Error;

/// Why an estimate could not be produced.
///
/// All of these mean "no information", which callers must be able to tell
/// apart from an estimate that is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedReason {
    /// Rejection sampling never produced a sample consistent with the evidence.
    NoConsistentSamples,
    /// Every weighted sample carried zero weight.
    ZeroTotalWeight,
    /// Frequency estimation never saw the given condition value.
    ConditionNeverObserved(bool),
    /// No initial Markov chain state with non-zero probability was found.
    NoSupportingState,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndefinedReason::NoConsistentSamples => {
                write!(f, "no sample was consistent with the evidence")
            }
            UndefinedReason::ZeroTotalWeight => write!(f, "total sample weight is zero"),
            UndefinedReason::ConditionNeverObserved(value) => {
                write!(f, "condition value {} never occurs in the examples", value)
            }
            UndefinedReason::NoSupportingState => {
                write!(f, "no chain state with non-zero probability matches the evidence")
            }
        }
    }
}

/// Errors raised while building a network or running inference over it.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BayesError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// A parent reference does not point at a node defined earlier.
    #[error("node '{node}' references parent '{parent}' which is not defined before it")]
    UnknownParent { node: String, parent: String },

    #[error("duplicate node name: {0}")]
    DuplicateNode(String),

    #[error("node '{node}' lists parent '{parent}' more than once")]
    DuplicateParent { node: String, parent: String },

    #[error("node '{node}' has {parents} parents and needs {expected} CPT entries, got {actual}")]
    CptLength {
        node: String,
        parents: usize,
        expected: usize,
        actual: usize,
    },

    #[error("node '{node}' CPT entry {index} is {value}, outside [0, 1]")]
    ProbabilityOutOfRange {
        node: String,
        index: usize,
        value: f64,
    },

    #[error("{indices} evidence indices but {values} evidence values")]
    EvidenceLength { indices: usize, values: usize },

    #[error("evidence index {index} is out of bounds for a network of {len} nodes")]
    EvidenceOutOfBounds { index: usize, len: usize },

    #[error("node {0} appears more than once in the evidence")]
    DuplicateEvidence(usize),

    #[error("query node {0} is also an evidence node")]
    QueryInEvidence(usize),

    #[error("query index {index} is out of bounds for a network of {len} nodes")]
    QueryOutOfBounds { index: usize, len: usize },

    #[error("the number of trials must be positive")]
    ZeroTrials,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Degenerate statistics; see [`UndefinedReason`].
    #[error("undefined estimate: {reason}")]
    UndefinedEstimate { reason: UndefinedReason },

    /// The random source could not be initialised. Sampling cannot proceed.
    #[error("random source failure: {0}")]
    RandomSource(String),

    #[error("sampling cancelled after {completed} trials")]
    Cancelled { completed: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BayesError {
    pub fn undefined(reason: UndefinedReason) -> Self {
        BayesError::UndefinedEstimate { reason }
    }

    /// True for the "no information" family of errors.
    pub fn is_undefined_estimate(&self) -> bool {
        matches!(self, BayesError::UndefinedEstimate { .. })
    }
}

pub type Result<T> = std::result::Result<T, BayesError>;
