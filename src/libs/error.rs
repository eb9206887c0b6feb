use thiserror::Error;

/// Errors raised while parsing inputs, scoring cluster pairs or building trees.
#[derive(Debug, Error)]
pub enum BgcError {
    /// The cost matrix handed to the assignment solver is unusable.
    #[error("Invalid cost matrix: {0}")]
    InvalidCost(String),

    /// No pairwise distance is known for two occurrences of a shared domain.
    #[error("No pairwise distance between occurrences {a} and {b}")]
    MissingDistance { a: String, b: String },

    /// Jaccard index is undefined when neither cluster carries a domain.
    #[error("Clusters {a} and {b} have no domains")]
    EmptyClusters { a: String, b: String },

    /// Malformed input row (1-based line number).
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A cluster id was requested but never parsed.
    #[error("Unknown cluster: {0}")]
    UnknownCluster(String),

    /// Tree construction needs every lower-triangle cell.
    #[error("Distance matrix has no value for ({row}, {col})")]
    IncompleteMatrix { row: String, col: String },

    /// Invalid tree operation.
    #[error("Tree logic error: {0}")]
    Tree(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BgcError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn missing_distance(a: &str, b: &str) -> Self {
        Self::MissingDistance {
            a: a.to_string(),
            b: b.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BgcError>;
