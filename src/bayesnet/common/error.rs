use thiserror::Error;

/// Errors raised while reading, building or writing a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("exchange format error on line {line}: {message}")]
    Tabular { line: usize, message: String },

    #[error("cycle detected: topological sort placed {sorted} of {total} variables")]
    CycleDetected { sorted: usize, total: usize },

    #[error("variable '{child}' lists unknown parent '{parent}'")]
    UnknownParent { child: String, parent: String },

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("unknown morphology '{0}' (expected chain, full_tree, inverse_tree or random_dag)")]
    UnknownMorphology(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        NetworkError::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn tabular(line: usize, message: impl Into<String>) -> Self {
        NetworkError::Tabular {
            line,
            message: message.into(),
        }
    }
}
