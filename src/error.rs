use std::path::PathBuf;

use thiserror::Error;

/// Failures of the practice-text source
#[derive(Debug, Error)]
pub enum TextError {
    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("language `{0}` has no words")]
    EmptyWordList(String),

    #[error("unable to read word list {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse word list {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("embedded language file `{0}` is not valid")]
    Embedded(String),
}

/// Failures while building a typing session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("practice text contains no words")]
    NoWords,

    #[error("target word {0} is empty")]
    EmptyWord(usize),

    #[error(transparent)]
    Text(#[from] TextError),
}
