use thiserror::Error;

/// Errors from grid construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrosswordError {
    /// No usable words were supplied
    #[error("no words to place; select more words")]
    EmptyWordList,
    /// Every attempt failed to place even the first word
    #[error("could not place any words after {attempts} attempts; select more words or a different size")]
    NoWordsPlaced { attempts: usize },
}

/// Errors from loading a vocabulary table
#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("invalid vocabulary data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("book '{0}' not found in vocabulary data")]
    UnknownBook(String),
    #[error("the selected lessons contain no words")]
    NoWords,
}
