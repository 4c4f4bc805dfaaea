use crate::parser::Rule;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unparseable wordlist line: {0}")]
    Parse(#[from] pest::error::Error<Rule>),
    #[cfg(feature = "serialize")]
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid regular expression: {0}")]
    Regex(#[from] regex::Error),
    #[error("both lexicons must be loaded before merging")]
    LexiconNotLoaded,
    #[error("none of the columns in display projection {columns:?} are present in the data")]
    InvalidProjection { columns: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
