use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record {record}, line {line}: expected `label: value`, got {text:?}")]
    MalformedRecord {
        record: usize,
        line: usize,
        text: String,
    },

    #[error("record {record}, line {line}: cannot parse {token:?} as a number")]
    InvalidNumber {
        record: usize,
        line: usize,
        token: String,
    },

    #[error("no valid records in input; averages are undefined")]
    EmptyResultSet,

    #[error("summary serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
