use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid test configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("corpus not found: {0}")]
    CorpusNotFound(String),

    #[error("unable to parse corpus: {0}")]
    CorpusFormat(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
