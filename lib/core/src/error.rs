use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dictionary parse error: {0}")]
    DictionaryParse(#[from] serde_json::Error),

    #[error("Unsupported dictionary version: {0}")]
    UnsupportedVersion(u32),

    #[error("Dictionary entry '{lemma}' has no surface forms")]
    EmptyEntry { lemma: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
