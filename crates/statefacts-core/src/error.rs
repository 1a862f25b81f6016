//! Error types for `statefacts-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::state::StateCode;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid state code: {0:?}")]
  InvalidCode(String),

  #[error("duplicate state code in dataset: {0}")]
  DuplicateCode(StateCode),

  #[error("failed to read dataset {path:?}: {source}")]
  DatasetIo {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed dataset: {0}")]
  DatasetFormat(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
