//! The `{code}` path extractor.
//!
//! Handlers that take [`ValidCode`] never run for an unknown abbreviation:
//! the request is rejected with 400 during extraction.

use axum::{
  extract::{FromRequestParts, Path},
  http::request::Parts,
};
use statefacts_core::{state::StateCode, store::FunFactStore};

use crate::{
  AppState,
  error::{ApiError, INVALID_ABBREVIATION},
};

/// A state code from the path, uppercased and checked against the dataset.
#[derive(Debug, Clone)]
pub struct ValidCode(pub StateCode);

impl<S> FromRequestParts<AppState<S>> for ValidCode
where
  S: FunFactStore,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
      .await
      .map_err(|_| ApiError::bad_request(INVALID_ABBREVIATION))?;

    state
      .dataset
      .resolve(&raw)
      .map(Self)
      .ok_or_else(|| ApiError::bad_request(INVALID_ABBREVIATION))
  }
}
