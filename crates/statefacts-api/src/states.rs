//! Handlers for the read-only `/states` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/states` | Optional `?contig=true\|false` |
//! | `GET`  | `/states/:code` | Record with fun facts merged in |
//! | `GET`  | `/states/:code/capital` | `{state, capital}` |
//! | `GET`  | `/states/:code/nickname` | `{state, nickname}` |
//! | `GET`  | `/states/:code/population` | `{state, population}` |
//! | `GET`  | `/states/:code/admission` | `{state, admitted}` |

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use statefacts_core::{
  dataset::Contiguity,
  state::{StateCode, StateRecord, StateView, fact_lists, merge_facts},
  store::FunFactStore,
};

use crate::{AppState, error::ApiError, extract::ValidCode};

const INVALID_CODE: &str = "Invalid state code";

/// Look up a validated code in the dataset.
///
/// Validation already guarantees membership, so a miss here means the
/// dataset and the validator disagree.
fn record<'a, S>(
  state: &'a AppState<S>,
  code: &StateCode,
) -> Result<&'a StateRecord, ApiError>
where
  S: FunFactStore,
{
  state
    .dataset
    .get(code)
    .ok_or_else(|| ApiError::not_found(INVALID_CODE))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `true` for the lower 48, `false` for Alaska and Hawaii; anything else
  /// (or nothing) for all fifty.
  pub contig: Option<String>,
}

/// `GET /states[?contig=true|false]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StateView>>, ApiError>
where
  S: FunFactStore,
{
  let contiguity = Contiguity::from_query(params.contig.as_deref());

  let documents = state.store.list_documents().await.map_err(ApiError::store)?;
  let lists = fact_lists(documents);

  let states = state
    .dataset
    .filter(contiguity)
    .map(|r| merge_facts(r, lists.get(&r.code).map(Vec::as_slice)))
    .collect();

  Ok(Json(states))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /states/:code`
pub async fn get_one<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
) -> Result<Json<StateView>, ApiError>
where
  S: FunFactStore,
{
  let record = record(&state, &code)?;
  let document = state
    .store
    .get_document(code.clone())
    .await
    .map_err(ApiError::store)?;

  Ok(Json(merge_facts(
    record,
    document.as_ref().map(|d| d.funfacts.as_slice()),
  )))
}

// ─── Field projections ────────────────────────────────────────────────────────

/// `GET /states/:code/capital`
pub async fn capital<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FunFactStore,
{
  let r = record(&state, &code)?;
  Ok(Json(json!({ "state": r.state, "capital": r.capital_city })))
}

/// `GET /states/:code/nickname`
pub async fn nickname<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FunFactStore,
{
  let r = record(&state, &code)?;
  Ok(Json(json!({ "state": r.state, "nickname": r.nickname })))
}

/// `GET /states/:code/population`
pub async fn population<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FunFactStore,
{
  let r = record(&state, &code)?;
  Ok(Json(json!({ "state": r.state, "population": r.population })))
}

/// `GET /states/:code/admission`
pub async fn admission<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FunFactStore,
{
  let r = record(&state, &code)?;
  Ok(Json(json!({ "state": r.state, "admitted": r.admission_date })))
}
