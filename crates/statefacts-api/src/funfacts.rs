//! Handlers for `/states/:code/funfact`.
//!
//! | Method   | Path | Body | Notes |
//! |----------|------|------|-------|
//! | `GET`    | `/states/:code/funfact` | (none) | One fact at random |
//! | `POST`   | `/states/:code/funfact` | `{"funfacts":[...]}` | Appends; 201 + document |
//! | `PATCH`  | `/states/:code/funfact` | `{"index":1,"funfact":"..."}` | Replaces one fact |
//! | `DELETE` | `/states/:code/funfact` | `{"index":1}` | Removes one fact |
//!
//! Indexes are 1-based. Documents must already exist (see seeding in the
//! server binary); none of these handlers create one.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use bytes::Bytes;
use serde_json::{Map, Value, json};
use statefacts_core::{
  funfact::{FactIndex, FunFactDocument, validate_fact, validate_fact_list},
  state::StateCode,
  store::{FunFactStore, Mutation},
};

use crate::{AppState, error::ApiError, extract::ValidCode};

const MALFORMED_BODY: &str = "Malformed JSON body";
const NOT_AN_ARRAY: &str = "Fun facts must be an array.";
const INDEX_REQUIRED: &str = "State fun fact index value required";
const FACT_REQUIRED: &str = "State fun fact value must be a non-empty string";
const NO_DOCUMENT_TO_UPDATE: &str = "No state found to update";
const NO_DOCUMENT_TO_DELETE: &str = "No state found to delete fun fact from";

fn no_facts(code: &StateCode) -> ApiError {
  ApiError::not_found(format!("No Fun Facts found for {code}"))
}

/// Parse a request body as JSON. An empty body reads as `{}` so that field
/// validation, not parsing, reports what is missing.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Object(Map::new()));
  }
  serde_json::from_slice(body)
    .map_err(|_| ApiError::bad_request(MALFORMED_BODY))
}

/// Map a store outcome to a response document or a client error.
fn applied(
  outcome: Mutation,
  code: &StateCode,
  no_document: &str,
) -> Result<FunFactDocument, ApiError> {
  match outcome {
    Mutation::Applied(doc) => Ok(doc),
    Mutation::NoDocument => Err(ApiError::not_found(no_document)),
    Mutation::NoFacts => Err(no_facts(code)),
    Mutation::OutOfRange => Err(ApiError::bad_request(format!(
      "No Fun Fact found at that index for {code}"
    ))),
  }
}

// ─── Random ───────────────────────────────────────────────────────────────────

/// `GET /states/:code/funfact` returns `{"funfact": "..."}`
pub async fn random<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: FunFactStore,
{
  let document = state
    .store
    .get_document(code.clone())
    .await
    .map_err(ApiError::store)?;

  let fact = document
    .as_ref()
    .and_then(|d| d.random_fact(&mut rand::thread_rng()))
    .ok_or_else(|| no_facts(&code))?;

  Ok(Json(json!({ "funfact": fact })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /states/:code/funfact`, body: `{"funfacts": ["...", ...]}`
///
/// Returns 201 and the updated document. An empty array changes nothing and
/// returns 200 with the current document.
pub async fn create<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<(StatusCode, Json<FunFactDocument>), ApiError>
where
  S: FunFactStore,
{
  let body = parse_body(&body)?;
  let facts = validate_fact_list(body.get("funfacts"))
    .ok_or_else(|| ApiError::bad_request(NOT_AN_ARRAY))?;

  if facts.is_empty() {
    let document = state
      .store
      .get_document(code)
      .await
      .map_err(ApiError::store)?
      .ok_or_else(|| ApiError::not_found(NO_DOCUMENT_TO_UPDATE))?;
    return Ok((StatusCode::OK, Json(document)));
  }

  let outcome = state
    .store
    .append_facts(code.clone(), facts)
    .await
    .map_err(ApiError::store)?;
  let document = applied(outcome, &code, NO_DOCUMENT_TO_UPDATE)?;

  tracing::debug!(%code, count = document.funfacts.len(), "appended fun facts");
  Ok((StatusCode::CREATED, Json(document)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /states/:code/funfact`, body: `{"index": 1, "funfact": "..."}`
///
/// The fact is trimmed before it is stored.
pub async fn update<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<Json<FunFactDocument>, ApiError>
where
  S: FunFactStore,
{
  let body = parse_body(&body)?;
  let index = FactIndex::parse(body.get("index"))
    .ok_or_else(|| ApiError::bad_request(INDEX_REQUIRED))?;
  let fact = validate_fact(body.get("funfact"))
    .ok_or_else(|| ApiError::bad_request(FACT_REQUIRED))?;

  let outcome = state
    .store
    .replace_fact(code.clone(), index, fact)
    .await
    .map_err(ApiError::store)?;

  applied(outcome, &code, NO_DOCUMENT_TO_UPDATE).map(Json)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /states/:code/funfact`, body: `{"index": 1}`
pub async fn remove<S>(
  ValidCode(code): ValidCode,
  State(state): State<AppState<S>>,
  body: Bytes,
) -> Result<Json<FunFactDocument>, ApiError>
where
  S: FunFactStore,
{
  let body = parse_body(&body)?;
  let index = FactIndex::parse(body.get("index"))
    .ok_or_else(|| ApiError::bad_request(INDEX_REQUIRED))?;

  let outcome = state
    .store
    .remove_fact(code.clone(), index)
    .await
    .map_err(ApiError::store)?;

  applied(outcome, &code, NO_DOCUMENT_TO_DELETE).map(Json)
}
