//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! The fact list is stored as a compact JSON array. State codes are stored as
//! their two-letter uppercase form.

use statefacts_core::{funfact::FunFactDocument, state::StateCode};

use crate::Result;

// ─── Fact list ───────────────────────────────────────────────────────────────

pub fn encode_facts(facts: &[String]) -> serde_json::Result<String> {
  serde_json::to_string(facts)
}

pub fn decode_facts(s: &str) -> serde_json::Result<Vec<String>> {
  serde_json::from_str(s)
}

/// Surface a JSON failure from inside a `Connection::call` closure.
pub fn call_error(e: serde_json::Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `fun_facts` row exactly as read from SQLite.
pub struct RawDocument {
  pub state_code: String,
  pub funfacts:   String,
}

impl RawDocument {
  pub fn into_document(self) -> Result<FunFactDocument> {
    Ok(FunFactDocument {
      state_code: StateCode::try_from(self.state_code)?,
      funfacts:   decode_facts(&self.funfacts)?,
    })
  }
}
