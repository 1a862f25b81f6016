//! State records and the merged read model served to clients.
//!
//! A [`StateRecord`] is immutable reference data. A [`StateView`] is what the
//! API returns: the record plus, when the state has any, its fun facts.

use std::{collections::HashMap, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, funfact::FunFactDocument};

// ─── StateCode ───────────────────────────────────────────────────────────────

/// A two-letter, uppercase postal abbreviation (e.g. `KS`).
///
/// Shape is checked on construction; membership in the dataset is checked by
/// [`crate::dataset::ReferenceDataset::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct StateCode(String);

impl StateCode {
  /// Normalise `raw` to uppercase and check it is two ASCII letters.
  /// Surrounding whitespace is not stripped.
  pub fn parse(raw: &str) -> Option<Self> {
    let code = raw.to_ascii_uppercase();
    (code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()))
      .then_some(Self(code))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl TryFrom<String> for StateCode {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self, Self::Error> {
    Self::parse(&raw).ok_or(Error::InvalidCode(raw))
  }
}

impl fmt::Display for StateCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── StateRecord ─────────────────────────────────────────────────────────────

/// One row of the reference dataset. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
  /// Full state name, e.g. "Kansas".
  pub state:          String,
  pub code:           StateCode,
  pub nickname:       String,
  pub capital_city:   String,
  pub population:     u64,
  pub admission_date: NaiveDate,
  /// Any other descriptive keys in the dataset (slug, admission number, ...),
  /// carried through to responses untouched.
  #[serde(flatten)]
  pub extra:          serde_json::Map<String, serde_json::Value>,
}

// ─── Merge ───────────────────────────────────────────────────────────────────

/// A state record as returned by the API, with fun facts merged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateView {
  #[serde(flatten)]
  pub record:   StateRecord,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub funfacts: Option<Vec<String>>,
}

/// Combine a record with its fun-fact list.
///
/// The `funfacts` field is only present when the list exists and is
/// non-empty.
pub fn merge_facts(record: &StateRecord, funfacts: Option<&[String]>) -> StateView {
  StateView {
    record:   record.clone(),
    funfacts: funfacts.filter(|f| !f.is_empty()).map(<[String]>::to_vec),
  }
}

/// Index a batch of documents by state code, dropping empty lists.
pub fn fact_lists(documents: Vec<FunFactDocument>) -> HashMap<StateCode, Vec<String>> {
  documents
    .into_iter()
    .filter(|doc| !doc.funfacts.is_empty())
    .map(|doc| (doc.state_code, doc.funfacts))
    .collect()
}
