//! Fun-fact documents and the rules for editing them.
//!
//! Clients address facts by 1-based position. Storage is a plain 0-based
//! list; [`FunFactDocument::position`] is the only place the two meet.

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::StateCode;

// ─── Document ────────────────────────────────────────────────────────────────

/// The persisted fun facts for one state. At most one exists per code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunFactDocument {
  pub state_code: StateCode,
  /// Insertion order is significant: position `n` is element `n - 1`.
  #[serde(default)]
  pub funfacts:   Vec<String>,
}

/// Why an index-addressed edit could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
  /// The document has no facts at all.
  NoFacts,
  /// The index does not name an existing position.
  OutOfRange,
}

impl FunFactDocument {
  pub fn new(state_code: StateCode) -> Self {
    Self { state_code, funfacts: Vec::new() }
  }

  /// Append facts to the end of the list, keeping their order. Duplicates are
  /// allowed.
  pub fn append(&mut self, facts: impl IntoIterator<Item = String>) {
    self.funfacts.extend(facts);
  }

  /// Translate a client index into a storage offset.
  pub fn position(&self, index: FactIndex) -> Result<usize, EditError> {
    if self.funfacts.is_empty() {
      return Err(EditError::NoFacts);
    }
    match index {
      FactIndex::Ordinal(n) => usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&i| i < self.funfacts.len())
        .ok_or(EditError::OutOfRange),
      FactIndex::Unaddressable => Err(EditError::OutOfRange),
    }
  }

  /// Overwrite the fact at `index`.
  pub fn replace_at(&mut self, index: FactIndex, fact: String) -> Result<(), EditError> {
    let i = self.position(index)?;
    self.funfacts[i] = fact;
    Ok(())
  }

  /// Remove the fact at `index`, shifting later facts down by one.
  pub fn remove_at(&mut self, index: FactIndex) -> Result<String, EditError> {
    let i = self.position(index)?;
    Ok(self.funfacts.remove(i))
  }

  /// Pick one fact uniformly at random.
  pub fn random_fact<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
    self.funfacts.choose(rng).map(String::as_str)
  }
}

// ─── Request validation ──────────────────────────────────────────────────────

/// A client-supplied, 1-based fact index that passed the "present" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactIndex {
  /// A whole number. May still be out of range (negative, too large).
  Ordinal(i64),
  /// Present and truthy, but not a whole number (`1.5`, `"abc"`, `true`).
  Unaddressable,
}

impl FactIndex {
  /// Read the `index` field of a request body.
  ///
  /// Returns `None` when the value is absent or falsy: missing, `null`,
  /// `false`, `0` or `""`. Note that `0` is therefore reported as a missing
  /// index, not as an out-of-range one. Numeric strings are accepted.
  pub fn parse(value: Option<&Value>) -> Option<Self> {
    match value? {
      Value::Null | Value::Bool(false) => None,
      Value::Number(n) => {
        if n.as_f64() == Some(0.0) {
          None
        } else if let Some(i) = n.as_i64() {
          Some(Self::Ordinal(i))
        } else {
          Some(n.as_f64().map_or(Self::Unaddressable, Self::from_float))
        }
      }
      Value::String(s) if s.is_empty() => None,
      Value::String(s) => {
        let s = s.trim();
        if s.is_empty() {
          // Whitespace-only text is truthy but numerically zero.
          return Some(Self::Ordinal(0));
        }
        Some(s.parse::<f64>().map_or(Self::Unaddressable, Self::from_float))
      }
      Value::Bool(true) | Value::Array(_) | Value::Object(_) => {
        Some(Self::Unaddressable)
      }
    }
  }

  fn from_float(f: f64) -> Self {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
      Self::Ordinal(f as i64)
    } else {
      Self::Unaddressable
    }
  }
}

/// Validate a single replacement fact: a string that is not blank once
/// trimmed. Returns the trimmed text.
pub fn validate_fact(value: Option<&Value>) -> Option<String> {
  match value? {
    Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_owned),
    _ => None,
  }
}

/// Validate a batch of facts to append: an array of strings. An empty array
/// is valid.
pub fn validate_fact_list(value: Option<&Value>) -> Option<Vec<String>> {
  match value? {
    Value::Array(items) => items
      .iter()
      .map(|item| item.as_str().map(str::to_owned))
      .collect(),
    _ => None,
  }
}
