//! The reference dataset: fifty [`StateRecord`]s loaded once at startup.
//!
//! The dataset is read-only after construction. The server wraps it in an
//! `Arc` and shares it with every handler; nothing re-reads it per request.

use std::{collections::HashMap, path::Path};

use crate::{
  Error, Result,
  state::{StateCode, StateRecord},
};

/// The dataset compiled into the binary.
const BUNDLED: &str = include_str!("../data/states.json");

/// Codes of the states that do not share a border with the lower 48.
pub const NON_CONTIGUOUS: [&str; 2] = ["AK", "HI"];

// ─── Contiguity filter ───────────────────────────────────────────────────────

/// Which slice of the dataset a list query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contiguity {
  #[default]
  All,
  /// The lower 48: everything except Alaska and Hawaii.
  Contiguous,
  /// Alaska and Hawaii only.
  NonContiguous,
}

impl Contiguity {
  /// Interpret the `contig` query parameter. Only the exact strings `true`
  /// and `false` narrow the list; anything else means all states.
  pub fn from_query(contig: Option<&str>) -> Self {
    match contig {
      Some("true") => Self::Contiguous,
      Some("false") => Self::NonContiguous,
      _ => Self::All,
    }
  }

  pub fn includes(self, code: &StateCode) -> bool {
    let remote = NON_CONTIGUOUS.contains(&code.as_str());
    match self {
      Self::All => true,
      Self::Contiguous => !remote,
      Self::NonContiguous => remote,
    }
  }
}

// ─── Dataset ─────────────────────────────────────────────────────────────────

/// An immutable table of state records, kept in file order.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
  records: Vec<StateRecord>,
  by_code: HashMap<StateCode, usize>,
}

impl ReferenceDataset {
  /// Parse the dataset bundled with the crate.
  pub fn bundled() -> Result<Self> { Self::from_json(BUNDLED) }

  /// Read and parse a replacement dataset from disk.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::DatasetIo {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&json)
  }

  /// Parse a JSON array of records. Codes must be unique.
  pub fn from_json(json: &str) -> Result<Self> {
    let records: Vec<StateRecord> = serde_json::from_str(json)?;

    let mut by_code = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
      if by_code.insert(record.code.clone(), i).is_some() {
        return Err(Error::DuplicateCode(record.code.clone()));
      }
    }

    Ok(Self { records, by_code })
  }

  /// All records in dataset order.
  pub fn records(&self) -> &[StateRecord] { &self.records }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Every code in dataset order.
  pub fn codes(&self) -> impl Iterator<Item = &StateCode> {
    self.records.iter().map(|r| &r.code)
  }

  pub fn get(&self, code: &StateCode) -> Option<&StateRecord> {
    self.by_code.get(code).map(|&i| &self.records[i])
  }

  /// Validate a raw path segment: uppercase it and require that the result
  /// is one of the dataset's codes.
  pub fn resolve(&self, raw: &str) -> Option<StateCode> {
    StateCode::parse(raw).filter(|code| self.by_code.contains_key(code))
  }

  /// Records matching `contiguity`, in dataset order.
  pub fn filter(
    &self,
    contiguity: Contiguity,
  ) -> impl Iterator<Item = &StateRecord> {
    self
      .records
      .iter()
      .filter(move |r| contiguity.includes(&r.code))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn dataset() -> ReferenceDataset { ReferenceDataset::bundled().unwrap() }

  #[test]
  fn bundled_has_fifty_unique_states() {
    let ds = dataset();
    assert_eq!(ds.len(), 50);
    let mut codes: Vec<_> = ds.codes().cloned().collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 50);
  }

  #[test]
  fn resolve_accepts_any_case() {
    let ds = dataset();
    assert_eq!(ds.resolve("ks").unwrap().as_str(), "KS");
    assert_eq!(ds.resolve("Ks").unwrap().as_str(), "KS");
    assert_eq!(ds.resolve("KS").unwrap().as_str(), "KS");
  }

  #[test]
  fn resolve_rejects_unknown_codes() {
    let ds = dataset();
    assert!(ds.resolve("ZZ").is_none());
    assert!(ds.resolve("DC").is_none());
    assert!(ds.resolve("kansas").is_none());
    assert!(ds.resolve("").is_none());
  }

  #[test]
  fn get_returns_matching_record() {
    let ds = dataset();
    for code in ds.codes() {
      assert_eq!(&ds.get(code).unwrap().code, code);
    }
    let ks = ds.resolve("ks").unwrap();
    let kansas = ds.get(&ks).unwrap();
    assert_eq!(kansas.state, "Kansas");
    assert_eq!(kansas.capital_city, "Topeka");
  }

  #[test]
  fn contiguous_filter_drops_alaska_and_hawaii() {
    let ds = dataset();
    let lower: Vec<_> = ds.filter(Contiguity::Contiguous).collect();
    assert_eq!(lower.len(), 48);
    assert!(lower.iter().all(|r| r.code.as_str() != "AK" && r.code.as_str() != "HI"));
  }

  #[test]
  fn non_contiguous_filter_keeps_only_alaska_and_hawaii() {
    let ds = dataset();
    let codes: Vec<_> = ds
      .filter(Contiguity::NonContiguous)
      .map(|r| r.code.as_str())
      .collect();
    assert_eq!(codes, ["AK", "HI"]);
  }

  #[test]
  fn filter_preserves_dataset_order() {
    let ds = dataset();
    let all: Vec<_> = ds.filter(Contiguity::All).map(|r| &r.code).collect();
    let order: Vec<_> = ds.codes().collect();
    assert_eq!(all, order);
  }

  #[test]
  fn contig_query_parsing() {
    assert_eq!(Contiguity::from_query(Some("true")), Contiguity::Contiguous);
    assert_eq!(Contiguity::from_query(Some("false")), Contiguity::NonContiguous);
    assert_eq!(Contiguity::from_query(Some("TRUE")), Contiguity::All);
    assert_eq!(Contiguity::from_query(Some("")), Contiguity::All);
    assert_eq!(Contiguity::from_query(None), Contiguity::All);
  }

  #[test]
  fn duplicate_codes_are_rejected() {
    let json = r#"[
      {"state":"Kansas","code":"KS","nickname":"a","capital_city":"Topeka",
       "population":1,"admission_date":"1861-01-29"},
      {"state":"Kansas","code":"ks","nickname":"a","capital_city":"Topeka",
       "population":1,"admission_date":"1861-01-29"}
    ]"#;
    let err = ReferenceDataset::from_json(json).unwrap_err();
    assert!(matches!(err, Error::DuplicateCode(ref c) if c.as_str() == "KS"));
  }

  #[test]
  fn bad_dates_are_rejected() {
    let json = r#"[
      {"state":"Kansas","code":"KS","nickname":"a","capital_city":"Topeka",
       "population":1,"admission_date":"January 29, 1861"}
    ]"#;
    assert!(matches!(
      ReferenceDataset::from_json(json),
      Err(Error::DatasetFormat(_))
    ));
  }

  #[test]
  fn malformed_codes_are_rejected() {
    let json = r#"[
      {"state":"Kansas","code":"Kansas","nickname":"a","capital_city":"Topeka",
       "population":1,"admission_date":"1861-01-29"}
    ]"#;
    assert!(matches!(
      ReferenceDataset::from_json(json),
      Err(Error::DatasetFormat(_))
    ));
  }

  #[test]
  fn load_missing_file_reports_path() {
    let err = ReferenceDataset::load("/nonexistent/states.json").unwrap_err();
    assert!(matches!(err, Error::DatasetIo { .. }));
  }
}
