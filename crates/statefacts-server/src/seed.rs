//! The `seed` command: create a fun-fact document for every state.
//!
//! Request handlers never create documents, so a fresh store must be seeded
//! before facts can be added through the API. A seed file may also supply
//! initial facts:
//!
//! ```json
//! { "KS": ["Kansas is flatter than a pancake."], "NE": [] }
//! ```

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context as _, bail};
use statefacts_core::{
  dataset::ReferenceDataset,
  store::{FunFactStore, Mutation},
};

/// Facts to load, keyed by state code as written in the seed file.
pub type SeedFacts = BTreeMap<String, Vec<String>>;

/// What a seeding run changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
  /// Documents that did not exist before.
  pub created:  usize,
  /// Facts appended from the seed file.
  pub appended: usize,
}

pub fn read_facts(path: &Path) -> anyhow::Result<SeedFacts> {
  let json = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  serde_json::from_str(&json).with_context(|| format!("malformed seed file {path:?}"))
}

/// Ensure a document exists for every dataset code, then append `facts`.
///
/// Every code in `facts` is validated before anything is written.
pub async fn seed<S>(
  store:   &S,
  dataset: &ReferenceDataset,
  facts:   SeedFacts,
) -> anyhow::Result<SeedReport>
where
  S: FunFactStore,
{
  let mut resolved = Vec::with_capacity(facts.len());
  for (raw, list) in facts {
    let Some(code) = dataset.resolve(&raw) else {
      bail!("seed file names unknown state code {raw:?}");
    };
    resolved.push((code, list));
  }

  let mut report = SeedReport::default();

  for code in dataset.codes() {
    if store
      .ensure_document(code.clone())
      .await
      .with_context(|| format!("failed to create document for {code}"))?
    {
      report.created += 1;
    }
  }

  for (code, list) in resolved {
    if list.is_empty() {
      continue;
    }
    let count = list.len();
    match store
      .append_facts(code.clone(), list)
      .await
      .with_context(|| format!("failed to append facts for {code}"))?
    {
      Mutation::Applied(_) => report.appended += count,
      other => bail!("unexpected outcome seeding {code}: {other:?}"),
    }
  }

  tracing::info!(created = report.created, appended = report.appended, "seeding complete");
  Ok(report)
}
