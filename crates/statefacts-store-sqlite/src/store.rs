//! [`SqliteStore`]: the SQLite implementation of [`FunFactStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior};

use statefacts_core::{
  funfact::{EditError, FactIndex, FunFactDocument},
  state::StateCode,
  store::{FunFactStore, Mutation},
};

use crate::{
  Result,
  encode::{RawDocument, call_error, decode_facts, encode_facts},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A fun-fact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Load, edit and write back one document inside a single immediate
  /// transaction. If `edit` refuses, the transaction is dropped unwritten.
  async fn edit_document<F>(&self, code: StateCode, edit: F) -> Result<Mutation>
  where
    F: FnOnce(&mut FunFactDocument) -> Result<(), EditError> + Send + 'static,
  {
    let code_str = code.as_str().to_owned();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stored: Option<String> = tx
          .query_row(
            "SELECT funfacts FROM fun_facts WHERE state_code = ?1",
            rusqlite::params![code_str],
            |row| row.get(0),
          )
          .optional()?;

        let Some(stored) = stored else {
          return Ok(Mutation::NoDocument);
        };

        let mut doc = FunFactDocument {
          state_code: code,
          funfacts:   decode_facts(&stored).map_err(call_error)?,
        };
        if let Err(e) = edit(&mut doc) {
          return Ok(Mutation::from(e));
        }

        let encoded = encode_facts(&doc.funfacts).map_err(call_error)?;
        tx.execute(
          "UPDATE fun_facts SET funfacts = ?1 WHERE state_code = ?2",
          rusqlite::params![encoded, code_str],
        )?;
        tx.commit()?;

        Ok(Mutation::Applied(doc))
      })
      .await?;

    Ok(outcome)
  }
}

// ─── FunFactStore impl ───────────────────────────────────────────────────────

impl FunFactStore for SqliteStore {
  type Error = crate::Error;

  async fn list_documents(&self) -> Result<Vec<FunFactDocument>> {
    let raws: Vec<RawDocument> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT state_code, funfacts FROM fun_facts")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawDocument {
              state_code: row.get(0)?,
              funfacts:   row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDocument::into_document).collect()
  }

  async fn get_document(&self, code: StateCode) -> Result<Option<FunFactDocument>> {
    let code_str = code.as_str().to_owned();

    let raw: Option<RawDocument> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT state_code, funfacts FROM fun_facts WHERE state_code = ?1",
            rusqlite::params![code_str],
            |row| {
              Ok(RawDocument {
                state_code: row.get(0)?,
                funfacts:   row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawDocument::into_document).transpose()
  }

  async fn ensure_document(&self, code: StateCode) -> Result<bool> {
    let code_str = code.as_str().to_owned();

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT OR IGNORE INTO fun_facts (state_code) VALUES (?1)",
          rusqlite::params![code_str],
        )?)
      })
      .await?;

    Ok(inserted > 0)
  }

  async fn append_facts(&self, code: StateCode, facts: Vec<String>) -> Result<Mutation> {
    self
      .edit_document(code, move |doc| {
        doc.append(facts);
        Ok(())
      })
      .await
  }

  async fn replace_fact(
    &self,
    code:  StateCode,
    index: FactIndex,
    fact:  String,
  ) -> Result<Mutation> {
    self
      .edit_document(code, move |doc| doc.replace_at(index, fact))
      .await
  }

  async fn remove_fact(&self, code: StateCode, index: FactIndex) -> Result<Mutation> {
    self
      .edit_document(code, move |doc| doc.remove_at(index).map(drop))
      .await
  }
}
