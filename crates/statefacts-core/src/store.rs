//! The `FunFactStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `statefacts-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  funfact::{EditError, FactIndex, FunFactDocument},
  state::StateCode,
};

// ─── Mutation outcome ────────────────────────────────────────────────────────

/// The result of a write against one document.
///
/// Anything other than [`Mutation::Applied`] means nothing was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
  /// The write succeeded; carries the document as persisted.
  Applied(FunFactDocument),
  /// No document exists for the code. Documents are never created
  /// implicitly; see [`FunFactStore::ensure_document`].
  NoDocument,
  /// The document exists but its list is empty.
  NoFacts,
  /// The index does not name an existing fact.
  OutOfRange,
}

impl From<EditError> for Mutation {
  fn from(e: EditError) -> Self {
    match e {
      EditError::NoFacts => Self::NoFacts,
      EditError::OutOfRange => Self::OutOfRange,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the fun-fact store, one document per state code.
///
/// Each mutation is applied atomically to a single document: either the whole
/// edit is persisted or nothing is. No cross-document coordination exists.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait FunFactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every stored document, in no particular order.
  fn list_documents(
    &self,
  ) -> impl Future<Output = Result<Vec<FunFactDocument>, Self::Error>> + Send + '_;

  /// The document for `code`, or `None` if none has been created.
  fn get_document(
    &self,
    code: StateCode,
  ) -> impl Future<Output = Result<Option<FunFactDocument>, Self::Error>> + Send + '_;

  /// Create an empty document for `code` unless one exists.
  ///
  /// This is the seeding operation; request handlers never call it. Returns
  /// `true` if a document was created.
  fn ensure_document(
    &self,
    code: StateCode,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Append `facts` to the end of the document's list.
  ///
  /// Yields [`Mutation::NoDocument`] if the document does not exist.
  fn append_facts(
    &self,
    code: StateCode,
    facts: Vec<String>,
  ) -> impl Future<Output = Result<Mutation, Self::Error>> + Send + '_;

  /// Overwrite the fact at the 1-based `index`.
  fn replace_fact(
    &self,
    code: StateCode,
    index: FactIndex,
    fact: String,
  ) -> impl Future<Output = Result<Mutation, Self::Error>> + Send + '_;

  /// Remove the fact at the 1-based `index`.
  fn remove_fact(
    &self,
    code: StateCode,
    index: FactIndex,
  ) -> impl Future<Output = Result<Mutation, Self::Error>> + Send + '_;
}
