//! Integration tests for `SqliteStore` against an in-memory database.

use statefacts_core::{
  funfact::FactIndex,
  state::StateCode,
  store::{FunFactStore, Mutation},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn code(s: &str) -> StateCode { StateCode::parse(s).unwrap() }

fn facts(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| (*s).to_owned()).collect()
}

/// A store holding one seeded document for `KS` with the given facts.
async fn seeded(items: &[&str]) -> SqliteStore {
  let s = store().await;
  s.ensure_document(code("KS")).await.unwrap();
  if !items.is_empty() {
    s.append_facts(code("KS"), facts(items)).await.unwrap();
  }
  s
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_document_creates_once() {
  let s = store().await;
  assert!(s.ensure_document(code("KS")).await.unwrap());
  assert!(!s.ensure_document(code("KS")).await.unwrap());

  let doc = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(doc.state_code, code("KS"));
  assert!(doc.funfacts.is_empty());
}

#[tokio::test]
async fn ensure_document_keeps_existing_facts() {
  let s = seeded(&["a"]).await;
  assert!(!s.ensure_document(code("KS")).await.unwrap());
  let doc = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(doc.funfacts, ["a"]);
}

#[tokio::test]
async fn get_document_missing_returns_none() {
  let s = store().await;
  assert!(s.get_document(code("NE")).await.unwrap().is_none());
}

#[tokio::test]
async fn list_documents_returns_all() {
  let s = store().await;
  for c in ["KS", "NE", "OK"] {
    s.ensure_document(code(c)).await.unwrap();
  }
  s.append_facts(code("NE"), facts(&["corn"])).await.unwrap();

  let mut docs = s.list_documents().await.unwrap();
  docs.sort_by(|a, b| a.state_code.cmp(&b.state_code));
  assert_eq!(docs.len(), 3);
  assert_eq!(docs[1].state_code, code("NE"));
  assert_eq!(docs[1].funfacts, ["corn"]);
}

// ─── Append ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_without_document_is_refused() {
  let s = store().await;
  let outcome = s.append_facts(code("KS"), facts(&["a"])).await.unwrap();
  assert_eq!(outcome, Mutation::NoDocument);
  assert!(s.get_document(code("KS")).await.unwrap().is_none());
}

#[tokio::test]
async fn append_preserves_order_and_duplicates() {
  let s = seeded(&["a", "b"]).await;
  let outcome = s.append_facts(code("KS"), facts(&["c", "a"])).await.unwrap();

  let Mutation::Applied(doc) = outcome else {
    panic!("expected Applied, got {outcome:?}");
  };
  assert_eq!(doc.funfacts, ["a", "b", "c", "a"]);

  let stored = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(stored, doc);
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_first_position() {
  let s = seeded(&["a", "b"]).await;
  let outcome = s
    .replace_fact(code("KS"), FactIndex::Ordinal(1), "x".into())
    .await
    .unwrap();
  assert!(matches!(outcome, Mutation::Applied(ref d) if d.funfacts == ["x", "b"]));

  let stored = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(stored.funfacts, ["x", "b"]);
}

#[tokio::test]
async fn replace_out_of_range_writes_nothing() {
  let s = seeded(&["a", "b"]).await;
  let outcome = s
    .replace_fact(code("KS"), FactIndex::Ordinal(3), "x".into())
    .await
    .unwrap();
  assert_eq!(outcome, Mutation::OutOfRange);

  let stored = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(stored.funfacts, ["a", "b"]);
}

#[tokio::test]
async fn replace_on_empty_document_reports_no_facts() {
  let s = seeded(&[]).await;
  let outcome = s
    .replace_fact(code("KS"), FactIndex::Ordinal(1), "x".into())
    .await
    .unwrap();
  assert_eq!(outcome, Mutation::NoFacts);
}

#[tokio::test]
async fn replace_without_document() {
  let s = store().await;
  let outcome = s
    .replace_fact(code("KS"), FactIndex::Ordinal(1), "x".into())
    .await
    .unwrap();
  assert_eq!(outcome, Mutation::NoDocument);
}

// ─── Remove ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_middle_fact() {
  let s = seeded(&["a", "b", "c"]).await;
  let outcome = s.remove_fact(code("KS"), FactIndex::Ordinal(2)).await.unwrap();
  assert!(matches!(outcome, Mutation::Applied(ref d) if d.funfacts == ["a", "c"]));

  let stored = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(stored.funfacts, ["a", "c"]);
}

#[tokio::test]
async fn remove_last_fact_leaves_empty_document() {
  let s = seeded(&["only"]).await;
  s.remove_fact(code("KS"), FactIndex::Ordinal(1)).await.unwrap();

  let stored = s.get_document(code("KS")).await.unwrap().unwrap();
  assert!(stored.funfacts.is_empty());

  let again = s.remove_fact(code("KS"), FactIndex::Ordinal(1)).await.unwrap();
  assert_eq!(again, Mutation::NoFacts);
}

#[tokio::test]
async fn remove_unaddressable_index() {
  let s = seeded(&["a"]).await;
  let outcome = s.remove_fact(code("KS"), FactIndex::Unaddressable).await.unwrap();
  assert_eq!(outcome, Mutation::OutOfRange);
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_are_all_kept() {
  let s = seeded(&[]).await;

  let tasks: Vec<_> = (0..40)
    .map(|i| {
      let s = s.clone();
      tokio::spawn(async move {
        s.append_facts(code("KS"), vec![format!("fact {i}")]).await
      })
    })
    .collect();
  for task in tasks {
    assert!(matches!(task.await.unwrap().unwrap(), Mutation::Applied(_)));
  }

  let mut stored = s.get_document(code("KS")).await.unwrap().unwrap().funfacts;
  stored.sort();
  let mut expected: Vec<_> = (0..40).map(|i| format!("fact {i}")).collect();
  expected.sort();
  assert_eq!(stored, expected);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("reopen.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.ensure_document(code("KS")).await.unwrap();
    s.append_facts(code("KS"), facts(&["wheat"])).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  let doc = s.get_document(code("KS")).await.unwrap().unwrap();
  assert_eq!(doc.funfacts, ["wheat"]);
}
