//! Integration tests for `SqliteStore` against an in-memory database.

use std::{collections::BTreeSet, sync::Arc};

use casefile_core::{
  case::NewCase,
  identity::IdentityKey,
  person::{NewPerson, Role},
  source::{CaseDirectory, RosterSource},
};
use casefile_xref::{Enricher, Resolver, Strategy, summarize};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn case(number: &str) -> NewCase {
  NewCase {
    case_number:   number.into(),
    district:      "Lahore".into(),
    station:       "Model Town".into(),
    status:        "under investigation".into(),
    incident_date: NaiveDate::from_ymd_opt(2024, 3, 14),
  }
}

fn person(case_id: Uuid, name: &str, mobile: Option<&str>, national_id: Option<&str>) -> NewPerson {
  NewPerson::new(
    case_id,
    name,
    IdentityKey::new(mobile.map(Into::into), national_id.map(Into::into)),
  )
}

// ─── Cases ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_and_resolve_case() {
  let s = store().await;
  let summary = s.register_case(case("FIR-101/2024")).await.unwrap();

  let found = s
    .resolve_cases(&BTreeSet::from([summary.case_id]))
    .await
    .unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[&summary.case_id], summary);
  assert_eq!(
    found[&summary.case_id].incident_date,
    NaiveDate::from_ymd_opt(2024, 3, 14)
  );
}

#[tokio::test]
async fn resolve_cases_omits_unknown_ids() {
  let s = store().await;
  let known = s.register_case(case("FIR-1")).await.unwrap();
  let unknown = Uuid::new_v4();

  let found = s
    .resolve_cases(&BTreeSet::from([known.case_id, unknown]))
    .await
    .unwrap();
  assert_eq!(found.len(), 1);
  assert!(found.contains_key(&known.case_id));
  assert!(!found.contains_key(&unknown));
}

#[tokio::test]
async fn resolve_cases_handles_large_batches() {
  let s = store().await;
  let mut ids = BTreeSet::new();
  for n in 0..1200 {
    ids.insert(s.register_case(case(&format!("FIR-{n}"))).await.unwrap().case_id);
  }
  let found = s.resolve_cases(&ids).await.unwrap();
  assert_eq!(found.len(), 1200);
}

#[tokio::test]
async fn resolve_no_cases_is_empty() {
  let s = store().await;
  assert!(s.resolve_cases(&BTreeSet::new()).await.unwrap().is_empty());
}

// ─── Rosters ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_person_requires_registered_case() {
  let s = store().await;
  let missing = Uuid::new_v4();
  let err = s
    .add_person(Role::Accused, person(missing, "X", Some("1"), None))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CaseNotFound(id) if id == missing), "got {err:?}");
}

#[tokio::test]
async fn rosters_are_separate_and_ordered() {
  let s = store().await;
  let c = s.register_case(case("FIR-1")).await.unwrap();

  let first = s
    .add_person(Role::Accused, person(c.case_id, "first", Some("1"), None))
    .await
    .unwrap();
  let second = s
    .add_person(Role::Accused, person(c.case_id, "second", Some("2"), None))
    .await
    .unwrap();
  let bailer = s
    .add_person(Role::Bailer, person(c.case_id, "bailer", Some("3"), None))
    .await
    .unwrap();

  let accused = s.fetch_roster(Role::Accused).await.unwrap();
  assert_eq!(accused, vec![first, second]);
  assert!(accused.iter().all(|r| r.role == Role::Accused));

  let bailers = s.fetch_roster(Role::Bailer).await.unwrap();
  assert_eq!(bailers, vec![bailer]);
}

#[tokio::test]
async fn fetch_record_by_id() {
  let s = store().await;
  let c = s.register_case(case("FIR-1")).await.unwrap();
  let mut input = person(c.case_id, "Imran", Some("03001234567"), Some("35202-1"));
  input.father_name = Some("Aslam".into());
  input.age = Some(34);
  input.gender = Some("male".into());
  input.address = Some("House 4, Street 9".into());
  let record = s.add_person(Role::Bailer, input).await.unwrap();

  let fetched = s.fetch_record(Role::Bailer, record.id).await.unwrap();
  assert_eq!(fetched, Some(record.clone()));

  // Wrong roster.
  assert!(s.fetch_record(Role::Accused, record.id).await.unwrap().is_none());
}

#[tokio::test]
async fn blank_identity_is_stored_as_absent() {
  let s = store().await;
  let c = s.register_case(case("FIR-1")).await.unwrap();
  let record = s
    .add_person(Role::Accused, person(c.case_id, "anon", Some(""), Some("")))
    .await
    .unwrap();

  let fetched = s.fetch_record(Role::Accused, record.id).await.unwrap().unwrap();
  assert_eq!(fetched.identity, IdentityKey::default());
}

#[tokio::test]
async fn fetch_matches_is_or_across_keys() {
  let s = store().await;
  let origin = s.register_case(case("FIR-1")).await.unwrap();
  let other = s.register_case(case("FIR-2")).await.unwrap();

  let by_mobile = s
    .add_person(Role::Accused, person(other.case_id, "a", Some("m1"), Some("zz")))
    .await
    .unwrap();
  let by_id = s
    .add_person(Role::Accused, person(other.case_id, "b", None, Some("n1")))
    .await
    .unwrap();
  s.add_person(Role::Accused, person(other.case_id, "c", Some("m2"), Some("n2")))
    .await
    .unwrap();
  s.add_person(Role::Accused, person(origin.case_id, "self", Some("m1"), Some("n1")))
    .await
    .unwrap();

  let identity = IdentityKey::new(Some("m1".into()), Some("n1".into()));
  let hits = s
    .fetch_matches(Role::Accused, &identity, origin.case_id)
    .await
    .unwrap();

  assert_eq!(hits, vec![by_mobile, by_id]);
}

#[tokio::test]
async fn fetch_matches_only_uses_present_keys() {
  let s = store().await;
  let origin = s.register_case(case("FIR-1")).await.unwrap();
  let other = s.register_case(case("FIR-2")).await.unwrap();

  // Neither side has a national ID; absent keys never match each other.
  s.add_person(Role::Bailer, person(other.case_id, "a", Some("m7"), None))
    .await
    .unwrap();

  let hits = s
    .fetch_matches(Role::Bailer, &IdentityKey::from_mobile("m8"), origin.case_id)
    .await
    .unwrap();
  assert!(hits.is_empty());

  let none = s
    .fetch_matches(Role::Bailer, &IdentityKey::default(), origin.case_id)
    .await
    .unwrap();
  assert!(none.is_empty());
}

// ─── End to end through the engine ───────────────────────────────────────────

fn engine(s: SqliteStore, strategy: Strategy) -> Enricher<SqliteStore, SqliteStore> {
  let s = Arc::new(s);
  Enricher::new(Resolver::new(s.clone(), s)).with_strategy(strategy)
}

#[tokio::test]
async fn repeat_accused_end_to_end() {
  for strategy in [Strategy::Indexed, Strategy::FanOut] {
    let s = store().await;
    let c10 = s.register_case(case("FIR-10")).await.unwrap();
    let c11 = s.register_case(case("FIR-11")).await.unwrap();
    let c12 = s.register_case(case("FIR-12")).await.unwrap();
    let loner = s
      .add_person(Role::Accused, person(c12.case_id, "L", Some("9222222222"), None))
      .await
      .unwrap();
    let a1 = s
      .add_person(Role::Accused, person(c10.case_id, "A1", Some("9000000001"), None))
      .await
      .unwrap();
    let a2 = s
      .add_person(Role::Accused, person(c11.case_id, "A2", Some("9000000001"), None))
      .await
      .unwrap();

    let engine = engine(s, strategy);
    let history = engine.resolve(&a1.identity, c10.case_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].case_id, c11.case_id);
    assert_eq!(history[0].case_number, "FIR-11");
    assert_eq!(history[0].role, Role::Accused);

    let enriched = engine.enrich_role(Role::Accused).await.unwrap();
    let order: Vec<Uuid> = enriched.iter().map(|r| r.record.id).collect();
    assert_eq!(order, vec![a1.id, a2.id, loner.id], "{strategy:?}");
    assert_eq!(
      enriched.iter().map(|r| r.occurrence_count).collect::<Vec<_>>(),
      vec![2, 2, 1]
    );
  }
}

#[tokio::test]
async fn suspicious_bailer_end_to_end() {
  for strategy in [Strategy::Indexed, Strategy::FanOut] {
    let s = store().await;
    let c20 = s.register_case(case("FIR-20")).await.unwrap();
    let c21 = s.register_case(case("FIR-21")).await.unwrap();
    let b1 = s
      .add_person(Role::Bailer, person(c20.case_id, "B1", None, Some("ID123")))
      .await
      .unwrap();
    s.add_person(Role::Accused, person(c21.case_id, "A3", None, Some("ID123")))
      .await
      .unwrap();

    let engine = engine(s, strategy);
    let enriched = engine.enrich(vec![b1.clone()], Role::Bailer).await.unwrap();

    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].record.id, b1.id);
    assert_eq!(enriched[0].history.len(), 1);
    assert_eq!(enriched[0].history[0].case_id, c21.case_id);
    assert_eq!(enriched[0].history[0].role, Role::Accused);
    assert!(enriched[0].was_previously_accused);
    assert_eq!(summarize(&enriched).suspicious_count, 1);
  }
}
