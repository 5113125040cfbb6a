//! Test doubles for the engine's two sources.

use std::{
  collections::{BTreeSet, HashMap},
  io,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
  time::Duration,
};

use casefile_core::{
  case::CaseSummary,
  identity::IdentityKey,
  memory::MemoryStore,
  person::{PersonRecord, Role},
  source::{CaseDirectory, RosterSource},
};
use uuid::Uuid;

use crate::{Enricher, Resolver, Strategy};

pub fn resolver(store: MemoryStore) -> Resolver<MemoryStore, MemoryStore> {
  let store = Arc::new(store);
  Resolver::new(store.clone(), store)
}

pub fn enricher(store: MemoryStore, strategy: Strategy) -> Enricher<MemoryStore, MemoryStore> {
  Enricher::new(resolver(store)).with_strategy(strategy)
}

fn outage() -> io::Error {
  io::Error::new(io::ErrorKind::ConnectionRefused, "backing store offline")
}

// ─── Failing sources ─────────────────────────────────────────────────────────

pub struct FailingRoster;

impl RosterSource for FailingRoster {
  type Error = io::Error;

  async fn fetch_roster(&self, _role: Role) -> io::Result<Vec<PersonRecord>> {
    Err(outage())
  }

  async fn fetch_record(&self, _role: Role, _id: Uuid) -> io::Result<Option<PersonRecord>> {
    Err(outage())
  }

  async fn fetch_matches(
    &self,
    _role: Role,
    _identity: &IdentityKey,
    _exclude_case_id: Uuid,
  ) -> io::Result<Vec<PersonRecord>> {
    Err(outage())
  }
}

pub struct FailingDirectory;

impl CaseDirectory for FailingDirectory {
  type Error = io::Error;

  async fn resolve_cases(
    &self,
    _case_ids: &BTreeSet<Uuid>,
  ) -> io::Result<HashMap<Uuid, CaseSummary>> {
    Err(outage())
  }
}

/// Serves rosters from a [`MemoryStore`] but fails every `fetch_matches`
/// call for one role.
pub struct FlakyMatches {
  pub inner:   MemoryStore,
  pub failing: Role,
}

impl RosterSource for FlakyMatches {
  type Error = io::Error;

  async fn fetch_roster(&self, role: Role) -> io::Result<Vec<PersonRecord>> {
    Ok(self.inner.fetch_roster(role).await.unwrap_or_default())
  }

  async fn fetch_record(&self, role: Role, id: Uuid) -> io::Result<Option<PersonRecord>> {
    Ok(self.inner.fetch_record(role, id).await.unwrap_or_default())
  }

  async fn fetch_matches(
    &self,
    role: Role,
    identity: &IdentityKey,
    exclude_case_id: Uuid,
  ) -> io::Result<Vec<PersonRecord>> {
    if role == self.failing {
      return Err(outage());
    }
    Ok(
      self
        .inner
        .fetch_matches(role, identity, exclude_case_id)
        .await
        .unwrap_or_default(),
    )
  }
}

// ─── Instrumented sources ────────────────────────────────────────────────────

/// Counts every roster call that reaches the wrapped source.
pub struct CountingRoster<R> {
  inner: R,
  scans: AtomicUsize,
}

impl<R> CountingRoster<R> {
  pub fn new(inner: R) -> Self { Self { inner, scans: AtomicUsize::new(0) } }

  pub fn scans(&self) -> usize { self.scans.load(Ordering::SeqCst) }
}

impl<R: RosterSource> RosterSource for CountingRoster<R> {
  type Error = R::Error;

  async fn fetch_roster(&self, role: Role) -> Result<Vec<PersonRecord>, R::Error> {
    self.scans.fetch_add(1, Ordering::SeqCst);
    self.inner.fetch_roster(role).await
  }

  async fn fetch_record(&self, role: Role, id: Uuid) -> Result<Option<PersonRecord>, R::Error> {
    self.inner.fetch_record(role, id).await
  }

  async fn fetch_matches(
    &self,
    role: Role,
    identity: &IdentityKey,
    exclude_case_id: Uuid,
  ) -> Result<Vec<PersonRecord>, R::Error> {
    self.scans.fetch_add(1, Ordering::SeqCst);
    self.inner.fetch_matches(role, identity, exclude_case_id).await
  }
}

/// Delays every roster call, and records how many finished.
pub struct SlowRoster {
  pub inner:    MemoryStore,
  pub delay:    Duration,
  pub finished: Arc<AtomicUsize>,
}

impl RosterSource for SlowRoster {
  type Error = std::convert::Infallible;

  async fn fetch_roster(&self, role: Role) -> Result<Vec<PersonRecord>, Self::Error> {
    tokio::time::sleep(self.delay).await;
    self.finished.fetch_add(1, Ordering::SeqCst);
    self.inner.fetch_roster(role).await
  }

  async fn fetch_record(&self, role: Role, id: Uuid) -> Result<Option<PersonRecord>, Self::Error> {
    self.inner.fetch_record(role, id).await
  }

  async fn fetch_matches(
    &self,
    role: Role,
    identity: &IdentityKey,
    exclude_case_id: Uuid,
  ) -> Result<Vec<PersonRecord>, Self::Error> {
    tokio::time::sleep(self.delay).await;
    self.finished.fetch_add(1, Ordering::SeqCst);
    self.inner.fetch_matches(role, identity, exclude_case_id).await
  }
}
