//! [`Enricher`] — batch cross-referencing of a whole roster.

use std::{collections::BTreeSet, sync::Arc};

use casefile_core::{
  case::CaseHistoryEntry,
  history::CaseMatches,
  identity::IdentityKey,
  index::IdentityIndex,
  person::{EnrichedPersonRecord, PersonRecord, Role, sort_by_occurrence},
  source::{CaseDirectory, RosterSource},
};
use serde::Deserialize;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{Error, Report, Resolver, Result};

/// Upper bound on in-flight resolutions under [`Strategy::FanOut`].
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// How a batch is resolved. Both strategies produce identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
  /// Fetch both rosters once, index them by identity, and look every record
  /// up in the index. One directory lookup per batch.
  #[default]
  Indexed,
  /// Run the [`Resolver`] once per record as concurrent tasks, bounded by
  /// the configured concurrency.
  FanOut,
}

/// Applies the [`Resolver`] to every record of a roster and orders the
/// result so repeat offenders surface first.
pub struct Enricher<R, D> {
  resolver:        Resolver<R, D>,
  strategy:        Strategy,
  max_concurrency: usize,
}

impl<R, D> Clone for Enricher<R, D> {
  fn clone(&self) -> Self {
    Self {
      resolver:        self.resolver.clone(),
      strategy:        self.strategy,
      max_concurrency: self.max_concurrency,
    }
  }
}

/// Both full rosters, fetched once for an indexed batch.
struct Rosters {
  accused: Vec<PersonRecord>,
  bailers: Vec<PersonRecord>,
}

impl Rosters {
  fn get(&self, role: Role) -> &[PersonRecord] {
    match role {
      Role::Accused => &self.accused,
      Role::Bailer => &self.bailers,
    }
  }
}

impl<R, D> Enricher<R, D>
where
  R: RosterSource + 'static,
  D: CaseDirectory + 'static,
{
  pub fn new(resolver: Resolver<R, D>) -> Self {
    Self {
      resolver,
      strategy: Strategy::default(),
      max_concurrency: DEFAULT_MAX_CONCURRENCY,
    }
  }

  pub fn with_strategy(mut self, strategy: Strategy) -> Self {
    self.strategy = strategy;
    self
  }

  /// Zero is treated as one.
  pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
    self.max_concurrency = max_concurrency.max(1);
    self
  }

  pub fn strategy(&self) -> Strategy { self.strategy }

  /// Cross-case history for one identity. See [`Resolver::resolve`].
  pub async fn resolve(
    &self,
    identity: &IdentityKey,
    origin_case_id: Uuid,
  ) -> Result<Vec<CaseHistoryEntry>> {
    self.resolver.resolve(identity, origin_case_id).await
  }

  /// Enrich a single record, looked up by id in the `role` roster.
  pub async fn resolve_record(&self, role: Role, id: Uuid) -> Result<EnrichedPersonRecord> {
    let record = self
      .resolver
      .roster()
      .fetch_record(role, id)
      .await
      .map_err(Error::unavailable)?
      .ok_or(Error::RecordNotFound { role, id })?;

    let history = self.resolver.resolve(&record.identity, record.case_id).await?;
    Ok(EnrichedPersonRecord::new(record, history, role))
  }

  /// Enrich `roster`, whose records all belong to the `own_role` roster.
  ///
  /// The output is stably sorted by `occurrence_count`, highest first, so
  /// ties keep their roster order regardless of strategy.
  pub async fn enrich(
    &self,
    roster: Vec<PersonRecord>,
    own_role: Role,
  ) -> Result<Vec<EnrichedPersonRecord>> {
    let enriched = match self.strategy {
      Strategy::Indexed => {
        let rosters = self.load_rosters().await?;
        self.enrich_indexed(roster, own_role, &rosters).await?
      }
      Strategy::FanOut => self.enrich_fan_out(roster, own_role).await?,
    };
    Ok(finish(enriched, own_role))
  }

  /// Fetch and enrich the whole roster for `role`.
  pub async fn enrich_role(&self, role: Role) -> Result<Vec<EnrichedPersonRecord>> {
    match self.strategy {
      Strategy::Indexed => {
        let rosters = self.load_rosters().await?;
        let roster = rosters.get(role).to_vec();
        let enriched = self.enrich_indexed(roster, role, &rosters).await?;
        Ok(finish(enriched, role))
      }
      Strategy::FanOut => {
        let roster = self
          .resolver
          .roster()
          .fetch_roster(role)
          .await
          .map_err(Error::unavailable)?;
        self.enrich(roster, role).await
      }
    }
  }

  /// Enrich both rosters and roll them up for the analytics view.
  pub async fn report(&self, top_n: usize) -> Result<Report> {
    let (accused, bailers) = match self.strategy {
      Strategy::Indexed => {
        let rosters = self.load_rosters().await?;
        let accused = self
          .enrich_indexed(rosters.accused.clone(), Role::Accused, &rosters)
          .await?;
        let bailers = self
          .enrich_indexed(rosters.bailers.clone(), Role::Bailer, &rosters)
          .await?;
        (finish(accused, Role::Accused), finish(bailers, Role::Bailer))
      }
      Strategy::FanOut => (
        self.enrich_role(Role::Accused).await?,
        self.enrich_role(Role::Bailer).await?,
      ),
    };
    Ok(Report::new(accused, bailers, top_n))
  }

  // ── Strategies ──────────────────────────────────────────────────────────

  async fn load_rosters(&self) -> Result<Rosters> {
    let roster = self.resolver.roster();
    let accused = roster
      .fetch_roster(Role::Accused)
      .await
      .map_err(Error::unavailable)?;
    let bailers = roster
      .fetch_roster(Role::Bailer)
      .await
      .map_err(Error::unavailable)?;
    Ok(Rosters { accused, bailers })
  }

  async fn enrich_indexed(
    &self,
    roster: Vec<PersonRecord>,
    own_role: Role,
    rosters: &Rosters,
  ) -> Result<Vec<EnrichedPersonRecord>> {
    let accused_index = IdentityIndex::build(&rosters.accused);
    let bailer_index = IdentityIndex::build(&rosters.bailers);

    let matches: Vec<CaseMatches> = roster
      .iter()
      .map(|record| {
        let mut matches = CaseMatches::new();
        for (role, index) in [(Role::Accused, &accused_index), (Role::Bailer, &bailer_index)] {
          matches.extend(
            role,
            index
              .matches(&record.identity, record.case_id)
              .into_iter()
              .map(|hit| hit.case_id),
          );
        }
        matches
      })
      .collect();

    let case_ids: BTreeSet<Uuid> = matches.iter().flat_map(CaseMatches::case_ids).collect();
    let summaries = if case_ids.is_empty() {
      Default::default()
    } else {
      self
        .resolver
        .directory()
        .resolve_cases(&case_ids)
        .await
        .map_err(Error::unavailable)?
    };

    let mut enriched = Vec::with_capacity(roster.len());
    for (record, matches) in roster.into_iter().zip(matches) {
      let (history, missing) = matches.into_history(&summaries);
      for case_id in &missing {
        warn!(%case_id, origin_case_id = %record.case_id, "matched case has no summary; dropped from history");
      }
      enriched.push(EnrichedPersonRecord::new(record, history, own_role));
    }
    Ok(enriched)
  }

  async fn enrich_fan_out(
    &self,
    roster: Vec<PersonRecord>,
    own_role: Role,
  ) -> Result<Vec<EnrichedPersonRecord>> {
    let permits = Arc::new(Semaphore::new(self.max_concurrency));
    let mut tasks = JoinSet::new();
    let mut slots: Vec<Option<EnrichedPersonRecord>> = vec![None; roster.len()];

    for (position, record) in roster.into_iter().enumerate() {
      let resolver = self.resolver.clone();
      let permits = Arc::clone(&permits);
      tasks.spawn(async move {
        let _permit = permits.acquire_owned().await.map_err(|_| Error::Cancelled)?;
        let history = resolver.resolve(&record.identity, record.case_id).await?;
        Ok::<_, Error>((position, EnrichedPersonRecord::new(record, history, own_role)))
      });
    }

    // Returning early drops `tasks`, which aborts everything still running.
    while let Some(joined) = tasks.join_next().await {
      let (position, enriched) = joined??;
      slots[position] = Some(enriched);
    }

    debug!(records = slots.len(), "fan-out resolution joined");
    Ok(slots.into_iter().flatten().collect())
  }
}

fn finish(mut enriched: Vec<EnrichedPersonRecord>, own_role: Role) -> Vec<EnrichedPersonRecord> {
  sort_by_occurrence(&mut enriched);
  let repeats = enriched.iter().filter(|r| r.is_repeat()).count();
  info!(role = %own_role, records = enriched.len(), repeats, "enriched roster");
  enriched
}
