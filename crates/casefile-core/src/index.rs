//! In-memory identity index over one roster.
//!
//! Built once per enrichment batch and queried once per record, replacing a
//! full roster scan per record. A query yields exactly the records a linear
//! scan with [`IdentityKey::matches`] would, in roster order.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{identity::IdentityKey, person::PersonRecord};

pub struct IdentityIndex<'r> {
  records:        &'r [PersonRecord],
  by_mobile:      HashMap<&'r str, Vec<usize>>,
  by_national_id: HashMap<&'r str, Vec<usize>>,
}

impl<'r> IdentityIndex<'r> {
  pub fn build(records: &'r [PersonRecord]) -> Self {
    let mut by_mobile: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut by_national_id: HashMap<&str, Vec<usize>> = HashMap::new();

    for (position, record) in records.iter().enumerate() {
      if let Some(mobile) = record.identity.mobile() {
        by_mobile.entry(mobile).or_default().push(position);
      }
      if let Some(national_id) = record.identity.national_id() {
        by_national_id.entry(national_id).or_default().push(position);
      }
    }

    Self { records, by_mobile, by_national_id }
  }

  /// Records sharing either key with `identity`, outside `exclude_case_id`.
  pub fn matches(
    &self,
    identity: &IdentityKey,
    exclude_case_id: Uuid,
  ) -> Vec<&'r PersonRecord> {
    let mut positions: Vec<usize> = Vec::new();
    if let Some(hits) = identity.mobile().and_then(|m| self.by_mobile.get(m)) {
      positions.extend(hits);
    }
    if let Some(hits) = identity
      .national_id()
      .and_then(|n| self.by_national_id.get(n))
    {
      positions.extend(hits);
    }
    positions.sort_unstable();
    positions.dedup();

    let records = self.records;
    positions
      .into_iter()
      .map(|p| &records[p])
      .filter(|r| r.case_id != exclude_case_id)
      .collect()
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
