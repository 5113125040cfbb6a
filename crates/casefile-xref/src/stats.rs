//! Dashboard roll-ups over enriched rosters.

use casefile_core::person::EnrichedPersonRecord;
use serde::{Deserialize, Serialize};

/// Summary counts for one enriched roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  pub total:            usize,
  /// Records with `occurrence_count > 1`.
  pub repeat_count:     usize,
  /// Bailers previously recorded as accused. Always zero for an accused
  /// roster.
  pub suspicious_count: usize,
}

pub fn summarize(enriched: &[EnrichedPersonRecord]) -> Stats {
  enriched.iter().fold(Stats::default(), |mut stats, record| {
    stats.total += 1;
    if record.is_repeat() {
      stats.repeat_count += 1;
    }
    if record.was_previously_accused {
      stats.suspicious_count += 1;
    }
    stats
  })
}

/// The analytics view: both rosters summarised, plus the records an officer
/// should look at first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
  pub accused:              Stats,
  pub bailers:              Stats,
  /// The highest-ranked repeat accused, at most `top_n`.
  pub top_repeat_offenders: Vec<EnrichedPersonRecord>,
  /// Every bailer with an accused record elsewhere.
  pub suspicious_bailers:   Vec<EnrichedPersonRecord>,
}

impl Report {
  /// Build from already enriched and ordered rosters.
  pub fn new(
    accused: Vec<EnrichedPersonRecord>,
    bailers: Vec<EnrichedPersonRecord>,
    top_n: usize,
  ) -> Self {
    let accused_stats = summarize(&accused);
    let bailer_stats = summarize(&bailers);

    let top_repeat_offenders = accused
      .into_iter()
      .filter(EnrichedPersonRecord::is_repeat)
      .take(top_n)
      .collect();
    let suspicious_bailers = bailers
      .into_iter()
      .filter(|r| r.was_previously_accused)
      .collect();

    Self {
      accused: accused_stats,
      bailers: bailer_stats,
      top_repeat_offenders,
      suspicious_bailers,
    }
  }
}
