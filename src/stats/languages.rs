//! Language usage aggregation.
//!
//! Folds per-repository language byte maps into a single running total.
//! The fold is commutative and associative, so fetch order never changes
//! the result. Forked repositories are skipped per item, and a failed
//! per-repo fetch contributes zero bytes and is recorded in the result
//! rather than aborting the whole aggregation.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;

use tracing::warn;

use crate::error::Result;
use crate::models::{LanguageFetchFailure, LanguageUsage, Repo};

/// Outcome of one aggregation pass: cumulative byte totals plus the
/// repositories whose language fetch failed.
#[derive(Debug, Default)]
pub struct LanguageStats {
    pub totals: BTreeMap<String, u64>,
    pub failures: Vec<LanguageFetchFailure>,
}

impl LanguageStats {
    pub fn total_bytes(&self) -> u64 {
        self.totals.values().sum()
    }
}

/// Sum language byte counts across every non-fork repository.
///
/// `fetch` resolves one repository descriptor to its language byte map. It
/// is injected so the fold can be driven without a network in tests.
pub async fn aggregate_languages<F, Fut>(repos: &[Repo], mut fetch: F) -> LanguageStats
where
    F: FnMut(Repo) -> Fut,
    Fut: Future<Output = Result<HashMap<String, u64>>>,
{
    let mut stats = LanguageStats::default();

    for repo in repos {
        if repo.fork {
            continue;
        }
        match fetch(repo.clone()).await {
            Ok(breakdown) => merge_breakdown(&mut stats.totals, &breakdown),
            Err(e) => {
                warn!(repo = %repo.name, error = %e, "language fetch failed, skipping");
                stats.failures.push(LanguageFetchFailure {
                    repo: repo.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    stats
}

/// Fold one repository's byte map into the running totals.
pub fn merge_breakdown(totals: &mut BTreeMap<String, u64>, breakdown: &HashMap<String, u64>) {
    for (language, bytes) in breakdown {
        *totals.entry(language.clone()).or_insert(0) += bytes;
    }
}

/// Order languages for display: descending byte count, ties broken by
/// ascending name so equal counts come out the same way every time.
pub fn rank_languages(totals: &BTreeMap<String, u64>) -> Vec<LanguageUsage> {
    let mut ranked: Vec<LanguageUsage> = totals
        .iter()
        .map(|(language, bytes)| LanguageUsage {
            language: language.clone(),
            bytes: *bytes,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.bytes
            .cmp(&a.bytes)
            .then_with(|| a.language.cmp(&b.language))
    });
    ranked
}
