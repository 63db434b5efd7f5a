// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Index readiness assessment and polling
//!
//! [`assess`] is a pure function from a status snapshot to a verdict. The
//! [`ReadinessPoller`] owns the cadence: it asks a status source for fresh
//! snapshots a bounded number of times with a fixed interval in between.

use log::{info, warn};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use super::error::{IndexProblem, ProvisionError, ProvisionResult};
use super::reconciler::observe_index_status;
use crate::management::ManagementSystem;
use crate::schema::{ElementRef, IndexStatusEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// Every watched index is enabled
    Ready,
    /// Indexes still installed or registered
    Building(Vec<ElementRef>),
    /// Indexes disabled, discarded or missing
    Failed(Vec<IndexProblem>),
}

/// Classify a status snapshot
///
/// Indexes are matched by kind and name, and relation indexes also by edge
/// label, so equal names on different edge labels stay distinct. An empty
/// `watched` list watches every index in the snapshot. A failure anywhere
/// wins over indexes that are still building.
pub fn assess(snapshot: &[IndexStatusEntry], watched: &[ElementRef]) -> Readiness {
    let by_identity: HashMap<ElementRef, &IndexStatusEntry> =
        snapshot.iter().map(|e| (e.identity(), e)).collect();

    let targets: Vec<ElementRef> = if watched.is_empty() {
        snapshot.iter().map(IndexStatusEntry::identity).collect()
    } else {
        watched.to_vec()
    };

    let mut building = Vec::new();
    let mut failed = Vec::new();

    for index in targets {
        match by_identity.get(&index) {
            None => failed.push(IndexProblem {
                index,
                status: None,
            }),
            Some(entry) if entry.status.is_terminal_failure() => failed.push(IndexProblem {
                index,
                status: Some(entry.status),
            }),
            Some(entry) if entry.status.is_building() => building.push(index),
            Some(_) => {}
        }
    }

    if !failed.is_empty() {
        Readiness::Failed(failed)
    } else if !building.is_empty() {
        Readiness::Building(building)
    } else {
        Readiness::Ready
    }
}

/// Anything that can produce an index status snapshot
pub trait IndexStatusSource {
    fn index_snapshot(&self) -> ProvisionResult<Vec<IndexStatusEntry>>;
}

impl<M: ManagementSystem> IndexStatusSource for M {
    fn index_snapshot(&self) -> ProvisionResult<Vec<IndexStatusEntry>> {
        observe_index_status(self)
    }
}

/// Fixed-interval, bounded poller for index readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPoller {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl ReadinessPoller {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Enough attempts to cover `timeout` at `interval`, at least one
    pub fn with_timeout(timeout: Duration, interval: Duration) -> Self {
        let attempts = if interval.is_zero() {
            1
        } else {
            let ratio = timeout.as_secs_f64() / interval.as_secs_f64();
            ratio.ceil().max(1.0) as u32
        };
        Self::new(attempts, interval)
    }

    /// Poll until every watched index is enabled
    ///
    /// Returns the final snapshot on success, `IndexFailed` as soon as an
    /// index is disabled, discarded or missing, and `IndexTimeout` once the
    /// attempt budget is spent. Errors from the source are not retried.
    pub fn wait<S: IndexStatusSource + ?Sized>(
        &self,
        source: &S,
        watched: &[ElementRef],
    ) -> ProvisionResult<Vec<IndexStatusEntry>> {
        let mut building = Vec::new();

        for attempt in 1..=self.max_attempts {
            let snapshot = source.index_snapshot()?;
            match assess(&snapshot, watched) {
                Readiness::Ready => {
                    info!("All watched indexes are ENABLED after {} check(s)", attempt);
                    return Ok(snapshot);
                }
                Readiness::Failed(problems) => return Err(ProvisionError::IndexFailed(problems)),
                Readiness::Building(indexes) => {
                    warn!(
                        "Indexes still building ({}/{}): {}",
                        attempt,
                        self.max_attempts,
                        indexes
                            .iter()
                            .map(ElementRef::qualified_name)
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                    building = indexes;
                }
            }

            if attempt < self.max_attempts {
                thread::sleep(self.interval);
            }
        }

        Err(ProvisionError::IndexTimeout {
            attempts: self.max_attempts,
            building,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ElementKind, IndexKind, IndexStatus};

    fn entry(name: &str, status: IndexStatus) -> IndexStatusEntry {
        IndexStatusEntry {
            name: name.to_string(),
            kind: IndexKind::Composite,
            edge_label: None,
            status,
        }
    }

    fn relation(edge_label: &str, name: &str, status: IndexStatus) -> IndexStatusEntry {
        IndexStatusEntry {
            name: name.to_string(),
            kind: IndexKind::Relation,
            edge_label: Some(edge_label.to_string()),
            status,
        }
    }

    fn composite(name: &str) -> ElementRef {
        ElementRef::new(ElementKind::CompositeIndex, name)
    }

    #[test]
    fn test_assess_ready_when_all_enabled() {
        let snapshot = vec![
            entry("userByUserId", IndexStatus::Enabled),
            entry("userByEmail", IndexStatus::Enabled),
        ];
        assert_eq!(assess(&snapshot, &[]), Readiness::Ready);
    }

    #[test]
    fn test_assess_building() {
        let snapshot = vec![
            entry("userByUserId", IndexStatus::Installed),
            entry("userByEmail", IndexStatus::Registered),
            entry("orderByStatus", IndexStatus::Enabled),
        ];
        assert_eq!(
            assess(&snapshot, &[]),
            Readiness::Building(vec![composite("userByUserId"), composite("userByEmail")])
        );
    }

    #[test]
    fn test_assess_only_watched_indexes() {
        let snapshot = vec![
            entry("userByUserId", IndexStatus::Enabled),
            entry("legacyIndex", IndexStatus::Disabled),
        ];
        assert_eq!(assess(&snapshot, &[composite("userByUserId")]), Readiness::Ready);
    }

    #[test]
    fn test_assess_failure_wins_over_building() {
        let snapshot = vec![
            entry("userByUserId", IndexStatus::Installed),
            entry("userByEmail", IndexStatus::Discarded),
        ];
        let watched = vec![
            composite("userByUserId"),
            composite("userByEmail"),
            composite("reviewByRating"),
        ];

        match assess(&snapshot, &watched) {
            Readiness::Failed(problems) => {
                assert_eq!(problems.len(), 2);
                assert_eq!(problems[0].status, Some(IndexStatus::Discarded));
                assert_eq!(problems[1].index, composite("reviewByRating"));
                assert_eq!(problems[1].status, None);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_assess_keeps_same_named_indexes_apart() {
        let snapshot = vec![
            relation("placed_order", "byDate", IndexStatus::Enabled),
            relation("wrote_review", "byDate", IndexStatus::Registered),
            entry("byDate", IndexStatus::Disabled),
        ];
        let placed = ElementRef::scoped(ElementKind::RelationIndex, "placed_order", "byDate");
        let wrote = ElementRef::scoped(ElementKind::RelationIndex, "wrote_review", "byDate");

        assert_eq!(assess(&snapshot, &[placed.clone()]), Readiness::Ready);
        assert_eq!(
            assess(&snapshot, &[placed, wrote.clone()]),
            Readiness::Building(vec![wrote])
        );
        match assess(&snapshot, &[]) {
            Readiness::Failed(problems) => {
                assert_eq!(problems.len(), 1);
                assert_eq!(problems[0].index, composite("byDate"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_poller_attempts_from_timeout() {
        let poller = ReadinessPoller::with_timeout(Duration::from_secs(120), Duration::from_secs(5));
        assert_eq!(poller.max_attempts, 24);

        let poller = ReadinessPoller::with_timeout(Duration::from_secs(7), Duration::from_secs(5));
        assert_eq!(poller.max_attempts, 2);

        let poller = ReadinessPoller::with_timeout(Duration::from_secs(7), Duration::ZERO);
        assert_eq!(poller.max_attempts, 1);
    }
}
