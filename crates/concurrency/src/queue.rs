//! FIFO wait queue of workflow runs
//!
//! A [`WaitQueue`] is a snapshot: the ascending list of runs that are still
//! active, plus the run doing the waiting. It is never patched in place;
//! each poll produces a new queue via [`WaitQueue::refreshed`].

use std::collections::BTreeMap;
use std::fmt;

use ghactions_core::{RunId, RunRecord, RunStatus};

/// Snapshot of the runs competing for a turn
///
/// Invariants:
/// - `members` is sorted ascending and holds no duplicates (it is the key
///   set of a `BTreeMap`)
/// - terminal runs are never members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitQueue {
    me: RunId,
    /// RunId -> display name, ordered by RunId
    members: BTreeMap<RunId, String>,
}

impl WaitQueue {
    /// Build the queue from a run listing
    ///
    /// Keeps every non-terminal record, restricted to `branch` when given.
    /// The waiting run is only a member if the listing reports it.
    pub fn from_records<'a, I>(me: RunId, records: I, branch: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a RunRecord>,
    {
        let members = records
            .into_iter()
            .filter(|r| branch.map_or(true, |b| r.branch == b))
            .filter(|r| r.is_active())
            .map(|r| (r.id, r.display_name.clone()))
            .collect();
        WaitQueue { me, members }
    }

    /// The run doing the waiting
    pub fn me(&self) -> RunId {
        self.me
    }

    /// Member IDs, ascending
    pub fn ids(&self) -> Vec<RunId> {
        self.members.keys().copied().collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no run is queued
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the waiting run holds a place
    pub fn contains_me(&self) -> bool {
        self.members.contains_key(&self.me)
    }

    /// Oldest active run
    pub fn head(&self) -> Option<RunId> {
        self.members.keys().next().copied()
    }

    /// Whether the waiting run may proceed
    ///
    /// True when at most one run is queued or the waiting run is the head.
    pub fn is_my_turn(&self) -> bool {
        self.members.len() <= 1 || self.head() == Some(self.me)
    }

    /// Members with their display names, ascending
    pub fn members(&self) -> impl Iterator<Item = (RunId, &str)> + '_ {
        self.members.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Members other than the waiting run, ascending
    pub fn others(&self) -> impl Iterator<Item = RunId> + '_ {
        let me = self.me;
        self.members.keys().copied().filter(move |id| *id != me)
    }

    /// Position of the waiting run, or `None` if it is not queued
    pub fn position(&self) -> Option<QueuePosition> {
        let index = self.members.keys().position(|id| *id == self.me)?;
        let ahead = self
            .members
            .iter()
            .take(index)
            .map(|(id, name)| (*id, name.clone()))
            .collect();
        Some(QueuePosition {
            rank: index + 1,
            ahead,
        })
    }

    /// Next snapshot from fresh per-run observations
    ///
    /// The waiting run is kept unconditionally. Every other member is kept
    /// unless its observation is terminal. A member without an observation
    /// (lookup failed) is assumed to still be running. Display names are
    /// taken from the fresh observation when one is present.
    pub fn refreshed<I>(&self, observations: I) -> WaitQueue
    where
        I: IntoIterator<Item = (RunId, Option<Observation>)>,
    {
        let mut members = BTreeMap::new();
        members.insert(
            self.me,
            self.members.get(&self.me).cloned().unwrap_or_default(),
        );
        for (id, observation) in observations {
            if id == self.me {
                continue;
            }
            match observation {
                Some(obs) if obs.status.is_terminal() => {}
                Some(obs) => {
                    members.insert(id, obs.display_name);
                }
                None => {
                    if let Some(name) = self.members.get(&id) {
                        members.insert(id, name.clone());
                    }
                }
            }
        }
        WaitQueue {
            me: self.me,
            members,
        }
    }
}

/// Fresh status of one queued run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Current status
    pub status: RunStatus,
    /// Current display name
    pub display_name: String,
}

impl Observation {
    /// A run the API no longer knows about; it leaves the queue
    pub fn gone() -> Self {
        Observation {
            status: RunStatus::Completed,
            display_name: String::new(),
        }
    }
}

impl From<RunRecord> for Observation {
    fn from(record: RunRecord) -> Self {
        Observation {
            status: record.status,
            display_name: record.display_name,
        }
    }
}

/// Where the waiting run stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuePosition {
    /// 1-based rank; the head has rank 1
    pub rank: usize,
    /// Runs ahead, oldest first, with their display names
    pub ahead: Vec<(RunId, String)>,
}

impl QueuePosition {
    /// IDs of the runs ahead
    pub fn ahead_ids(&self) -> Vec<RunId> {
        self.ahead.iter().map(|(id, _)| *id).collect()
    }
}

impl fmt::Display for QueuePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.ahead.iter().map(|(_, n)| n.as_str()).collect();
        write!(
            f,
            "Please hold the line, you are number {} in the waiting list ({})",
            self.rank,
            names.join(",")
        )
    }
}
