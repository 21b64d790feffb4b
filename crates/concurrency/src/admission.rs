//! Admission loop: wait for the run's turn in the FIFO
//!
//! Only one run of a workflow should proceed at a time. There is no lock to
//! take; the platform's run ordering is the ground truth. A run proceeds
//! once it is the oldest active run, and gives up waiting after a
//! configurable time.
//!
//! ## Admission Sequence
//!
//! ```text
//! 1. list_runs()               - initial snapshot (failure is fatal unless
//!                                ignore_errors)
//! 2. build WaitQueue           - active runs, optional branch filter
//! 3. IF self not queued:       proceed (NotQueued)
//! 4. IF len <= 1 or head==self: proceed (Turn)
//! 5. report position
//! 6. sleep(poll_interval); waited += poll_interval
//! 7. IF waited > max_wait:     proceed (GaveUp)
//! 8. run_status(id) for every other member; rebuild queue; goto 4
//! ```
//!
//! Waited time is the sum of poll intervals, not wall-clock time, so a given
//! sequence of observations always produces the same sequence of reports.

use std::time::Duration;

use ghactions_core::{Error, Result, RunId, RunSource};
use tracing::{debug, error, info, warn};

use crate::queue::{Observation, QueuePosition, WaitQueue};

/// Default delay between two polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default maximum wait before proceeding anyway
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(300);

/// Parameters of one admission
///
/// ```ignore
/// use ghactions_concurrency::AdmissionConfig;
///
/// let config = AdmissionConfig::new(run_id)
///     .poll_interval(Duration::from_secs(10))
///     .max_wait(None)
///     .branch(Some("main".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionConfig {
    /// The run doing the waiting
    pub me: RunId,
    /// Delay between polls; never zero
    pub poll_interval: Duration,
    /// Give up after this much waiting; `None` waits forever
    pub max_wait: Option<Duration>,
    /// Only compete with runs of this branch
    pub branch: Option<String>,
    /// Proceed without waiting when the initial listing fails
    pub ignore_errors: bool,
}

impl AdmissionConfig {
    /// Defaults: 5s polls, 300s max wait, all branches, errors fatal
    pub fn new(me: RunId) -> Self {
        AdmissionConfig {
            me,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait: Some(DEFAULT_MAX_WAIT),
            branch: None,
            ignore_errors: false,
        }
    }

    /// Set the poll interval; zero falls back to the default
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = if interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Set the maximum wait
    pub fn max_wait(mut self, max_wait: Option<Duration>) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Restrict the queue to one branch
    pub fn branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// Set the ignore-errors policy
    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }
}

/// Why the run was allowed to proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// The run reached the head of the queue
    Turn,
    /// The listing did not report the run as active
    NotQueued,
    /// The maximum wait elapsed first
    GaveUp,
    /// The initial listing failed and errors are ignored
    ErrorIgnored,
}

impl AdmissionOutcome {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionOutcome::Turn => "turn",
            AdmissionOutcome::NotQueued => "not-queued",
            AdmissionOutcome::GaveUp => "gave-up",
            AdmissionOutcome::ErrorIgnored => "error-ignored",
        }
    }
}

impl std::fmt::Display for AdmissionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Report of a finished admission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// Why the run proceeded
    pub outcome: AdmissionOutcome,
    /// Number of refresh polls made after the initial listing
    pub polls: u32,
    /// Total time slept
    pub waited: Duration,
    /// Number of position reports logged
    pub reports: u32,
    /// Distinct positions reported while waiting, in order
    ///
    /// Repeats of the previous position are not stored, and only the most
    /// recent [`MAX_POSITIONS`] are kept.
    pub positions: Vec<QueuePosition>,
}

/// Upper bound on [`Admission::positions`]
pub const MAX_POSITIONS: usize = 64;

impl Admission {
    fn new(outcome: AdmissionOutcome) -> Self {
        Admission {
            outcome,
            polls: 0,
            waited: Duration::ZERO,
            reports: 0,
            positions: Vec::new(),
        }
    }

    fn record(&mut self, position: QueuePosition) {
        self.reports += 1;
        if self.positions.last() == Some(&position) {
            return;
        }
        if self.positions.len() == MAX_POSITIONS {
            self.positions.remove(0);
        }
        self.positions.push(position);
    }
}

/// Runs the admission loop against a [`RunSource`]
#[derive(Debug, Clone)]
pub struct AdmissionController {
    config: AdmissionConfig,
}

impl AdmissionController {
    /// Create a controller
    pub fn new(config: AdmissionConfig) -> Self {
        AdmissionController { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Wait until the run may proceed
    ///
    /// # Returns
    /// - Ok(Admission) when the run reached its turn, was not queued, gave
    ///   up waiting, or the initial listing failed with `ignore_errors` set
    /// - Err if the initial listing failed and `ignore_errors` is not set
    ///
    /// Failed per-run lookups during later polls never abort the wait. A
    /// run the API answers 404 for has been deleted and leaves the queue;
    /// any other failure keeps the run queued and the max wait bounds the
    /// loop.
    pub async fn admit<S>(&self, source: &S) -> Result<Admission>
    where
        S: RunSource + ?Sized,
    {
        let config = &self.config;
        let records = match source.list_runs().await {
            Ok(records) => records,
            Err(e) if config.ignore_errors => {
                error!("{}", e);
                return Ok(Admission::new(AdmissionOutcome::ErrorIgnored));
            }
            Err(e) => return Err(e),
        };

        let mut queue = WaitQueue::from_records(config.me, &records, config.branch.as_deref());
        for (id, name) in queue.members() {
            debug!("Found a running job: {} ({})", name, id);
        }

        if !queue.contains_me() {
            warn!(
                run_id = %config.me,
                "current run is not listed as active, proceeding without waiting"
            );
            return Ok(Admission::new(AdmissionOutcome::NotQueued));
        }

        let mut report = Admission::new(AdmissionOutcome::Turn);
        loop {
            if queue.is_my_turn() {
                info!("This is your turn ! Yoohoo !");
                report.outcome = AdmissionOutcome::Turn;
                return Ok(report);
            }

            let position = queue
                .position()
                .ok_or_else(|| Error::Internal("current run dropped from wait queue".into()))?;
            info!("{}", position);
            report.record(position);

            tokio::time::sleep(config.poll_interval).await;
            report.waited += config.poll_interval;

            if config.max_wait.map_or(false, |max| report.waited > max) {
                info!("Exceeded wait seconds. Continuing...");
                report.outcome = AdmissionOutcome::GaveUp;
                return Ok(report);
            }

            let observations = observe(source, &queue).await;
            report.polls += 1;
            queue = queue.refreshed(observations);
        }
    }
}

/// Look up every queued run except ours
async fn observe<S>(source: &S, queue: &WaitQueue) -> Vec<(RunId, Option<Observation>)>
where
    S: RunSource + ?Sized,
{
    let mut observations = Vec::with_capacity(queue.len());
    for id in queue.others() {
        let observation = match source.run_status(id).await {
            Ok(record) => {
                debug!(
                    "Workflow \"{}\" ({}) is in {} state",
                    record.display_name, id, record.status
                );
                Some(Observation::from(record))
            }
            Err(e) if e.is_not_found() => {
                warn!(run_id = %id, "run no longer exists, removing it from the queue");
                Some(Observation::gone())
            }
            Err(e) => {
                warn!(run_id = %id, error = %e, "status lookup failed, assuming still running");
                None
            }
        };
        observations.push((id, observation));
    }
    observations
}
