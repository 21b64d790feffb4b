//! Admission loop scenarios against the controller directly.

use std::time::Duration;

use proptest::prelude::*;

use super::*;

fn controller(me: u64) -> AdmissionController {
    AdmissionController::new(
        AdmissionConfig::new(RunId::new(me)).poll_interval(Duration::from_secs(5)),
    )
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_position_in_middle_of_queue() {
    let github = ScriptedGitHub::new(&[
        (5, RunStatus::InProgress),
        (7, RunStatus::InProgress),
        (9, RunStatus::Queued),
    ])
    .script(5, &[RunStatus::Completed]);

    let admission = controller(7).admit(&github).await.unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::Turn);
    let first = &admission.positions[0];
    assert_eq!(first.rank, 2);
    assert_eq!(first.ahead_ids(), vec![RunId::new(5)]);
    assert_eq!(
        first.to_string(),
        "Please hold the line, you are number 2 in the waiting list (CI #5)"
    );
}

#[tokio::test(start_paused = true)]
async fn test_max_wait_bounds_polls() {
    let github = ScriptedGitHub::new(&[(5, RunStatus::InProgress), (7, RunStatus::InProgress)]);
    let controller = AdmissionController::new(
        AdmissionConfig::new(RunId::new(7))
            .poll_interval(Duration::from_secs(5))
            .max_wait(Some(Duration::from_secs(10))),
    );

    let admission = controller.admit(&github).await.unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::GaveUp);
    assert!(admission.polls <= 2);
    assert_eq!(github.lookup_count(), admission.polls as usize);
}

#[tokio::test(start_paused = true)]
async fn test_completed_run_leaves_next_queue() {
    let github = ScriptedGitHub::new(&[
        (3, RunStatus::InProgress),
        (5, RunStatus::InProgress),
        (7, RunStatus::InProgress),
    ])
    .script(3, &[RunStatus::Completed])
    .script(5, &[RunStatus::InProgress, RunStatus::Completed]);

    let admission = controller(7).admit(&github).await.unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::Turn);
    let ranks: Vec<usize> = admission.positions.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![3, 2]);
    assert_eq!(admission.positions[1].ahead_ids(), vec![RunId::new(5)]);
}

#[tokio::test(start_paused = true)]
async fn test_replay_yields_same_reports() {
    let script = || {
        ScriptedGitHub::new(&[
            (2, RunStatus::Queued),
            (4, RunStatus::InProgress),
            (6, RunStatus::InProgress),
        ])
        .script(2, &[RunStatus::InProgress, RunStatus::Completed])
        .script(4, &[RunStatus::InProgress, RunStatus::InProgress, RunStatus::Cancelled])
    };

    let first = controller(6).admit(&script()).await.unwrap();
    let second = controller(6).admit(&script()).await.unwrap();

    assert_eq!(first, second);
    let rendered: Vec<String> = first.positions.iter().map(|p| p.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "Please hold the line, you are number 3 in the waiting list (CI #2,CI #4)",
            "Please hold the line, you are number 2 in the waiting list (CI #4)",
        ]
    );
    assert_eq!(first.reports, 3);
}

#[tokio::test(start_paused = true)]
async fn test_deleted_run_does_not_block_infinite_wait() {
    let github = ScriptedGitHub::new(&[(5, RunStatus::InProgress), (7, RunStatus::InProgress)])
        .deleted(5);
    let controller = AdmissionController::new(
        AdmissionConfig::new(RunId::new(7))
            .poll_interval(Duration::from_secs(5))
            .max_wait(None),
    );

    let admission = tokio::time::timeout(Duration::from_secs(600), controller.admit(&github))
        .await
        .expect("wait never ended")
        .unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::Turn);
    assert_eq!(admission.polls, 1);
    assert_eq!(github.lookup_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ignored_listing_error_never_sleeps() {
    let github = ScriptedGitHub {
        fail_listing: true,
        ..Default::default()
    };
    let start = tokio::time::Instant::now();
    let controller = AdmissionController::new(
        AdmissionConfig::new(RunId::new(7)).ignore_errors(true),
    );

    let admission = controller.admit(&github).await.unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::ErrorIgnored);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(github.lookup_count(), 0);
}

proptest! {
    #[test]
    fn prop_proceeds_immediately_iff_head(
        ids in proptest::collection::btree_set(1u64..1_000, 1..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let ids: Vec<u64> = ids.into_iter().collect();
        let me = ids[pick.index(ids.len())];
        let runs: Vec<(u64, RunStatus)> =
            ids.iter().map(|id| (*id, RunStatus::InProgress)).collect();
        // Older runs finish on their first lookup
        let github = ids
            .iter()
            .filter(|id| **id < me)
            .fold(ScriptedGitHub::new(&runs), |g, id| g.script(*id, &[RunStatus::Completed]));

        let admission = paused_runtime().block_on(controller(me).admit(&github)).unwrap();

        let immediate = admission.polls == 0;
        prop_assert_eq!(immediate, ids.len() <= 1 || ids[0] == me);
        prop_assert_eq!(admission.outcome, AdmissionOutcome::Turn);
    }

    #[test]
    fn prop_first_rank_counts_older_runs(
        ids in proptest::collection::btree_set(1u64..1_000, 2..12),
        pick in any::<prop::sample::Index>(),
    ) {
        let list: Vec<u64> = ids.into_iter().collect();
        let me = list[pick.index(list.len())];
        prop_assume!(me != list[0]);
        let runs: Vec<(u64, RunStatus)> =
            list.iter().map(|id| (*id, RunStatus::InProgress)).collect();
        let github = list
            .iter()
            .filter(|id| **id < me)
            .fold(ScriptedGitHub::new(&runs), |g, id| g.script(*id, &[RunStatus::Completed]));

        let admission = paused_runtime().block_on(controller(me).admit(&github)).unwrap();

        let older = list.iter().filter(|id| **id < me).count();
        prop_assert_eq!(admission.positions[0].rank, older + 1);
        prop_assert_eq!(admission.polls, 1);
    }
}
