//! The concurrency gate through `GhActions`: inputs in, admission out.

use std::time::Duration;

use super::*;

#[tokio::test(start_paused = true)]
async fn test_lone_run_proceeds() {
    let github = Arc::new(ScriptedGitHub::new(&[(42, RunStatus::InProgress)]));
    let start = tokio::time::Instant::now();

    let admission = actions(runner_env(42, &[]), &github)
        .concurrency_disabler()
        .await
        .unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::Turn);
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_eq!(github.lookup_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_inputs_drive_the_loop() {
    let github = Arc::new(ScriptedGitHub::new(&[
        (5, RunStatus::InProgress),
        (7, RunStatus::InProgress),
    ]));
    let env = runner_env(
        7,
        &[("poll-interval", "2"), ("continue-after-seconds", "6")],
    );

    let admission = actions(env, &github).concurrency_disabler().await.unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::GaveUp);
    assert_eq!(admission.waited, Duration::from_secs(8));
    assert_eq!(admission.polls, 3);
}

#[tokio::test(start_paused = true)]
async fn test_infinite_wait_until_done() {
    let github = Arc::new(
        ScriptedGitHub::new(&[(5, RunStatus::InProgress), (7, RunStatus::InProgress)]).script(
            5,
            &[
                RunStatus::InProgress,
                RunStatus::InProgress,
                RunStatus::InProgress,
                RunStatus::Completed,
            ],
        ),
    );
    let env = runner_env(
        7,
        &[("poll-interval", "100"), ("continue-after-seconds", "infinite")],
    );

    let admission = actions(env, &github).concurrency_disabler().await.unwrap();

    assert_eq!(admission.outcome, AdmissionOutcome::Turn);
    assert_eq!(admission.waited, Duration::from_secs(400));
}

#[tokio::test(start_paused = true)]
async fn test_listing_failure() {
    let github = Arc::new(ScriptedGitHub {
        fail_listing: true,
        ..Default::default()
    });

    let err = actions(runner_env(7, &[]), &github)
        .concurrency_disabler()
        .await
        .unwrap_err();
    assert!(err.is_fetch());

    let admission = actions(runner_env(7, &[("ignore-errors", "TRUE")]), &github)
        .concurrency_disabler()
        .await
        .unwrap();
    assert_eq!(admission.outcome, AdmissionOutcome::ErrorIgnored);
}

#[tokio::test(start_paused = true)]
async fn test_missing_token_is_configuration_error() {
    let github = Arc::new(ScriptedGitHub::default());
    let env = Environment::default().with_var("GITHUB_RUN_ID", "7");

    let err = actions(env, &github).concurrency_disabler().await.unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "No github token provided");
}

#[tokio::test(start_paused = true)]
async fn test_other_actions_share_the_environment() {
    let github = Arc::new(ScriptedGitHub::default());
    let env = runner_env(7, &[("issue_number", "1")]);

    let labels = actions(env, &github).add_labels().await.unwrap();
    assert!(labels.is_empty());
}
