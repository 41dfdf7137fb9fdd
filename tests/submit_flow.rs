mod support;

use std::time::Duration;

use tailor_cv::core::{FileStore, ResultStore, ServiceClient};
use tailor_cv::render::Cell;
use tailor_cv::types::{CvUpload, RewriteResult};
use tailor_cv::views::results::NO_RESULT_MESSAGE;
use tailor_cv::views::submission::{FAILURE_MESSAGE, VALIDATION_MESSAGE};
use tailor_cv::views::{
    PendingNavigation, ResultsState, ResultsView, Route, SubmissionView, SubmitOutcome,
};

fn client(base_url: &str) -> ServiceClient {
    ServiceClient::new(base_url, Duration::from_secs(5)).expect("client")
}

fn form() -> SubmissionView {
    let mut view = SubmissionView::new();
    view.select_file(Some(CvUpload::new("resume.pdf", b"%PDF".to_vec())))
        .expect("pdf accepted");
    view.set_job_description("Backend engineer");
    view
}

#[tokio::test]
async fn successful_submission_reaches_results_view() {
    let server = support::spawn(
        200,
        r#"{"match_score":0.7321,"before":["A"],"after":["B"]}"#,
    )
    .await;
    let state = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(state.path());
    let mut navigation = PendingNavigation::default();

    let mut view = form();
    let outcome = view
        .submit(&client(&server.base_url), &store, &mut navigation)
        .await;

    assert!(matches!(outcome, SubmitOutcome::Navigated(_)));
    assert_eq!(navigation.route, Some(Route::Results));
    assert!(view.is_submit_enabled());

    let stored = store.load(None).await.expect("load").expect("entry");
    assert_eq!(
        stored.result,
        RewriteResult {
            match_score: 0.7321,
            before: vec!["A".to_string()],
            after: vec!["B".to_string()],
            download_url: None,
        }
    );

    // A fresh view over the same state directory, as a later invocation would see it.
    let mut results = ResultsView::new(None);
    results.activate(&FileStore::new(state.path())).await;
    let page = results.page().expect("ready page");

    assert_eq!(page.score_percent, 73);
    assert_eq!(page.comparison.len(), 1);
    assert_eq!(page.comparison.rows[0].before, Cell::Plain("A".to_string()));
    assert_eq!(
        page.comparison.rows[0].after,
        Cell::Highlighted("B".to_string())
    );
    assert!(!page.download.is_enabled());
}

#[tokio::test]
async fn server_error_leaves_store_untouched() {
    let server = support::spawn(500, r#"{"detail":"boom"}"#).await;
    let state = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(state.path());
    let mut navigation = PendingNavigation::default();

    let mut view = form();
    let outcome = view
        .submit(&client(&server.base_url), &store, &mut navigation)
        .await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(view.error(), Some(FAILURE_MESSAGE));
    assert!(view.is_submit_enabled());
    assert!(navigation.route.is_none());
    assert!(store.load(None).await.expect("load").is_none());
}

#[tokio::test]
async fn missing_file_never_reaches_the_network() {
    let server = support::spawn(200, "{}").await;
    let state = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(state.path());

    let mut view = SubmissionView::new();
    view.set_job_description("Backend engineer");
    let outcome = view
        .submit(
            &client(&server.base_url),
            &store,
            &mut PendingNavigation::default(),
        )
        .await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(view.error(), Some(VALIDATION_MESSAGE));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn results_view_without_submission_shows_error() {
    let state = tempfile::tempdir().expect("tempdir");
    let mut results = ResultsView::new(None);

    let shown = results.activate(&FileStore::new(state.path())).await;
    assert_eq!(
        shown,
        &ResultsState::Missing {
            message: NO_RESULT_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn corrupt_state_file_shows_error() {
    let state = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(state.path());
    std::fs::write(store.path_for(tailor_cv::core::RESULT_KEY), "not json").expect("write");

    let mut results = ResultsView::new(None);
    assert!(matches!(
        results.activate(&store).await,
        ResultsState::Missing { .. }
    ));
}
