//! Integration tests for the create -> edit -> list -> delete -> delete-again chain

use super::helpers::{mock_json, open_session};
use mockito::Matcher;
use serde_json::json;
use story_spoiler::report::OutcomeStatus;
use story_spoiler::scenario::catalog::{
    edited_lifecycle_title, SUCCESS_CREATE_MESSAGE, SUCCESS_DELETE_MESSAGE,
    SUCCESS_EDIT_MESSAGE, UNABLE_TO_DELETE_MESSAGE,
};
use story_spoiler::scenario::Suite;

const STORY_ID: &str = "life-1";

#[test]
fn test_lifecycle_passes_and_second_delete_is_rejected() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);
    let edited_title = edited_lifecycle_title(STORY_ID);

    let create = mock_json(
        &mut server,
        "POST",
        "/api/Story/Create",
        201,
        json!({ "msg": SUCCESS_CREATE_MESSAGE, "storyId": STORY_ID }),
    )
    .match_body(Matcher::Regex("Lifecycle Story".to_string()))
    .expect(1)
    .create();
    let edit = mock_json(
        &mut server,
        "PUT",
        "/api/Story/Edit/life-1",
        200,
        json!({ "msg": SUCCESS_EDIT_MESSAGE }),
    )
    .match_body(Matcher::PartialJson(json!({ "title": &edited_title })))
    .expect(1)
    .create();
    let list = mock_json(
        &mut server,
        "GET",
        "/api/Story/All",
        200,
        json!([
            { "id": "other", "title": "Unrelated" },
            { "id": STORY_ID, "title": &edited_title },
        ]),
    )
    .expect(1)
    .create();
    // Same path twice: the first delete succeeds, the repeat is rejected.
    let first_delete = mock_json(
        &mut server,
        "DELETE",
        "/api/Story/Delete/life-1",
        200,
        json!({ "msg": SUCCESS_DELETE_MESSAGE }),
    )
    .expect(1)
    .create();
    let second_delete = mock_json(
        &mut server,
        "DELETE",
        "/api/Story/Delete/life-1",
        400,
        json!({ "msg": UNABLE_TO_DELETE_MESSAGE }),
    )
    .expect(1)
    .create();

    let report = session.run_suite(Suite::Lifecycle, &[]).expect("Suite should run");

    assert!(report.is_success(), "{}", report.render_text());
    assert_eq!(report.outcomes.len(), 5);
    create.assert();
    edit.assert();
    list.assert();
    first_delete.assert();
    second_delete.assert();
}

#[test]
fn test_listing_with_stale_title_fails() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);

    let _create = mock_json(
        &mut server,
        "POST",
        "/api/Story/Create",
        201,
        json!({ "msg": SUCCESS_CREATE_MESSAGE, "storyId": STORY_ID }),
    )
    .create();
    let _edit = mock_json(
        &mut server,
        "PUT",
        "/api/Story/Edit/life-1",
        200,
        json!({ "msg": SUCCESS_EDIT_MESSAGE }),
    )
    .create();
    let _list = mock_json(
        &mut server,
        "GET",
        "/api/Story/All",
        200,
        json!([{ "id": STORY_ID, "title": "Lifecycle Story before edit" }]),
    )
    .create();

    let report = session
        .run_suite(
            Suite::Lifecycle,
            &["lifecycle-list-reflects-edit".to_string()],
        )
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    match &report.outcome("lifecycle-list-reflects-edit").unwrap().status {
        OutcomeStatus::Failed { reason } => assert!(reason.contains("does not contain")),
        other => panic!("Expected listing failure, got {other:?}"),
    }
}

#[test]
fn test_lifecycle_context_is_independent_of_standard_suite() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);

    // Lifecycle create is refused; the edit must not fall back to another suite's id.
    let _create = mock_json(
        &mut server,
        "POST",
        "/api/Story/Create",
        400,
        json!({ "msg": "nope" }),
    )
    .create();

    let report = session
        .run_suite(Suite::Lifecycle, &["lifecycle-edit".to_string()])
        .unwrap();

    assert!(!report.outcomes[0].status.is_passed());
    assert!(matches!(
        report.outcomes[1].status,
        OutcomeStatus::PreconditionFailed { .. }
    ));
}
