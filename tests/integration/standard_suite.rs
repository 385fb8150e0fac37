//! Integration tests for the seven ordered standard scenarios

use super::helpers::{mock_json, open_session, uuid_path};
use mockito::{Matcher, ServerGuard};
use serde_json::json;
use story_spoiler::report::OutcomeStatus;
use story_spoiler::scenario::catalog::{
    NO_SUCH_STORY_MESSAGE, SUCCESS_CREATE_MESSAGE, SUCCESS_DELETE_MESSAGE, SUCCESS_EDIT_MESSAGE,
    UNABLE_TO_DELETE_MESSAGE,
};
use story_spoiler::scenario::Suite;

const STORY_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

fn mock_create_valid(
    server: &mut ServerGuard,
    status: usize,
    body: serde_json::Value,
) -> mockito::Mock {
    mock_json(server, "POST", "/api/Story/Create", status, body)
        .match_body(Matcher::Json(json!({
            "title": "Test Story",
            "description": "A thrilling test story spoiler.",
            "url": "",
        })))
        .expect(1)
        .create()
}

fn mock_create_empty(server: &mut ServerGuard) -> mockito::Mock {
    mock_json(
        server,
        "POST",
        "/api/Story/Create",
        400,
        json!({ "errors": { "Title": ["The Title field is required."] } }),
    )
    .match_body(Matcher::Json(json!({ "title": "", "description": "", "url": "" })))
    .expect(1)
    .create()
}

fn mock_negative_cases(server: &mut ServerGuard) -> (mockito::Mock, mockito::Mock) {
    let edit_missing = mock_json(
        server,
        "PUT",
        uuid_path("/api/Story/Edit"),
        404,
        json!({ "msg": NO_SUCH_STORY_MESSAGE }),
    )
    .match_body(Matcher::PartialJson(json!({ "title": "Non-existing Story" })))
    .expect(1)
    .create();

    let delete_missing = mock_json(
        server,
        "DELETE",
        uuid_path("/api/Story/Delete"),
        400,
        json!({ "msg": UNABLE_TO_DELETE_MESSAGE }),
    )
    .expect(1)
    .create();

    (edit_missing, delete_missing)
}

fn ids(statuses: &[(String, OutcomeStatus)]) -> Vec<&str> {
    statuses.iter().map(|(id, _)| id.as_str()).collect()
}

#[test]
fn test_full_standard_suite_passes_in_order() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);

    let create = mock_create_valid(
        &mut server,
        201,
        json!({ "msg": SUCCESS_CREATE_MESSAGE, "storyId": STORY_ID }),
    );
    let edit = mock_json(
        &mut server,
        "PUT",
        format!("/api/Story/Edit/{STORY_ID}").as_str(),
        200,
        json!({ "msg": SUCCESS_EDIT_MESSAGE }),
    )
    .match_body(Matcher::Json(json!({
        "title": "Updated Test Story",
        "description": "An updated thrilling story spoiler.",
        "url": "",
    })))
    .expect(1)
    .create();
    let list = mock_json(
        &mut server,
        "GET",
        "/api/Story/All",
        200,
        json!([{ "title": "Updated Test Story", "description": "An updated thrilling story spoiler.", "url": "" }]),
    )
    .expect(1)
    .create();
    let delete = mock_json(
        &mut server,
        "DELETE",
        format!("/api/Story/Delete/{STORY_ID}").as_str(),
        200,
        json!({ "msg": SUCCESS_DELETE_MESSAGE }),
    )
    .expect(1)
    .create();
    let create_empty = mock_create_empty(&mut server);
    let (edit_missing, delete_missing) = mock_negative_cases(&mut server);

    let report = session.run_suite(Suite::Standard, &[]).expect("Suite should run");

    let statuses: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| (o.id.clone(), o.status.clone()))
        .collect();
    assert_eq!(
        ids(&statuses),
        vec![
            "create-story",
            "edit-created-story",
            "list-stories",
            "delete-created-story",
            "create-story-empty-fields",
            "edit-missing-story",
            "delete-missing-story",
        ]
    );
    assert!(report.is_success(), "{}", report.render_text());
    assert_eq!(report.passed(), 7);

    for mock in [
        &create,
        &edit,
        &list,
        &delete,
        &create_empty,
        &edit_missing,
        &delete_missing,
    ] {
        mock.assert();
    }
}

#[test]
fn test_failed_create_yields_precondition_failures_and_continues() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);

    let _create = mock_create_valid(&mut server, 500, json!({ "msg": "Internal error" }));
    let edit_created = server
        .mock("PUT", Matcher::Regex("^/api/Story/Edit/.*$".to_string()))
        .match_body(Matcher::PartialJson(json!({ "title": "Updated Test Story" })))
        .expect(0)
        .create();
    let _list = mock_json(
        &mut server,
        "GET",
        "/api/Story/All",
        200,
        json!([{ "title": "Someone else's story" }]),
    )
    .create();
    let _create_empty = mock_create_empty(&mut server);
    let _negative = mock_negative_cases(&mut server);

    let report = session.run_suite(Suite::Standard, &[]).expect("Suite should run");

    assert_eq!(report.outcomes.len(), 7);
    match &report.outcome("create-story").unwrap().status {
        OutcomeStatus::Failed { reason } => {
            assert!(reason.contains("Expected status code 201, got 500"), "{reason}")
        }
        other => panic!("create-story should fail, got {other:?}"),
    }
    for id in ["edit-created-story", "delete-created-story"] {
        assert!(
            matches!(
                report.outcome(id).unwrap().status,
                OutcomeStatus::PreconditionFailed { .. }
            ),
            "{id} should be a precondition failure"
        );
    }
    for id in [
        "list-stories",
        "create-story-empty-fields",
        "edit-missing-story",
        "delete-missing-story",
    ] {
        assert!(report.outcome(id).unwrap().status.is_passed(), "{id} should pass");
    }
    assert_eq!(report.failed(), 3);
    edit_created.assert();
}

#[test]
fn test_created_without_story_id_fails_create() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);
    let _create = mock_create_valid(&mut server, 201, json!({ "msg": SUCCESS_CREATE_MESSAGE }));

    let report = session
        .run_suite(Suite::Standard, &["create-story".to_string()])
        .unwrap();

    assert_eq!(report.outcomes.len(), 1);
    match &report.outcomes[0].status {
        OutcomeStatus::Failed { reason } => assert!(reason.contains("storyId")),
        other => panic!("Expected failure, got {other:?}"),
    }
}

#[test]
fn test_wrong_messages_and_empty_listing_are_reported() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);

    let _create = mock_create_valid(
        &mut server,
        201,
        json!({ "msg": SUCCESS_CREATE_MESSAGE, "storyId": STORY_ID }),
    );
    let _edit = mock_json(
        &mut server,
        "PUT",
        format!("/api/Story/Edit/{STORY_ID}").as_str(),
        200,
        json!({ "msg": "Edited" }),
    )
    .create();
    let _list = mock_json(&mut server, "GET", "/api/Story/All", 200, json!([])).create();

    let report = session
        .run_suite(Suite::Standard, &["list-stories".to_string()])
        .unwrap();

    let ids: Vec<_> = report.outcomes.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["create-story", "edit-created-story", "list-stories"]);
    assert!(report.outcomes[0].status.is_passed());
    match &report.outcomes[1].status {
        OutcomeStatus::Failed { reason } => {
            assert!(reason.contains("Successfully edited"));
            assert!(reason.contains("Edited"));
        }
        other => panic!("Expected message mismatch, got {other:?}"),
    }
    match &report.outcomes[2].status {
        OutcomeStatus::Failed { reason } => assert!(reason.contains("at least one story")),
        other => panic!("Expected empty listing failure, got {other:?}"),
    }
}

#[test]
fn test_empty_fields_rejection_does_not_depend_on_state() {
    let mut server = mockito::Server::new();
    let session = open_session(&mut server);
    let _create_empty = mock_create_empty(&mut server);

    let def = Suite::Standard
        .scenarios()
        .into_iter()
        .find(|d| d.id == "create-story-empty-fields")
        .unwrap();
    let mut ctx = story_spoiler::scenario::SessionContext::new();
    let outcome = story_spoiler::scenario::runner::run_scenario(session.client(), &def, &mut ctx);

    assert!(outcome.status.is_passed());
    assert!(ctx.last_created_story_id.is_none());
}
