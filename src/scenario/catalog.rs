//! The scenarios themselves.
//!
//! Standard suite: create, edit, list, delete, then the three negative cases.
//! Lifecycle suite: one story taken from creation through a rejected second delete.

use reqwest::StatusCode;
use tracing::info;
use uuid::Uuid;

use super::check::{expect_message, expect_non_empty_listing, expect_reply, expect_status};
use super::{ScenarioDef, ScenarioFailure, ScenarioResult, SessionContext};
use crate::client::StoryClient;
use crate::models::StoryRequest;

pub const SUCCESS_CREATE_MESSAGE: &str = "Successfully created!";
pub const SUCCESS_EDIT_MESSAGE: &str = "Successfully edited";
pub const SUCCESS_DELETE_MESSAGE: &str = "Deleted successfully!";
pub const NO_SUCH_STORY_MESSAGE: &str = "No spoilers...";
pub const UNABLE_TO_DELETE_MESSAGE: &str = "Unable to delete this story spoiler!";

/// A syntactically valid id that no story has.
pub fn random_story_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn standard_suite() -> Vec<ScenarioDef> {
    vec![
        ScenarioDef {
            id: "create-story",
            title: "Create story with required fields returns 201",
            depends_on: &[],
            run: create_story,
        },
        ScenarioDef {
            id: "edit-created-story",
            title: "Edit created story returns 200",
            depends_on: &["create-story"],
            run: edit_created_story,
        },
        ScenarioDef {
            id: "list-stories",
            title: "List all stories returns a non-empty list",
            depends_on: &["edit-created-story"],
            run: list_stories,
        },
        ScenarioDef {
            id: "delete-created-story",
            title: "Delete created story returns 200",
            depends_on: &["list-stories"],
            run: delete_created_story,
        },
        ScenarioDef {
            id: "create-story-empty-fields",
            title: "Create story without required fields returns 400",
            depends_on: &["delete-created-story"],
            run: create_story_empty_fields,
        },
        ScenarioDef {
            id: "edit-missing-story",
            title: "Edit non-existing story returns 404",
            depends_on: &["create-story-empty-fields"],
            run: edit_missing_story,
        },
        ScenarioDef {
            id: "delete-missing-story",
            title: "Delete non-existing story returns 400",
            depends_on: &["edit-missing-story"],
            run: delete_missing_story,
        },
    ]
}

pub fn lifecycle_suite() -> Vec<ScenarioDef> {
    vec![
        ScenarioDef {
            id: "lifecycle-create",
            title: "Create a uniquely titled story",
            depends_on: &[],
            run: lifecycle_create,
        },
        ScenarioDef {
            id: "lifecycle-edit",
            title: "Edit the story to a new unique title",
            depends_on: &["lifecycle-create"],
            run: lifecycle_edit,
        },
        ScenarioDef {
            id: "lifecycle-list-reflects-edit",
            title: "Listing shows the edited title",
            depends_on: &["lifecycle-edit"],
            run: lifecycle_list_reflects_edit,
        },
        ScenarioDef {
            id: "lifecycle-delete",
            title: "Delete the story",
            depends_on: &["lifecycle-list-reflects-edit"],
            run: lifecycle_delete,
        },
        ScenarioDef {
            id: "lifecycle-delete-again",
            title: "Deleting the same story again returns 400",
            depends_on: &["lifecycle-delete"],
            run: lifecycle_delete_again,
        },
    ]
}

// ============================================================================
// Standard suite
// ============================================================================

fn create_story(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let request = StoryRequest::new("Test Story", "A thrilling test story spoiler.");
    let reply = client.create(&request)?;

    expect_status(&reply, StatusCode::CREATED)?;
    let response = reply.api_response()?;
    let story_id = response
        .story_id
        .clone()
        .ok_or(ScenarioFailure::MissingField("a storyId"))?;
    expect_message(&response, SUCCESS_CREATE_MESSAGE)?;

    info!(story_id = %story_id, "Created story");
    ctx.record_created(story_id);
    Ok(())
}

fn edit_created_story(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let story_id = ctx.require_story_id()?;
    let request = StoryRequest::new("Updated Test Story", "An updated thrilling story spoiler.");
    let reply = client.edit(story_id, &request)?;
    expect_reply(&reply, StatusCode::OK, SUCCESS_EDIT_MESSAGE)?;
    Ok(())
}

fn list_stories(client: &StoryClient, _ctx: &mut SessionContext) -> ScenarioResult {
    let reply = client.list()?;
    let stories = expect_non_empty_listing(&reply)?;
    info!(count = stories.len(), "Listed stories");
    Ok(())
}

fn delete_created_story(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let story_id = ctx.require_story_id()?;
    let reply = client.delete(story_id)?;
    expect_reply(&reply, StatusCode::OK, SUCCESS_DELETE_MESSAGE)?;
    Ok(())
}

fn create_story_empty_fields(client: &StoryClient, _ctx: &mut SessionContext) -> ScenarioResult {
    let reply = client.create(&StoryRequest::empty())?;
    expect_status(&reply, StatusCode::BAD_REQUEST)
}

fn edit_missing_story(client: &StoryClient, _ctx: &mut SessionContext) -> ScenarioResult {
    let request = StoryRequest::new("Non-existing Story", "Non-existing description");
    let reply = client.edit(&random_story_id(), &request)?;
    expect_reply(&reply, StatusCode::NOT_FOUND, NO_SUCH_STORY_MESSAGE)?;
    Ok(())
}

fn delete_missing_story(client: &StoryClient, _ctx: &mut SessionContext) -> ScenarioResult {
    let reply = client.delete(&random_story_id())?;
    expect_reply(&reply, StatusCode::BAD_REQUEST, UNABLE_TO_DELETE_MESSAGE)?;
    Ok(())
}

// ============================================================================
// Lifecycle suite
// ============================================================================

fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Title the lifecycle edit gives a story; keyed on the server-assigned id so it is unique.
pub fn edited_lifecycle_title(story_id: &str) -> String {
    format!("Edited Lifecycle Story {story_id}")
}

fn lifecycle_create(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let request = StoryRequest::new(
        format!("Lifecycle Story {}", unique_suffix()),
        "A story created to walk the full lifecycle.",
    );
    let reply = client.create(&request)?;
    let response = expect_reply(&reply, StatusCode::CREATED, SUCCESS_CREATE_MESSAGE)?;
    let story_id = response
        .story_id
        .ok_or(ScenarioFailure::MissingField("a storyId"))?;
    ctx.record_created(story_id);
    Ok(())
}

fn lifecycle_edit(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let story_id = ctx.require_story_id()?.to_string();
    let title = edited_lifecycle_title(&story_id);
    let request = StoryRequest::new(title.clone(), "The lifecycle story after an edit.");
    let reply = client.edit(&story_id, &request)?;
    expect_reply(&reply, StatusCode::OK, SUCCESS_EDIT_MESSAGE)?;
    ctx.expected_title = Some(title);
    Ok(())
}

fn lifecycle_list_reflects_edit(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let story_id = ctx.require_story_id()?;
    let expected_title = ctx.require_expected_title()?;
    let stories = expect_non_empty_listing(&client.list()?)?;

    let found = stories.iter().any(|story| {
        story.title.as_deref() == Some(expected_title)
            && story.id.as_deref().is_none_or(|id| id == story_id)
    });
    if !found {
        return Err(ScenarioFailure::assertion(format!(
            "Listing does not contain story {story_id} with title {expected_title:?}"
        )));
    }
    Ok(())
}

fn lifecycle_delete(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let reply = client.delete(ctx.require_story_id()?)?;
    expect_reply(&reply, StatusCode::OK, SUCCESS_DELETE_MESSAGE)?;
    Ok(())
}

/// A deleted id is expected to behave like an unknown one.
fn lifecycle_delete_again(client: &StoryClient, ctx: &mut SessionContext) -> ScenarioResult {
    let reply = client.delete(ctx.require_story_id()?)?;
    expect_reply(&reply, StatusCode::BAD_REQUEST, UNABLE_TO_DELETE_MESSAGE)?;
    Ok(())
}
