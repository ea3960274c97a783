//! End-to-end wizard scenarios.

use quill_model::{DraftRecord, Field};
use quill_wizard::{FormOrchestrator, PostSubmission, Transition};

fn complete_form() -> FormOrchestrator {
    let mut form = FormOrchestrator::blog();
    form.input(Field::Title, "Hello World").unwrap();
    form.input(Field::Category, "Tech-News").unwrap();
    assert_eq!(form.next(), Transition::Advanced { from: 1, to: 2 });
    form.input(
        Field::Description,
        "Fifty characters of description text, give or take.",
    )
    .unwrap();
    assert_eq!(form.next(), Transition::Advanced { from: 2, to: 3 });
    form.input(Field::Tags, "rust, go, c").unwrap();
    form
}

#[test]
fn full_walkthrough_is_valid() {
    let mut form = complete_form();
    assert!(form.is_form_valid());
    let check = form.validate_all_steps();
    assert!(check.is_valid());
    assert_eq!(check.first_invalid_step(), None);
}

#[test]
fn submit_catches_earlier_step_invalidated_later() {
    let mut form = complete_form();
    form.set_current_step(2).unwrap();
    form.input(Field::Description, "too short").unwrap();
    form.set_current_step(3).unwrap();

    let check = form.validate_all_steps();
    assert!(!check.is_valid());
    assert_eq!(check.first_invalid_step(), Some(2));
    assert!(check.errors_for(1).is_none());
}

#[test]
fn snap_back_to_first_invalid_step_shows_its_errors() {
    let mut form = FormOrchestrator::blog().with_initial(&DraftRecord {
        title: "Hello World".into(),
        category: "News".into(),
        ..Default::default()
    });
    form.set_current_step(3).unwrap();
    let check = form.validate_all_steps();
    let step = check.first_invalid_step().unwrap();
    form.set_current_step(step).unwrap();
    assert_eq!(form.current_step(), 2);
    assert!(form.errors().is_empty());
    let errors = form.validate_current_step();
    assert_eq!(errors.get(Field::Description), Some("Description is required"));
}

#[test]
fn bad_tags_block_the_last_step() {
    let mut form = complete_form();
    form.input(Field::Tags, "c++, rust!").unwrap();
    assert!(!form.is_current_step_valid());
    assert_eq!(form.next(), Transition::Blocked { step: 3 });
    assert_eq!(
        form.errors().get(Field::Tags),
        Some("Tags can only contain letters, numbers, spaces, commas, and hyphens")
    );
}

#[test]
fn submission_snapshot() {
    let mut form = complete_form();
    form.input(Field::AuthorName, "  Grace Hopper ").unwrap();
    let submission = PostSubmission::from_draft(&form.form_data());
    insta::assert_json_snapshot!(submission, @r#"
    {
      "title": "Hello World",
      "category": "Tech-News",
      "description": "Fifty characters of description text, give or take.",
      "tags": "rust, go, c",
      "authorName": "Grace Hopper"
    }
    "#);
}
