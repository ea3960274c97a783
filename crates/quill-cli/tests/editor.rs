//! Editor sessions against a real collection store.

use std::rc::Rc;

use quill_cli::editor::{EditorError, EditorMode, EditorSession};
use quill_cli::views::{EMPTY_DASHBOARD, render_dashboard, render_detail};
use quill_model::{DraftPatch, Field, PostId};
use quill_persistence::{MemoryStorage, Storage};
use quill_store::{CollectionStore, SessionStore, StoreError};
use quill_validate::LoginForm;

fn signed_in() -> (Rc<SessionStore>, CollectionStore) {
    let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
    let sessions = Rc::new(SessionStore::new(storage.clone()));
    sessions
        .login(&LoginForm {
            email: "demo@example.com".into(),
            password: "demo123".into(),
        })
        .unwrap();
    let posts = CollectionStore::new(sessions.clone(), storage);
    (sessions, posts)
}

fn complete_patch() -> DraftPatch {
    DraftPatch::new()
        .with(Field::Title, "  Hello World  ")
        .with(Field::Category, "Tech-News")
        .with(Field::Description, "Fifty characters of description text, give or take.")
        .with(Field::Tags, "rust, go, c")
}

#[test]
fn create_then_list() {
    let (sessions, mut posts) = signed_in();
    let mut editor = EditorSession::create();
    editor.fill(&complete_patch()).unwrap();

    let post = editor.submit(&mut posts).unwrap();

    assert_eq!(post.title, "Hello World");
    assert_eq!(post.tags.as_deref(), Some("rust, go, c"));
    assert_eq!(post.author_name, None);

    let user = sessions.current().unwrap();
    let listing = render_dashboard(&user, posts.fetch().unwrap(), "%Y-%m-%d");
    assert!(listing.contains("Hello World"));
    assert!(!listing.contains(EMPTY_DASHBOARD));
}

#[test]
fn invalid_submit_snaps_back_to_first_failing_step() {
    let (_, mut posts) = signed_in();
    let mut editor = EditorSession::create();
    editor
        .fill(
            &complete_patch()
                .with(Field::Description, "short")
                .with(Field::Tags, "c++, rust!"),
        )
        .unwrap();
    editor.form_mut().unwrap().set_current_step(3).unwrap();

    let err = editor.submit(&mut posts).unwrap_err();

    let EditorError::Invalid {
        first_invalid_step,
        errors,
    } = err
    else {
        panic!("expected a validation failure, got {err:?}");
    };
    assert_eq!(first_invalid_step, 2);
    assert_eq!(
        errors.get(Field::Description),
        Some("Description must be between 10 and 1000 characters")
    );
    let form = editor.form().unwrap();
    assert_eq!(form.current_step(), 2);
    assert_eq!(form.errors(), &errors);
    assert!(posts.posts().is_empty());
}

#[test]
fn edit_replaces_fields_and_keeps_identity() {
    let (_, mut posts) = signed_in();
    let mut editor = EditorSession::create();
    editor
        .fill(&complete_patch().with(Field::AuthorName, "Ada"))
        .unwrap();
    let created = editor.submit(&mut posts).unwrap();

    let mut editor = EditorSession::edit(&created);
    editor
        .fill(
            &DraftPatch::new()
                .with(Field::Title, "Hello Again")
                .with(Field::AuthorName, ""),
        )
        .unwrap();
    let updated = editor.submit(&mut posts).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Hello Again");
    assert_eq!(updated.category, "Tech-News");
    assert_eq!(updated.author_name, None);
    assert!(updated.updated_at.is_some());

    let detail = render_detail(&updated, "%Y");
    assert!(detail.starts_with("Hello Again\n"));
}

#[test]
fn signed_out_submit_is_an_authorization_error() {
    let (sessions, mut posts) = signed_in();
    sessions.logout().unwrap();
    let mut editor = EditorSession::create();
    editor.fill(&complete_patch()).unwrap();

    let err = editor.submit(&mut posts).unwrap_err();

    assert!(matches!(
        err,
        EditorError::Authorization(StoreError::NotAuthenticated)
    ));
    assert_eq!(err.to_string(), "User not authenticated");
}

#[test]
fn detached_editor_reports_not_initialized() {
    let (_, mut posts) = signed_in();
    let mut editor = EditorSession::detached(EditorMode::Edit(PostId::new("nope").unwrap()));
    let err = editor.submit(&mut posts).unwrap_err();
    assert!(matches!(err, EditorError::NotInitialized));
    assert_eq!(err.to_string(), "Form not initialized");
}

#[test]
fn editing_a_deleted_post_is_a_store_error() {
    let (_, mut posts) = signed_in();
    let mut editor = EditorSession::create();
    editor.fill(&complete_patch()).unwrap();
    let created = editor.submit(&mut posts).unwrap();

    let mut editor = EditorSession::edit(&created);
    posts.delete(&created.id).unwrap();

    assert!(matches!(
        editor.submit(&mut posts),
        Err(EditorError::Store(StoreError::NotFound(_)))
    ));
}
