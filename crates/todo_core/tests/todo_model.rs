use todo_core::{Todo, ValidationError};
use uuid::Uuid;

#[test]
fn new_todo_trims_input_and_starts_with_equal_timestamps() {
    let todo = Todo::new("  buy milk  ", "\tremember the oat one\n").unwrap();

    assert!(!todo.id().is_nil());
    assert_eq!(todo.title(), "buy milk");
    assert_eq!(todo.body(), "remember the oat one");
    assert_eq!(todo.creation_time(), todo.update_time());
}

#[test]
fn new_todo_rejects_empty_or_whitespace_fields() {
    assert_eq!(
        Todo::new("", "body").unwrap_err(),
        ValidationError::EmptyTitle
    );
    assert_eq!(
        Todo::new("   ", "body").unwrap_err(),
        ValidationError::EmptyTitle
    );
    assert_eq!(
        Todo::new("title", "").unwrap_err(),
        ValidationError::EmptyBody
    );
    assert_eq!(
        Todo::new("title", " \t ").unwrap_err(),
        ValidationError::EmptyBody
    );
}

#[test]
fn set_title_revalidates_and_touches_update_time() {
    let mut todo = Todo::new("before", "body").unwrap();
    let created = todo.update_time();

    todo.set_title("  after  ").unwrap();
    assert_eq!(todo.title(), "after");
    assert!(todo.update_time() > created);

    let err = todo.set_title("   ").unwrap_err();
    assert_eq!(err, ValidationError::EmptyTitle);
    // Failed mutation leaves the previous value in place.
    assert_eq!(todo.title(), "after");
}

#[test]
fn set_body_keeps_title_and_creation_time() {
    let mut todo = Todo::new("title", "draft").unwrap();
    let created = todo.creation_time();

    todo.set_body("final").unwrap();
    assert_eq!(todo.title(), "title");
    assert_eq!(todo.body(), "final");
    assert_eq!(todo.creation_time(), created);
    assert!(todo.update_time() > created);
}

#[test]
fn consecutive_mutations_never_move_update_time_backwards() {
    let mut todo = Todo::new("title", "body").unwrap();
    let mut previous = todo.update_time();

    for round in 0..5 {
        todo.set_body(&format!("body {round}")).unwrap();
        assert!(todo.update_time() > previous);
        previous = todo.update_time();
    }
}

#[test]
fn add_comment_attaches_to_parent_and_validates_body() {
    let todo = Todo::new("title", "body").unwrap();

    let comment = todo.add_comment("  looks good  ").unwrap();
    assert_eq!(comment.todo_id(), todo.id());
    assert_eq!(comment.body(), "looks good");
    assert!(!comment.id().is_nil());

    let err = todo.add_comment(" ").unwrap_err();
    assert_eq!(err, ValidationError::EmptyBody);
}

#[test]
fn from_stored_rejects_invalid_persisted_state() {
    let now = chrono::Utc::now();
    let err = Todo::from_stored(Uuid::new_v4(), now, now, "", "body").unwrap_err();
    assert_eq!(err, ValidationError::EmptyTitle);
}
