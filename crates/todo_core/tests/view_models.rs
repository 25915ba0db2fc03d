use todo_core::{CommentView, Todo, TodoView};

#[test]
fn todo_view_serializes_camel_case_and_omits_absent_comments() {
    let todo = Todo::new("wire title", "wire body").unwrap();
    let view = TodoView::from_model(&todo, None);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], todo.id().to_string());
    assert_eq!(json["title"], "wire title");
    assert_eq!(json["body"], "wire body");
    assert!(json.get("creationTime").is_some());
    assert!(json.get("updateTime").is_some());
    assert!(
        json.get("comments").is_none(),
        "comments must be omitted, not null: {json}"
    );
}

#[test]
fn todo_view_with_comments_nests_comment_views() {
    let todo = Todo::new("title", "body").unwrap();
    let comment = todo.add_comment("first!").unwrap();
    let view = TodoView::from_model(&todo, Some(vec![CommentView::from_model(&comment)]));

    let json = serde_json::to_value(&view).unwrap();
    let comments = json["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["id"], comment.id().to_string());
    assert_eq!(comments[0]["body"], "first!");
    assert!(comments[0].get("creationTime").is_some());
}

#[test]
fn timestamps_serialize_as_rfc3339() {
    let todo = Todo::new("title", "body").unwrap();
    let view = TodoView::from_model(&todo, None);

    let json = serde_json::to_value(&view).unwrap();
    let raw = json["creationTime"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(raw).is_ok(),
        "not RFC 3339: {raw}"
    );
}

#[test]
fn todo_view_roundtrips_through_json() {
    let todo = Todo::new("roundtrip", "body").unwrap();
    let comment = todo.add_comment("note").unwrap();
    let view = TodoView::from_model(&todo, Some(vec![CommentView::from_model(&comment)]));

    let json = serde_json::to_value(&view).unwrap();
    let decoded: TodoView = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, view);
}
