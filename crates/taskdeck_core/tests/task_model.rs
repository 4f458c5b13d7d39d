use taskdeck_core::{validate_text, Task, TextValidationError, TEXT_MAX_CHARS};

#[test]
fn task_new_sets_defaults() {
    let task = Task::new("water the plants");

    assert!(task.id.starts_with("task_"));
    assert_eq!(task.text, "water the plants");
    assert!(!task.completed);
    assert!(task.is_active());
    assert_eq!(task.created_at, task.updated_at);
}

#[test]
fn generated_ids_are_unique() {
    let first = Task::new("first");
    let second = Task::new("second");

    assert_ne!(first.id, second.id);
}

#[test]
fn touch_advances_updated_at() {
    let mut task = Task::new("stretch");
    let before = task.updated_at;

    std::thread::sleep(std::time::Duration::from_millis(5));
    task.touch();

    assert!(task.updated_at > before);
    assert!(task.updated_at > task.created_at);
}

#[test]
fn validate_rejects_empty_and_whitespace_only_text() {
    assert_eq!(validate_text(""), Err(TextValidationError::EmptyText));
    assert_eq!(validate_text("   \t  "), Err(TextValidationError::EmptyText));
}

#[test]
fn validate_rejects_too_short_text() {
    assert_eq!(
        validate_text("ab"),
        Err(TextValidationError::TooShort { len: 2 })
    );
    assert_eq!(
        validate_text("  ab  "),
        Err(TextValidationError::TooShort { len: 2 })
    );
}

#[test]
fn validate_accepts_boundary_lengths() {
    assert_eq!(validate_text("abc").unwrap(), "abc");

    let max = "x".repeat(TEXT_MAX_CHARS);
    assert_eq!(validate_text(&max).unwrap(), max);
}

#[test]
fn validate_rejects_too_long_text() {
    let too_long = "x".repeat(TEXT_MAX_CHARS + 1);
    assert_eq!(
        validate_text(&too_long),
        Err(TextValidationError::TooLong {
            len: TEXT_MAX_CHARS + 1
        })
    );
}

#[test]
fn validate_returns_trimmed_text_and_counts_characters_not_bytes() {
    assert_eq!(validate_text("  buy milk  ").unwrap(), "buy milk");

    // Three scalar values, more than three bytes.
    assert_eq!(validate_text("äöü").unwrap(), "äöü");
}

#[test]
fn validation_messages_are_user_facing() {
    let message = validate_text("").unwrap_err().to_string();
    assert_eq!(message, "Task cannot be empty");

    let message = validate_text("ab").unwrap_err().to_string();
    assert!(message.contains("at least 3"));

    let message = validate_text(&"x".repeat(200)).unwrap_err().to_string();
    assert!(message.contains("exceed 100"));
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task::new("ship release notes");

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task.id);
    assert_eq!(json["text"], "ship release notes");
    assert_eq!(json["completed"], false);
    assert!(json["createdAt"].is_string());
    assert!(json["updatedAt"].is_string());

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
