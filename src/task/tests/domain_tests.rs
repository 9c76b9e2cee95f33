//! Domain-focused tests for task validation, patching, and diff order.

use crate::task::domain::{
    FieldPatch, Hours, Priority, Task, TaskDomainError, TaskDraft, TaskPatch, TaskTitle,
    TrackedField,
};
use crate::identity::{ProjectId, UserId};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(ProjectId::new(), TaskTitle::new(title).expect("valid title"))
}

#[rstest]
fn title_trims_and_rejects_empty() {
    let title = TaskTitle::new("  Ship the release  ").expect("valid title");
    assert_eq!(title.as_str(), "Ship the release");

    assert_eq!(TaskTitle::new("   "), Err(TaskDomainError::EmptyTitle));
    assert_eq!(TaskTitle::new(""), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
#[case(-0.5)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn hours_rejects_invalid_values(#[case] value: f64) {
    assert!(Hours::new(value).is_err());
}

#[rstest]
fn hours_accepts_zero_and_fractions() {
    assert_eq!(Hours::new(0.0).expect("valid").value(), 0.0);
    assert_eq!(Hours::new(2.5).expect("valid").value(), 2.5);
}

#[rstest]
#[case("low", Priority::Low)]
#[case("Medium", Priority::Medium)]
#[case(" HIGH ", Priority::High)]
fn priority_parses_case_insensitively(#[case] input: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(input), Ok(expected));
}

#[rstest]
fn priority_display_is_capitalized() {
    assert_eq!(Priority::Low.display(), "Low");
    assert_eq!(Priority::Medium.display(), "Medium");
    assert_eq!(Priority::High.display(), "High");
}

#[rstest]
fn priority_rejects_unknown_label() {
    assert!(Priority::try_from("urgent").is_err());
}

#[rstest]
fn new_task_defaults_to_medium_priority(clock: DefaultClock) {
    let task = Task::new(draft("Write docs"), UserId::new(), 0, &clock);
    assert_eq!(task.priority(), Priority::Medium);
    assert_eq!(task.position(), 0);
    assert!(task.assignee().is_none());
}

#[rstest]
fn patch_distinguishes_keep_clear_and_set(clock: DefaultClock) {
    let due = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
    let creation = draft("Plan sprint").with_due_date(due);
    let mut task = Task::new(creation, UserId::new(), 0, &clock);

    let keep = TaskPatch::new();
    task.apply_patch(&keep, &clock);
    assert_eq!(task.due_date(), Some(due));

    let clear = TaskPatch {
        due_date: FieldPatch::Clear,
        ..TaskPatch::default()
    };
    task.apply_patch(&clear, &clock);
    assert_eq!(task.due_date(), None);

    let replacement = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");
    let set = TaskPatch {
        due_date: FieldPatch::Set(replacement),
        ..TaskPatch::default()
    };
    task.apply_patch(&set, &clock);
    assert_eq!(task.due_date(), Some(replacement));
}

#[rstest]
fn due_date_before_start_date_is_stored_as_entered(clock: DefaultClock) {
    let start = NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date");
    let due = NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date");
    let creation = draft("Backwards schedule")
        .with_start_date(start)
        .with_due_date(due);
    let task = Task::new(creation, UserId::new(), 0, &clock);

    assert_eq!(task.start_date(), Some(start));
    assert_eq!(task.due_date(), Some(due));
}

#[rstest]
fn relocate_does_not_touch_updated_at(clock: DefaultClock) {
    let mut task = Task::new(draft("Move me"), UserId::new(), 0, &clock);
    let updated_at = task.updated_at();

    task.relocate(7);

    assert_eq!(task.position(), 7);
    assert_eq!(task.updated_at(), updated_at);
}

#[rstest]
fn diff_order_checks_status_first_and_hours_last() {
    assert_eq!(
        TrackedField::DIFF_ORDER,
        [
            TrackedField::Status,
            TrackedField::Priority,
            TrackedField::Assignee,
            TrackedField::DueDate,
            TrackedField::Title,
            TrackedField::Parent,
            TrackedField::EstimatedHours,
            TrackedField::ActualHours,
        ]
    );
    assert_eq!(TrackedField::DueDate.label(), "Due Date");
    assert_eq!(TrackedField::Parent.label(), "Parent Task");
}
