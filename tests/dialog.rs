use todo_sync::dialog::{DialogCommand, DialogController, DialogState};

mod support;

use support::task;

#[test]
fn create_workflow_emits_command_and_resets_field() {
    let mut dialog = DialogController::new();
    assert!(dialog.open_create());
    assert_eq!(dialog.state(), DialogState::Creating);
    dialog.set_title("Buy milk");
    assert!(dialog.can_submit());
    assert_eq!(
        dialog.submit_create("Buy milk"),
        Some(DialogCommand::Create {
            title: "Buy milk".to_string()
        })
    );
    assert_eq!(dialog.state(), DialogState::Closed);
    assert_eq!(dialog.title(), "");
}

#[test]
fn cancel_create_emits_nothing() {
    let mut dialog = DialogController::new();
    dialog.open_create();
    dialog.set_title("draft");
    assert!(dialog.cancel_create());
    assert_eq!(dialog.state(), DialogState::Closed);
    assert_eq!(dialog.title(), "");
    assert!(dialog.open_create());
    assert_eq!(dialog.title(), "");
}

#[test]
fn blank_submit_is_unavailable() {
    let mut dialog = DialogController::new();
    dialog.open_create();
    assert!(!dialog.can_submit());
    assert_eq!(dialog.submit_create("   "), None);
    assert_eq!(dialog.state(), DialogState::Creating);

    let tasks = vec![task(1, "Buy milk", false)];
    let mut dialog = DialogController::new();
    dialog.open_edit(&tasks, 1);
    dialog.set_title(" ");
    assert!(!dialog.can_submit());
    assert_eq!(dialog.submit(), None);
    assert_eq!(dialog.state(), DialogState::Editing(1));
}

#[test]
fn edit_workflow_snapshots_title_and_targets_id() {
    let tasks = vec![task(1, "Buy milk", false), task(2, "Walk dog", true)];
    let mut dialog = DialogController::new();
    assert!(dialog.open_edit(&tasks, 2));
    assert_eq!(dialog.state(), DialogState::Editing(2));
    assert_eq!(dialog.title(), "Walk dog");
    assert_eq!(
        dialog.submit_edit("Walk the dog"),
        Some(DialogCommand::Edit {
            id: 2,
            title: "Walk the dog".to_string()
        })
    );
    assert_eq!(dialog.state(), DialogState::Closed);
}

#[test]
fn edit_submit_passes_title_through_untrimmed() {
    let tasks = vec![task(1, "Buy milk", false)];
    let mut dialog = DialogController::new();
    dialog.open_edit(&tasks, 1);
    assert_eq!(
        dialog.submit_edit(" Buy oat milk "),
        Some(DialogCommand::Edit {
            id: 1,
            title: " Buy oat milk ".to_string()
        })
    );
}

#[test]
fn cancel_edit_emits_nothing() {
    let tasks = vec![task(1, "Buy milk", false)];
    let mut dialog = DialogController::new();
    dialog.open_edit(&tasks, 1);
    assert!(!dialog.cancel_create());
    assert!(dialog.cancel_edit());
    assert_eq!(dialog.state(), DialogState::Closed);
}

#[test]
fn only_one_dialog_open_at_a_time() {
    let tasks = vec![task(1, "Buy milk", false)];
    let mut dialog = DialogController::new();
    dialog.open_create();
    assert!(!dialog.open_create());
    assert!(!dialog.open_edit(&tasks, 1));
    assert_eq!(dialog.state(), DialogState::Creating);
    dialog.cancel();

    dialog.open_edit(&tasks, 1);
    assert!(!dialog.open_create());
    assert!(!dialog.open_edit(&tasks, 1));
    assert_eq!(dialog.state(), DialogState::Editing(1));
}

#[test]
fn open_edit_unknown_id_rejected() {
    let mut dialog = DialogController::new();
    assert!(!dialog.open_edit(&[], 7));
    assert_eq!(dialog.state(), DialogState::Closed);
}

#[test]
fn submit_for_wrong_mode_is_ignored() {
    let mut dialog = DialogController::new();
    assert_eq!(dialog.submit_create("x"), None);
    assert_eq!(dialog.submit_edit("x"), None);
    dialog.open_create();
    assert_eq!(dialog.submit_edit("x"), None);
    assert_eq!(dialog.state(), DialogState::Creating);
}
