//! What the board does once the server
//! has answered a mutation.
//!
//! A transport only reports success or
//! failure; the follow-up (local cache
//! edits, the reloads, the blocking
//! notice) is decided here so both
//! clients agree on it.

use crate::api::{
  ApiRequest,
  Endpoint,
  Reload
};
use crate::state::BoardAction;

pub const CONFIRM_DELETE_TASK: &str =
  "确定要删除这个任务吗？";
pub const CONFIRM_PURGE_ARCHIVE: &str =
  "确定要永久删除这个归档任务吗？此操作无法撤销。";
pub const RESTORED: &str =
  "任务已恢复到任务列表";
pub const RESTORE_FAILED: &str =
  "恢复任务失败";
pub const PURGED: &str =
  "归档任务已永久删除";
pub const PURGE_FAILED: &str =
  "删除归档任务失败";

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
  /// Dispatched before any reload.
  pub actions: Vec<BoardAction>,
  /// Fetched in order.
  pub reloads: &'static [Reload],
  /// Shown once the reloads are done.
  pub notice:  Option<&'static str>
}

impl Outcome {
  fn nothing() -> Self {
    Self {
      actions: vec![],
      reloads: &[],
      notice:  None
    }
  }
}

/// Question to put to the user before
/// sending, for the destructive calls.
pub fn confirm_prompt(
  endpoint: &Endpoint
) -> Option<&'static str> {
  match endpoint {
    | Endpoint::DeleteTask(_) => {
      Some(CONFIRM_DELETE_TASK)
    }
    | Endpoint::DeleteArchive(_) => {
      Some(CONFIRM_PURGE_ARCHIVE)
    }
    | _ => None
  }
}

pub fn after(
  request: &ApiRequest,
  ok: bool
) -> Outcome {
  if !ok {
    let notice = match &request.endpoint {
      | Endpoint::RestoreArchive(_) => {
        Some(RESTORE_FAILED)
      }
      | Endpoint::DeleteArchive(_) => {
        Some(PURGE_FAILED)
      }
      | _ => None
    };
    return Outcome {
      notice,
      ..Outcome::nothing()
    };
  }

  let reloads =
    request.reloads_on_success();
  match &request.endpoint {
    | Endpoint::CreateTask
    | Endpoint::UpdateTask(_) => {
      Outcome {
        actions: vec![
          BoardAction::TaskSaved,
        ],
        reloads,
        notice: None
      }
    }
    | Endpoint::PatchStatus(_)
    | Endpoint::DeleteTask(_) => {
      Outcome {
        actions: vec![],
        reloads,
        notice: None
      }
    }
    | Endpoint::RestoreArchive(id) => {
      Outcome {
        actions: vec![
          BoardAction::ArchiveRemoved(
            id.clone()
          ),
        ],
        reloads,
        notice: Some(RESTORED)
      }
    }
    | Endpoint::DeleteArchive(id) => {
      Outcome {
        actions: vec![
          BoardAction::ArchiveRemoved(
            id.clone()
          ),
        ],
        reloads,
        notice: Some(PURGED)
      }
    }
    | Endpoint::ListTasks
    | Endpoint::Stats
    | Endpoint::ListTags
    | Endpoint::ListArchives {
      ..
    } => Outcome::nothing()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    BoardState,
    ModalState,
    TaskPayload,
    TaskPriority,
    TaskStatus
  };

  fn payload() -> TaskPayload {
    TaskPayload {
      title:       "A".to_string(),
      description: String::new(),
      priority:    TaskPriority::Medium,
      due_date:    String::new(),
      tags:        vec![],
      status:      None
    }
  }

  fn apply(
    state: &mut BoardState,
    outcome: &Outcome
  ) {
    for action in &outcome.actions {
      state.reduce(action.clone());
    }
  }

  #[test]
  fn failed_status_patch_changes_nothing()
  {
    let request = ApiRequest::patch_status(
      "7",
      TaskStatus::Done
    );
    assert_eq!(
      after(&request, false),
      Outcome::nothing()
    );

    let ok = after(&request, true);
    assert!(ok.actions.is_empty());
    assert_eq!(ok.reloads, &[
      Reload::Tasks,
      Reload::Stats
    ]);
  }

  #[test]
  fn failed_save_keeps_modal_open() {
    let mut state = BoardState::default();
    state.reduce(BoardAction::OpenCreate);
    let request =
      ApiRequest::create_task(payload());

    let failed = after(&request, false);
    apply(&mut state, &failed);
    assert_eq!(
      state.modal(),
      &ModalState::Create
    );
    assert!(failed.reloads.is_empty());

    let saved = after(&request, true);
    apply(&mut state, &saved);
    assert_eq!(
      state.modal(),
      &ModalState::Closed
    );
    assert_eq!(saved.reloads, &[
      Reload::Tasks,
      Reload::Stats,
      Reload::Tags
    ]);
  }

  #[test]
  fn restore_drops_entry_then_notifies() {
    let request =
      ApiRequest::restore_archive("42");
    let ok = after(&request, true);
    assert_eq!(ok.actions, vec![
      BoardAction::ArchiveRemoved(
        "42".to_string()
      )
    ]);
    assert_eq!(ok.reloads, &[
      Reload::Tasks,
      Reload::Stats
    ]);
    assert_eq!(ok.notice, Some(RESTORED));

    let failed = after(&request, false);
    assert!(failed.actions.is_empty());
    assert!(failed.reloads.is_empty());
    assert_eq!(
      failed.notice,
      Some(RESTORE_FAILED)
    );
  }

  #[test]
  fn purge_reloads_stats_only() {
    let request =
      ApiRequest::delete_archive("9");
    let ok = after(&request, true);
    assert_eq!(ok.reloads, &[
      Reload::Stats
    ]);
    assert_eq!(ok.notice, Some(PURGED));
    assert_eq!(
      after(&request, false).notice,
      Some(PURGE_FAILED)
    );
  }

  #[test]
  fn failed_task_delete_is_silent() {
    let request =
      ApiRequest::delete_task("3");
    assert_eq!(
      after(&request, false),
      Outcome::nothing()
    );
    assert_eq!(
      confirm_prompt(&request.endpoint),
      Some(CONFIRM_DELETE_TASK)
    );
    assert_eq!(
      confirm_prompt(
        &ApiRequest::restore_archive("3")
          .endpoint
      ),
      None
    );
  }
}
