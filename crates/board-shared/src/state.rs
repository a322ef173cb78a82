//! The client cache and view state of one
//! board session.
//!
//! All changes go through
//! [`BoardState::reduce`], which runs
//! synchronously on the event loop. The
//! cache is a mirror of the last
//! successful fetches; mutations are
//! confirmed by fetching again.

use std::collections::BTreeSet;

use crate::api::ApiRequest;
use crate::archive::{
  archive_months,
  filter_by_month,
  months_descending
};
use crate::filter::TaskFilter;
use crate::form::TaskForm;
use crate::view::{
  ArchiveListView,
  BoardView,
  archive_list_view,
  board_view
};
use crate::{
  ArchivedTaskDto,
  StatsDto,
  TaskDto,
  TaskStatus
};

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub enum ModalState {
  #[default]
  Closed,
  Create,
  Edit(String)
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
  TasksLoaded(Vec<TaskDto>),
  StatsLoaded(StatsDto),
  TagsLoaded(Vec<String>),
  ArchivesLoaded(Vec<ArchivedTaskDto>),
  SetFilter(TaskFilter),
  SelectArchiveMonth(Option<String>),
  OpenCreate,
  OpenEdit(String),
  UpdateForm(TaskForm),
  CloseModal,
  TaskSaved,
  OpenArchive,
  CloseArchive,
  /// A restore or permanent delete was
  /// confirmed by the server.
  ArchiveRemoved(String),
  DragStart(String),
  DragOver(TaskStatus),
  DragLeave(TaskStatus),
  DragEnd
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
  tasks:          Vec<TaskDto>,
  archives:       Vec<ArchivedTaskDto>,
  archive_months: BTreeSet<String>,
  stats:          Option<StatsDto>,
  tags:           Vec<String>,
  filter:         TaskFilter,
  archive_month:  Option<String>,
  modal:          ModalState,
  form:           TaskForm,
  archive_open:   bool,
  dragging:       Option<String>,
  drag_over:      Option<TaskStatus>
}

impl BoardState {
  pub fn reduce(
    &mut self,
    action: BoardAction
  ) {
    match action {
      | BoardAction::TasksLoaded(
        tasks
      ) => {
        tracing::debug!(
          total = tasks.len(),
          "task cache replaced"
        );
        self.tasks = tasks;
      }
      | BoardAction::StatsLoaded(
        stats
      ) => {
        self.stats = Some(stats);
      }
      | BoardAction::TagsLoaded(tags) => {
        if let Some(selected) =
          self.filter.tag.as_deref()
          && !tags
            .iter()
            .any(|tag| tag == selected)
        {
          tracing::debug!(
            tag = selected,
            "selected tag vanished; \
             clearing tag filter"
          );
          self.filter.tag = None;
        }
        self.tags = tags;
      }
      | BoardAction::ArchivesLoaded(
        archives
      ) => {
        self.archives = archives;
        self.sync_archive_months();
      }
      | BoardAction::SetFilter(filter) => {
        self.filter = filter;
      }
      | BoardAction::SelectArchiveMonth(
        month
      ) => {
        self.archive_month = month
          .filter(|m| {
            self.archive_months.contains(m)
          });
      }
      | BoardAction::OpenCreate => {
        self.form = TaskForm::default();
        self.modal = ModalState::Create;
      }
      | BoardAction::OpenEdit(id) => {
        match self.task(&id) {
          | Some(task) => {
            self.form =
              TaskForm::from_task(task);
            self.modal =
              ModalState::Edit(id);
          }
          | None => {
            tracing::warn!(
              id = %id,
              "edit requested for a task \
               missing from the cache"
            );
          }
        }
      }
      | BoardAction::UpdateForm(form) => {
        if self.modal
          != ModalState::Closed
        {
          self.form = form;
        }
      }
      | BoardAction::CloseModal
      | BoardAction::TaskSaved => {
        self.modal = ModalState::Closed;
      }
      | BoardAction::OpenArchive => {
        self.archive_open = true;
      }
      | BoardAction::CloseArchive => {
        self.archive_open = false;
      }
      | BoardAction::ArchiveRemoved(
        id
      ) => {
        self
          .archives
          .retain(|a| a.task.id != id);
        self.sync_archive_months();
      }
      | BoardAction::DragStart(id) => {
        self.dragging = Some(id);
      }
      | BoardAction::DragOver(status) => {
        self.drag_over = Some(status);
      }
      | BoardAction::DragLeave(
        status
      ) => {
        if self.drag_over == Some(status)
        {
          self.drag_over = None;
        }
      }
      | BoardAction::DragEnd => {
        self.dragging = None;
        self.drag_over = None;
      }
    }
  }

  fn sync_archive_months(&mut self) {
    self.archive_months =
      archive_months(&self.archives);
    if let Some(month) =
      self.archive_month.as_ref()
      && !self.archive_months.contains(month)
    {
      self.archive_month = None;
    }
  }

  pub fn tasks(&self) -> &[TaskDto] {
    &self.tasks
  }

  pub fn task(
    &self,
    id: &str
  ) -> Option<&TaskDto> {
    self.tasks.iter().find(|t| t.id == id)
  }

  pub fn archives(
    &self
  ) -> &[ArchivedTaskDto] {
    &self.archives
  }

  /// Distinct archive months, newest
  /// first.
  pub fn archive_months(
    &self
  ) -> Vec<String> {
    months_descending(
      &self.archive_months
    )
  }

  pub fn selected_archive_month(
    &self
  ) -> Option<&str> {
    self.archive_month.as_deref()
  }

  pub fn stats(&self) -> Option<&StatsDto> {
    self.stats.as_ref()
  }

  pub fn tags(&self) -> &[String] {
    &self.tags
  }

  pub fn filter(&self) -> &TaskFilter {
    &self.filter
  }

  pub fn modal(&self) -> &ModalState {
    &self.modal
  }

  pub fn form(&self) -> &TaskForm {
    &self.form
  }

  /// Id of the task open in the modal.
  pub fn editing_id(&self) -> Option<&str> {
    match &self.modal {
      | ModalState::Edit(id) => Some(id),
      | _ => None
    }
  }

  pub fn archive_open(&self) -> bool {
    self.archive_open
  }

  pub fn dragging(&self) -> Option<&str> {
    self.dragging.as_deref()
  }

  pub fn drag_over(
    &self
  ) -> Option<TaskStatus> {
    self.drag_over
  }

  /// The cache with the current filter
  /// applied.
  pub fn visible_tasks(
    &self
  ) -> Vec<TaskDto> {
    self.filter.apply(&self.tasks)
  }

  pub fn board(&self) -> BoardView {
    board_view(&self.visible_tasks())
  }

  pub fn archive_list(
    &self
  ) -> ArchiveListView {
    archive_list_view(&filter_by_month(
      &self.archives,
      self.selected_archive_month()
    ))
  }

  /// Request the save button issues:
  /// create when the modal was opened
  /// empty, update of the tracked id
  /// otherwise. None while closed.
  pub fn save_request(
    &self
  ) -> Option<ApiRequest> {
    let payload = self.form.payload();
    match &self.modal {
      | ModalState::Closed => None,
      | ModalState::Create => Some(
        ApiRequest::create_task(payload)
      ),
      | ModalState::Edit(id) => Some(
        ApiRequest::update_task(
          id, payload
        )
      )
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::api::{
    Endpoint,
    Reload
  };
  use crate::{
    TaskPriority,
    form
  };

  fn task(
    id: &str,
    status: TaskStatus
  ) -> TaskDto {
    TaskDto {
      id: id.to_string(),
      title: format!("task {id}"),
      description: None,
      status,
      priority: TaskPriority::Medium,
      due_date: None,
      tags: vec!["x".to_string()],
      created_at: None,
      updated_at: None
    }
  }

  fn archived(
    id: &str,
    month: &str
  ) -> ArchivedTaskDto {
    ArchivedTaskDto {
      task:           task(
        id,
        TaskStatus::Done
      ),
      archived_at:    None,
      archived_month: Some(
        month.to_string()
      )
    }
  }

  fn loaded() -> BoardState {
    let mut state = BoardState::default();
    state.reduce(BoardAction::TasksLoaded(
      vec![
        task("1", TaskStatus::Todo),
        task("2", TaskStatus::InProgress),
      ]
    ));
    state
  }

  #[test]
  fn create_scenario_builds_post_and_closes()
   {
    let mut state = loaded();
    state.reduce(BoardAction::OpenCreate);
    assert_eq!(
      state.modal(),
      &ModalState::Create
    );
    assert_eq!(state.editing_id(), None);

    state.reduce(BoardAction::UpdateForm(
      TaskForm {
        title: "A".to_string(),
        priority: TaskPriority::Medium,
        tags: "x, y".to_string(),
        ..TaskForm::default()
      }
    ));

    let request = state
      .save_request()
      .expect("modal is open");
    assert_eq!(
      request.endpoint,
      Endpoint::CreateTask
    );
    let body =
      serde_json::to_value(&request.body)
        .expect("encode");
    assert_eq!(body["title"], json!("A"));
    assert_eq!(
      body["priority"],
      json!("medium")
    );
    assert_eq!(
      body["tags"],
      json!(["x", "y"])
    );
    assert_eq!(body["status"], json!("todo"));
    assert_eq!(
      request.reloads_on_success(),
      &[
        Reload::Tasks,
        Reload::Stats,
        Reload::Tags
      ]
    );

    state.reduce(BoardAction::TaskSaved);
    assert_eq!(
      state.modal(),
      &ModalState::Closed
    );
    assert_eq!(state.save_request(), None);
  }

  #[test]
  fn edit_tracks_id_and_prefills_form() {
    let mut state = loaded();
    state.reduce(BoardAction::OpenEdit(
      "2".to_string()
    ));
    assert_eq!(state.editing_id(), Some("2"));
    assert_eq!(state.form().title, "task 2");
    assert_eq!(state.form().tags, "x");

    let request = state
      .save_request()
      .expect("modal is open");
    assert_eq!(
      request.endpoint,
      Endpoint::UpdateTask("2".to_string())
    );

    state.reduce(BoardAction::CloseModal);
    assert_eq!(state.editing_id(), None);
  }

  #[test]
  fn edit_of_unknown_id_keeps_modal_closed()
   {
    let mut state = loaded();
    state.reduce(BoardAction::OpenEdit(
      "404".to_string()
    ));
    assert_eq!(
      state.modal(),
      &ModalState::Closed
    );
  }

  #[test]
  fn reopening_for_create_resets_the_form()
   {
    let mut state = loaded();
    state.reduce(BoardAction::OpenEdit(
      "1".to_string()
    ));
    state.reduce(BoardAction::CloseModal);
    state.reduce(BoardAction::OpenCreate);
    assert_eq!(
      state.form(),
      &TaskForm::default()
    );
  }

  #[test]
  fn form_edits_are_ignored_while_closed()
   {
    let mut state = loaded();
    state.reduce(BoardAction::UpdateForm(
      TaskForm {
        title: "ghost".to_string(),
        ..TaskForm::default()
      }
    ));
    assert_eq!(state.form().title, "");
  }

  #[test]
  fn drop_on_done_patches_status_only() {
    let request = ApiRequest::patch_status(
      "1",
      TaskStatus::Done
    );
    assert_eq!(
      request.path(),
      "/api/tasks/1/status"
    );
    assert_eq!(
      serde_json::to_value(&request.body)
        .expect("encode"),
      json!({ "status": "done" })
    );

    // Nothing moves locally until the
    // server answers and tasks are
    // fetched again.
    let mut state = loaded();
    state.reduce(BoardAction::DragStart(
      "1".to_string()
    ));
    state.reduce(BoardAction::DragOver(
      TaskStatus::Done
    ));
    state.reduce(BoardAction::DragEnd);
    let board = state.board();
    assert_eq!(
      board
        .column(TaskStatus::Todo)
        .map(|column| column.cards.len()),
      Some(1)
    );
    assert_eq!(state.drag_over(), None);
    assert_eq!(state.dragging(), None);
  }

  #[test]
  fn drag_leave_only_clears_its_own_column()
   {
    let mut state = loaded();
    state.reduce(BoardAction::DragOver(
      TaskStatus::Done
    ));
    state.reduce(BoardAction::DragLeave(
      TaskStatus::Todo
    ));
    assert_eq!(
      state.drag_over(),
      Some(TaskStatus::Done)
    );
    state.reduce(BoardAction::DragLeave(
      TaskStatus::Done
    ));
    assert_eq!(state.drag_over(), None);
  }

  #[test]
  fn restored_archive_leaves_cache_immediately()
   {
    let mut state = loaded();
    state.reduce(
      BoardAction::ArchivesLoaded(vec![
        archived("42", "2024-02"),
        archived("43", "2024-01"),
      ])
    );
    state.reduce(
      BoardAction::ArchiveRemoved(
        "42".to_string()
      )
    );

    assert!(
      state
        .archives()
        .iter()
        .all(|a| a.task.id != "42")
    );
    assert_eq!(state.archive_months(), vec![
      "2024-01"
    ]);
    // The task list is untouched until
    // the follow-up fetch lands.
    assert_eq!(state.tasks().len(), 2);
  }

  #[test]
  fn month_selection_falls_back_when_month_disappears()
   {
    let mut state = BoardState::default();
    state.reduce(
      BoardAction::ArchivesLoaded(vec![
        archived("1", "2024-02"),
        archived("2", "2024-01"),
      ])
    );
    state.reduce(
      BoardAction::SelectArchiveMonth(
        Some("2024-01".to_string())
      )
    );
    assert_eq!(
      state.archive_list().cards.len(),
      1
    );

    state.reduce(
      BoardAction::ArchivesLoaded(vec![
        archived("1", "2024-02"),
      ])
    );
    assert_eq!(
      state.selected_archive_month(),
      None
    );
    assert_eq!(
      state.archive_list().cards.len(),
      1
    );

    state.reduce(
      BoardAction::SelectArchiveMonth(
        Some("1999-01".to_string())
      )
    );
    assert_eq!(
      state.selected_archive_month(),
      None
    );
  }

  #[test]
  fn filter_narrows_the_board_but_not_the_cache()
   {
    let mut state = loaded();
    state.reduce(BoardAction::SetFilter(
      TaskFilter {
        query: "TASK 2".to_string(),
        ..TaskFilter::default()
      }
    ));
    assert_eq!(state.board().card_count(), 1);
    assert_eq!(state.tasks().len(), 2);
  }

  #[test]
  fn vanished_tag_clears_tag_filter() {
    let mut state = loaded();
    state.reduce(BoardAction::SetFilter(
      TaskFilter {
        tag: Some("x".to_string()),
        ..TaskFilter::default()
      }
    ));
    state.reduce(BoardAction::TagsLoaded(
      form::split_tags("x, y")
    ));
    assert_eq!(
      state.filter().tag.as_deref(),
      Some("x")
    );
    state.reduce(BoardAction::TagsLoaded(
      vec!["y".to_string()]
    ));
    assert_eq!(state.filter().tag, None);
  }
}
