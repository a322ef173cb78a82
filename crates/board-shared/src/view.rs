//! DOM-independent descriptions of what
//! the board shows. The browser draws
//! them with Yew components, the export
//! command renders them to HTML text.

use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime
};

use crate::{
  ArchivedTaskDto,
  TaskDto,
  TaskPriority,
  TaskStatus
};

pub const EMPTY_ARCHIVE_MESSAGE: &str =
  "暂无归档任务";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
  pub id:             String,
  pub title:          String,
  pub description:    Option<String>,
  pub tags:           Vec<String>,
  pub priority:       TaskPriority,
  pub priority_label: &'static str,
  pub due_label:      Option<String>
}

impl CardView {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      id:             task.id.clone(),
      title:          task.title.clone(),
      description:    task
        .description
        .clone(),
      tags:           task.tags.clone(),
      priority:       task.priority,
      priority_label: task
        .priority
        .label(),
      due_label:      task
        .due_date
        .as_deref()
        .map(format_date)
    }
  }

  pub fn priority_class(&self) -> String {
    format!(
      "priority-{}",
      self.priority.as_key()
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
  pub status: TaskStatus,
  pub cards:  Vec<CardView>
}

impl ColumnView {
  /// Placeholder text, present only when
  /// the column has no cards.
  pub fn empty_message(
    &self
  ) -> Option<&'static str> {
    self
      .cards
      .is_empty()
      .then(|| self.status.empty_message())
  }

  pub fn list_id(&self) -> String {
    format!(
      "{}-list",
      self.status.dom_key()
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
  pub columns: Vec<ColumnView>
}

impl BoardView {
  pub fn column(
    &self,
    status: TaskStatus
  ) -> Option<&ColumnView> {
    self
      .columns
      .iter()
      .find(|column| column.status == status)
  }

  pub fn card_count(&self) -> usize {
    self
      .columns
      .iter()
      .map(|column| column.cards.len())
      .sum()
  }
}

/// Partition by status, one column per
/// status in board order, input order
/// kept inside each column.
pub fn board_view(
  tasks: &[TaskDto]
) -> BoardView {
  let columns = TaskStatus::ALL
    .into_iter()
    .map(|status| {
      ColumnView {
        status,
        cards: tasks
          .iter()
          .filter(|task| {
            task.status == status
          })
          .map(CardView::from_task)
          .collect()
      }
    })
    .collect();
  BoardView { columns }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveCardView {
  pub id:             String,
  pub title:          String,
  pub description:    Option<String>,
  pub priority:       TaskPriority,
  pub priority_label: &'static str,
  pub due_label:      Option<String>,
  pub archived_label: String
}

impl ArchiveCardView {
  pub fn from_archive(
    archive: &ArchivedTaskDto
  ) -> Self {
    let task = &archive.task;
    Self {
      id:             task.id.clone(),
      title:          task.title.clone(),
      description:    task
        .description
        .clone(),
      priority:       task.priority,
      priority_label: task
        .priority
        .label(),
      due_label:      task
        .due_date
        .as_deref()
        .map(format_date),
      archived_label: archive
        .archived_at
        .as_deref()
        .map(format_date)
        .unwrap_or_default()
    }
  }

  pub fn priority_class(&self) -> String {
    format!(
      "priority-{}",
      self.priority.as_key()
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveListView {
  pub cards: Vec<ArchiveCardView>
}

impl ArchiveListView {
  pub fn empty_message(
    &self
  ) -> Option<&'static str> {
    self
      .cards
      .is_empty()
      .then_some(EMPTY_ARCHIVE_MESSAGE)
  }
}

pub fn archive_list_view(
  archives: &[ArchivedTaskDto]
) -> ArchiveListView {
  ArchiveListView {
    cards: archives
      .iter()
      .map(ArchiveCardView::from_archive)
      .collect()
  }
}

/// Short numeric date, `2024/3/5`.
/// Anything [`parse_timestamp`] cannot
/// read is shown verbatim.
pub fn format_date(raw: &str) -> String {
  match parse_timestamp(raw) {
    | Some(value) => value
      .date()
      .format("%Y/%-m/%-d")
      .to_string(),
    | None => raw.trim().to_string()
  }
}

/// Plain dates, naive ISO timestamps (the
/// server writes local wall time) and RFC
/// 3339. Offsets are dropped, keeping the
/// wall time they were written in.
pub fn parse_timestamp(
  raw: &str
) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if let Ok(value) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(value.naive_local());
  }

  [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M"
  ]
  .iter()
  .find_map(|pattern| {
    NaiveDateTime::parse_from_str(
      raw, pattern
    )
    .ok()
  })
  .or_else(|| {
    NaiveDate::parse_from_str(
      raw, "%Y-%m-%d"
    )
    .ok()
    .and_then(|date| {
      date.and_hms_opt(0, 0, 0)
    })
  })
}
