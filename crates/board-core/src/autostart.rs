//! Keep one task moving: when nothing is
//! in progress, promote the most urgent
//! todo task.

use std::cmp::Ordering;

use board_shared::view::parse_timestamp;
use board_shared::{
  TaskDto,
  TaskStatus
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutostartPlan {
  /// Something is already in progress.
  Busy(Vec<TaskDto>),
  /// Nothing in progress and nothing to
  /// start.
  Idle,
  Start {
    task:           TaskDto,
    /// Todo tasks left once this one has
    /// moved.
    remaining_todo: usize
  }
}

pub fn plan(tasks: &[TaskDto]) -> AutostartPlan {
  let in_progress: Vec<TaskDto> = tasks
    .iter()
    .filter(|task| {
      task.status == TaskStatus::InProgress
    })
    .cloned()
    .collect();
  if !in_progress.is_empty() {
    return AutostartPlan::Busy(in_progress);
  }

  let mut todo: Vec<&TaskDto> = tasks
    .iter()
    .filter(|task| task.status == TaskStatus::Todo)
    .collect();
  todo.sort_by(|a, b| start_order(a, b));

  match todo.first() {
    | Some(task) => AutostartPlan::Start {
      task:           (*task).clone(),
      remaining_todo: todo.len() - 1
    },
    | None => AutostartPlan::Idle
  }
}

/// High before medium before low, then
/// oldest first. Tasks without a readable
/// `created_at` go after dated ones of the
/// same priority; the sort is stable so
/// server order breaks remaining ties.
fn start_order(
  a: &TaskDto,
  b: &TaskDto
) -> Ordering {
  let created = |task: &TaskDto| {
    task
      .created_at
      .as_deref()
      .and_then(parse_timestamp)
  };
  a.priority
    .rank()
    .cmp(&b.priority.rank())
    .then_with(|| {
      match (created(a), created(b)) {
        | (Some(x), Some(y)) => x.cmp(&y),
        | (Some(_), None) => Ordering::Less,
        | (None, Some(_)) => {
          Ordering::Greater
        }
        | (None, None) => Ordering::Equal
      }
    })
}

pub fn started_message(
  task: &TaskDto,
  remaining_todo: usize,
  started_at: &str,
  board_url: &str
) -> String {
  let mut lines = vec![
    "📋 New task started \
     automatically"
      .to_string(),
    String::new(),
    format!("⏰ Started: {started_at}"),
    String::new(),
    "🎯 Task".to_string(),
    format!("• Title: {}", task.title),
    format!(
      "• Priority: {}",
      task.priority.label()
    ),
    "• Status: 🔄 in progress"
      .to_string(),
  ];
  if let Some(description) =
    &task.description
  {
    lines.push(format!(
      "• Description: {}",
      truncate_chars(description, 100)
    ));
  }
  if let Some(due) = &task.due_date {
    lines.push(format!("• Due: {due}"));
  }
  lines.extend([
    String::new(),
    "📊 Board".to_string(),
    format!(
      "• Todo: {remaining_todo}"
    ),
    "• In progress: 1".to_string(),
    String::new(),
    format!("Board: {board_url}"),
  ]);
  lines.join("\n")
}

pub fn idle_message(
  checked_at: &str,
  board_url: &str
) -> String {
  format!(
    "📋 Board check\n\n\
     ⏰ Checked: {checked_at}\n\n\
     📊 Status\n\
     • In progress: 0\n\
     • Todo: 0\n\n\
     💡 The board has no todo tasks \
     left, add some!\n\n\
     Board: {board_url}"
  )
}

fn truncate_chars(
  text: &str,
  max: usize
) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let mut out: String =
    text.chars().take(max).collect();
  out.push_str("...");
  out
}

#[cfg(test)]
mod tests {
  use board_shared::{
    TaskDto,
    TaskPriority,
    TaskStatus
  };

  use super::*;

  fn task(
    id: &str,
    status: TaskStatus,
    priority: TaskPriority,
    created_at: Option<&str>
  ) -> TaskDto {
    TaskDto {
      id: id.to_string(),
      title: format!("task {id}"),
      description: None,
      status,
      priority,
      due_date: None,
      tags: vec![],
      created_at: created_at.map(str::to_string),
      updated_at: None
    }
  }

  #[test]
  fn busy_board_starts_nothing() {
    let tasks = vec![
      task(
        "1",
        TaskStatus::Todo,
        TaskPriority::High,
        None
      ),
      task(
        "2",
        TaskStatus::InProgress,
        TaskPriority::Low,
        None
      ),
    ];
    match plan(&tasks) {
      | AutostartPlan::Busy(active) => {
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "2");
      }
      | other => panic!("unexpected plan {other:?}")
    }
  }

  #[test]
  fn picks_highest_priority_then_oldest() {
    let tasks = vec![
      task(
        "low-old",
        TaskStatus::Todo,
        TaskPriority::Low,
        Some("2024-01-01T00:00:00")
      ),
      task(
        "high-new",
        TaskStatus::Todo,
        TaskPriority::High,
        Some("2024-06-01T00:00:00.5")
      ),
      task(
        "high-old",
        TaskStatus::Todo,
        TaskPriority::High,
        Some("2024-02-01T00:00:00")
      ),
      task(
        "high-undated",
        TaskStatus::Todo,
        TaskPriority::High,
        None
      ),
      task(
        "done",
        TaskStatus::Done,
        TaskPriority::High,
        None
      ),
    ];

    assert_eq!(
      plan(&tasks),
      AutostartPlan::Start {
        task:           tasks[2].clone(),
        remaining_todo: 3
      }
    );
  }

  #[test]
  fn empty_board_is_idle() {
    let tasks = vec![task(
      "1",
      TaskStatus::Done,
      TaskPriority::Medium,
      None
    )];
    assert_eq!(plan(&tasks), AutostartPlan::Idle);
  }

  #[test]
  fn started_message_truncates_long_descriptions()
   {
    let mut started = task(
      "1",
      TaskStatus::Todo,
      TaskPriority::High,
      None
    );
    started.description =
      Some("字".repeat(120));
    let message = started_message(
      &started,
      2,
      "2024-05-01 09:00",
      "http://board"
    );
    assert!(message.contains("🔴 高"));
    assert!(message.contains(&format!(
      "{}...",
      "字".repeat(100)
    )));
    assert!(message.contains("• Todo: 2"));
    assert!(
      message.ends_with("Board: http://board")
    );
  }

  #[test]
  fn idle_message_has_no_stray_indent() {
    let message =
      idle_message("09:00", "http://board");
    assert!(message.contains(
      "\n• In progress: 0\n• Todo: 0\n"
    ));
    assert!(
      message.ends_with("\nBoard: http://board")
    );
  }
}
