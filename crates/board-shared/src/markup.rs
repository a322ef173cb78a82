//! String rendering of the board view
//! models. Every user supplied field goes
//! through [`escape_html`] before it
//! reaches the output.

use std::fmt::Write;

use crate::StatsDto;
use crate::view::{
  ArchiveCardView,
  ArchiveListView,
  BoardView,
  CardView
};

pub fn escape_html(text: &str) -> String {
  let mut out =
    String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      | '&' => out.push_str("&amp;"),
      | '<' => out.push_str("&lt;"),
      | '>' => out.push_str("&gt;"),
      | '"' => out.push_str("&quot;"),
      | '\'' => out.push_str("&#39;"),
      | other => out.push(other)
    }
  }
  out
}

pub fn render_task_card(
  card: &CardView
) -> String {
  let mut out = String::new();
  let _ = write!(
    out,
    r#"<div class="task-card {class}" draggable="true" data-id="{id}">"#,
    class = card.priority_class(),
    id = escape_html(&card.id)
  );
  let _ = write!(
    out,
    r#"<div class="task-header"><div class="task-title">{}</div></div>"#,
    escape_html(&card.title)
  );
  if let Some(description) =
    &card.description
  {
    let _ = write!(
      out,
      r#"<div class="task-description">{}</div>"#,
      escape_html(description)
    );
  }
  if !card.tags.is_empty() {
    out.push_str(r#"<div class="task-tags">"#);
    for tag in &card.tags {
      let _ = write!(
        out,
        r#"<span class="tag-badge">{}</span>"#,
        escape_html(tag)
      );
    }
    out.push_str("</div>");
  }
  let _ = write!(
    out,
    r#"<div class="task-meta"><span class="priority-badge">{}</span>"#,
    card.priority_label
  );
  if let Some(due) = &card.due_label {
    let _ = write!(
      out,
      r#"<span class="task-date">📅 {}</span>"#,
      escape_html(due)
    );
  }
  out.push_str("</div></div>");
  out
}

pub fn render_archive_card(
  card: &ArchiveCardView
) -> String {
  let mut out = String::new();
  let _ = write!(
    out,
    r#"<div class="archive-card {class}" data-id="{id}">"#,
    class = card.priority_class(),
    id = escape_html(&card.id)
  );
  let _ = write!(
    out,
    r#"<div class="archive-header"><div class="archive-title">{}</div></div>"#,
    escape_html(&card.title)
  );
  if let Some(description) =
    &card.description
  {
    let _ = write!(
      out,
      r#"<div class="archive-description">{}</div>"#,
      escape_html(description)
    );
  }
  let _ = write!(
    out,
    r#"<div class="archive-meta"><span class="priority-badge">{}</span>"#,
    card.priority_label
  );
  if let Some(due) = &card.due_label {
    let _ = write!(
      out,
      r#"<span class="archive-date">📅 {}</span>"#,
      escape_html(due)
    );
  }
  let _ = write!(
    out,
    r#"<span class="archived-at">📦 归档于 {}</span></div></div>"#,
    escape_html(&card.archived_label)
  );
  out
}

fn render_empty_state(
  message: &str
) -> String {
  format!(
    r#"<div class="empty-state"><div class="empty-state-icon">📭</div><div class="empty-state-text">{}</div></div>"#,
    escape_html(message)
  )
}

pub fn render_board(
  board: &BoardView,
  stats: Option<&StatsDto>
) -> String {
  let mut out =
    String::from(r#"<div class="board">"#);
  for column in &board.columns {
    let count = stats
      .map(|stats| {
        stats.count_for(column.status)
      })
      .unwrap_or(column.cards.len() as u64);
    let _ = write!(
      out,
      r#"<section class="column column-{key}"><h2>{title} <span class="count">{count}</span></h2><div class="task-list" id="{list_id}">"#,
      key = column.status.dom_key(),
      title = column.status.title(),
      list_id = column.list_id()
    );
    for card in &column.cards {
      out.push_str(&render_task_card(card));
    }
    if let Some(message) =
      column.empty_message()
    {
      out.push_str(&render_empty_state(
        message
      ));
    }
    out.push_str("</div></section>");
  }
  out.push_str("</div>");
  out
}

pub fn render_archive_list(
  list: &ArchiveListView
) -> String {
  let mut out = String::from(
    r#"<div class="archive-list">"#
  );
  match list.empty_message() {
    | Some(message) => {
      out.push_str(&render_empty_state(
        message
      ))
    }
    | None => {
      for card in &list.cards {
        out.push_str(&render_archive_card(
          card
        ));
      }
    }
  }
  out.push_str("</div>");
  out
}

/// Standalone page: stats line, board,
/// and optionally the archive list.
pub fn render_page(
  title: &str,
  board: &BoardView,
  stats: Option<&StatsDto>,
  archives: Option<&ArchiveListView>
) -> String {
  let mut out = String::new();
  let _ = write!(
    out,
    "<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n",
    escape_html(title)
  );
  if let Some(stats) = stats {
    let _ = writeln!(
      out,
      r#"<div class="stats"><span>总计 {}</span><span>待办 {}</span><span>进行中 {}</span><span>已完成 {}</span><span>已归档 {}</span></div>"#,
      stats.total,
      stats.todo,
      stats.in_progress,
      stats.done,
      stats.archived
    );
  }
  out.push_str(&render_board(board, stats));
  out.push('\n');
  if let Some(archives) = archives {
    out.push_str(
      &render_archive_list(archives)
    );
    out.push('\n');
  }
  out.push_str("</body>\n</html>\n");
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::view::{
    archive_list_view,
    board_view
  };
  use crate::{
    ArchivedTaskDto,
    TaskDto,
    TaskPriority,
    TaskStatus
  };

  const HOSTILE: &str =
    r#"<script>alert("x")</script><img src=x onerror='y'>"#;

  fn hostile_task() -> TaskDto {
    TaskDto {
      id:          "1".to_string(),
      title:       HOSTILE.to_string(),
      description: Some(
        HOSTILE.to_string()
      ),
      status:      TaskStatus::Todo,
      priority:    TaskPriority::High,
      due_date:    None,
      tags:        vec![
        HOSTILE.to_string(),
      ],
      created_at:  None,
      updated_at:  None
    }
  }

  #[test]
  fn escapes_markup_significant_characters()
   {
    assert_eq!(
      escape_html(r#"<a href="x">&'"#),
      "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
    );
    assert_eq!(escape_html(""), "");
    assert_eq!(
      escape_html("plain 文本"),
      "plain 文本"
    );
  }

  #[test]
  fn user_text_never_becomes_live_markup()
   {
    let html = render_board(
      &board_view(&[hostile_task()]),
      None
    );
    assert!(!html.contains("<script"));
    assert!(!html.contains("<img"));
    assert!(
      html.contains("&lt;script&gt;")
    );

    let archive = ArchivedTaskDto {
      task:           hostile_task(),
      archived_at:    Some(
        HOSTILE.to_string()
      ),
      archived_month: None
    };
    let html = render_archive_list(
      &archive_list_view(&[archive])
    );
    assert!(!html.contains("<script"));
    assert!(!html.contains("<img"));
  }

  #[test]
  fn empty_board_renders_three_placeholders()
   {
    let html =
      render_board(&board_view(&[]), None);
    assert_eq!(
      html.matches("empty-state-text").count(),
      3
    );
    assert!(html.contains("暂无进行中任务"));
  }

  #[test]
  fn column_counts_prefer_server_stats() {
    let stats = StatsDto {
      total:       9,
      todo:        7,
      in_progress: 1,
      done:        1,
      archived:    0
    };
    let html = render_board(
      &board_view(&[hostile_task()]),
      Some(&stats)
    );
    assert!(
      html.contains(r#"<span class="count">7</span>"#)
    );
  }
}
