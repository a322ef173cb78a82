//! Static HTML snapshot of the board.

use std::fs;
use std::path::Path;

use anyhow::Context;
use board_shared::markup::render_page;
use board_shared::view::{
  archive_list_view,
  board_view
};
use board_shared::{
  ArchivedTaskDto,
  StatsDto,
  TaskDto
};
use tracing::info;

pub const PAGE_TITLE: &str = "任务看板";

pub fn render_snapshot(
  tasks: &[TaskDto],
  stats: Option<&StatsDto>,
  archives: Option<&[ArchivedTaskDto]>
) -> String {
  let archive_list =
    archives.map(archive_list_view);
  render_page(
    PAGE_TITLE,
    &board_view(tasks),
    stats,
    archive_list.as_ref()
  )
}

#[tracing::instrument(skip(html))]
pub fn write_snapshot(
  path: &Path,
  html: &str
) -> anyhow::Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)
      .with_context(|| {
        format!(
          "failed creating {}",
          parent.display()
        )
      })?;
  }
  fs::write(path, html).with_context(
    || {
      format!(
        "failed writing {}",
        path.display()
      )
    }
  )?;
  info!(bytes = html.len(), "wrote board snapshot");
  Ok(())
}

#[cfg(test)]
mod tests {
  use board_shared::{
    TaskDto,
    TaskPriority,
    TaskStatus
  };

  use super::*;

  #[test]
  fn snapshot_without_archives_has_no_archive_section()
   {
    let task = TaskDto {
      id:          "7".to_string(),
      title:       "Ship it".to_string(),
      description: None,
      status:      TaskStatus::Done,
      priority:    TaskPriority::Low,
      due_date:    None,
      tags:        vec![],
      created_at:  None,
      updated_at:  None
    };
    let html =
      render_snapshot(&[task], None, None);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Ship it"));
    assert!(!html.contains("archive-list"));
  }
}
