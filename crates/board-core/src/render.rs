use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use board_shared::archive::month_label;
use board_shared::view::format_date;
use board_shared::{ArchivedTaskDto, StatsDto, TaskDto, TaskPriority, TaskStatus};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self {
            color: color && io::stdout().is_terminal(),
        })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Tasks grouped by column, in board order. Empty columns still get
    /// their heading and placeholder.
    #[tracing::instrument(skip(self, tasks))]
    pub fn print_board(&self, tasks: &[TaskDto], statuses: &[TaskStatus]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_board(&mut out, tasks, statuses)
    }

    pub fn write_board<W: Write>(
        &self,
        mut writer: W,
        tasks: &[TaskDto],
        statuses: &[TaskStatus],
    ) -> anyhow::Result<()> {
        for (idx, status) in statuses.iter().enumerate() {
            if idx > 0 {
                writeln!(writer)?;
            }
            let column: Vec<&TaskDto> = tasks.iter().filter(|t| t.status == *status).collect();
            writeln!(
                writer,
                "{} ({})",
                self.paint(status.title(), "1"),
                column.len()
            )?;

            if column.is_empty() {
                writeln!(writer, "  {}", status.empty_message())?;
                continue;
            }

            let headers = vec![
                "ID".to_string(),
                "Pri".to_string(),
                "Due".to_string(),
                "Title".to_string(),
                "Tags".to_string(),
            ];
            let rows = column
                .into_iter()
                .map(|task| {
                    vec![
                        self.paint(&task.id, "33"),
                        self.paint_priority(task.priority),
                        task.due_date.as_deref().map(format_date).unwrap_or_default(),
                        task.title.clone(),
                        task.tags.join(", "),
                    ]
                })
                .collect();
            write_table(&mut writer, headers, rows)?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self, stats))]
    pub fn print_stats(&self, stats: &StatsDto) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        write_stats(&mut out, stats)
    }

    #[tracing::instrument(skip(self, archives))]
    pub fn print_archives(&self, archives: &[ArchivedTaskDto]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_archives(&mut out, archives)
    }

    pub fn write_archives<W: Write>(
        &self,
        mut writer: W,
        archives: &[ArchivedTaskDto],
    ) -> anyhow::Result<()> {
        if archives.is_empty() {
            writeln!(writer, "{}", board_shared::view::EMPTY_ARCHIVE_MESSAGE)?;
            return Ok(());
        }

        let headers = vec![
            "ID".to_string(),
            "Month".to_string(),
            "Archived".to_string(),
            "Pri".to_string(),
            "Title".to_string(),
        ];
        let rows = archives
            .iter()
            .map(|entry| {
                vec![
                    self.paint(&entry.task.id, "33"),
                    entry.archived_month.as_deref().map(month_label).unwrap_or_default(),
                    entry.archived_at.as_deref().map(format_date).unwrap_or_default(),
                    self.paint_priority(entry.task.priority),
                    entry.task.title.clone(),
                ]
            })
            .collect();
        write_table(writer, headers, rows)
    }

    #[tracing::instrument(skip(self, task))]
    pub fn print_task(&self, task: &TaskDto) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "id        {}", task.id)?;
        writeln!(out, "title     {}", task.title)?;
        writeln!(out, "status    {}", task.status.title())?;
        writeln!(out, "priority  {}", task.priority.label())?;
        if let Some(description) = &task.description {
            writeln!(out, "desc      {description}")?;
        }
        if let Some(due) = &task.due_date {
            writeln!(out, "due       {}", format_date(due))?;
        }
        if !task.tags.is_empty() {
            writeln!(out, "tags      {}", task.tags.join(", "))?;
        }
        if let Some(created) = &task.created_at {
            writeln!(out, "created   {created}")?;
        }
        if let Some(updated) = &task.updated_at {
            writeln!(out, "updated   {updated}")?;
        }

        Ok(())
    }

    fn paint_priority(&self, priority: TaskPriority) -> String {
        let code = match priority {
            TaskPriority::High => "31",
            TaskPriority::Medium => "33",
            TaskPriority::Low => "32",
        };
        self.paint(priority.as_key(), code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

pub fn write_stats<W: Write>(mut writer: W, stats: &StatsDto) -> anyhow::Result<()> {
    writeln!(writer, "total        {}", stats.total)?;
    for status in TaskStatus::ALL {
        writeln!(
            writer,
            "{:<12} {}",
            status.as_key(),
            stats.count_for(status)
        )?;
    }
    writeln!(writer, "archived     {}", stats.archived)?;
    Ok(())
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use board_shared::{ArchivedTaskDto, StatsDto, TaskDto, TaskPriority, TaskStatus};

    use super::*;

    fn task(id: &str, title: &str, status: TaskStatus) -> TaskDto {
        TaskDto {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status,
            priority: TaskPriority::Medium,
            due_date: Some("2024-03-05".to_string()),
            tags: vec!["ops".to_string()],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn table_pads_by_display_width() {
        let mut out = Vec::new();
        write_table(
            &mut out,
            vec!["A".to_string(), "B".to_string()],
            vec![
                vec!["看板".to_string(), "x".to_string()],
                vec!["\x1b[31mab\x1b[0m".to_string(), "y".to_string()],
            ],
        )
        .expect("write table");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A    B ");
        assert_eq!(lines[2], "看板 x ");
        assert_eq!(strip_ansi(lines[3]), "ab   y ");
    }

    #[test]
    fn board_lists_every_column_with_placeholders() {
        let mut out = Vec::new();
        Renderer::plain()
            .write_board(
                &mut out,
                &[task("1", "Write docs", TaskStatus::InProgress)],
                &TaskStatus::ALL,
            )
            .expect("write board");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("🔄 进行中 (1)"));
        assert!(text.contains("暂无待办任务"));
        assert!(text.contains("暂无已完成任务"));
        assert!(text.contains("2024/3/5"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn archives_show_month_labels() {
        let mut out = Vec::new();
        Renderer::plain()
            .write_archives(
                &mut out,
                &[ArchivedTaskDto {
                    task: task("42", "Old", TaskStatus::Done),
                    archived_at: Some("2024-03-31T10:00:00".to_string()),
                    archived_month: Some("2024-03".to_string()),
                }],
            )
            .expect("write archives");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("2024年03月"));
        assert!(text.contains("2024/3/31"));

        let mut out = Vec::new();
        Renderer::plain().write_archives(&mut out, &[]).expect("write empty");
        assert_eq!(String::from_utf8(out).expect("utf8").trim(), "暂无归档任务");
    }

    #[test]
    fn stats_lines() {
        let mut out = Vec::new();
        write_stats(
            &mut out,
            &StatsDto {
                total: 5,
                todo: 2,
                in_progress: 1,
                done: 2,
                archived: 9,
            },
        )
        .expect("write stats");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("in_progress  1"));
        assert!(text.contains("archived     9"));
    }
}
