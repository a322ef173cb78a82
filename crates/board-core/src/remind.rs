//! Nudges for tasks that have sat in
//! progress too long.

use anyhow::anyhow;
use board_shared::view::parse_timestamp;
use board_shared::{
  TaskDto,
  TaskStatus
};
use chrono::{
  Duration,
  NaiveDateTime
};
use tracing::debug;

use crate::config::Config;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Level {
  Quiet,
  Warning,
  Urgent
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
  pub warn_hours:   f64,
  pub urgent_hours: f64
}

impl Default for Thresholds {
  fn default() -> Self {
    Self {
      warn_hours:   4.0,
      urgent_hours: 8.0
    }
  }
}

impl Thresholds {
  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let defaults = Self::default();
    let warn_hours = cfg
      .get_f64("remind.warn_hours")?
      .unwrap_or(defaults.warn_hours);
    let urgent_hours = cfg
      .get_f64("remind.urgent_hours")?
      .unwrap_or(defaults.urgent_hours);

    if warn_hours < 0.0
      || !warn_hours.is_finite()
      || !urgent_hours.is_finite()
    {
      return Err(anyhow!(
        "reminder thresholds must be \
         finite and non-negative"
      ));
    }
    if warn_hours > urgent_hours {
      return Err(anyhow!(
        "remind.warn_hours ({warn_hours}) \
         exceeds remind.urgent_hours \
         ({urgent_hours})"
      ));
    }

    Ok(Self {
      warn_hours,
      urgent_hours
    })
  }

  pub fn level(
    &self,
    elapsed: Duration
  ) -> Level {
    let hours =
      elapsed.num_seconds() as f64 / 3600.0;
    if hours >= self.urgent_hours {
      Level::Urgent
    } else if hours >= self.warn_hours {
      Level::Warning
    } else {
      Level::Quiet
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
  pub task:    TaskDto,
  pub since:   NaiveDateTime,
  pub elapsed: Duration,
  pub level:   Level
}

/// One entry per in-progress task with a
/// readable `updated_at`, longest running
/// first.
#[tracing::instrument(skip(tasks, thresholds))]
pub fn review(
  tasks: &[TaskDto],
  now: NaiveDateTime,
  thresholds: &Thresholds
) -> Vec<Reminder> {
  let mut out: Vec<Reminder> = tasks
    .iter()
    .filter(|task| {
      task.status == TaskStatus::InProgress
    })
    .filter_map(|task| {
      let Some(since) = task
        .updated_at
        .as_deref()
        .and_then(parse_timestamp)
      else {
        debug!(
          id = %task.id,
          "in-progress task has no \
           usable updated_at; skipping"
        );
        return None;
      };
      let elapsed = now - since;
      Some(Reminder {
        task: task.clone(),
        since,
        elapsed,
        level: thresholds.level(elapsed)
      })
    })
    .collect();
  out.sort_by(|a, b| {
    b.elapsed.cmp(&a.elapsed)
  });
  out
}

/// `45m`, `3h 20m`, `2d 4h`. Negative
/// spans (clock skew) read as `0m`.
pub fn format_duration(
  elapsed: Duration
) -> String {
  let minutes =
    elapsed.num_minutes().max(0);
  let hours = minutes / 60;
  if hours < 1 {
    format!("{minutes}m")
  } else if hours < 24 {
    format!(
      "{hours}h {}m",
      minutes % 60
    )
  } else {
    format!(
      "{}d {}h",
      hours / 24,
      hours % 24
    )
  }
}

pub fn reminder_message(
  reminder: &Reminder,
  thresholds: &Thresholds,
  board_url: &str
) -> Option<String> {
  let task = &reminder.task;
  let running =
    format_duration(reminder.elapsed);
  let title =
    format!("• Title: {}", task.title);
  let priority = format!(
    "• Priority: {}",
    task.priority.label()
  );
  let mut lines = match reminder.level {
    | Level::Quiet => return None,
    | Level::Urgent => vec![
      "⏰ Task running long".to_string(),
      String::new(),
      format!(
        "🚨 In progress for over {}h!",
        thresholds.urgent_hours
      ),
      String::new(),
      title,
      priority,
      format!("• Running: {running}"),
      format!(
        "• Since: {}",
        reminder
          .since
          .format("%Y-%m-%d %H:%M")
      ),
      String::new(),
      "💡 Mark it done if it is \
       finished, or split it into \
       smaller tasks."
        .to_string(),
    ],
    | Level::Warning => vec![
      "⏰ Task running long".to_string(),
      String::new(),
      format!(
        "📝 In progress for {running}"
      ),
      String::new(),
      title,
      priority,
      "• Status: 🔄 in progress"
        .to_string(),
      String::new(),
      "💡 Update the board once it is \
       finished."
        .to_string(),
    ]
  };
  lines.push(String::new());
  lines.push(format!("Board: {board_url}"));
  Some(lines.join("\n"))
}
