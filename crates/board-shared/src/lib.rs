pub mod api;
pub mod archive;
pub mod filter;
pub mod form;
pub mod markup;
pub mod outcome;
pub mod state;
pub mod view;

use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

pub use api::{
  ApiError,
  ApiRequest,
  Endpoint,
  Method,
  Reload,
  RequestBody
};
pub use filter::TaskFilter;
pub use form::TaskForm;
pub use outcome::Outcome;
pub use state::{
  BoardAction,
  BoardState,
  ModalState
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  Todo,
  InProgress,
  Done
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Done
  ];

  /// Wire value, as the API spells it.
  pub fn as_key(self) -> &'static str {
    match self {
      | TaskStatus::Todo => "todo",
      | TaskStatus::InProgress => {
        "in_progress"
      }
      | TaskStatus::Done => "done"
    }
  }

  /// Hyphenated form used for element
  /// ids and css classes.
  pub fn dom_key(self) -> &'static str {
    match self {
      | TaskStatus::Todo => "todo",
      | TaskStatus::InProgress => {
        "in-progress"
      }
      | TaskStatus::Done => "done"
    }
  }

  pub fn parse(
    value: &str
  ) -> Option<Self> {
    match value
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "todo" => Some(Self::Todo),
      | "in_progress"
      | "in-progress"
      | "doing" => {
        Some(Self::InProgress)
      }
      | "done" => Some(Self::Done),
      | _ => None
    }
  }

  pub fn title(self) -> &'static str {
    match self {
      | TaskStatus::Todo => "📋 待办",
      | TaskStatus::InProgress => {
        "🔄 进行中"
      }
      | TaskStatus::Done => "✅ 已完成"
    }
  }

  pub fn empty_message(
    self
  ) -> &'static str {
    match self {
      | TaskStatus::Todo => {
        "暂无待办任务"
      }
      | TaskStatus::InProgress => {
        "暂无进行中任务"
      }
      | TaskStatus::Done => {
        "暂无已完成任务"
      }
    }
  }
}

impl std::fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    f.write_str(self.as_key())
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
  High,
  #[default]
  Medium,
  Low
}

impl TaskPriority {
  pub const ALL: [TaskPriority; 3] = [
    TaskPriority::High,
    TaskPriority::Medium,
    TaskPriority::Low
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | TaskPriority::High => "high",
      | TaskPriority::Medium => {
        "medium"
      }
      | TaskPriority::Low => "low"
    }
  }

  pub fn parse(
    value: &str
  ) -> Option<Self> {
    match value
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "high" | "h" => Some(Self::High),
      | "medium" | "m" => {
        Some(Self::Medium)
      }
      | "low" | "l" => Some(Self::Low),
      | _ => None
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskPriority::High => "🔴 高",
      | TaskPriority::Medium => {
        "🟡 中"
      }
      | TaskPriority::Low => "🟢 低"
    }
  }

  /// Lower sorts first.
  pub fn rank(self) -> u8 {
    match self {
      | TaskPriority::High => 0,
      | TaskPriority::Medium => 1,
      | TaskPriority::Low => 2
    }
  }
}

impl std::fmt::Display for TaskPriority {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    f.write_str(self.as_key())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:          String,
  #[serde(default)]
  pub title:       String,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub description: Option<String>,
  pub status:      TaskStatus,
  #[serde(default)]
  pub priority:    TaskPriority,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub due_date:    Option<String>,
  #[serde(
    default,
    deserialize_with = "null_as_empty"
  )]
  pub tags:        Vec<String>,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub created_at:  Option<String>,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub updated_at:  Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ArchivedTaskDto {
  #[serde(flatten)]
  pub task:           TaskDto,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub archived_at:    Option<String>,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub archived_month: Option<String>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct StatsDto {
  #[serde(default)]
  pub total:       u64,
  #[serde(default)]
  pub todo:        u64,
  #[serde(default)]
  pub in_progress: u64,
  #[serde(default)]
  pub done:        u64,
  #[serde(default)]
  pub archived:    u64
}

impl StatsDto {
  pub fn count_for(
    &self,
    status: TaskStatus
  ) -> u64 {
    match status {
      | TaskStatus::Todo => self.todo,
      | TaskStatus::InProgress => {
        self.in_progress
      }
      | TaskStatus::Done => self.done
    }
  }
}

/// Body of create and update requests.
///
/// `description` and `due_date` go out
/// as empty strings when unset, which is
/// what the server stores for "absent".
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskPayload {
  pub title:       String,
  pub description: String,
  pub priority:    TaskPriority,
  pub due_date:    String,
  pub tags:        Vec<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub status:      Option<TaskStatus>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StatusPatch {
  pub status: TaskStatus
}

fn blank_as_none<'de, D>(
  deserializer: D
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>
{
  let value =
    Option::<String>::deserialize(
      deserializer
    )?;
  Ok(value.filter(|text| {
    !text.trim().is_empty()
  }))
}

fn null_as_empty<'de, D>(
  deserializer: D
) -> Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>
{
  let value =
    Option::<Vec<String>>::deserialize(
      deserializer
    )?;
  Ok(value.unwrap_or_default())
}
