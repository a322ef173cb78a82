use crate::{
  TaskDto,
  TaskPayload,
  TaskPriority
};

/// Raw field values of the task modal.
/// `tags` is the comma separated text as
/// typed.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskForm {
  pub title:       String,
  pub description: String,
  pub priority:    TaskPriority,
  pub due_date:    String,
  pub tags:        String
}

impl TaskForm {
  pub fn from_task(task: &TaskDto) -> Self {
    Self {
      title:       task.title.clone(),
      description: task
        .description
        .clone()
        .unwrap_or_default(),
      priority:    task.priority,
      due_date:    task
        .due_date
        .clone()
        .unwrap_or_default(),
      tags:        task.tags.join(", ")
    }
  }

  /// Field values as the API expects
  /// them. Status is left to the caller:
  /// create sets it, update omits it.
  pub fn payload(&self) -> TaskPayload {
    TaskPayload {
      title:       self.title.clone(),
      description: self
        .description
        .clone(),
      priority:    self.priority,
      due_date:    self.due_date.clone(),
      tags:        split_tags(&self.tags),
      status:      None
    }
  }
}

/// Comma separated input to an ordered
/// set of trimmed, non-empty tags.
pub fn split_tags(raw: &str) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for tag in raw
    .split(',')
    .map(str::trim)
    .filter(|tag| !tag.is_empty())
  {
    if !out.iter().any(|seen| seen == tag)
    {
      out.push(tag.to_string());
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::TaskStatus;

  #[test]
  fn tags_are_trimmed_split_and_deduplicated()
   {
    assert_eq!(
      split_tags(" x, y ,, x ,z,"),
      vec!["x", "y", "z"]
    );
    assert!(split_tags(" , ,").is_empty());
    assert!(split_tags("").is_empty());
  }

  #[test]
  fn form_round_trips_through_task() {
    let task = TaskDto {
      id:          "3".to_string(),
      title:       "Ship".to_string(),
      description: None,
      status:      TaskStatus::Done,
      priority:    TaskPriority::Low,
      due_date:    Some(
        "2024-05-01".to_string()
      ),
      tags:        vec![
        "a".to_string(),
        "b".to_string(),
      ],
      created_at:  None,
      updated_at:  None
    };

    let form = TaskForm::from_task(&task);
    assert_eq!(form.tags, "a, b");
    assert_eq!(form.description, "");

    let payload = form.payload();
    assert_eq!(payload.tags, task.tags);
    assert_eq!(payload.due_date, "2024-05-01");
    assert_eq!(payload.status, None);
  }
}
