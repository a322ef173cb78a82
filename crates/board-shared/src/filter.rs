use crate::{
  TaskDto,
  TaskPriority
};

/// Search box, priority select and tag
/// select, ANDed. An empty value leaves
/// its predicate out.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskFilter {
  pub query:    String,
  pub priority: Option<TaskPriority>,
  pub tag:      Option<String>
}

impl TaskFilter {
  pub fn is_empty(&self) -> bool {
    self.query.is_empty()
      && self.priority.is_none()
      && self
        .tag
        .as_deref()
        .is_none_or(str::is_empty)
  }

  pub fn matches(
    &self,
    task: &TaskDto
  ) -> bool {
    if !self.query.is_empty() {
      let q = self.query.to_lowercase();
      let title_match = task
        .title
        .to_lowercase()
        .contains(&q);
      let description_match = task
        .description
        .as_deref()
        .is_some_and(|description| {
          description
            .to_lowercase()
            .contains(&q)
        });
      if !title_match
        && !description_match
      {
        return false;
      }
    }

    if let Some(priority) = self.priority
      && task.priority != priority
    {
      return false;
    }

    if let Some(tag) = self
      .tag
      .as_deref()
      .filter(|tag| !tag.is_empty())
      && !task
        .tags
        .iter()
        .any(|value| value == tag)
    {
      return false;
    }

    true
  }

  /// Matching tasks in cache order. The
  /// input is left untouched.
  pub fn apply(
    &self,
    tasks: &[TaskDto]
  ) -> Vec<TaskDto> {
    if self.is_empty() {
      return tasks.to_vec();
    }
    tasks
      .iter()
      .filter(|task| self.matches(task))
      .cloned()
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::TaskFilter;
  use crate::{
    TaskDto,
    TaskPriority,
    TaskStatus
  };

  fn task(
    id: &str,
    title: &str,
    description: Option<&str>,
    priority: TaskPriority,
    tags: &[&str]
  ) -> TaskDto {
    TaskDto {
      id: id.to_string(),
      title: title.to_string(),
      description: description
        .map(str::to_string),
      status: TaskStatus::Todo,
      priority,
      due_date: None,
      tags: tags
        .iter()
        .map(|tag| tag.to_string())
        .collect(),
      created_at: None,
      updated_at: None
    }
  }

  fn sample() -> Vec<TaskDto> {
    vec![
      task(
        "1",
        "Foo bar",
        None,
        TaskPriority::High,
        &["x"]
      ),
      task(
        "2",
        "Other",
        Some("mentions FOO here"),
        TaskPriority::High,
        &["y"]
      ),
      task(
        "3",
        "foo low",
        None,
        TaskPriority::Low,
        &["x", "y"]
      ),
      task(
        "4",
        "unrelated",
        None,
        TaskPriority::High,
        &["x"]
      ),
    ]
  }

  fn ids(tasks: &[TaskDto]) -> Vec<&str> {
    tasks
      .iter()
      .map(|task| task.id.as_str())
      .collect()
  }

  #[test]
  fn query_is_case_insensitive_on_title_and_description()
   {
    let filter = TaskFilter {
      query: "foo".to_string(),
      ..TaskFilter::default()
    };
    assert_eq!(
      ids(&filter.apply(&sample())),
      vec!["1", "2", "3"]
    );
  }

  #[test]
  fn all_three_predicates_are_anded() {
    let filter = TaskFilter {
      query:    "foo".to_string(),
      priority: Some(TaskPriority::High),
      tag:      Some("x".to_string())
    };
    let tasks = sample();
    let matched = filter.apply(&tasks);
    assert_eq!(ids(&matched), vec!["1"]);

    for task in &tasks {
      let expected = task
        .title
        .to_lowercase()
        .contains("foo")
        || task
          .description
          .as_deref()
          .is_some_and(|d| {
            d.to_lowercase().contains("foo")
          });
      let expected = expected
        && task.priority
          == TaskPriority::High
        && task
          .tags
          .iter()
          .any(|tag| tag == "x");
      assert_eq!(
        filter.matches(task),
        expected,
        "task {}",
        task.id
      );
    }
  }

  #[test]
  fn clearing_a_predicate_only_widens() {
    let tasks = sample();
    let full = TaskFilter {
      query:    "foo".to_string(),
      priority: Some(TaskPriority::High),
      tag:      Some("x".to_string())
    };
    let narrowed = ids(&full.apply(&tasks))
      .into_iter()
      .map(str::to_string)
      .collect::<Vec<_>>();

    let relaxed = [
      TaskFilter {
        query: String::new(),
        ..full.clone()
      },
      TaskFilter {
        priority: None,
        ..full.clone()
      },
      TaskFilter {
        tag: Some(String::new()),
        ..full.clone()
      },
      TaskFilter::default()
    ];

    for filter in relaxed {
      let wider = filter.apply(&tasks);
      for id in &narrowed {
        assert!(
          wider
            .iter()
            .any(|task| &task.id == id),
          "{filter:?} dropped {id}"
        );
      }
      assert!(wider.len() >= narrowed.len());
    }
  }

  #[test]
  fn empty_filter_keeps_everything_in_order()
   {
    let tasks = sample();
    assert!(TaskFilter::default().is_empty());
    assert_eq!(
      TaskFilter::default().apply(&tasks),
      tasks
    );
  }
}
