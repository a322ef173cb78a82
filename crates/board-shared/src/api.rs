//! The HTTP contract of the board API.
//!
//! Both clients (the browser app and the
//! command line) describe calls as an
//! [`ApiRequest`] and execute it with
//! their own transport.

use percent_encoding::{
  AsciiSet,
  NON_ALPHANUMERIC,
  utf8_percent_encode
};
use serde::Serialize;
use thiserror::Error;

use crate::{
  StatusPatch,
  TaskPayload,
  TaskStatus
};

pub const API_PREFIX: &str = "/api";

/// Everything but RFC 3986 unreserved
/// characters is escaped, so an id stays
/// one path segment and a month stays one
/// query value.
const COMPONENT: &AsciiSet =
  &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode(raw: &str) -> String {
  utf8_percent_encode(raw, COMPONENT)
    .to_string()
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Put,
  Patch,
  Delete
}

impl Method {
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Patch => "PATCH",
      | Method::Delete => "DELETE"
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
  ListTasks,
  Stats,
  ListTags,
  CreateTask,
  UpdateTask(String),
  PatchStatus(String),
  DeleteTask(String),
  ListArchives {
    month: Option<String>
  },
  RestoreArchive(String),
  DeleteArchive(String)
}

/// A cache slice to fetch again once a
/// mutation has been confirmed.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Reload {
  Tasks,
  Stats,
  Tags,
  Archives
}

impl Endpoint {
  pub fn method(&self) -> Method {
    match self {
      | Endpoint::ListTasks
      | Endpoint::Stats
      | Endpoint::ListTags
      | Endpoint::ListArchives {
        ..
      } => Method::Get,
      | Endpoint::CreateTask
      | Endpoint::RestoreArchive(_) => {
        Method::Post
      }
      | Endpoint::UpdateTask(_) => {
        Method::Put
      }
      | Endpoint::PatchStatus(_) => {
        Method::Patch
      }
      | Endpoint::DeleteTask(_)
      | Endpoint::DeleteArchive(_) => {
        Method::Delete
      }
    }
  }

  fn id(&self) -> Option<&str> {
    match self {
      | Endpoint::UpdateTask(id)
      | Endpoint::PatchStatus(id)
      | Endpoint::DeleteTask(id)
      | Endpoint::RestoreArchive(id)
      | Endpoint::DeleteArchive(id) => {
        Some(id.as_str())
      }
      | Endpoint::ListTasks
      | Endpoint::Stats
      | Endpoint::ListTags
      | Endpoint::CreateTask
      | Endpoint::ListArchives {
        ..
      } => None
    }
  }

  /// Ids that no encoding can keep
  /// inside their segment: URL parsers
  /// resolve `.` and `..` (escaped or
  /// not) against the parent path.
  pub fn validate(
    &self
  ) -> Result<(), ApiError> {
    match self.id() {
      | Some(id)
        if matches!(
          id.trim(),
          "" | "." | ".."
        ) =>
      {
        Err(ApiError::InvalidId {
          id: id.to_string()
        })
      }
      | _ => Ok(())
    }
  }

  /// Path relative to the server root,
  /// query string included. Ids and the
  /// month are percent-encoded.
  pub fn path(&self) -> String {
    match self {
      | Endpoint::ListTasks
      | Endpoint::CreateTask => {
        format!("{API_PREFIX}/tasks")
      }
      | Endpoint::Stats => {
        format!("{API_PREFIX}/stats")
      }
      | Endpoint::ListTags => {
        format!("{API_PREFIX}/tags")
      }
      | Endpoint::UpdateTask(id)
      | Endpoint::DeleteTask(id) => {
        format!(
          "{API_PREFIX}/tasks/{}",
          encode(id)
        )
      }
      | Endpoint::PatchStatus(id) => {
        format!(
          "{API_PREFIX}/tasks/{}/status",
          encode(id)
        )
      }
      | Endpoint::ListArchives {
        month
      } => {
        match month
          .as_deref()
          .map(str::trim)
          .filter(|m| !m.is_empty())
        {
          | Some(month) => format!(
            "{API_PREFIX}/archives?\
             month={}",
            encode(month)
          ),
          | None => format!(
            "{API_PREFIX}/archives"
          )
        }
      }
      | Endpoint::RestoreArchive(id) => {
        format!(
          "{API_PREFIX}/archives/{}/\
           restore",
          encode(id)
        )
      }
      | Endpoint::DeleteArchive(id) => {
        format!(
          "{API_PREFIX}/archives/{}",
          encode(id)
        )
      }
    }
  }

  /// What has to be fetched again after
  /// this call succeeds.
  pub fn reloads_on_success(
    &self
  ) -> &'static [Reload] {
    match self {
      | Endpoint::CreateTask
      | Endpoint::UpdateTask(_)
      | Endpoint::DeleteTask(_) => &[
        Reload::Tasks,
        Reload::Stats,
        Reload::Tags
      ],
      | Endpoint::PatchStatus(_)
      | Endpoint::RestoreArchive(_) => {
        &[Reload::Tasks, Reload::Stats]
      }
      | Endpoint::DeleteArchive(_) => {
        &[Reload::Stats]
      }
      | Endpoint::ListTasks
      | Endpoint::Stats
      | Endpoint::ListTags
      | Endpoint::ListArchives {
        ..
      } => &[]
    }
  }
}

impl Reload {
  pub fn request(self) -> ApiRequest {
    match self {
      | Reload::Tasks => {
        ApiRequest::new(
          Endpoint::ListTasks
        )
      }
      | Reload::Stats => {
        ApiRequest::new(Endpoint::Stats)
      }
      | Reload::Tags => {
        ApiRequest::new(
          Endpoint::ListTags
        )
      }
      | Reload::Archives => {
        ApiRequest::new(
          Endpoint::ListArchives {
            month: None
          }
        )
      }
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
#[serde(untagged)]
pub enum RequestBody {
  Task(TaskPayload),
  Status(StatusPatch)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub endpoint: Endpoint,
  pub body:     Option<RequestBody>
}

impl ApiRequest {
  pub fn new(
    endpoint: Endpoint
  ) -> Self {
    Self {
      endpoint,
      body: None
    }
  }

  pub fn create_task(
    payload: TaskPayload
  ) -> Self {
    let payload = TaskPayload {
      status: Some(
        payload
          .status
          .unwrap_or(TaskStatus::Todo)
      ),
      ..payload
    };
    Self {
      endpoint: Endpoint::CreateTask,
      body:     Some(RequestBody::Task(
        payload
      ))
    }
  }

  pub fn update_task(
    id: &str,
    payload: TaskPayload
  ) -> Self {
    Self {
      endpoint: Endpoint::UpdateTask(
        id.to_string()
      ),
      body:     Some(RequestBody::Task(
        TaskPayload {
          status: None,
          ..payload
        }
      ))
    }
  }

  pub fn patch_status(
    id: &str,
    status: TaskStatus
  ) -> Self {
    Self {
      endpoint: Endpoint::PatchStatus(
        id.to_string()
      ),
      body:     Some(
        RequestBody::Status(
          StatusPatch { status }
        )
      )
    }
  }

  pub fn delete_task(id: &str) -> Self {
    Self::new(Endpoint::DeleteTask(
      id.to_string()
    ))
  }

  pub fn list_archives(
    month: Option<&str>
  ) -> Self {
    Self::new(Endpoint::ListArchives {
      month: month.map(str::to_string)
    })
  }

  pub fn restore_archive(
    id: &str
  ) -> Self {
    Self::new(Endpoint::RestoreArchive(
      id.to_string()
    ))
  }

  pub fn delete_archive(
    id: &str
  ) -> Self {
    Self::new(Endpoint::DeleteArchive(
      id.to_string()
    ))
  }

  pub fn method(&self) -> Method {
    self.endpoint.method()
  }

  pub fn validate(
    &self
  ) -> Result<(), ApiError> {
    self.endpoint.validate()
  }

  pub fn path(&self) -> String {
    self.endpoint.path()
  }

  pub fn reloads_on_success(
    &self
  ) -> &'static [Reload] {
    self.endpoint.reloads_on_success()
  }

  pub fn encode_body(
    &self
  ) -> Result<Option<String>, ApiError>
  {
    self
      .body
      .as_ref()
      .map(|body| {
        serde_json::to_string(body)
          .map_err(|err| {
            ApiError::Encode {
              path:    self.path(),
              message: err.to_string()
            }
          })
      })
      .transpose()
  }
}

/// Ways a call can fail. None of them is
/// fatal to a client; each call is one
/// best-effort attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
  #[error(
    "request to {path} failed: \
     {message}"
  )]
  Transport {
    path:    String,
    message: String
  },
  #[error(
    "{path} answered HTTP {status}"
  )]
  Status {
    path:   String,
    status: u16,
    body:   String
  },
  #[error(
    "task id {id:?} cannot be used in \
     a URL path"
  )]
  InvalidId {
    id: String
  },
  #[error(
    "malformed response from {path}: \
     {message}"
  )]
  Decode {
    path:    String,
    message: String
  },
  #[error(
    "failed to encode request body \
     for {path}: {message}"
  )]
  Encode {
    path:    String,
    message: String
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::TaskPriority;

  fn payload() -> TaskPayload {
    TaskPayload {
      title:       "A".to_string(),
      description: String::new(),
      priority:    TaskPriority::Medium,
      due_date:    String::new(),
      tags:        vec![
        "x".to_string(),
        "y".to_string(),
      ],
      status:      None
    }
  }

  #[test]
  fn endpoint_table_matches_contract() {
    let id = "17".to_string();
    let cases = [
      (
        Endpoint::ListTasks,
        "GET",
        "/api/tasks"
      ),
      (Endpoint::Stats, "GET", "/api/stats"),
      (
        Endpoint::ListTags,
        "GET",
        "/api/tags"
      ),
      (
        Endpoint::CreateTask,
        "POST",
        "/api/tasks"
      ),
      (
        Endpoint::UpdateTask(id.clone()),
        "PUT",
        "/api/tasks/17"
      ),
      (
        Endpoint::PatchStatus(id.clone()),
        "PATCH",
        "/api/tasks/17/status"
      ),
      (
        Endpoint::DeleteTask(id.clone()),
        "DELETE",
        "/api/tasks/17"
      ),
      (
        Endpoint::ListArchives {
          month: None
        },
        "GET",
        "/api/archives"
      ),
      (
        Endpoint::RestoreArchive(
          id.clone()
        ),
        "POST",
        "/api/archives/17/restore"
      ),
      (
        Endpoint::DeleteArchive(id),
        "DELETE",
        "/api/archives/17"
      )
    ];

    for (endpoint, method, path) in cases
    {
      assert_eq!(
        endpoint.method().as_str(),
        method
      );
      assert_eq!(endpoint.path(), path);
    }
  }

  #[test]
  fn archive_month_becomes_query() {
    assert_eq!(
      ApiRequest::list_archives(Some(
        "2024-03"
      ))
      .path(),
      "/api/archives?month=2024-03"
    );
    assert_eq!(
      ApiRequest::list_archives(Some(
        "  "
      ))
      .path(),
      "/api/archives"
    );
  }

  #[test]
  fn ids_and_month_stay_in_their_component()
   {
    assert_eq!(
      ApiRequest::delete_task(
        "../archives/5"
      )
      .path(),
      "/api/tasks/..%2Farchives%2F5"
    );
    assert_eq!(
      ApiRequest::patch_status(
        "a b?c#d",
        TaskStatus::Done
      )
      .path(),
      "/api/tasks/a%20b%3Fc%23d/status"
    );
    assert_eq!(
      ApiRequest::list_archives(Some(
        "2024-03&month=1999-01"
      ))
      .path(),
      "/api/archives?month=2024-03%26month%3D1999-01"
    );
    assert!(
      ApiRequest::delete_task(
        "../archives/5"
      )
      .validate()
      .is_ok()
    );
  }

  #[test]
  fn dot_segment_ids_are_rejected() {
    for id in ["..", ".", " ", ""] {
      assert_eq!(
        ApiRequest::delete_archive(id)
          .validate(),
        Err(ApiError::InvalidId {
          id: id.to_string()
        })
      );
    }
    assert!(
      ApiRequest::new(Endpoint::ListTasks)
        .validate()
        .is_ok()
    );
  }

  #[test]
  fn create_defaults_status_to_todo() {
    let request =
      ApiRequest::create_task(payload());
    let body = serde_json::to_value(
      &request.body
    )
    .expect("encode");

    assert_eq!(
      body,
      json!({
        "title": "A",
        "description": "",
        "priority": "medium",
        "due_date": "",
        "tags": ["x", "y"],
        "status": "todo"
      })
    );
  }

  #[test]
  fn update_never_sends_status() {
    let mut with_status = payload();
    with_status.status =
      Some(TaskStatus::Done);
    let request = ApiRequest::update_task(
      "9",
      with_status
    );
    let body = serde_json::to_value(
      &request.body
    )
    .expect("encode");

    assert!(body.get("status").is_none());
    assert_eq!(request.path(), "/api/tasks/9");
  }

  #[test]
  fn patch_status_body_is_status_only() {
    let request = ApiRequest::patch_status(
      "5",
      TaskStatus::Done
    );
    assert_eq!(
      request
        .encode_body()
        .expect("encode")
        .as_deref(),
      Some(r#"{"status":"done"}"#)
    );
    assert_eq!(
      request.reloads_on_success(),
      &[Reload::Tasks, Reload::Stats]
    );
  }

  #[test]
  fn refresh_plans_per_mutation() {
    assert_eq!(
      ApiRequest::create_task(payload())
        .reloads_on_success(),
      &[
        Reload::Tasks,
        Reload::Stats,
        Reload::Tags
      ]
    );
    assert_eq!(
      ApiRequest::delete_archive("1")
        .reloads_on_success(),
      &[Reload::Stats]
    );
    assert!(
      ApiRequest::new(Endpoint::ListTasks)
        .reloads_on_success()
        .is_empty()
    );
  }

  #[test]
  fn bodyless_requests_encode_to_none() {
    assert_eq!(
      ApiRequest::restore_archive("42")
        .encode_body()
        .expect("encode"),
      None
    );
  }
}
