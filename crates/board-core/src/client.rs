use std::time::Duration;

use anyhow::Context;
use board_shared::{
  ApiError,
  ApiRequest,
  ArchivedTaskDto,
  Endpoint,
  Method,
  StatsDto,
  TaskDto
};
use reqwest::blocking::{
  Client,
  RequestBuilder
};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{
  debug,
  warn
};

use crate::config::Config;

/// Blocking client for the board API.
/// One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct BoardClient {
  http:     Client,
  base_url: String
}

impl BoardClient {
  pub fn new(
    base_url: &str,
    timeout: Duration
  ) -> anyhow::Result<Self> {
    let http = Client::builder()
      .timeout(timeout)
      .build()
      .context(
        "failed building HTTP client \
         for the board API"
      )?;
    Ok(Self {
      http,
      base_url: base_url
        .trim_end_matches('/')
        .to_string()
    })
  }

  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    Self::new(
      &cfg.api_url(),
      cfg.http_timeout()?
    )
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn url_for(
    &self,
    request: &ApiRequest
  ) -> String {
    format!(
      "{}{}",
      self.base_url,
      request.path()
    )
  }

  fn builder(
    &self,
    request: &ApiRequest
  ) -> Result<RequestBuilder, ApiError> {
    request.validate()?;
    let url = self.url_for(request);
    let builder = match request.method() {
      | Method::Get => self.http.get(&url),
      | Method::Post => {
        self.http.post(&url)
      }
      | Method::Put => self.http.put(&url),
      | Method::Patch => {
        self.http.patch(&url)
      }
      | Method::Delete => {
        self.http.delete(&url)
      }
    };

    Ok(match request.encode_body()? {
      | Some(body) => builder
        .header(
          CONTENT_TYPE,
          "application/json"
        )
        .body(body),
      | None => builder
    })
  }

  #[tracing::instrument(skip(self, request), fields(method = request.method().as_str(), path = %request.path()))]
  fn send(
    &self,
    request: &ApiRequest
  ) -> Result<String, ApiError> {
    let path = request.path();
    let response = self
      .builder(request)?
      .send()
      .map_err(|err| {
        ApiError::Transport {
          path:    path.clone(),
          message: err.to_string()
        }
      })?;

    let status = response.status();
    let body = response.text().map_err(
      |err| ApiError::Transport {
        path:    path.clone(),
        message: format!(
          "failed reading body: {err}"
        )
      }
    )?;

    if !status.is_success() {
      warn!(
        status = status.as_u16(),
        "board API rejected request"
      );
      return Err(ApiError::Status {
        path,
        status: status.as_u16(),
        body
      });
    }

    debug!(
      status = status.as_u16(),
      bytes = body.len(),
      "board API call succeeded"
    );
    Ok(body)
  }

  pub fn execute(
    &self,
    request: &ApiRequest
  ) -> Result<(), ApiError> {
    self.send(request).map(|_| ())
  }

  pub fn fetch<T>(
    &self,
    request: &ApiRequest
  ) -> Result<T, ApiError>
  where
    T: DeserializeOwned
  {
    let body = self.send(request)?;
    serde_json::from_str(&body).map_err(
      |err| ApiError::Decode {
        path:    request.path(),
        message: err.to_string()
      }
    )
  }

  pub fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, ApiError> {
    self.fetch(&ApiRequest::new(
      Endpoint::ListTasks
    ))
  }

  pub fn stats(
    &self
  ) -> Result<StatsDto, ApiError> {
    self.fetch(&ApiRequest::new(
      Endpoint::Stats
    ))
  }

  pub fn tags(
    &self
  ) -> Result<Vec<String>, ApiError> {
    self.fetch(&ApiRequest::new(
      Endpoint::ListTags
    ))
  }

  pub fn list_archives(
    &self,
    month: Option<&str>
  ) -> Result<Vec<ArchivedTaskDto>, ApiError>
  {
    self.fetch(&ApiRequest::list_archives(
      month
    ))
  }

  /// Mutations answer with the affected
  /// task; callers that only need the
  /// success signal use [`Self::execute`].
  pub fn save(
    &self,
    request: &ApiRequest
  ) -> Result<TaskDto, ApiError> {
    self.fetch(request)
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use board_shared::{
    ApiError,
    ApiRequest
  };

  use super::BoardClient;

  #[test]
  fn urls_join_base_and_path() {
    let client = BoardClient::new(
      "http://127.0.0.1:5000/",
      Duration::from_secs(1)
    )
    .expect("client");
    assert_eq!(
      client.url_for(
        &ApiRequest::restore_archive("42")
      ),
      "http://127.0.0.1:5000/api/archives/42/restore"
    );
    assert_eq!(
      client.base_url(),
      "http://127.0.0.1:5000"
    );
  }

  #[test]
  fn traversal_ids_stay_under_their_collection()
   {
    let client = BoardClient::new(
      "http://127.0.0.1:5000",
      Duration::from_secs(1)
    )
    .expect("client");
    assert_eq!(
      client.url_for(
        &ApiRequest::delete_task(
          "../archives/5"
        )
      ),
      "http://127.0.0.1:5000/api/tasks/..%2Farchives%2F5"
    );

    // Refused before any connection is
    // attempted.
    let err = client
      .execute(&ApiRequest::delete_task(
        ".."
      ))
      .expect_err("dot segment id");
    assert_eq!(
      err,
      ApiError::InvalidId {
        id: "..".to_string()
      }
    );
  }
}
