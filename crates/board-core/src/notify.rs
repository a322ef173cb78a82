use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{
  info,
  warn
};

use crate::config::Config;

#[derive(Debug, Serialize)]
struct WebhookBody<'a> {
  message: &'a str
}

/// Prints every message and, when
/// `notify.webhook` is set, also POSTs it
/// there. Delivery failures are logged and
/// never fail the command.
#[derive(Debug, Clone)]
pub struct Notifier {
  http:    Client,
  webhook: Option<String>
}

impl Notifier {
  pub fn new(
    http: Client,
    webhook: Option<String>
  ) -> Self {
    Self { http, webhook }
  }

  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let http = Client::builder()
      .timeout(cfg.http_timeout()?)
      .build()?;
    Ok(Self::new(
      http,
      cfg.notify_webhook()
    ))
  }

  pub fn webhook(&self) -> Option<&str> {
    self.webhook.as_deref()
  }

  /// Returns whether the webhook accepted
  /// the message.
  #[tracing::instrument(skip(self, message))]
  pub fn send(
    &self,
    message: &str
  ) -> bool {
    println!("{message}");
    println!();

    let Some(url) = self.webhook.as_deref()
    else {
      return false;
    };

    let result = self
      .http
      .post(url)
      .header(
        reqwest::header::CONTENT_TYPE,
        "application/json"
      )
      .body(
        match serde_json::to_string(
          &WebhookBody { message }
        ) {
          | Ok(body) => body,
          | Err(err) => {
            warn!(error = %err, "failed encoding notification");
            return false;
          }
        }
      )
      .send();

    match result {
      | Ok(response)
        if response
          .status()
          .is_success() =>
      {
        info!(url, "notification delivered");
        true
      }
      | Ok(response) => {
        warn!(url, status = response.status().as_u16(), "webhook rejected notification");
        false
      }
      | Err(err) => {
        warn!(url, error = %err, "webhook unreachable");
        false
      }
    }
  }
}
