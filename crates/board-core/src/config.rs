use std::collections::{
  HashMap,
  HashSet
};
use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::time::Duration;

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const DEFAULT_API_URL: &str =
  "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Config {
  pub fn defaults() -> Self {
    let mut cfg = Config {
      map:          HashMap::new(),
      loaded_files: vec![]
    };

    for (key, value) in [
      ("api.url", DEFAULT_API_URL),
      ("http.timeout_secs", "10"),
      ("remind.warn_hours", "4"),
      ("remind.urgent_hours", "8"),
      ("color", "on")
    ] {
      cfg
        .map
        .insert(key.to_string(), value.to_string());
    }
    cfg
  }

  #[tracing::instrument(skip(
    boardrc_override
  ))]
  pub fn load(
    boardrc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::defaults();

    let boardrc = resolve_boardrc_path(
      boardrc_override
    )?;
    if let Some(path) = boardrc {
      info!(boardrc = %path.display(), "loading boardrc");
      cfg.load_file(
        &path,
        &mut HashSet::new()
      )?;
    } else {
      debug!(
        "no boardrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self
      .map
      .get(key)
      .filter(|v| !v.trim().is_empty())
      .cloned()
  }

  pub fn get_f64(
    &self,
    key: &str
  ) -> anyhow::Result<Option<f64>> {
    self
      .get(key)
      .map(|raw| {
        raw.trim().parse::<f64>().with_context(
          || {
            format!(
              "invalid number for {key}: \
               {raw}"
            )
          }
        )
      })
      .transpose()
  }

  /// Base URL of the board server,
  /// without a trailing slash.
  pub fn api_url(&self) -> String {
    self
      .get("api.url")
      .unwrap_or_else(|| {
        DEFAULT_API_URL.to_string()
      })
      .trim()
      .trim_end_matches('/')
      .to_string()
  }

  /// Link printed in notifications.
  pub fn board_url(&self) -> String {
    self
      .get("board.url")
      .map(|url| url.trim().to_string())
      .unwrap_or_else(|| self.api_url())
  }

  pub fn http_timeout(
    &self
  ) -> anyhow::Result<Duration> {
    let secs = self
      .get_f64("http.timeout_secs")?
      .unwrap_or(10.0);
    if !secs.is_finite() || secs <= 0.0 {
      return Err(anyhow!(
        "http.timeout_secs must be \
         positive, got {secs}"
      ));
    }
    Duration::try_from_secs_f64(secs)
      .with_context(|| {
        format!(
          "http.timeout_secs is out of \
           range: {secs}"
        )
      })
  }

  pub fn notify_webhook(
    &self
  ) -> Option<String> {
    self.get("notify.webhook")
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&String, &String)>
  {
    self.map.iter()
  }

  #[tracing::instrument(skip(
    self, visiting
  ))]
  fn load_file(
    &mut self,
    path: &Path,
    visiting: &mut HashSet<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let canonical = fs::canonicalize(
      &path
    )
    .with_context(|| {
      format!(
        "failed to resolve {}",
        path.display()
      )
    })?;
    if !visiting.insert(canonical.clone())
    {
      return Err(anyhow!(
        "include cycle: {} is already \
         being loaded",
        path.display()
      ));
    }

    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once(" #")
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self.load_file(
            &include_path,
            visiting
          )?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    visiting.remove(&canonical);
    Ok(())
  }
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_boardrc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(boardrc_env) =
    std::env::var("BOARDRC")
  {
    if boardrc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      boardrc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping ~/.boardrc"
    );
    return Ok(None);
  };
  let candidate = home.join(".boardrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}
