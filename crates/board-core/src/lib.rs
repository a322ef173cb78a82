pub mod autostart;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod export;
pub mod notify;
pub mod remind;
pub mod render;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting board CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.boardrc.as_deref()
  )?;
  cfg.apply_overrides(
    pre
      .rc_overrides
      .into_iter()
      .chain(
        cli
          .rc_overrides
          .into_iter()
          .map(|kv| (kv.key, kv.value))
      )
      .chain(
        cli
          .api
          .map(|url| {
            ("api.url".to_string(), url)
          })
      )
  );

  let client =
    client::BoardClient::from_config(
      &cfg
    )
    .with_context(|| {
      format!(
        "failed to set up client for {}",
        cfg.api_url()
      )
    })?;
  let renderer =
    render::Renderer::new(&cfg)?;

  let command = cli.command.unwrap_or(
    cli::Command::List(
      cli::ListArgs::default()
    )
  );

  commands::dispatch(
    &client, &cfg, &renderer, command
  )?;

  info!("done");
  Ok(())
}
