use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, anyhow};
use board_shared::view::parse_timestamp;
use board_shared::{ApiRequest, TaskDto, TaskFilter, TaskForm, TaskStatus};
use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::autostart::{self, AutostartPlan};
use crate::cli::{AddArgs, Command, EditArgs, ListArgs};
use crate::client::BoardClient;
use crate::config::Config;
use crate::export;
use crate::notify::Notifier;
use crate::remind::{self, Level, Thresholds};
use crate::render::Renderer;

#[instrument(skip(client, cfg, renderer, command))]
pub fn dispatch(
    client: &BoardClient,
    cfg: &Config,
    renderer: &Renderer,
    command: Command,
) -> anyhow::Result<()> {
    debug!(?command, api = client.base_url(), "dispatching command");

    match command {
        Command::List(args) => cmd_list(client, renderer, &args),
        Command::Stats => cmd_stats(client, renderer),
        Command::Tags => cmd_tags(client),
        Command::Add(args) => cmd_add(client, renderer, args),
        Command::Edit(args) => cmd_edit(client, renderer, args),
        Command::Move { id, status } => cmd_move(client, &id, status),
        Command::Delete { id, yes } => cmd_delete(client, &id, yes),
        Command::Archives { month } => cmd_archives(client, renderer, month.as_deref()),
        Command::Restore { id } => cmd_restore(client, &id),
        Command::Purge { id, yes } => cmd_purge(client, &id, yes),
        Command::Autostart { dry_run } => cmd_autostart(client, cfg, dry_run),
        Command::Remind { now } => cmd_remind(client, cfg, now.as_deref()),
        Command::Export { path, no_archives } => cmd_export(client, &path, no_archives),
        Command::Config => cmd_config(cfg),
    }
}

fn list_filter(args: &ListArgs) -> TaskFilter {
    TaskFilter {
        query: args.query.clone().unwrap_or_default(),
        priority: args.priority,
        tag: args.tag.clone().filter(|tag| !tag.trim().is_empty()),
    }
}

#[instrument(skip(client, renderer))]
fn cmd_list(client: &BoardClient, renderer: &Renderer, args: &ListArgs) -> anyhow::Result<()> {
    info!("command list");

    let tasks = client.list_tasks().context("failed loading tasks")?;
    let visible = list_filter(args).apply(&tasks);
    let statuses: Vec<TaskStatus> = match args.status {
        Some(status) => vec![status],
        None => TaskStatus::ALL.to_vec(),
    };

    debug!(total = tasks.len(), visible = visible.len(), "filtered tasks");
    renderer.print_board(&visible, &statuses)
}

#[instrument(skip(client, renderer))]
fn cmd_stats(client: &BoardClient, renderer: &Renderer) -> anyhow::Result<()> {
    info!("command stats");
    let stats = client.stats().context("failed loading stats")?;
    renderer.print_stats(&stats)
}

#[instrument(skip(client))]
fn cmd_tags(client: &BoardClient) -> anyhow::Result<()> {
    info!("command tags");
    for tag in client.tags().context("failed loading tags")? {
        println!("{tag}");
    }
    Ok(())
}

#[instrument(skip(client, renderer, args))]
fn cmd_add(client: &BoardClient, renderer: &Renderer, args: AddArgs) -> anyhow::Result<()> {
    info!("command add");

    let form = TaskForm {
        title: args.title.trim().to_string(),
        description: args.description.unwrap_or_default(),
        priority: args.priority.unwrap_or_default(),
        due_date: args.due.unwrap_or_default(),
        tags: args.tags.unwrap_or_default(),
    };
    if form.title.is_empty() {
        return Err(anyhow!("task title cannot be empty"));
    }

    let created = client
        .save(&ApiRequest::create_task(form.payload()))
        .context("failed creating task")?;
    println!("Created task {}.", created.id);
    renderer.print_task(&created)
}

fn find_task(client: &BoardClient, id: &str) -> anyhow::Result<TaskDto> {
    client
        .list_tasks()
        .context("failed loading tasks")?
        .into_iter()
        .find(|task| task.id == id)
        .ok_or_else(|| anyhow!("no task with id {id}"))
}

/// Applies the given fields on top of the current values. Fields left out
/// keep what the server has.
pub fn edited_form(task: &TaskDto, args: &EditArgs) -> anyhow::Result<TaskForm> {
    let mut form = TaskForm::from_task(task);
    if let Some(title) = &args.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(anyhow!("task title cannot be empty"));
        }
        form.title = title.to_string();
    }
    if let Some(description) = &args.description {
        form.description = description.clone();
    }
    if let Some(priority) = args.priority {
        form.priority = priority;
    }
    if let Some(due) = &args.due {
        form.due_date = due.trim().to_string();
    }
    if let Some(tags) = &args.tags {
        form.tags = tags.clone();
    }
    Ok(form)
}

#[instrument(skip(client, renderer, args), fields(id = %args.id))]
fn cmd_edit(client: &BoardClient, renderer: &Renderer, args: EditArgs) -> anyhow::Result<()> {
    info!("command edit");

    let task = find_task(client, &args.id)?;
    let form = edited_form(&task, &args)?;
    if form == TaskForm::from_task(&task) {
        println!("Nothing to change for task {}.", task.id);
        return Ok(());
    }

    let updated = client
        .save(&ApiRequest::update_task(&task.id, form.payload()))
        .with_context(|| format!("failed updating task {}", task.id))?;
    println!("Updated task {}.", updated.id);
    renderer.print_task(&updated)
}

#[instrument(skip(client))]
fn cmd_move(client: &BoardClient, id: &str, status: TaskStatus) -> anyhow::Result<()> {
    info!("command move");
    client
        .execute(&ApiRequest::patch_status(id, status))
        .with_context(|| format!("failed moving task {id}"))?;
    println!("Moved task {id} to {}.", status.title());
    Ok(())
}

/// `y`/`yes` (any case) confirms; anything else, including end of input,
/// declines.
pub fn confirm<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    prompt: &str,
) -> anyhow::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed reading confirmation")?;
    Ok(matches!(
        line.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn confirm_on_terminal(prompt: &str, assume_yes: bool) -> anyhow::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    confirm(io::stdin().lock(), io::stdout().lock(), prompt)
}

#[instrument(skip(client))]
fn cmd_delete(client: &BoardClient, id: &str, yes: bool) -> anyhow::Result<()> {
    info!("command delete");

    if !confirm_on_terminal(&format!("Delete task {id}?"), yes)? {
        println!("Kept task {id}.");
        return Ok(());
    }
    client
        .execute(&ApiRequest::delete_task(id))
        .with_context(|| format!("failed deleting task {id}"))?;
    println!("Deleted task {id}.");
    Ok(())
}

#[instrument(skip(client, renderer))]
fn cmd_archives(
    client: &BoardClient,
    renderer: &Renderer,
    month: Option<&str>,
) -> anyhow::Result<()> {
    info!("command archives");
    let archives = client
        .list_archives(month)
        .context("failed loading archives")?;
    renderer.print_archives(&archives)
}

#[instrument(skip(client))]
fn cmd_restore(client: &BoardClient, id: &str) -> anyhow::Result<()> {
    info!("command restore");
    client
        .execute(&ApiRequest::restore_archive(id))
        .with_context(|| format!("failed restoring archived task {id}"))?;
    println!("Restored task {id} to the board.");
    Ok(())
}

#[instrument(skip(client))]
fn cmd_purge(client: &BoardClient, id: &str, yes: bool) -> anyhow::Result<()> {
    info!("command purge");

    if !confirm_on_terminal(
        &format!("Permanently delete archived task {id}? This cannot be undone."),
        yes,
    )? {
        println!("Kept archived task {id}.");
        return Ok(());
    }
    client
        .execute(&ApiRequest::delete_archive(id))
        .with_context(|| format!("failed deleting archived task {id}"))?;
    println!("Permanently deleted archived task {id}.");
    Ok(())
}

#[instrument(skip(client, cfg))]
fn cmd_autostart(client: &BoardClient, cfg: &Config, dry_run: bool) -> anyhow::Result<()> {
    info!("command autostart");

    let tasks = client.list_tasks().context("failed loading tasks")?;
    let stamp = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let board_url = cfg.board_url();

    match autostart::plan(&tasks) {
        AutostartPlan::Busy(active) => {
            println!("{} task(s) already in progress:", active.len());
            for task in active {
                println!("  {} {}", task.id, task.title);
            }
            Ok(())
        }
        AutostartPlan::Idle => {
            Notifier::from_config(cfg)?.send(&autostart::idle_message(&stamp, &board_url));
            Ok(())
        }
        AutostartPlan::Start {
            task,
            remaining_todo,
        } => {
            if dry_run {
                println!("Would start task {} ({}).", task.id, task.title);
                return Ok(());
            }
            client
                .execute(&ApiRequest::patch_status(&task.id, TaskStatus::InProgress))
                .with_context(|| format!("failed starting task {}", task.id))?;
            info!(id = %task.id, "task started");
            Notifier::from_config(cfg)?.send(&autostart::started_message(
                &task,
                remaining_todo,
                &stamp,
                &board_url,
            ));
            Ok(())
        }
    }
}

#[instrument(skip(client, cfg))]
fn cmd_remind(client: &BoardClient, cfg: &Config, now: Option<&str>) -> anyhow::Result<()> {
    info!("command remind");

    let thresholds = Thresholds::from_config(cfg)?;
    let now = match now {
        Some(raw) => {
            parse_timestamp(raw).ok_or_else(|| anyhow!("cannot read --now timestamp: {raw}"))?
        }
        None => Local::now().naive_local(),
    };

    let tasks = client.list_tasks().context("failed loading tasks")?;
    let reminders = remind::review(&tasks, now, &thresholds);
    if reminders.is_empty() {
        println!("No tasks in progress.");
        return Ok(());
    }

    let notifier = Notifier::from_config(cfg)?;
    let board_url = cfg.board_url();
    let mut sent = 0_usize;
    for reminder in &reminders {
        let running = remind::format_duration(reminder.elapsed);
        match remind::reminder_message(reminder, &thresholds, &board_url) {
            Some(message) => {
                notifier.send(&message);
                sent += 1;
            }
            None => println!(
                "{}: running {running}, below the {}h threshold.",
                reminder.task.title, thresholds.warn_hours
            ),
        }
    }

    let urgent = reminders
        .iter()
        .filter(|reminder| reminder.level == Level::Urgent)
        .count();
    if urgent > 0 {
        warn!(urgent, "tasks past the urgent threshold");
    }
    println!("Checked {} task(s), {sent} reminder(s).", reminders.len());
    Ok(())
}

#[instrument(skip(client))]
fn cmd_export(client: &BoardClient, path: &Path, no_archives: bool) -> anyhow::Result<()> {
    info!("command export");

    let tasks = client.list_tasks().context("failed loading tasks")?;
    let stats = client.stats().context("failed loading stats")?;
    let archives = if no_archives {
        None
    } else {
        Some(client.list_archives(None).context("failed loading archives")?)
    };

    let html = export::render_snapshot(&tasks, Some(&stats), archives.as_deref());
    export::write_snapshot(path, &html)?;
    println!("Wrote {}.", path.display());
    Ok(())
}

#[instrument(skip(cfg))]
fn cmd_config(cfg: &Config) -> anyhow::Result<()> {
    let mut entries: Vec<(&String, &String)> = cfg.iter().collect();
    entries.sort();
    for (key, value) in entries {
        println!("{key}={value}");
    }
    for path in &cfg.loaded_files {
        println!("# loaded {}", path.display());
    }
    Ok(())
}
