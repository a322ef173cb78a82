//! Network side of the board. Each
//! mutation is one best-effort attempt;
//! [`outcome::after`] decides what
//! follows it.

use board_shared::outcome::{
  self,
  Outcome
};
use board_shared::{
  ApiRequest,
  ArchivedTaskDto,
  BoardAction,
  Reload,
  StatsDto,
  TaskDto,
  TaskStatus
};
use gloo::dialogs::{
  alert,
  confirm
};
use yew::UseReducerDispatcher;

use super::store::BoardStore;
use crate::api::{
  execute,
  fetch_json
};

type Dispatcher =
  UseReducerDispatcher<BoardStore>;

async fn reload_one(
  dispatch: &Dispatcher,
  reload: Reload
) {
  let request = reload.request();
  let result = match reload {
    | Reload::Tasks => {
      fetch_json::<Vec<TaskDto>>(&request)
        .await
        .map(BoardAction::TasksLoaded)
    }
    | Reload::Stats => {
      fetch_json::<StatsDto>(&request)
        .await
        .map(BoardAction::StatsLoaded)
    }
    | Reload::Tags => {
      fetch_json::<Vec<String>>(&request)
        .await
        .map(BoardAction::TagsLoaded)
    }
    | Reload::Archives => {
      fetch_json::<Vec<ArchivedTaskDto>>(
        &request
      )
      .await
      .map(BoardAction::ArchivesLoaded)
    }
  };

  match result {
    | Ok(action) => dispatch.dispatch(action),
    | Err(err) => {
      tracing::error!(?reload, error = %err, "reload failed; keeping cached data")
    }
  }
}

pub async fn reload_all(
  dispatch: &Dispatcher,
  reloads: &[Reload]
) {
  for reload in reloads {
    reload_one(dispatch, *reload).await;
  }
}

pub fn load_board(dispatch: Dispatcher) {
  wasm_bindgen_futures::spawn_local(
    async move {
      reload_all(
        &dispatch,
        &[
          Reload::Tasks,
          Reload::Stats,
          Reload::Tags
        ]
      )
      .await;
    }
  );
}

pub fn load_archives(
  dispatch: Dispatcher
) {
  wasm_bindgen_futures::spawn_local(
    async move {
      reload_one(
        &dispatch,
        Reload::Archives
      )
      .await;
    }
  );
}

fn mutate(
  dispatch: Dispatcher,
  request: ApiRequest
) {
  if let Some(prompt) =
    outcome::confirm_prompt(
      &request.endpoint
    )
    && !confirm(prompt)
  {
    return;
  }

  wasm_bindgen_futures::spawn_local(
    async move {
      let result = execute(&request).await;
      match &result {
        | Ok(()) => {
          tracing::info!(method = request.method().as_str(), path = %request.path(), "mutation accepted")
        }
        | Err(err) => {
          tracing::error!(method = request.method().as_str(), error = %err, "mutation failed")
        }
      }

      let Outcome {
        actions,
        reloads,
        notice
      } = outcome::after(
        &request,
        result.is_ok()
      );
      for action in actions {
        dispatch.dispatch(action);
      }
      reload_all(&dispatch, reloads).await;
      if let Some(notice) = notice {
        alert(notice);
      }
    }
  );
}

/// Create or update from the modal. The
/// modal only closes once the server has
/// accepted the task.
pub fn save_task(
  dispatch: Dispatcher,
  request: ApiRequest
) {
  mutate(dispatch, request);
}

pub fn move_task(
  dispatch: Dispatcher,
  id: String,
  status: TaskStatus
) {
  mutate(
    dispatch,
    ApiRequest::patch_status(&id, status)
  );
}

pub fn delete_task(
  dispatch: Dispatcher,
  id: String
) {
  mutate(
    dispatch,
    ApiRequest::delete_task(&id)
  );
}

pub fn restore_archive(
  dispatch: Dispatcher,
  id: String
) {
  mutate(
    dispatch,
    ApiRequest::restore_archive(&id)
  );
}

pub fn purge_archive(
  dispatch: Dispatcher,
  id: String
) {
  mutate(
    dispatch,
    ApiRequest::delete_archive(&id)
  );
}
