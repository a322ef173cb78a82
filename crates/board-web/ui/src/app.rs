mod actions;
mod store;

use board_shared::{
  BoardAction,
  TaskFilter,
  TaskForm,
  TaskStatus
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use self::store::BoardStore;
use crate::components::{
  ArchiveModal,
  Board,
  FilterBar,
  StatsBar,
  TaskModal
};

#[function_component(App)]
pub fn app() -> Html {
  let store = use_reducer(BoardStore::default);
  let dispatch = store.dispatcher();

  {
    let dispatch = dispatch.clone();
    use_effect_with((), move |_| {
      tracing::info!("loading board");
      actions::load_board(dispatch);
      || ()
    });
  }

  let on_filter = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |filter: TaskFilter| {
        dispatch.dispatch(
          BoardAction::SetFilter(filter)
        )
      }
    )
  };

  let on_new_task = {
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
      dispatch
        .dispatch(BoardAction::OpenCreate)
    })
  };

  let on_open_archive = {
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
      dispatch.dispatch(
        BoardAction::OpenArchive
      );
      actions::load_archives(
        dispatch.clone()
      );
    })
  };

  let on_close_archive = {
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
      dispatch.dispatch(
        BoardAction::CloseArchive
      )
    })
  };

  let on_select_month = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |month: Option<String>| {
        dispatch.dispatch(
          BoardAction::SelectArchiveMonth(
            month
          )
        )
      }
    )
  };

  let on_edit = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      dispatch.dispatch(
        BoardAction::OpenEdit(id)
      )
    })
  };

  let on_delete = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      actions::delete_task(
        dispatch.clone(),
        id
      )
    })
  };

  let on_form_change = {
    let dispatch = dispatch.clone();
    Callback::from(move |form: TaskForm| {
      dispatch.dispatch(
        BoardAction::UpdateForm(form)
      )
    })
  };

  let on_save = {
    let dispatch = dispatch.clone();
    let request = store.save_request();
    Callback::from(move |()| {
      match request.clone() {
        | Some(request) => {
          actions::save_task(
            dispatch.clone(),
            request
          )
        }
        | None => {
          tracing::warn!(
            "save clicked with no open \
             modal"
          )
        }
      }
    })
  };

  let on_close_modal = {
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
      dispatch
        .dispatch(BoardAction::CloseModal)
    })
  };

  let on_drag_start = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      dispatch.dispatch(
        BoardAction::DragStart(id)
      )
    })
  };

  let on_drag_end = {
    let dispatch = dispatch.clone();
    Callback::from(move |()| {
      dispatch.dispatch(BoardAction::DragEnd)
    })
  };

  let on_drag_over = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |status: TaskStatus| {
        dispatch.dispatch(
          BoardAction::DragOver(status)
        )
      }
    )
  };

  let on_drag_leave = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |status: TaskStatus| {
        dispatch.dispatch(
          BoardAction::DragLeave(status)
        )
      }
    )
  };

  let on_drop = {
    let dispatch = dispatch.clone();
    Callback::from(
      move |(id, status): (
        String,
        TaskStatus
      )| {
        actions::move_task(
          dispatch.clone(),
          id,
          status
        )
      }
    )
  };

  let on_restore = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      actions::restore_archive(
        dispatch.clone(),
        id
      )
    })
  };

  let on_purge = {
    let dispatch = dispatch.clone();
    Callback::from(move |id: String| {
      actions::purge_archive(
        dispatch.clone(),
        id
      )
    })
  };

  html! {
      <div class="container">
          <StatsBar
              stats={store.stats().copied()}
              {on_new_task}
              {on_open_archive}
          />
          <FilterBar
              filter={store.filter().clone()}
              tags={store.tags().to_vec()}
              on_change={on_filter}
          />
          <Board
              board={store.board()}
              stats={store.stats().copied()}
              dragging={store.dragging().map(str::to_string)}
              drag_over={store.drag_over()}
              {on_drop}
              {on_drag_over}
              {on_drag_leave}
              {on_drag_start}
              {on_drag_end}
              {on_edit}
              {on_delete}
          />
          <TaskModal
              modal={store.modal().clone()}
              form={store.form().clone()}
              on_change={on_form_change}
              {on_save}
              on_close={on_close_modal}
          />
          {
              if store.archive_open() {
                  html! {
                      <ArchiveModal
                          list={store.archive_list()}
                          months={store.archive_months()}
                          selected_month={store.selected_archive_month().map(str::to_string)}
                          {on_select_month}
                          {on_restore}
                          {on_purge}
                          on_close={on_close_archive}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
