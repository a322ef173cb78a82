use board_shared::view::BoardView;
use board_shared::{
  StatsDto,
  TaskStatus
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::Column;

#[derive(Properties, PartialEq)]
pub struct BoardProps {
  pub board:         BoardView,
  pub stats:         Option<StatsDto>,
  pub dragging:      Option<String>,
  pub drag_over:     Option<TaskStatus>,
  pub on_drop: Callback<(String, TaskStatus)>,
  pub on_drag_over:  Callback<TaskStatus>,
  pub on_drag_leave: Callback<TaskStatus>,
  pub on_drag_start: Callback<String>,
  pub on_drag_end:   Callback<()>,
  pub on_edit:       Callback<String>,
  pub on_delete:     Callback<String>
}

#[function_component(Board)]
pub fn board(
  props: &BoardProps
) -> Html {
  html! {
      <div class="board">
          {
              for props.board.columns.iter().map(|column| {
                  // Header counts come from the server totals, so they
                  // ignore the active filter.
                  let count = props
                      .stats
                      .as_ref()
                      .map(|stats| stats.count_for(column.status))
                      .unwrap_or(column.cards.len() as u64);
                  html! {
                      <Column
                          key={column.status.as_key()}
                          column={column.clone()}
                          {count}
                          dragging={props.dragging.clone()}
                          is_drop_hint={props.drag_over == Some(column.status)}
                          on_drop={props.on_drop.clone()}
                          on_drag_over={props.on_drag_over.clone()}
                          on_drag_leave={props.on_drag_leave.clone()}
                          on_drag_start={props.on_drag_start.clone()}
                          on_drag_end={props.on_drag_end.clone()}
                          on_edit={props.on_edit.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  }
              })
          }
      </div>
  }
}
