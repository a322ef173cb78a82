use board_shared::TaskStatus;
use board_shared::view::ColumnView;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::{
  EmptyState,
  TaskCard
};

#[derive(Properties, PartialEq)]
pub struct ColumnProps {
  pub column:        ColumnView,
  pub count:         u64,
  pub dragging:      Option<String>,
  pub is_drop_hint:  bool,
  pub on_drop: Callback<(String, TaskStatus)>,
  pub on_drag_over:  Callback<TaskStatus>,
  pub on_drag_leave: Callback<TaskStatus>,
  pub on_drag_start: Callback<String>,
  pub on_drag_end:   Callback<()>,
  pub on_edit:       Callback<String>,
  pub on_delete:     Callback<String>
}

#[function_component(Column)]
pub fn column(
  props: &ColumnProps
) -> Html {
  let status = props.column.status;

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_drag_over.emit(status);
      }
    )
  };

  let ondragleave = {
    let on_drag_leave =
      props.on_drag_leave.clone();
    Callback::from(
      move |_event: DragEvent| {
        on_drag_leave.emit(status);
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        let dragged = event
          .data_transfer()
          .map(|data_transfer| {
            data_transfer
              .get_data("text/plain")
          });
        match dragged {
          | Some(Ok(raw_id))
            if !raw_id.trim().is_empty() =>
          {
            on_drop.emit((
              raw_id.trim().to_string(),
              status
            ));
          }
          | Some(Err(error)) => {
            tracing::warn!(
              ?error,
              "failed reading drag data"
            )
          }
          | _ => {
            tracing::debug!(
              "drop without a task id"
            )
          }
        }
        on_drag_end.emit(());
      }
    )
  };

  html! {
      <section class={classes!("column", format!("column-{}", status.dom_key()))}>
          <h2>
              { status.title() }
              { " " }
              <span class="count">{ props.count }</span>
          </h2>
          <div
              class={classes!("task-list", props.is_drop_hint.then_some("drag-over"))}
              id={props.column.list_id()}
              {ondragover}
              {ondragleave}
              {ondrop}
          >
              { for props.column.cards.iter().map(|card| html! {
                  <TaskCard
                      key={card.id.clone()}
                      card={card.clone()}
                      is_dragging={props.dragging.as_deref() == Some(card.id.as_str())}
                      on_drag_start={props.on_drag_start.clone()}
                      on_drag_end={props.on_drag_end.clone()}
                      on_edit={props.on_edit.clone()}
                      on_delete={props.on_delete.clone()}
                  />
              }) }
              {
                  match props.column.empty_message() {
                      Some(message) => html! { <EmptyState {message} /> },
                      None => html! {},
                  }
              }
          </div>
      </section>
  }
}
