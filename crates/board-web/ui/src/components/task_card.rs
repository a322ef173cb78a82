use board_shared::view::CardView;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

use super::CardMeta;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub card:          CardView,
  pub is_dragging:   bool,
  pub on_drag_start: Callback<String>,
  pub on_drag_end:   Callback<()>,
  pub on_edit:       Callback<String>,
  pub on_delete:     Callback<String>
}

#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let card = &props.card;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let id = card.id.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          if let Err(error) = data_transfer
            .set_data("text/plain", &id)
          {
            tracing::warn!(
              ?error,
              "failed writing drag data"
            );
          }
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit(id.clone());
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_| {
      on_drag_end.emit(());
    })
  };

  let on_edit_click = {
    let on_edit = props.on_edit.clone();
    let id = card.id.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_edit.emit(id.clone());
      }
    )
  };

  let on_delete_click = {
    let on_delete =
      props.on_delete.clone();
    let id = card.id.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.stop_propagation();
        on_delete.emit(id.clone());
      }
    )
  };

  html! {
      <div
          class={classes!("task-card", card.priority_class(), props.is_dragging.then_some("dragging"))}
          draggable="true"
          data-id={card.id.clone()}
          {ondragstart}
          {ondragend}
      >
          <div class="task-header">
              <div class="task-title">{ &card.title }</div>
              <div class="task-actions">
                  <button title="编辑" onclick={on_edit_click}>{ "✏️" }</button>
                  <button title="删除" onclick={on_delete_click}>{ "🗑️" }</button>
              </div>
          </div>
          {
              match &card.description {
                  Some(description) => html! { <div class="task-description">{ description }</div> },
                  None => html! {},
              }
          }
          {
              if card.tags.is_empty() {
                  html! {}
              } else {
                  html! {
                      <div class="task-tags">
                          { for card.tags.iter().map(|tag| html! { <span class="tag-badge">{ tag }</span> }) }
                      </div>
                  }
              }
          }
          <CardMeta
              class="task-meta"
              priority_label={card.priority_label}
              due_label={card.due_label.clone()}
          />
      </div>
  }
}
