use board_shared::view::ArchiveCardView;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

use super::CardMeta;

#[derive(Properties, PartialEq)]
pub struct ArchiveCardProps {
  pub card:       ArchiveCardView,
  pub on_restore: Callback<String>,
  pub on_purge:   Callback<String>
}

#[function_component(ArchiveCard)]
pub fn archive_card(
  props: &ArchiveCardProps
) -> Html {
  let card = &props.card;
  let on_restore = {
    let on_restore =
      props.on_restore.clone();
    let id = card.id.clone();
    Callback::from(move |_| {
      on_restore.emit(id.clone())
    })
  };
  let on_purge = {
    let on_purge = props.on_purge.clone();
    let id = card.id.clone();
    Callback::from(move |_| {
      on_purge.emit(id.clone())
    })
  };

  html! {
      <div class={classes!("archive-card", card.priority_class())} data-id={card.id.clone()}>
          <div class="archive-header">
              <div class="archive-title">{ &card.title }</div>
              <div class="archive-actions">
                  <button title="恢复到任务列表" onclick={on_restore}>{ "↩️ 恢复" }</button>
                  <button title="永久删除" onclick={on_purge}>{ "🗑️ 删除" }</button>
              </div>
          </div>
          {
              match &card.description {
                  Some(description) => html! { <div class="archive-description">{ description }</div> },
                  None => html! {},
              }
          }
          <CardMeta
              class="archive-meta"
              priority_label={card.priority_label}
              due_label={card.due_label.clone()}
              date_class={Some("archive-date")}
              archived_label={Some(card.archived_label.clone())}
          />
      </div>
  }
}
