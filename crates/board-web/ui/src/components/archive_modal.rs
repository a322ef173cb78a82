use board_shared::archive::month_label;
use board_shared::view::ArchiveListView;
use web_sys::{
  Event,
  HtmlSelectElement
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

use super::{
  ArchiveCard,
  EmptyState,
  is_backdrop_click
};

#[derive(Properties, PartialEq)]
pub struct ArchiveModalProps {
  pub list:            ArchiveListView,
  pub months:          Vec<String>,
  pub selected_month:  Option<String>,
  pub on_select_month: Callback<Option<String>>,
  pub on_restore:      Callback<String>,
  pub on_purge:        Callback<String>,
  pub on_close:        Callback<()>
}

#[function_component(ArchiveModal)]
pub fn archive_modal(
  props: &ArchiveModalProps
) -> Html {
  let on_month = {
    let on_select_month =
      props.on_select_month.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      let value = select.value();
      on_select_month.emit(
        (!value.is_empty()).then_some(value)
      );
    })
  };
  let on_close_click = {
    let on_close = props.on_close.clone();
    Callback::from(move |_| {
      on_close.emit(())
    })
  };
  let on_backdrop = {
    let on_close = props.on_close.clone();
    Callback::from(
      move |event: MouseEvent| {
        if is_backdrop_click(&event) {
          on_close.emit(());
        }
      }
    )
  };
  let selected = props
    .selected_month
    .clone()
    .unwrap_or_default();

  html! {
      <div class="modal active" id="archive-modal" onclick={on_backdrop}>
          <div class="modal-content archive-modal-content">
              <div class="archive-toolbar">
                  <h2>{ "📦 归档任务" }</h2>
                  <select id="archive-month-filter" onchange={on_month}>
                      <option value="" selected={selected.is_empty()}>{ "所有月份" }</option>
                      {
                          for props.months.iter().map(|month| html! {
                              <option value={month.clone()} selected={*month == selected}>
                                  { month_label(month) }
                              </option>
                          })
                      }
                  </select>
                  <button class="btn btn-secondary" onclick={on_close_click}>{ "关闭" }</button>
              </div>
              <div class="archive-list" id="archive-list">
                  {
                      match props.list.empty_message() {
                          Some(message) => html! { <EmptyState {message} /> },
                          None => html! {
                              <>
                                  { for props.list.cards.iter().map(|card| html! {
                                      <ArchiveCard
                                          key={card.id.clone()}
                                          card={card.clone()}
                                          on_restore={props.on_restore.clone()}
                                          on_purge={props.on_purge.clone()}
                                      />
                                  }) }
                              </>
                          },
                      }
                  }
              </div>
          </div>
      </div>
  }
}
