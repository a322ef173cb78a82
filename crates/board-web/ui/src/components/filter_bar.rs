use board_shared::{
  TaskFilter,
  TaskPriority
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  InputEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
  pub filter:    TaskFilter,
  pub tags:      Vec<String>,
  pub on_change: Callback<TaskFilter>
}

#[function_component(FilterBar)]
pub fn filter_bar(
  props: &FilterBarProps
) -> Html {
  let on_search = {
    let on_change =
      props.on_change.clone();
    let filter = props.filter.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        on_change.emit(TaskFilter {
          query: input.value(),
          ..filter.clone()
        });
      }
    )
  };

  let on_priority = {
    let on_change =
      props.on_change.clone();
    let filter = props.filter.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      on_change.emit(TaskFilter {
        priority: TaskPriority::parse(
          &select.value()
        ),
        ..filter.clone()
      });
    })
  };

  let on_tag = {
    let on_change =
      props.on_change.clone();
    let filter = props.filter.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      let value = select.value();
      on_change.emit(TaskFilter {
        tag: (!value.is_empty())
          .then_some(value),
        ..filter.clone()
      });
    })
  };

  let selected_priority = props
    .filter
    .priority
    .map(TaskPriority::as_key)
    .unwrap_or_default();
  let selected_tag = props
    .filter
    .tag
    .clone()
    .unwrap_or_default();

  html! {
      <div class="filters">
          <input
              id="search-input"
              type="search"
              placeholder="搜索任务..."
              value={props.filter.query.clone()}
              oninput={on_search}
          />
          <select id="priority-filter" onchange={on_priority}>
              <option value="" selected={selected_priority.is_empty()}>{ "所有优先级" }</option>
              {
                  for TaskPriority::ALL.into_iter().map(|priority| html! {
                      <option
                          value={priority.as_key()}
                          selected={selected_priority == priority.as_key()}
                      >
                          { priority.label() }
                      </option>
                  })
              }
          </select>
          <select id="tag-filter" onchange={on_tag}>
              <option value="" selected={selected_tag.is_empty()}>{ "所有标签" }</option>
              {
                  for props.tags.iter().map(|tag| html! {
                      <option value={tag.clone()} selected={*tag == selected_tag}>{ tag }</option>
                  })
              }
          </select>
      </div>
  }
}
