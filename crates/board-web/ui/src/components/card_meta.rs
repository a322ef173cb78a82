use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct CardMetaProps {
  pub class:          &'static str,
  pub priority_label: &'static str,
  pub due_label:      Option<String>,
  #[prop_or_default]
  pub date_class:     Option<&'static str>,
  #[prop_or_default]
  pub archived_label: Option<String>
}

/// Priority badge, due date and, for
/// archived tasks, the archive date.
#[function_component(CardMeta)]
pub fn card_meta(
  props: &CardMetaProps
) -> Html {
  let date_class = props
    .date_class
    .unwrap_or("task-date");
  html! {
      <div class={props.class}>
          <span class="priority-badge">{ props.priority_label }</span>
          {
              match &props.due_label {
                  Some(due) => html! { <span class={date_class}>{ format!("📅 {due}") }</span> },
                  None => html! {},
              }
          }
          {
              match &props.archived_label {
                  Some(archived) => html! { <span class="archived-at">{ format!("📦 归档于 {archived}") }</span> },
                  None => html! {},
              }
          }
      </div>
  }
}
