use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct EmptyStateProps {
  pub message: &'static str
}

#[function_component(EmptyState)]
pub fn empty_state(
  props: &EmptyStateProps
) -> Html {
  html! {
      <div class="empty-state">
          <div class="empty-state-icon">{ "📭" }</div>
          <div class="empty-state-text">{ props.message }</div>
      </div>
  }
}
