use board_shared::StatsDto;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsBarProps {
  pub stats:           Option<StatsDto>,
  pub on_new_task:     Callback<()>,
  pub on_open_archive: Callback<()>
}

#[function_component(StatsBar)]
pub fn stats_bar(
  props: &StatsBarProps
) -> Html {
  let stats =
    props.stats.unwrap_or_default();
  let archived = stats.archived;

  let on_new = {
    let on_new_task =
      props.on_new_task.clone();
    Callback::from(move |_| {
      on_new_task.emit(())
    })
  };
  let on_archive = {
    let on_open_archive =
      props.on_open_archive.clone();
    Callback::from(move |_| {
      on_open_archive.emit(())
    })
  };

  html! {
      <header class="header">
          <h1>{ "📋 任务看板" }</h1>
          <div class="stats">
              <span class="stat">{ format!("总计 {}", stats.total) }</span>
              <span class="stat">{ format!("待办 {}", stats.todo) }</span>
              <span class="stat">{ format!("进行中 {}", stats.in_progress) }</span>
              <span class="stat">{ format!("已完成 {}", stats.done) }</span>
              {
                  if archived > 0 {
                      html! { <span class="stat" id="stat-archived-badge">{ format!("已归档 {archived}") }</span> }
                  } else {
                      html! {}
                  }
              }
          </div>
          <div class="header-actions">
              <button class="btn btn-secondary" onclick={on_archive}>
                  { "📦 归档" }
                  {
                      if archived > 0 {
                          html! { <span class="badge" id="archive-count-badge">{ archived }</span> }
                      } else {
                          html! {}
                      }
                  }
              </button>
              <button class="btn btn-primary" onclick={on_new}>{ "+ 新建任务" }</button>
          </div>
      </header>
  }
}
