use board_shared::{
  ModalState,
  TaskForm,
  TaskPriority
};
use web_sys::{
  Event,
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  SubmitEvent
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

use super::is_backdrop_click;

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub modal:     ModalState,
  pub form:      TaskForm,
  pub on_change: Callback<TaskForm>,
  pub on_save:   Callback<()>,
  pub on_close:  Callback<()>
}

#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let heading = match props.modal {
    | ModalState::Closed => return html! {},
    | ModalState::Create => "新建任务",
    | ModalState::Edit(_) => "编辑任务"
  };
  let form = &props.form;

  // One handler per field; each emits the
  // whole form with that field replaced.
  let field = |apply: fn(&mut TaskForm, String)| {
    let on_change =
      props.on_change.clone();
    let form = form.clone();
    move |value: String| {
      let mut next = form.clone();
      apply(&mut next, value);
      on_change.emit(next);
    }
  };

  let on_title = {
    let emit = field(|f, v| f.title = v);
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        emit(input.value());
      }
    )
  };
  let on_description = {
    let emit =
      field(|f, v| f.description = v);
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlTextAreaElement =
          event.target_unchecked_into();
        emit(input.value());
      }
    )
  };
  let on_priority = {
    let emit = field(|f, v| {
      f.priority =
        TaskPriority::parse(&v)
          .unwrap_or_default()
    });
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      emit(select.value());
    })
  };
  let on_due = {
    let emit = field(|f, v| f.due_date = v);
    Callback::from(move |event: Event| {
      let input: HtmlInputElement =
        event.target_unchecked_into();
      emit(input.value());
    })
  };
  let on_tags = {
    let emit = field(|f, v| f.tags = v);
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        emit(input.value());
      }
    )
  };

  let on_submit = {
    let on_save = props.on_save.clone();
    let blank_title =
      form.title.trim().is_empty();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        if blank_title {
          tracing::debug!(
            "save ignored: title is empty"
          );
          return;
        }
        on_save.emit(());
      }
    )
  };

  let on_cancel = {
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

  html! {
      <div class="modal active" id="task-modal" onclick={on_backdrop}>
          <div class="modal-content">
              <h2 id="modal-title">{ heading }</h2>
              <form id="task-form" onsubmit={on_submit}>
                  <label for="task-title">{ "标题" }</label>
                  <input id="task-title" type="text" required=true value={form.title.clone()} oninput={on_title} />

                  <label for="task-description">{ "描述" }</label>
                  <textarea id="task-description" value={form.description.clone()} oninput={on_description} />

                  <label for="task-priority">{ "优先级" }</label>
                  <select id="task-priority" onchange={on_priority}>
                      {
                          for TaskPriority::ALL.into_iter().map(|priority| html! {
                              <option value={priority.as_key()} selected={form.priority == priority}>
                                  { priority.label() }
                              </option>
                          })
                      }
                  </select>

                  <label for="task-due-date">{ "截止日期" }</label>
                  <input id="task-due-date" type="date" value={form.due_date.clone()} onchange={on_due} />

                  <label for="task-tags">{ "标签（逗号分隔）" }</label>
                  <input id="task-tags" type="text" placeholder="例如: 工作, 紧急" value={form.tags.clone()} oninput={on_tags} />

                  <div class="modal-actions">
                      <button type="button" class="btn btn-secondary" onclick={on_cancel}>{ "取消" }</button>
                      <button type="submit" class="btn btn-primary">{ "保存" }</button>
                  </div>
              </form>
          </div>
      </div>
  }
}
