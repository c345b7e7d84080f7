//! The signed-in user's task list.

use std::rc::Rc;

use dioxus::prelude::*;
use store::Task;
use tracing::debug;
use ui::{use_task_list, AppTaskList, BrowserConfirm, ErrorBanner, PendingEdit, SyncError};

#[component]
pub fn Tasks() -> Element {
    let (list, state) = use_task_list();
    use_context_provider(|| list.clone());

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut invalid = use_signal(|| false);

    let loader = list.clone();
    use_future(move || {
        let list = loader.clone();
        async move {
            let _ = list.load().await;
        }
    });

    let creator = list.clone();
    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let list = creator.clone();
        spawn(async move {
            let (t, d) = (title(), description());
            match list.create(&t, &d).await {
                Ok(_) => {
                    invalid.set(false);
                    title.set(String::new());
                    description.set(String::new());
                }
                Err(SyncError::EmptyTitle) => invalid.set(true),
                Err(e) => debug!("Create did not complete: {e}"),
            }
        });
    };

    let snapshot = state();

    rsx! {
        ErrorBanner {}

        form {
            class: "task-form",
            onsubmit: handle_create,

            input {
                r#type: "text",
                placeholder: "What needs to be done?",
                value: title(),
                oninput: move |evt: FormEvent| title.set(evt.value()),
            }
            if invalid() {
                span { class: "field-error", "Title is required" }
            }
            textarea {
                placeholder: "Description (optional)",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: snapshot.creating,
                if snapshot.creating { "Adding..." } else { "Add task" }
            }
        }

        if snapshot.loading && snapshot.tasks.is_empty() {
            p { class: "task-list-status", "Loading tasks..." }
        } else if snapshot.tasks.is_empty() {
            p { class: "task-list-status", "No tasks yet." }
        }

        ul {
            class: "task-list",
            for task in snapshot.tasks.iter() {
                TaskRow {
                    key: "{task.id}",
                    edit: snapshot.pending_edit.clone().filter(|e| e.task_id == task.id),
                    saving: snapshot.saving_edit,
                    task: task.clone(),
                }
            }
        }
    }
}

#[component]
fn TaskRow(task: Task, #[props(!optional)] edit: Option<PendingEdit>, saving: bool) -> Element {
    let list = use_context::<Rc<AppTaskList>>();
    let id = task.id;

    let toggler = list.clone();
    let handle_toggle = move |_: FormEvent| {
        let list = toggler.clone();
        spawn(async move {
            if let Err(e) = list.toggle_completion(id).await {
                debug!("Toggle of task {id} did not complete: {e}");
            }
        });
    };

    let deleter = list.clone();
    let handle_delete = move |_: MouseEvent| {
        let list = deleter.clone();
        spawn(async move {
            if let Err(e) = list.delete(id, &BrowserConfirm).await {
                debug!("Delete of task {id} did not complete: {e}");
            }
        });
    };

    if let Some(draft) = edit {
        let drafter = list.clone();
        let describer = list.clone();
        let saver = list.clone();
        let canceller = list.clone();
        return rsx! {
            li {
                class: "task-item editing",
                input {
                    r#type: "text",
                    value: "{draft.draft_title}",
                    oninput: move |evt: FormEvent| drafter.set_draft_title(evt.value()),
                }
                if draft.draft_title.trim().is_empty() {
                    span { class: "field-error", "Title is required" }
                }
                textarea {
                    value: "{draft.draft_description}",
                    oninput: move |evt: FormEvent| describer.set_draft_description(evt.value()),
                }
                div {
                    class: "task-actions",
                    button {
                        class: "btn btn-primary",
                        disabled: saving,
                        onclick: move |_: MouseEvent| {
                            let list = saver.clone();
                            spawn(async move {
                                if let Err(e) = list.save_edit(id).await {
                                    debug!("Save of task {id} did not complete: {e}");
                                }
                            });
                        },
                        if saving { "Saving..." } else { "Save" }
                    }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_: MouseEvent| canceller.cancel_edit(),
                        "Cancel"
                    }
                }
            }
        };
    }

    let editor = list.clone();
    let editing = task.clone();

    rsx! {
        li {
            class: if task.completed { "task-item completed" } else { "task-item" },
            input {
                r#type: "checkbox",
                checked: task.completed,
                onchange: handle_toggle,
            }
            div {
                class: "task-text",
                span { class: "task-title", "{task.title}" }
                if !task.description.is_empty() {
                    span { class: "task-description", "{task.description}" }
                }
            }
            div {
                class: "task-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_: MouseEvent| editor.start_edit(&editing),
                    "Edit"
                }
                button {
                    class: "btn btn-danger",
                    onclick: handle_delete,
                    "Delete"
                }
            }
        }
    }
}
