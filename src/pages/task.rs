//! Task Page
//!
//! Full task detail: fields, people, comments and attachments.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::TaskPatch;
use crate::components::{AddPersonDialog, Avatar, DueDatePicker, PrioritySelect, TitleEditor};
use crate::context::use_app_context;
use crate::dates;
use crate::markdown::render_description;
use crate::models::{Priority, TaskDetail, User};
use crate::router::Route;

/// Which people dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PeopleDialog {
    Assignee,
    Collaborator,
}

#[component]
pub fn TaskPage(task_id: u32) -> impl IntoView {
    let ctx = use_app_context();
    let detail = RwSignal::new(None::<TaskDetail>);
    let (load_error, set_load_error) = signal(None::<String>);
    let (action_error, set_action_error) = signal(None::<String>);

    let report = move |what: &str, e: crate::api::ApiError| {
        let text = ctx.error_text(&e);
        log::warn!("[API] {} failed for task {}: {}", what, task_id, text);
        let _ = set_action_error.try_set(Some(text));
    };

    let reload = move || {
        let api = ctx.api();
        spawn_local(async move {
            match api.get_task(task_id).await {
                Ok(task) => {
                    let _ = detail.try_set(Some(task));
                }
                Err(e) => {
                    let _ = set_load_error.try_set(Some(ctx.error_text(&e)));
                }
            }
        });
    };
    reload();

    let save_fields = move |patch: TaskPatch| {
        let api = ctx.api();
        spawn_local(async move {
            match api.update_task_fields(task_id, &patch).await {
                Ok(task) => {
                    let _ = detail.try_set(Some(task));
                }
                Err(e) => report("update", e),
            }
        });
    };

    let change_priority = move |next: Option<Priority>| {
        let previous = detail.with_untracked(|d| d.as_ref().and_then(|d| d.priority));
        detail.update(|d| {
            if let Some(d) = d {
                d.priority = next;
            }
        });
        let api = ctx.api();
        spawn_local(async move {
            match api.update_task_priority(task_id, next).await {
                Ok(saved) => {
                    let _ = detail.try_update(|d| {
                        if let Some(d) = d {
                            d.priority = saved;
                        }
                    });
                }
                Err(e) => {
                    let _ = detail.try_update(|d| {
                        if let Some(d) = d {
                            d.priority = previous;
                        }
                    });
                    report("priority", e);
                }
            }
        });
    };

    let save_title = Callback::new(move |title: String| save_fields(TaskPatch { title: Some(title), ..Default::default() }));
    let save_description =
        Callback::new(move |text: String| save_fields(TaskPatch { description: Some(text), ..Default::default() }));
    let save_due_date =
        Callback::new(move |next: Option<String>| save_fields(TaskPatch { due_date: Some(next), ..Default::default() }));

    view! {
        <div class="task-page">
            {move || load_error.get().map(|e| view! { <p class="page-error">{e}</p> })}
            {move || match (detail.get().is_some(), load_error.get().is_some()) {
                (false, false) => Some(view! { <p class="page-loading">"Loading task..."</p> }),
                _ => None,
            }}
            <Show when=move || detail.with(|d| d.is_some())>
                <TaskHeader detail=detail on_title=save_title />
                {move || action_error.get().map(|e| view! {
                    <p class="form-error" on:click=move |_| set_action_error.set(None)>{e}</p>
                })}
                <div class="task-layout">
                    <div class="task-main">
                        <DescriptionEditor detail=detail on_save=save_description />
                        <CommentsSection task_id=task_id detail=detail on_error=Callback::new(move |e| report("comment", e)) />
                    </div>
                    <aside class="task-side">
                        <div class="task-field">
                            <span class="task-field-label">"Due date"</span>
                            <DueDatePicker
                                value=Signal::derive(move || detail.with(|d| d.as_ref().and_then(|d| d.due_date.clone())))
                                on_change=save_due_date
                            />
                        </div>
                        <div class="task-field">
                            <span class="task-field-label">"Priority"</span>
                            <PrioritySelect
                                value=Signal::derive(move || detail.with(|d| d.as_ref().and_then(|d| d.priority)))
                                on_change=change_priority
                            />
                        </div>
                        <PeopleSection task_id=task_id detail=detail on_error=Callback::new(move |e| report("add person", e)) on_added=Callback::new(move |_: ()| reload()) />
                        <AttachmentsSection task_id=task_id detail=detail on_error=Callback::new(move |e| report("upload", e)) />
                    </aside>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn TaskHeader(detail: RwSignal<Option<TaskDetail>>, #[prop(into)] on_title: Callback<String>) -> impl IntoView {
    let field = move |f: fn(&TaskDetail) -> String| move || detail.with(|d| d.as_ref().map(f).unwrap_or_default());
    let project_href = move || detail.with(|d| d.as_ref().map(|d| Route::Project(d.project_id).href()).unwrap_or_default());
    let done = move || detail.with(|d| d.as_ref().map(|d| d.is_done()).unwrap_or(false));

    view! {
        <div class="task-header">
            <a class="task-back" href=project_href>"← " {field(|d| d.project_name.clone())}</a>
            <span class=move || if done() { "status-chip done" } else { "status-chip" }>{field(|d| d.status_name.clone())}</span>
            <TitleEditor value=Signal::derive(field(|d| d.title.clone())) on_save=on_title />
        </div>
    }
}

#[component]
fn DescriptionEditor(detail: RwSignal<Option<TaskDetail>>, #[prop(into)] on_save: Callback<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let text = move || detail.with(|d| d.as_ref().and_then(|d| d.description.clone()).unwrap_or_default());
    let html = move || render_description(&text(), |url| ctx.asset_url(url));

    let start = move |_| {
        set_draft.set(text());
        set_editing.set(true);
    };
    let save = move |_| {
        set_editing.set(false);
        on_save.run(draft.get_untracked());
    };

    view! {
        <section class="task-description">
            <div class="section-header">
                <h3>"Description"</h3>
                <Show when=move || !editing.get()>
                    <button class="link-button" on:click=start>"Edit"</button>
                </Show>
            </div>
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <Show when=move || !text().trim().is_empty() fallback=|| view! { <p class="muted">"No description"</p> }>
                        <div class="markdown" inner_html=html></div>
                    </Show>
                }
            >
                <textarea rows="8" prop:value=move || draft.get() on:input=move |ev| set_draft.set(event_target_value(&ev))></textarea>
                <div class="form-actions">
                    <button on:click=move |_| set_editing.set(false)>"Cancel"</button>
                    <button class="primary" on:click=save>"Save"</button>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn CommentsSection(
    task_id: u32,
    detail: RwSignal<Option<TaskDetail>>,
    #[prop(into)] on_error: Callback<crate::api::ApiError>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (text, set_text) = signal(String::new());
    let (posting, set_posting) = signal(false);

    let comments = move || detail.with(|d| d.as_ref().map(|d| d.comments().to_vec()).unwrap_or_default());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let body = text.get().trim().to_string();
        if body.is_empty() {
            return;
        }
        set_posting.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let result = match api.add_comment(task_id, &body).await {
                Ok(()) => api.list_comments(task_id).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(list) => {
                    let _ = detail.try_update(|d| {
                        if let Some(d) = d {
                            d.comments = Some(list);
                        }
                    });
                    let _ = set_text.try_set(String::new());
                }
                Err(e) => on_error.run(e),
            }
            let _ = set_posting.try_set(false);
        });
    };

    view! {
        <section class="task-comments">
            <h3>"Comments"</h3>
            <ul class="comment-list">
                <For
                    each=comments
                    key=|c| c.id
                    children=move |c| {
                        let when = dates::relative_time(&c.created_at, chrono::Utc::now());
                        let avatar = c.author.as_ref().and_then(|a| a.avatar.clone());
                        let author = c.author_name().to_string();
                        view! {
                            <li class="comment">
                                <Avatar name=author.clone() url=avatar small=true />
                                <div class="comment-body">
                                    <div class="comment-meta"><strong>{author}</strong> " · " <span>{when}</span></div>
                                    <p>{c.text}</p>
                                </div>
                            </li>
                        }
                    }
                />
            </ul>
            <form class="comment-form" on:submit=on_submit>
                <textarea placeholder="Write a comment..." prop:value=move || text.get() on:input=move |ev| set_text.set(event_target_value(&ev))></textarea>
                <button type="submit" class="primary" disabled=move || posting.get()>"Comment"</button>
            </form>
        </section>
    }
}

#[component]
fn PeopleSection(
    task_id: u32,
    detail: RwSignal<Option<TaskDetail>>,
    #[prop(into)] on_error: Callback<crate::api::ApiError>,
    #[prop(into)] on_added: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (dialog, set_dialog) = signal(None::<PeopleDialog>);
    let (error, set_error) = signal(None::<String>);

    let assignees = move || detail.with(|d| d.as_ref().map(|d| d.assignees().to_vec()).unwrap_or_default());
    let collaborators = move || detail.with(|d| d.as_ref().map(|d| d.collaborators().to_vec()).unwrap_or_default());

    let exclude = Signal::derive(move || {
        let people = match dialog.get() {
            Some(PeopleDialog::Collaborator) => collaborators(),
            _ => assignees(),
        };
        people.iter().map(|u| u.id).collect::<Vec<_>>()
    });

    let pick = move |user: User| {
        let Some(kind) = dialog.get_untracked() else {
            return;
        };
        let api = ctx.api();
        spawn_local(async move {
            let result = match kind {
                PeopleDialog::Assignee => api.add_assignee(task_id, &user.email).await,
                PeopleDialog::Collaborator => api.add_collaborator(task_id, &user.email).await,
            };
            match result {
                Ok(()) => {
                    let _ = set_dialog.try_set(None);
                    on_added.run(());
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(e.to_string()));
                    on_error.run(e);
                }
            }
        });
    };

    let people_list = move |people: Vec<User>| {
        people.into_iter().map(|u| view! {
            <li class="person"><Avatar name=u.name.clone() url=u.avatar small=true /><span>{u.name}</span></li>
        }).collect_view()
    };

    view! {
        <div class="task-field">
            <span class="task-field-label">"Assignees"</span>
            <ul class="people-list">{move || people_list(assignees())}</ul>
            <button class="link-button" on:click=move |_| set_dialog.set(Some(PeopleDialog::Assignee))>"+ Assign"</button>
        </div>
        <div class="task-field">
            <span class="task-field-label">"Collaborators"</span>
            <ul class="people-list">{move || people_list(collaborators())}</ul>
            <button class="link-button" on:click=move |_| set_dialog.set(Some(PeopleDialog::Collaborator))>"+ Add collaborator"</button>
        </div>
        {move || dialog.get().map(|kind| {
            let title = match kind {
                PeopleDialog::Assignee => "Assign task",
                PeopleDialog::Collaborator => "Add collaborator",
            };
            view! {
                <AddPersonDialog
                    title=title
                    exclude=exclude
                    on_pick=pick
                    on_close=Callback::new(move |_: ()| {
                        set_dialog.set(None);
                        set_error.set(None);
                    })
                    error=error
                />
            }
        })}
    }
}

#[component]
fn AttachmentsSection(
    task_id: u32,
    detail: RwSignal<Option<TaskDetail>>,
    #[prop(into)] on_error: Callback<crate::api::ApiError>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (uploading, set_uploading) = signal(false);

    let attachments = move || detail.with(|d| d.as_ref().map(|d| d.attachments().to_vec()).unwrap_or_default());

    let on_file = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        set_uploading.set(true);
        let api = ctx.api();
        spawn_local(async move {
            let result = match api.upload_attachment(task_id, &file).await {
                Ok(_) => api.list_attachments(task_id).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(list) => {
                    let _ = detail.try_update(|d| {
                        if let Some(d) = d {
                            d.attachments = Some(list);
                        }
                    });
                }
                Err(e) => on_error.run(e),
            }
            let _ = set_uploading.try_set(false);
        });
    };

    view! {
        <div class="task-field">
            <span class="task-field-label">"Attachments"</span>
            <ul class="attachment-list">
                <For
                    each=attachments
                    key=|a| a.id
                    children=move |a| view! {
                        <li>
                            <a href=ctx.asset_url(&a.url) target="_blank" rel="noopener">{a.file_name.clone()}</a>
                            <span class="muted">{a.size_label()}</span>
                        </li>
                    }
                />
            </ul>
            <label class="upload-button">
                {move || if uploading.get() { "Uploading..." } else { "+ Upload file" }}
                <input type="file" hidden=true on:change=on_file disabled=move || uploading.get() />
            </label>
        </div>
    }
}
