//! Export jobs started in this session.

use geoflip_client::Notification;
use leptos::*;

use crate::state::{AppSession, Toasts};

#[component]
pub fn ExportsPanel() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let toasts = expect_context::<Toasts>();

    let (name, set_name) = create_signal(String::new());
    let (format, set_format) = create_signal("GeoJSON".to_string());
    let (task_id, set_task_id) = create_signal(String::new());

    let on_add = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let job_name = name.get_untracked();
        let job_task = task_id.get_untracked();
        if job_name.trim().is_empty() || job_task.trim().is_empty() {
            toasts.push(Notification::error("Name and task id are required"));
            return;
        }
        session.add_export(job_name, format.get_untracked(), job_task);
        set_name.set(String::new());
        set_task_id.set(String::new());
    };

    let remove = move |index: usize| match session.remove_export(index) {
        Ok(job) => log::info!("🗑️  Removed export {}", job.name),
        Err(e) => toasts.push(Notification::error(e.to_string())),
    };

    view! {
        <section class="panel">
            <h2>"Exports"</h2>
            <Show
                when=move || session.exports.with(|jobs| !jobs.is_empty())
                fallback=|| view! { <p class="panel-muted">"No exports yet."</p> }
            >
                <ul class="exports-list">
                    <For
                        each=move || session.exports.with(|jobs| jobs.jobs().to_vec().into_iter().enumerate().collect::<Vec<_>>())
                        key=|(index, job)| (*index, job.task_id.clone())
                        children=move |(index, job)| {
                            view! {
                                <li class="export-item">
                                    <span class="export-name">{job.name}</span>
                                    <span class="export-format">{job.output_format}</span>
                                    <code class="export-task">{job.task_id}</code>
                                    <button class="link-button" on:click=move |_| remove(index)>"Remove"</button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
            <form class="exports-form" on:submit=on_add>
                <input
                    placeholder="Name"
                    prop:value=name
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <select on:change=move |ev| set_format.set(event_target_value(&ev))>
                    <option value="GeoJSON" selected=true>"GeoJSON"</option>
                    <option value="Shapefile">"Shapefile"</option>
                    <option value="DXF">"DXF"</option>
                </select>
                <input
                    placeholder="Task id"
                    prop:value=task_id
                    on:input=move |ev| set_task_id.set(event_target_value(&ev))
                />
                <button type="submit" class="primary-button">"Add"</button>
            </form>
        </section>
    }
}
