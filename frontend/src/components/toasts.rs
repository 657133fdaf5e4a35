//! Toast stack, bottom-right. Click a toast to dismiss it early.

use leptos::*;

use crate::state::Toasts;

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<Toasts>();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.items()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.class() on:click=move |_| toasts.dismiss(id)>
                            {toast.notification.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
