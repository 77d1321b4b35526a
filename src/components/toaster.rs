use crate::components::ui::{Alert, AlertDescription, AlertTitle};
use crate::state::toast::{ToastContext, ToastVariant};
use icons::X;
use leptos::prelude::*;

/// Fixed notification surface. Mount once, near the app root.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<ToastContext>();

    view! {
        <div class="fixed bottom-4 right-4 z-[100] flex w-full max-w-sm flex-col gap-2">
            {move || {
                toasts
                    .toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let variant_class = match toast.variant {
                            ToastVariant::Default => "bg-background",
                            ToastVariant::Destructive => "bg-background border-destructive/40 text-destructive",
                        };

                        let description = toast.description.clone();
                        view! {
                            <Alert class=format!("relative pr-8 shadow-lg {variant_class}")>
                                <AlertTitle>{toast.title}</AlertTitle>
                                <Show
                                    when={
                                        let has_description = !toast.description.is_empty();
                                        move || has_description
                                    }
                                    fallback=|| ().into_view()
                                >
                                    {
                                        let description = description.clone();
                                        view! { <AlertDescription>{description}</AlertDescription> }
                                    }
                                </Show>

                                <button
                                    type="button"
                                    class="absolute top-3 right-3 rounded-sm p-0.5 text-muted-foreground hover:text-foreground [&_svg:not([class*='size-'])]:size-3.5"
                                    aria-label="Dismiss notification"
                                    on:click=move |_| toasts.dismiss(id)
                                >
                                    <X />
                                </button>
                            </Alert>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
