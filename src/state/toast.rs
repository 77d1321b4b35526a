//! App-wide notification channel.
//!
//! Controllers push [`ToastPayload`]s; the `Toaster` component renders the
//! queue. Toasts auto-dismiss after a few seconds.

use crate::models::EntityKind;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

const AUTO_DISMISS_MS: i32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// What a caller wants shown; the queue assigns the id.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ToastPayload {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl ToastPayload {
    pub fn success() -> Self {
        Self {
            title: "Success".to_string(),
            description: String::new(),
            variant: ToastVariant::Default,
        }
    }

    pub fn saved(name: &str, kind: EntityKind) -> Self {
        Self {
            title: "Success".to_string(),
            description: format!("\"{name}\" {kind} was saved to your list :)"),
            variant: ToastVariant::Default,
        }
    }

    pub fn request_failed() -> Self {
        Self {
            title: "Uh oh! Something went wrong.".to_string(),
            description: "There was a problem with your request.".to_string(),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

#[derive(Clone, Copy)]
pub(crate) struct ToastContext {
    pub toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(vec![]),
            next_id: RwSignal::new(1),
        }
    }

    pub fn push(&self, payload: ToastPayload) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: payload.title,
                description: payload.description,
                variant: payload.variant,
            });
        });

        let toasts = self.toasts;
        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                toasts.update(|t| t.retain(|x| x.id != id));
            })
            .as_ref()
            .unchecked_ref(),
            AUTO_DISMISS_MS,
        );
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|x| x.id != id));
    }
}
