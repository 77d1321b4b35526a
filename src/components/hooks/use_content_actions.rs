//! Controller hook for the profile content list.
//!
//! Owns the panel and confirm-dialog state machines, derives the display
//! list, and runs the save/delete flows against the backend. The page only
//! renders what this returns and invokes the callbacks.

use crate::api::ApiResult;
use crate::models::{Entity, EntityKind, StoredRecord};
use crate::state::content_actions::{
    derive_items, remove_by_id, settle_save, ConfirmState, DisplayItem, PanelState,
};
use crate::state::toast::{ToastContext, ToastPayload};
use crate::state::AppContext;
use crate::util::random_record_id;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub(crate) struct ContentActions {
    pub panel: RwSignal<PanelState>,
    pub confirm: RwSignal<ConfirmState>,

    /// Folders then articles, with per-row actions gated on modify rights.
    pub items: Memo<Vec<DisplayItem>>,

    pub open_create: Callback<()>,
    pub open_edit: Callback<Entity>,
    pub close_panel: Callback<()>,

    /// Persist a pre-validated form, reconcile the local list on success,
    /// close the panel. On failure the panel stays open.
    pub save: Callback<Entity>,

    pub request_delete: Callback<Entity>,
    pub confirm_delete: Callback<()>,
    pub cancel_delete: Callback<()>,
}

/// Log a failed store call and reduce a successful one to the created id
/// echoed by the backend (if any).
fn created_id(kind: EntityKind, stored: ApiResult<Vec<StoredRecord>>) -> Result<Option<i64>, ()> {
    match stored {
        Ok(records) => Ok(records.first().map(|r| r.id)),
        Err(e) => {
            logging::error!("save {} failed: {}", kind, e);
            Err(())
        }
    }
}

pub(crate) fn use_content_actions(can_modify: Signal<bool>) -> ContentActions {
    let app_state = expect_context::<AppContext>();
    let toasts = expect_context::<ToastContext>();

    let articles = app_state.0.articles;
    let folders = app_state.0.folders;
    let api_client = app_state.0.api_client;

    let panel: RwSignal<PanelState> = RwSignal::new(PanelState::closed());
    let confirm: RwSignal<ConfirmState> = RwSignal::new(ConfirmState::closed());

    let items = Memo::new(move |_| derive_items(&folders.get(), &articles.get(), can_modify.get()));

    let save = Callback::new(move |form: Entity| {
        let client = api_client.get_untracked();

        spawn_local(async move {
            match form {
                Entity::Article(a) => {
                    let stored = created_id(EntityKind::Article, client.store_article(&a).await);
                    let (rows, next_panel, toast) = settle_save(
                        &articles.get_untracked(),
                        a,
                        stored,
                        panel.get_untracked(),
                        random_record_id,
                    );
                    articles.set(rows);
                    panel.set(next_panel);
                    toasts.push(toast);
                }
                Entity::Folder(f) => {
                    let stored = created_id(EntityKind::Folder, client.store_folder(&f).await);
                    let (rows, next_panel, toast) = settle_save(
                        &folders.get_untracked(),
                        f,
                        stored,
                        panel.get_untracked(),
                        random_record_id,
                    );
                    folders.set(rows);
                    panel.set(next_panel);
                    toasts.push(toast);
                }
            }
        });
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let (next, target) = confirm.get_untracked().begin_confirm();
        confirm.set(next);

        let Some(entity) = target else {
            return;
        };

        let client = api_client.get_untracked();

        spawn_local(async move {
            // Listed rows always carry an id; a never-persisted record has
            // nothing remote to remove.
            let Some(id) = entity.id() else {
                confirm.set(confirm.get_untracked().settle_ok());
                return;
            };

            let removed = match entity.kind() {
                EntityKind::Article => client.remove_article(id).await,
                EntityKind::Folder => client.remove_folder(id).await,
            };

            match removed {
                Ok(()) => {
                    match entity.kind() {
                        EntityKind::Article => {
                            articles.update(|rows| *rows = remove_by_id(rows, id));
                        }
                        EntityKind::Folder => {
                            folders.update(|rows| *rows = remove_by_id(rows, id));
                        }
                    }

                    toasts.push(ToastPayload::success());
                    confirm.set(confirm.get_untracked().settle_ok());
                }
                Err(e) => {
                    logging::error!("delete {} failed: {}", entity.kind(), e);
                    toasts.push(ToastPayload::request_failed());
                    confirm.set(confirm.get_untracked().settle_err());
                }
            }
        });
    });

    ContentActions {
        panel,
        confirm,
        items,
        open_create: Callback::new(move |_| panel.set(PanelState::open_create())),
        open_edit: Callback::new(move |entity| panel.set(PanelState::open_edit(entity))),
        close_panel: Callback::new(move |_| panel.set(PanelState::closed())),
        save,
        request_delete: Callback::new(move |entity| {
            confirm.set(confirm.get_untracked().request_delete(entity));
        }),
        confirm_delete,
        cancel_delete: Callback::new(move |_| confirm.set(confirm.get_untracked().cancel())),
    }
}
