pub(crate) mod content_actions;
pub(crate) mod toast;

use crate::api::ApiClient;
use crate::models::{AccountInfo, Article, Folder};
use crate::storage::load_user_from_storage;
use leptos::prelude::*;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub current_user: RwSignal<Option<AccountInfo>>,

    /// Profile content for the currently viewed profile/folder.
    /// Loaded from backend; mutated only through the reconciliation
    /// functions in `content_actions`.
    pub articles: RwSignal<Vec<Article>>,
    pub folders: RwSignal<Vec<Folder>>,
    pub content_loading: RwSignal<bool>,
    pub content_error: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_client = ApiClient::load_from_storage();
        let stored_user = load_user_from_storage();

        Self {
            api_client: RwSignal::new(stored_client),
            current_user: RwSignal::new(stored_user),
            articles: RwSignal::new(vec![]),
            folders: RwSignal::new(vec![]),
            content_loading: RwSignal::new(false),
            content_error: RwSignal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
