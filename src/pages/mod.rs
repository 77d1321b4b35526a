use crate::api::{ApiErrorKind, ApiResult};
use crate::components::hooks::use_content_actions::{use_content_actions, ContentActions};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader,
    CardItem, CardList, CardTitle, Input, Label, Separator, Spinner,
};
use crate::models::{Article, Entity, EntityKind, Folder};
use crate::state::content_actions::{article_href, DisplayItem, ItemAction};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_params, use_query_map};
use leptos_router::params::Params;
use wasm_bindgen::JsCast;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ProfileRouteParams {
    pub user: Option<String>,
}

const FEATURED_GRADIENTS: [&str; 3] = [
    "from-[#D8B4FE] to-[#818CF8]",
    "from-[#FDE68A] via-[#FCA5A5] to-[#FECACA]",
    "from-[#6EE7B7] via-[#3B82F6] to-[#9333EA]",
];

/// What a finished list fetch leaves on the page.
struct ContentLoad {
    articles: Vec<Article>,
    folders: Vec<Folder>,
    error: Option<String>,
}

/// Fold the two list responses into the page's next state. Any failure
/// empties both lists: rows fetched for a previous profile or folder must
/// not linger under the error message.
fn settle_content_load(
    articles: ApiResult<Vec<Article>>,
    folders: ApiResult<Vec<Folder>>,
) -> ContentLoad {
    match (articles, folders) {
        (Ok(articles), Ok(folders)) => ContentLoad {
            articles,
            folders,
            error: None,
        },
        (Err(e), _) | (_, Err(e)) => {
            let message = if e.kind == ApiErrorKind::Unauthorized {
                "Your session has expired. Sign in again to manage your content.".to_string()
            } else {
                e.to_string()
            };

            ContentLoad {
                articles: vec![],
                folders: vec![],
                error: Some(message),
            }
        }
    }
}

/// Profile content page: featured articles, the folder/article list with
/// per-row actions, the create/edit panel and the delete confirmation.
///
/// Routes: `/` (own profile) and `/profile/:user`.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let params = use_params::<ProfileRouteParams>();
    let query = use_query_map();
    let location = use_location();

    let current_user_id = move || app_state.0.current_user.get().map(|u| u.id.clone());

    // `/profile/:user` views someone else's profile; `/` views your own.
    let route_user = move || params.get().ok().and_then(|p| p.user);

    let profile_user_id = Memo::new(move |_| route_user().or_else(current_user_id));

    let can_modify = Signal::derive(move || match (route_user(), current_user_id()) {
        (None, Some(_)) => true,
        (Some(user), Some(me)) => user == me,
        _ => false,
    });

    let folder_id = Memo::new(move |_| {
        query
            .get()
            .get("folderId")
            .and_then(|v| v.parse::<i64>().ok())
    });

    let articles = app_state.0.articles;
    let content_loading = app_state.0.content_loading;
    let content_error = app_state.0.content_error;

    // Re-fetch whenever the viewed profile or folder changes.
    Effect::new(move |_| {
        let Some(user_id) = profile_user_id.get() else {
            app_state.0.articles.set(vec![]);
            app_state.0.folders.set(vec![]);
            return;
        };

        let folder = folder_id.get();
        let client = app_state.0.api_client.get_untracked();

        content_loading.set(true);
        content_error.set(None);

        spawn_local(async move {
            let fetched_articles = client.get_article_list(&user_id, folder).await;
            let fetched_folders = client.get_folder_list(&user_id, folder).await;

            let load = settle_content_load(fetched_articles, fetched_folders);
            app_state.0.articles.set(load.articles);
            app_state.0.folders.set(load.folders);
            content_error.set(load.error);
            content_loading.set(false);
        });
    });

    let actions = use_content_actions(can_modify);
    let items = actions.items;

    let featured = Memo::new(move |_| {
        articles
            .get()
            .into_iter()
            .filter(|a| a.featured)
            .collect::<Vec<_>>()
    });

    let parent_href = move || location.pathname.get();

    view! {
        <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
            <Show when=move || !featured.get().is_empty() fallback=|| ().into_view()>
                <div class="mb-8 space-y-3">
                    <h2 class="text-lg font-semibold">"Featured Articles"</h2>

                    <div class="flex flex-col gap-6 md:flex-row">
                        {move || {
                            featured
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, article)| {
                                    let gradient =
                                        FEATURED_GRADIENTS[index % FEATURED_GRADIENTS.len()];
                                    let href = article_href(&article);

                                    view! {
                                        <a
                                            href=href
                                            class=format!(
                                                "flex h-32 w-full flex-col justify-end rounded-xl bg-gradient-to-r p-4 text-white shadow-sm transition-transform hover:scale-[1.01] md:max-w-xs {gradient}",
                                            )
                                        >
                                            <div class="text-sm font-semibold drop-shadow">
                                                {article.name.clone()}
                                            </div>
                                        </a>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>

                    <Separator />
                </div>
            </Show>

            <Card>
                <CardHeader>
                    <CardTitle>"Content"</CardTitle>

                    <Show when=move || can_modify.get() fallback=|| ().into_view()>
                        <Button
                            size=ButtonSize::Sm
                            on:click=move |_| actions.open_create.run(())
                        >
                            "New"
                        </Button>
                    </Show>
                </CardHeader>

                <CardContent>
                    <Show when=move || content_error.get().is_some() fallback=|| ().into_view()>
                        {move || {
                            content_error.get().map(|e| view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive">{e}</AlertDescription>
                                </Alert>
                            })
                        }}
                    </Show>

                    <Show when=move || folder_id.get().is_some() fallback=|| ().into_view()>
                        <a
                            href=parent_href
                            class="flex items-center gap-3 rounded-md border border-transparent px-3 py-2 text-sm hover:bg-accent"
                        >
                            <FolderGlyph />
                            ".."
                        </a>
                    </Show>

                    <Show
                        when=move || !content_loading.get()
                        fallback=|| view! {
                            <div class="text-sm text-muted-foreground">"Loading..."</div>
                        }
                    >
                        <Show
                            when=move || !items.get().is_empty()
                            fallback=|| view! {
                                <div class="text-sm text-muted-foreground">"Nothing here yet."</div>
                            }
                        >
                            <CardList>
                                {move || {
                                    items
                                        .get()
                                        .into_iter()
                                        .map(|item| view! { <ContentRow item=item actions=actions /> })
                                        .collect_view()
                                }}
                            </CardList>
                        </Show>
                    </Show>
                </CardContent>
            </Card>

            <ContentPanel actions=actions />
            <ConfirmDialog actions=actions />
        </div>
    }
}

#[component]
fn FileGlyph() -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="16"
            height="16"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class="size-4 shrink-0 text-muted-foreground"
            aria-hidden="true"
        >
            <path d="M15 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7Z" />
            <path d="M14 2v4a2 2 0 0 0 2 2h4" />
        </svg>
    }
}

#[component]
fn FolderGlyph() -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width="16"
            height="16"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            class="size-4 shrink-0 text-muted-foreground"
            aria-hidden="true"
        >
            <path d="M20 20a2 2 0 0 0 2-2V8a2 2 0 0 0-2-2h-7.9a2 2 0 0 1-1.69-.9L9.6 3.9A2 2 0 0 0 7.93 3H4a2 2 0 0 0-2 2v13a2 2 0 0 0 2 2Z" />
        </svg>
    }
}

#[component]
fn ContentRow(item: DisplayItem, actions: ContentActions) -> impl IntoView {
    let entity = item.entity.clone();
    let name = entity.name().to_string();
    let description = entity.description().to_string();
    let kind = entity.kind();
    let href = item.href.clone();

    let row_actions = item.actions.clone();

    view! {
        <CardItem class="group relative rounded-md border border-transparent hover:border-border hover:bg-accent/40">
            <a href=href class="flex min-w-0 flex-1 items-center gap-3 px-3 py-2">
                {match kind {
                    EntityKind::Article => view! { <FileGlyph /> }.into_any(),
                    EntityKind::Folder => view! { <FolderGlyph /> }.into_any(),
                }}

                <div class="min-w-0">
                    <div class="truncate text-sm font-medium">{name}</div>
                    <Show
                        when={
                            let has_description = !description.is_empty();
                            move || has_description
                        }
                        fallback=|| ().into_view()
                    >
                        <div class="truncate text-xs text-muted-foreground">
                            {description.clone()}
                        </div>
                    </Show>
                </div>
            </a>

            {row_actions.map(|acts| {
                view! {
                    <div class="mr-2 hidden items-center gap-1 group-hover:flex">
                        {acts
                            .into_iter()
                            .map(|action| match action {
                                ItemAction::Edit => {
                                    let entity_for_edit = entity.clone();
                                    view! {
                                        <Button
                                            variant=ButtonVariant::Ghost
                                            size=ButtonSize::Icon
                                            class="h-7 w-7"
                                            attr:title="Edit"
                                            on:click=move |_| {
                                                actions.open_edit.run(entity_for_edit.clone());
                                            }
                                        >
                                            <svg
                                                xmlns="http://www.w3.org/2000/svg"
                                                width="16"
                                                height="16"
                                                viewBox="0 0 24 24"
                                                fill="none"
                                                stroke="currentColor"
                                                stroke-width="2"
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                                class="text-muted-foreground"
                                                aria-hidden="true"
                                            >
                                                <path d="M12 20h9" />
                                                <path d="M16.5 3.5a2.121 2.121 0 0 1 3 3L7 19l-4 1 1-4Z" />
                                            </svg>
                                        </Button>
                                    }
                                    .into_any()
                                }
                                ItemAction::Remove => {
                                    let entity_for_remove = entity.clone();
                                    view! {
                                        <Button
                                            variant=ButtonVariant::Ghost
                                            size=ButtonSize::Icon
                                            class="h-7 w-7 text-destructive"
                                            attr:title="Remove"
                                            on:click=move |_| {
                                                actions.request_delete.run(entity_for_remove.clone());
                                            }
                                        >
                                            <svg
                                                xmlns="http://www.w3.org/2000/svg"
                                                width="16"
                                                height="16"
                                                viewBox="0 0 24 24"
                                                fill="none"
                                                stroke="currentColor"
                                                stroke-width="2"
                                                stroke-linecap="round"
                                                stroke-linejoin="round"
                                                aria-hidden="true"
                                            >
                                                <path d="M3 6h18" />
                                                <path d="M8 6V4h8v2" />
                                                <path d="M19 6l-1 14H6L5 6" />
                                                <path d="M10 11v6" />
                                                <path d="M14 11v6" />
                                            </svg>
                                        </Button>
                                    }
                                    .into_any()
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })}
        </CardItem>
    }
}

/// Create/edit form overlay. In create mode the user picks the record kind
/// inside the panel; in edit mode the kind is fixed and fields are
/// prefilled.
#[component]
fn ContentPanel(actions: ContentActions) -> impl IntoView {
    let panel = actions.panel;

    let form_kind: RwSignal<EntityKind> = RwSignal::new(EntityKind::Article);
    let form_name: RwSignal<String> = RwSignal::new(String::new());
    let form_slug: RwSignal<String> = RwSignal::new(String::new());
    let form_description: RwSignal<String> = RwSignal::new(String::new());
    let form_featured: RwSignal<bool> = RwSignal::new(false);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);

    // Sync fields from the panel state whenever it opens.
    Effect::new(move |_| {
        let state = panel.get();
        if !state.open {
            return;
        }

        form_kind.set(state.default_panel.unwrap_or(EntityKind::Article));
        form_error.set(None);

        match state.default_values {
            Some(Entity::Article(a)) => {
                form_name.set(a.name);
                form_slug.set(a.slug);
                form_description.set(a.description);
                form_featured.set(a.featured);
            }
            Some(Entity::Folder(f)) => {
                form_name.set(f.name);
                form_slug.set(String::new());
                form_description.set(f.description);
                form_featured.set(false);
            }
            None => {
                form_name.set(String::new());
                form_slug.set(String::new());
                form_description.set(String::new());
                form_featured.set(false);
            }
        }
    });

    let is_edit = move || panel.get().default_values.is_some();
    let kind_locked = move || panel.get().default_panel.is_some();

    let on_save = move |_: web_sys::MouseEvent| {
        let name = form_name.get_untracked();
        if name.trim().is_empty() {
            form_error.set(Some("Name is required".to_string()));
            return;
        }

        let kind = form_kind.get_untracked();
        if kind == EntityKind::Article && form_slug.get_untracked().trim().is_empty() {
            form_error.set(Some("Slug is required".to_string()));
            return;
        }

        form_error.set(None);

        // Edits keep the persisted id; creates have none yet.
        let id = panel
            .get_untracked()
            .default_values
            .and_then(|e| e.id());

        let entity = match kind {
            EntityKind::Article => Entity::Article(Article {
                id,
                name,
                slug: form_slug.get_untracked(),
                featured: form_featured.get_untracked(),
                description: form_description.get_untracked(),
            }),
            EntityKind::Folder => Entity::Folder(Folder {
                id,
                name,
                description: form_description.get_untracked(),
            }),
        };

        actions.save.run(entity);
    };

    let on_toggle_featured = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                form_featured.set(input.checked());
            }
        }
    };

    view! {
        <Show when=move || panel.get().open fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 space-y-1">
                        <div class="text-sm font-medium">
                            {move || if is_edit() { "Edit" } else { "New" }}
                        </div>
                    </div>

                    <div class="space-y-2">
                        <Show when=move || !kind_locked() fallback=|| ().into_view()>
                            <div class="flex gap-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    class="aria-[current=true]:bg-accent"
                                    attr:aria-current=move || {
                                        (form_kind.get() == EntityKind::Article).to_string()
                                    }
                                    on:click=move |_| form_kind.set(EntityKind::Article)
                                >
                                    "Article"
                                </Button>
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    class="aria-[current=true]:bg-accent"
                                    attr:aria-current=move || {
                                        (form_kind.get() == EntityKind::Folder).to_string()
                                    }
                                    on:click=move |_| form_kind.set(EntityKind::Folder)
                                >
                                    "Folder"
                                </Button>
                            </div>
                        </Show>

                        <div class="space-y-1">
                            <Label class="text-xs">"Name"</Label>
                            <Input bind_value=form_name class="h-8 text-sm" />
                        </div>

                        <Show when=move || form_kind.get() == EntityKind::Article fallback=|| ().into_view()>
                            <div class="space-y-1">
                                <Label class="text-xs">"Slug"</Label>
                                <Input bind_value=form_slug class="h-8 text-sm" placeholder="my-article" />
                            </div>
                        </Show>

                        <div class="space-y-1">
                            <Label class="text-xs">"Description (optional)"</Label>
                            <Input bind_value=form_description class="h-8 text-sm" />
                        </div>

                        <Show when=move || form_kind.get() == EntityKind::Article fallback=|| ().into_view()>
                            <label class="flex items-center gap-2 text-xs">
                                <input
                                    type="checkbox"
                                    prop:checked=move || form_featured.get()
                                    on:change=on_toggle_featured
                                />
                                "Featured"
                            </label>
                        </Show>

                        <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                            {move || form_error.get().map(|e| view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                </Alert>
                            })}
                        </Show>

                        <div class="flex items-center justify-end gap-2 pt-2">
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=move |_| actions.close_panel.run(())
                            >
                                "Cancel"
                            </Button>
                            <Button size=ButtonSize::Sm on:click=on_save>
                                "Save"
                            </Button>
                        </div>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Confirm-before-destroy dialog. Stays open until the remote removal
/// resolves; a failure keeps it open with the error surfaced as a toast.
#[component]
fn ConfirmDialog(actions: ContentActions) -> impl IntoView {
    let confirm = actions.confirm;

    view! {
        <Show when=move || confirm.get().open fallback=|| ().into_view()>
            <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                    <div class="mb-3 space-y-1">
                        <div class="text-sm font-medium">"Are you sure?"</div>
                        <div class="text-xs text-muted-foreground">
                            {move || confirm.get().description}
                        </div>
                    </div>

                    <div class="flex items-center justify-end gap-2 pt-2">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            attr:disabled=move || confirm.get().deleting
                            on:click=move |_| actions.cancel_delete.run(())
                        >
                            "Cancel"
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            class="border-destructive/40 text-destructive"
                            attr:disabled=move || confirm.get().deleting
                            on:click=move |_| actions.confirm_delete.run(())
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || confirm.get().deleting fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if confirm.get().deleting { "Deleting..." } else { "Delete" }}
                            </span>
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn article(id: i64, name: &str) -> Article {
        Article {
            id: Some(id),
            name: name.to_string(),
            slug: name.to_lowercase(),
            featured: false,
            description: String::new(),
        }
    }

    fn http_error(message: &str) -> ApiError {
        ApiError {
            kind: ApiErrorKind::Http,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_content_load_success_replaces_both_lists() {
        let load = settle_content_load(
            Ok(vec![article(1, "A")]),
            Ok(vec![Folder {
                id: Some(2),
                name: "F".to_string(),
                description: String::new(),
            }]),
        );

        assert_eq!(load.articles.len(), 1);
        assert_eq!(load.folders.len(), 1);
        assert!(load.error.is_none());
    }

    #[test]
    fn test_content_load_failure_clears_stale_rows() {
        let load = settle_content_load(Err(http_error("boom")), Ok(vec![]));
        assert!(load.articles.is_empty());
        assert!(load.folders.is_empty());
        assert_eq!(load.error.as_deref(), Some("boom"));

        // Same for a folder-side failure when articles came back fine.
        let load = settle_content_load(Ok(vec![article(1, "A")]), Err(http_error("boom")));
        assert!(load.articles.is_empty());
        assert!(load.folders.is_empty());
    }

    #[test]
    fn test_content_load_unauthorized_reports_expired_session() {
        let load = settle_content_load(
            Err(ApiError {
                kind: ApiErrorKind::Unauthorized,
                message: "Unauthorized".to_string(),
            }),
            Ok(vec![]),
        );

        assert_eq!(
            load.error.as_deref(),
            Some("Your session has expired. Sign in again to manage your content.")
        );
    }
}
