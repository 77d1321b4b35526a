//! Panel/confirm state machines and list reconciliation for the profile
//! content controller.
//!
//! Everything here is plain data plus pure transition functions; the Leptos
//! wiring (signals, network calls, toasts) lives in
//! `components::hooks::use_content_actions`.

use crate::models::{Article, Entity, EntityKind, Folder};
use crate::state::toast::ToastPayload;

/// Create/edit panel state. Created once per page and lives for the page's
/// lifetime; only the transitions below replace it.
#[derive(Clone, Debug, PartialEq, Default)]
pub(crate) struct PanelState {
    pub open: bool,

    /// Which form the panel shows. `None` in create mode: the user picks
    /// article or folder inside the panel.
    pub default_panel: Option<EntityKind>,

    /// Prefill for edit mode.
    pub default_values: Option<Entity>,
}

impl PanelState {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn open_create() -> Self {
        Self {
            open: true,
            default_panel: None,
            default_values: None,
        }
    }

    pub fn open_edit(entity: Entity) -> Self {
        Self {
            open: true,
            default_panel: Some(entity.kind()),
            default_values: Some(entity),
        }
    }
}

/// Delete-confirmation dialog state.
///
/// At most one confirmation is pending; requesting a second overwrites the
/// first. `deleting` is set while the remote removal is in flight, so the
/// dialog closes only once the backend has actually answered.
#[derive(Clone, Debug, PartialEq, Default)]
pub(crate) struct ConfirmState {
    pub open: bool,
    pub description: String,
    pub pending: Option<Entity>,
    pub deleting: bool,
}

impl ConfirmState {
    pub fn closed() -> Self {
        Self::default()
    }

    /// Last-request-wins: any previously pending record is replaced.
    pub fn request_delete(self, entity: Entity) -> Self {
        Self {
            open: true,
            description: delete_description(entity.name()),
            pending: Some(entity),
            deleting: false,
        }
    }

    pub fn cancel(self) -> Self {
        Self::closed()
    }

    /// Start the confirmed removal. Returns the record to remove, or `None`
    /// when nothing is pending or a removal is already in flight.
    pub fn begin_confirm(self) -> (Self, Option<Entity>) {
        if !self.open || self.deleting {
            return (self, None);
        }

        match self.pending.clone() {
            None => (self, None),
            Some(entity) => (
                Self {
                    deleting: true,
                    ..self
                },
                Some(entity),
            ),
        }
    }

    pub fn settle_ok(self) -> Self {
        Self::closed()
    }

    /// A failed removal keeps the dialog open so the user can retry or
    /// cancel; the error itself is surfaced through the toast channel.
    pub fn settle_err(self) -> Self {
        Self {
            deleting: false,
            ..self
        }
    }
}

pub(crate) fn delete_description(name: &str) -> String {
    format!("This action cannot be undone. This will permanently delete your \"{name}\".")
}

/// Shared surface of the two list row kinds, for reconciliation.
pub(crate) trait ContentRecord: Clone {
    const KIND: EntityKind;

    fn record_id(&self) -> Option<i64>;
    fn with_record_id(self, id: i64) -> Self;
    fn record_name(&self) -> &str;
}

impl ContentRecord for Article {
    const KIND: EntityKind = EntityKind::Article;

    fn record_id(&self) -> Option<i64> {
        self.id
    }

    fn with_record_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    fn record_name(&self) -> &str {
        &self.name
    }
}

impl ContentRecord for Folder {
    const KIND: EntityKind = EntityKind::Folder;

    fn record_id(&self) -> Option<i64> {
        self.id
    }

    fn with_record_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    fn record_name(&self) -> &str {
        &self.name
    }
}

/// Reconcile a successful save into the local list.
///
/// Updates replace the matching row in place (order preserved); creates are
/// appended last with the id echoed by the backend, falling back to
/// `fallback_id` when the response carried none.
pub(crate) fn upsert_saved<T: ContentRecord>(
    rows: &[T],
    form: T,
    server_id: Option<i64>,
    fallback_id: impl FnOnce() -> i64,
) -> Vec<T> {
    if let Some(id) = form.record_id() {
        return rows
            .iter()
            .map(|row| {
                if row.record_id() == Some(id) {
                    form.clone()
                } else {
                    row.clone()
                }
            })
            .collect();
    }

    let id = server_id.unwrap_or_else(fallback_id);
    let mut next = rows.to_vec();
    next.push(form.with_record_id(id));
    next
}

/// Fold a completed store call into the row list, panel, and notification.
///
/// `stored` carries the created id echoed by the backend (`Ok(None)` when
/// the response had none). A failure touches nothing: the rows come back
/// as-is and the panel stays as it was, so the user can retry or cancel.
pub(crate) fn settle_save<T: ContentRecord>(
    rows: &[T],
    form: T,
    stored: Result<Option<i64>, ()>,
    panel: PanelState,
    fallback_id: impl FnOnce() -> i64,
) -> (Vec<T>, PanelState, ToastPayload) {
    match stored {
        Err(()) => (rows.to_vec(), panel, ToastPayload::request_failed()),
        Ok(server_id) => {
            let toast = ToastPayload::saved(form.record_name(), T::KIND);
            (
                upsert_saved(rows, form, server_id, fallback_id),
                PanelState::closed(),
                toast,
            )
        }
    }
}

/// Remove exactly the row with the given id; everything else keeps its
/// position.
pub(crate) fn remove_by_id<T: ContentRecord>(rows: &[T], id: i64) -> Vec<T> {
    rows.iter()
        .filter(|row| row.record_id() != Some(id))
        .cloned()
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ItemAction {
    Edit,
    Remove,
}

/// One row of the profile content list. Derived, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DisplayItem {
    pub entity: Entity,
    pub href: String,

    /// `None` for read-only viewers; otherwise exactly Edit then Remove.
    pub actions: Option<Vec<ItemAction>>,
}

pub(crate) fn article_href(article: &Article) -> String {
    article
        .id
        .map(|id| format!("preview/{}-{}", id, article.slug))
        .unwrap_or_default()
}

pub(crate) fn folder_href(folder: &Folder) -> String {
    folder
        .id
        .map(|id| format!("?folderId={id}"))
        .unwrap_or_default()
}

/// Project both collections into display rows: folders first, then
/// articles, each in its original order.
pub(crate) fn derive_items(
    folders: &[Folder],
    articles: &[Article],
    can_modify: bool,
) -> Vec<DisplayItem> {
    let actions = || can_modify.then(|| vec![ItemAction::Edit, ItemAction::Remove]);

    let mut items = Vec::with_capacity(folders.len() + articles.len());

    for folder in folders {
        items.push(DisplayItem {
            href: folder_href(folder),
            entity: Entity::Folder(folder.clone()),
            actions: actions(),
        });
    }

    for article in articles {
        items.push(DisplayItem {
            href: article_href(article),
            entity: Entity::Article(article.clone()),
            actions: actions(),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: Option<i64>, name: &str, slug: &str) -> Article {
        Article {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            featured: false,
            description: String::new(),
        }
    }

    fn folder(id: Option<i64>, name: &str) -> Folder {
        Folder {
            id,
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn no_fallback() -> i64 {
        panic!("fallback id should not be consulted here");
    }

    #[test]
    fn test_upsert_with_id_replaces_exactly_one_in_place() {
        let rows = vec![
            article(Some(1), "A", "a"),
            article(Some(2), "B", "b"),
            article(Some(3), "C", "c"),
        ];
        let next = upsert_saved(&rows, article(Some(2), "B2", "b"), Some(2), no_fallback);

        assert_eq!(next.len(), rows.len());
        assert_eq!(next[0], rows[0]);
        assert_eq!(next[1].name, "B2");
        assert_eq!(next[2], rows[2]);
    }

    #[test]
    fn test_upsert_without_id_appends_last_with_server_id() {
        let rows = vec![article(Some(1), "A", "a")];
        let next = upsert_saved(&rows, article(None, "New", "new"), Some(9), no_fallback);

        assert_eq!(next.len(), 2);
        assert_eq!(next[0], rows[0]);
        assert_eq!(next[1].id, Some(9));
        assert_eq!(next[1].name, "New");
    }

    #[test]
    fn test_upsert_without_id_uses_fallback_when_response_has_no_id() {
        let rows: Vec<Folder> = vec![];
        let next = upsert_saved(&rows, folder(None, "F"), None, || 777);

        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, Some(777));
    }

    #[test]
    fn test_save_scenario_update_article() {
        // articles=[{id:1,name:"A",slug:"a"}]; store echoes {"records":[{"id":1}]}
        let rows = vec![article(Some(1), "A", "a")];
        let next = upsert_saved(&rows, article(Some(1), "A2", "a"), Some(1), no_fallback);

        assert_eq!(next, vec![article(Some(1), "A2", "a")]);
    }

    #[test]
    fn test_failed_save_leaves_rows_and_panel_untouched() {
        let rows = vec![article(Some(1), "A", "a")];
        let panel = PanelState::open_edit(Entity::Article(rows[0].clone()));

        let (next, panel_after, toast) = settle_save(
            &rows,
            article(Some(1), "A2", "a"),
            Err(()),
            panel.clone(),
            no_fallback,
        );

        assert_eq!(next, rows);
        assert_eq!(panel_after, panel);
        assert!(panel_after.open);
        assert_eq!(toast, ToastPayload::request_failed());
    }

    #[test]
    fn test_successful_save_reconciles_and_closes_panel() {
        let rows = vec![article(Some(1), "A", "a")];

        let (next, panel_after, toast) = settle_save(
            &rows,
            article(None, "New", "new"),
            Ok(Some(9)),
            PanelState::open_create(),
            no_fallback,
        );

        assert_eq!(next.len(), 2);
        assert_eq!(next[1].id, Some(9));
        assert_eq!(panel_after, PanelState::closed());
        assert_eq!(
            toast.description,
            "\"New\" article was saved to your list :)"
        );
    }

    #[test]
    fn test_remove_by_id_removes_exactly_the_match() {
        let rows = vec![
            folder(Some(1), "A"),
            folder(Some(2), "B"),
            folder(Some(3), "C"),
        ];
        let next = remove_by_id(&rows, 2);

        assert_eq!(next, vec![folder(Some(1), "A"), folder(Some(3), "C")]);
    }

    #[test]
    fn test_remove_scenario_single_folder() {
        // folders=[{id:2,name:"F"}]; confirmed removal resolves ok.
        let rows = vec![folder(Some(2), "F")];
        assert!(remove_by_id(&rows, 2).is_empty());
    }

    #[test]
    fn test_remove_by_id_missing_id_is_a_no_op() {
        let rows = vec![folder(Some(1), "A")];
        assert_eq!(remove_by_id(&rows, 99), rows);
    }

    #[test]
    fn test_panel_transitions() {
        assert_eq!(
            PanelState::closed(),
            PanelState {
                open: false,
                default_panel: None,
                default_values: None,
            }
        );

        let create = PanelState::open_create();
        assert!(create.open);
        assert!(create.default_panel.is_none());
        assert!(create.default_values.is_none());

        let entity = Entity::Article(article(Some(1), "A", "a"));
        let edit = PanelState::open_edit(entity.clone());
        assert!(edit.open);
        assert_eq!(edit.default_panel, Some(EntityKind::Article));
        assert_eq!(edit.default_values, Some(entity));
    }

    #[test]
    fn test_confirm_description_quotes_the_target_name() {
        let state = ConfirmState::closed().request_delete(Entity::Folder(folder(Some(2), "F")));
        assert!(state.open);
        assert_eq!(
            state.description,
            "This action cannot be undone. This will permanently delete your \"F\"."
        );
    }

    #[test]
    fn test_confirm_second_request_wins() {
        let first = Entity::Folder(folder(Some(1), "First"));
        let second = Entity::Article(article(Some(2), "Second", "s"));

        let state = ConfirmState::closed()
            .request_delete(first)
            .request_delete(second.clone());

        assert_eq!(state.pending, Some(second));
        assert!(state.description.contains("\"Second\""));
    }

    #[test]
    fn test_confirm_flow_success_closes_dialog() {
        let entity = Entity::Folder(folder(Some(2), "F"));
        let state = ConfirmState::closed().request_delete(entity.clone());

        let (state, target) = state.begin_confirm();
        assert_eq!(target, Some(entity));
        assert!(state.deleting);
        assert!(state.open);

        assert_eq!(state.settle_ok(), ConfirmState::closed());
    }

    #[test]
    fn test_confirm_flow_failure_keeps_dialog_open() {
        let state = ConfirmState::closed().request_delete(Entity::Folder(folder(Some(2), "F")));
        let (state, _) = state.begin_confirm();

        let state = state.settle_err();
        assert!(state.open);
        assert!(!state.deleting);
        assert!(state.pending.is_some());
    }

    #[test]
    fn test_confirm_guards_double_confirm_and_empty_confirm() {
        let (state, target) = ConfirmState::closed().begin_confirm();
        assert!(target.is_none());
        assert!(!state.deleting);

        let state = state.request_delete(Entity::Folder(folder(Some(2), "F")));
        let (state, first) = state.begin_confirm();
        assert!(first.is_some());

        // Already in flight: a second confirm yields nothing.
        let (state, second) = state.begin_confirm();
        assert!(second.is_none());
        assert!(state.deleting);
    }

    #[test]
    fn test_confirm_cancel_has_no_side_effect_target() {
        let state = ConfirmState::closed()
            .request_delete(Entity::Folder(folder(Some(2), "F")))
            .cancel();
        assert_eq!(state, ConfirmState::closed());
    }

    #[test]
    fn test_derive_items_folders_first_stable_order() {
        let folders = vec![folder(Some(10), "F1"), folder(Some(11), "F2")];
        let articles = vec![article(Some(1), "A1", "a1"), article(Some(2), "A2", "a2")];

        let items = derive_items(&folders, &articles, true);
        let names: Vec<&str> = items.iter().map(|i| i.entity.name()).collect();
        assert_eq!(names, vec!["F1", "F2", "A1", "A2"]);
    }

    #[test]
    fn test_derive_items_hrefs() {
        let items = derive_items(
            &[folder(Some(7), "F")],
            &[article(Some(3), "A", "hello-world")],
            false,
        );
        assert_eq!(items[0].href, "?folderId=7");
        assert_eq!(items[1].href, "preview/3-hello-world");
    }

    #[test]
    fn test_derive_items_read_only_viewers_get_no_actions() {
        let items = derive_items(&[folder(Some(1), "F")], &[article(Some(2), "A", "a")], false);
        assert!(items.iter().all(|i| i.actions.is_none()));

        // Idempotent across re-derivation with unchanged inputs.
        let again = derive_items(&[folder(Some(1), "F")], &[article(Some(2), "A", "a")], false);
        assert_eq!(items, again);
    }

    #[test]
    fn test_derive_items_actions_are_edit_then_remove() {
        let items = derive_items(&[], &[article(Some(2), "A", "a")], true);
        assert_eq!(
            items[0].actions,
            Some(vec![ItemAction::Edit, ItemAction::Remove])
        );
    }
}
