use std::num::NonZeroUsize;

use api_types::EntityId;

use crate::{
    entity::{Draft, Entity, SortDirection, SortScope},
    error::{ListError, RemoteError},
    pages::{PageState, PageTarget, Summary, total_pages},
    pending::{Action, PendingActions},
    remote::{Confirmer, RemoteCollection},
};

/// Prompt shown before every delete.
pub const DELETE_PROMPT: &str = "Are you sure? You won't be able to revert this!";

/// Identifies one `load()` round-trip. Only the most recently issued ticket may
/// replace the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued while this one was in flight.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Browsable view over a server-owned collection.
///
/// `items` is the snapshot from the last applied load. `filtered` and `page`
/// hold indices into it and are rebuilt on every state change, so `filtered`
/// is always a subsequence of `items`.
#[derive(Debug)]
pub struct ListView<E: Entity> {
    items: Vec<E>,
    filtered: Vec<usize>,
    page_rows: Vec<usize>,
    search: String,
    pages: PageState,
    sort: Sort<E::SortField>,
    scope: SortScope,
    draft: E::Draft,
    loaded: bool,
    load_error: Option<RemoteError>,
    issued: u64,
    pending: PendingActions,
}

impl<E: Entity> Default for ListView<E> {
    fn default() -> Self {
        Self::new(PageState::default().size(), SortScope::default())
    }
}

impl<E: Entity> ListView<E> {
    pub fn new(page_size: NonZeroUsize, scope: SortScope) -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            page_rows: Vec::new(),
            search: String::new(),
            pages: PageState::new(page_size),
            sort: Sort {
                field: E::SortField::default(),
                direction: SortDirection::Ascending,
            },
            scope,
            draft: E::Draft::default(),
            loaded: false,
            load_error: None,
            issued: 0,
            pending: PendingActions::default(),
        }
    }

    // ---- loading -------------------------------------------------------

    /// Fetches the whole collection and replaces the snapshot.
    ///
    /// On failure the previous snapshot stays and the error is kept in
    /// [`load_error`](Self::load_error) as well as returned.
    pub async fn load<R>(&mut self, remote: &R) -> Result<LoadOutcome, ListError>
    where
        R: RemoteCollection<Entity = E>,
    {
        let ticket = self.begin_load();
        let result = remote.list().await;
        self.finish_load(ticket, result)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Applies the response of `ticket`, unless a newer load was issued since.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<E>, RemoteError>,
    ) -> Result<LoadOutcome, ListError> {
        if ticket.0 != self.issued {
            tracing::debug!(
                entity = E::LABEL,
                ticket = ticket.0,
                latest = self.issued,
                "discarding stale load response"
            );
            return Ok(LoadOutcome::Discarded);
        }

        match result {
            Ok(items) => {
                tracing::debug!(entity = E::LABEL, count = items.len(), "collection loaded");
                self.items = items;
                self.loaded = true;
                self.load_error = None;
                self.search.clear();
                self.filtered = (0..self.items.len()).collect();
                self.pages.clamp(self.filtered.len());
                self.refresh_page();
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                tracing::warn!(entity = E::LABEL, "failed to load collection: {err}");
                self.loaded = true;
                self.load_error = Some(err.clone());
                Err(err.into())
            }
        }
    }

    // ---- browsing ------------------------------------------------------

    pub fn set_search_term(&mut self, term: &str) {
        self.search = term.to_string();
        self.apply_filter();
        self.pages.reset();
        self.refresh_page();
    }

    pub fn set_page_size(&mut self, size: NonZeroUsize) {
        self.pages.set_size(size);
        self.refresh_page();
    }

    /// Returns `false` when the clamped target is the current page.
    pub fn go_to_page(&mut self, target: PageTarget) -> bool {
        if !self.pages.go_to(target, self.filtered.len()) {
            return false;
        }
        self.refresh_page();
        true
    }

    /// Sorting by the current field flips the direction; a new field starts
    /// ascending.
    pub fn set_sort(&mut self, field: E::SortField) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = Sort {
                field,
                direction: SortDirection::Ascending,
            };
        }
        self.refresh_page();
    }

    pub fn set_sort_scope(&mut self, scope: SortScope) {
        self.scope = scope;
        self.refresh_page();
    }

    // ---- edit buffer ---------------------------------------------------

    pub fn begin_create(&mut self) {
        self.draft = E::Draft::default();
    }

    pub fn begin_edit(&mut self, page_index: usize) -> Result<(), ListError> {
        let record = self.page_row(page_index)?;
        self.draft = record.to_draft();
        Ok(())
    }

    /// Validates the buffer, creates the record and reloads.
    ///
    /// A validation failure sends nothing. A remote failure keeps the buffer so
    /// the form can be resubmitted.
    pub async fn submit_create<R>(&mut self, remote: &R) -> Result<E, ListError>
    where
        R: RemoteCollection<Entity = E>,
    {
        let payload = self.draft.to_new()?;
        let _pending = self.pending.begin(Action::Create, self.draft.id())?;

        let created = remote.create(&payload).await.inspect_err(|err| {
            tracing::warn!(entity = E::LABEL, "create failed: {err}");
        })?;
        tracing::info!(entity = E::LABEL, id = created.id(), "record created");

        self.draft = E::Draft::default();
        self.reload(remote).await;
        Ok(created)
    }

    /// Like [`submit_create`](Self::submit_create) for an existing record.
    pub async fn submit_update<R>(&mut self, remote: &R) -> Result<E, ListError>
    where
        R: RemoteCollection<Entity = E>,
    {
        let (id, payload) = self.draft.to_update()?;
        let _pending = self.pending.begin(Action::Update, id)?;

        let updated = remote.update(id, &payload).await.inspect_err(|err| {
            tracing::warn!(entity = E::LABEL, id, "update failed: {err}");
        })?;
        tracing::info!(entity = E::LABEL, id, "record updated");

        self.draft = E::Draft::default();
        self.reload(remote).await;
        Ok(updated)
    }

    /// Deletes `id` once `confirmer` agrees, then reloads.
    pub async fn request_delete<R, C>(
        &mut self,
        id: EntityId,
        remote: &R,
        confirmer: &C,
    ) -> Result<DeleteOutcome, ListError>
    where
        R: RemoteCollection<Entity = E>,
        C: Confirmer,
    {
        let _pending = self.pending.begin(Action::Delete, id)?;

        if !confirmer.confirm_destructive(DELETE_PROMPT).await {
            tracing::debug!(entity = E::LABEL, id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        remote.delete(id).await.inspect_err(|err| {
            tracing::warn!(entity = E::LABEL, id, "delete failed: {err}");
        })?;
        tracing::info!(entity = E::LABEL, id, "record deleted");

        self.reload(remote).await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Fetches a fresh copy of the record shown at `page_index`.
    pub async fn fetch_detail<R>(&self, page_index: usize, remote: &R) -> Result<E, ListError>
    where
        R: RemoteCollection<Entity = E>,
    {
        let id = self.page_row(page_index)?.id();
        Ok(remote.get(id).await?)
    }

    async fn reload<R>(&mut self, remote: &R)
    where
        R: RemoteCollection<Entity = E>,
    {
        // The mutation went through; a failed refresh is reported via `load_error`.
        let _ = self.load(remote).await;
    }

    // ---- read side -----------------------------------------------------

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn filtered(&self) -> impl Iterator<Item = &E> + '_ {
        self.filtered.iter().map(|idx| &self.items[*idx])
    }

    pub fn page(&self) -> impl Iterator<Item = &E> + '_ {
        self.page_rows.iter().map(|idx| &self.items[*idx])
    }

    pub fn page_len(&self) -> usize {
        self.page_rows.len()
    }

    pub fn page_row(&self, page_index: usize) -> Result<&E, ListError> {
        self.page_rows
            .get(page_index)
            .map(|idx| &self.items[*idx])
            .ok_or(ListError::IndexOutOfRange {
                index: page_index,
                len: self.page_rows.len(),
            })
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered.len(), self.pages.size())
    }

    pub fn current_page(&self) -> usize {
        self.pages.page()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pages.size()
    }

    pub fn summary(&self) -> Summary {
        self.pages.summary(self.filtered.len())
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Sort<E::SortField> {
        self.sort
    }

    pub fn sort_scope(&self) -> SortScope {
        self.scope
    }

    pub fn draft(&self) -> &E::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut E::Draft {
        &mut self.draft
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&RemoteError> {
        self.load_error.as_ref()
    }

    pub fn pending(&self) -> &PendingActions {
        &self.pending
    }

    // ---- derived state -------------------------------------------------

    fn apply_filter(&mut self) {
        let needle = self.search.to_lowercase();
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || item.matches(&needle))
            .map(|(idx, _)| idx)
            .collect();
    }

    fn refresh_page(&mut self) {
        let Sort { field, direction } = self.sort;
        let items = &self.items;
        let order = |a: &usize, b: &usize| direction.apply(items[*a].compare(&items[*b], field));

        match self.scope {
            SortScope::Page => {
                let range = self.pages.range(self.filtered.len());
                self.page_rows = self.filtered[range].to_vec();
                self.page_rows.sort_by(order);
            }
            SortScope::Filtered => {
                let mut sorted = self.filtered.clone();
                sorted.sort_by(order);
                let range = self.pages.range(sorted.len());
                self.page_rows = sorted[range].to_vec();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use api_types::pokemon::Pokemon;

    use super::*;
    use crate::pokemon::PokemonSortField;

    fn pokemon(id: EntityId, name: &str) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            image: None,
        }
    }

    fn loaded(items: Vec<Pokemon>, size: usize, scope: SortScope) -> ListView<Pokemon> {
        let mut view = ListView::new(NonZeroUsize::new(size).unwrap(), scope);
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(items)).unwrap();
        view
    }

    fn page_names(view: &ListView<Pokemon>) -> Vec<&str> {
        view.page().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn page_scope_sorts_visible_rows_only() {
        let items = vec![
            pokemon(1, "Charmander"),
            pokemon(2, "Abra"),
            pokemon(3, "Zubat"),
            pokemon(4, "Bulbasaur"),
        ];
        let mut view = loaded(items, 2, SortScope::Page);
        view.set_sort(PokemonSortField::Name);
        assert_eq!(page_names(&view), vec!["Abra", "Charmander"]);

        view.go_to_page(PageTarget::Next);
        assert_eq!(page_names(&view), vec!["Bulbasaur", "Zubat"]);
    }

    #[test]
    fn filtered_scope_sorts_before_slicing() {
        let items = vec![
            pokemon(1, "Charmander"),
            pokemon(2, "Abra"),
            pokemon(3, "Zubat"),
            pokemon(4, "Bulbasaur"),
        ];
        let mut view = loaded(items, 2, SortScope::Filtered);
        view.set_sort(PokemonSortField::Name);
        assert_eq!(page_names(&view), vec!["Abra", "Bulbasaur"]);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut view: ListView<Pokemon> = ListView::default();
        let older = view.begin_load();
        let newer = view.begin_load();

        let outcome = view.finish_load(newer, Ok(vec![pokemon(1, "Mew")])).unwrap();
        assert_eq!(outcome, LoadOutcome::Applied);

        let outcome = view
            .finish_load(older, Ok(vec![pokemon(1, "Mew"), pokemon(2, "Mewtwo")]))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Discarded);
        assert_eq!(view.items().len(), 1);
    }

    #[test]
    fn failed_load_keeps_snapshot() {
        let mut view = loaded(vec![pokemon(1, "Mew")], 5, SortScope::Page);
        let ticket = view.begin_load();
        let err = view
            .finish_load(ticket, Err(RemoteError::new(500, "boom")))
            .unwrap_err();
        assert_eq!(err, ListError::Remote(RemoteError::new(500, "boom")));
        assert_eq!(view.items().len(), 1);
        assert_eq!(view.load_error().map(|e| e.message.as_str()), Some("boom"));
    }

    #[test]
    fn begin_edit_out_of_range() {
        let mut view = loaded(vec![pokemon(1, "Mew")], 5, SortScope::Page);
        assert_eq!(
            view.begin_edit(1).unwrap_err(),
            ListError::IndexOutOfRange { index: 1, len: 1 }
        );
        view.begin_edit(0).unwrap();
        assert_eq!(view.draft().name, "Mew");
    }
}
