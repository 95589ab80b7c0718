use chrono::{DateTime, Local};
use listing::{
    Answered, DeleteOutcome, EntityId, ListError, ListView, PageTarget, RemoteCollection,
    RemoteErrorKind, SortScope, next_page_size,
};

use crate::{
    app::{
        ToastState,
        entities::{FormDraft, TableEntity},
    },
    ui::keymap::AppAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Browse,
    Search,
    Create,
    Edit,
    Detail,
    ConfirmDelete(EntityId),
}

/// One dashboard section: the list view model plus what the screen adds on
/// top of it (selection, open dialog, focused form field).
#[derive(Debug)]
pub struct ListScreen<E: TableEntity> {
    pub view: ListView<E>,
    pub mode: ListMode,
    pub selected: usize,
    pub focus: usize,
    pub detail: Option<E>,
    pub last_refresh: Option<DateTime<Local>>,
}

impl<E: TableEntity> ListScreen<E> {
    pub fn new(page_size: std::num::NonZeroUsize, scope: SortScope) -> Self {
        Self {
            view: ListView::new(page_size, scope),
            mode: ListMode::Browse,
            selected: 0,
            focus: 0,
            detail: None,
            last_refresh: None,
        }
    }

    /// Reloads the collection; a failure becomes an error toast.
    pub async fn reload<R>(&mut self, remote: &R) -> Option<ToastState>
    where
        R: RemoteCollection<Entity = E>,
    {
        match self.view.load(remote).await {
            Ok(_) => {
                self.last_refresh = Some(Local::now());
                self.clamp_selection();
                None
            }
            Err(err) => Some(ToastState::error(format!(
                "Could not load {}: {}",
                E::TITLE.to_lowercase(),
                remote_message(&err)
            ))),
        }
    }

    pub async fn handle<R>(&mut self, action: AppAction, remote: &R) -> Option<ToastState>
    where
        R: RemoteCollection<Entity = E>,
    {
        match self.mode {
            ListMode::Browse => self.handle_browse(action, remote).await,
            ListMode::Search => {
                self.handle_search(action);
                None
            }
            ListMode::Create | ListMode::Edit => self.handle_form(action, remote).await,
            ListMode::Detail => {
                if matches!(
                    action,
                    AppAction::Cancel | AppAction::Submit | AppAction::Input('b')
                ) {
                    self.detail = None;
                    self.mode = ListMode::Browse;
                }
                None
            }
            ListMode::ConfirmDelete(id) => self.handle_confirm(id, action, remote).await,
        }
    }

    async fn handle_browse<R>(&mut self, action: AppAction, remote: &R) -> Option<ToastState>
    where
        R: RemoteCollection<Entity = E>,
    {
        match action {
            AppAction::Up | AppAction::Input('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppAction::Down | AppAction::Input('j') => {
                self.selected = (self.selected + 1).min(self.view.page_len().saturating_sub(1));
            }
            AppAction::Left | AppAction::Input('p') => self.go_to(PageTarget::Previous),
            AppAction::Right | AppAction::Input('n') => self.go_to(PageTarget::Next),
            AppAction::Home | AppAction::Input('g') => self.go_to(PageTarget::First),
            AppAction::End | AppAction::Input('G') => self.go_to(PageTarget::Last),
            AppAction::Input('/') => self.mode = ListMode::Search,
            AppAction::Input('s') => {
                self.view.set_page_size(next_page_size(self.view.page_size()));
                self.selected = 0;
            }
            AppAction::Input(ch @ '1'..='9') => {
                let column = ch.to_digit(10).unwrap_or(0) as usize;
                if let Some(field) = E::sort_field(column) {
                    self.view.set_sort(field);
                }
            }
            AppAction::Input('c') => {
                self.view.begin_create();
                self.focus = 0;
                self.mode = ListMode::Create;
            }
            AppAction::Input('e') => match self.view.begin_edit(self.selected) {
                Ok(()) => {
                    self.focus = 0;
                    self.mode = ListMode::Edit;
                }
                Err(err) => tracing::warn!(entity = E::LABEL, "edit ignored: {err}"),
            },
            AppAction::Input('d') | AppAction::Delete => match self.view.page_row(self.selected) {
                Ok(row) => self.mode = ListMode::ConfirmDelete(row.id()),
                Err(err) => tracing::warn!(entity = E::LABEL, "delete ignored: {err}"),
            },
            AppAction::Submit => match self.view.fetch_detail(self.selected, remote).await {
                Ok(record) => {
                    self.detail = Some(record);
                    self.mode = ListMode::Detail;
                }
                Err(err @ ListError::IndexOutOfRange { .. }) => {
                    tracing::warn!(entity = E::LABEL, "detail ignored: {err}");
                }
                Err(err) => {
                    return Some(ToastState::error(format!(
                        "Could not open the {}: {}",
                        E::LABEL,
                        remote_message(&err)
                    )));
                }
            },
            AppAction::Input('r') => return self.reload(remote).await,
            _ => {}
        }
        None
    }

    fn handle_search(&mut self, action: AppAction) {
        let mut term = self.view.search_term().to_string();
        match action {
            AppAction::Input(ch) => term.push(ch),
            AppAction::Backspace => {
                term.pop();
            }
            AppAction::Submit => {
                self.mode = ListMode::Browse;
                return;
            }
            AppAction::Cancel => {
                term.clear();
                self.mode = ListMode::Browse;
            }
            _ => return,
        }
        self.view.set_search_term(&term);
        self.selected = 0;
    }

    async fn handle_form<R>(&mut self, action: AppAction, remote: &R) -> Option<ToastState>
    where
        R: RemoteCollection<Entity = E>,
    {
        let fields = <E::Draft as FormDraft>::FIELDS.len();
        match action {
            AppAction::NextField | AppAction::Down => self.focus = (self.focus + 1) % fields,
            AppAction::PrevField | AppAction::Up => self.focus = (self.focus + fields - 1) % fields,
            AppAction::Input(ch) => {
                if let Some(field) = self.view.draft_mut().field_mut(self.focus) {
                    field.push(ch);
                }
            }
            AppAction::Backspace => {
                if let Some(field) = self.view.draft_mut().field_mut(self.focus) {
                    field.pop();
                }
            }
            AppAction::Cancel => self.mode = ListMode::Browse,
            AppAction::Submit => return Some(self.submit(remote).await),
            _ => {}
        }
        None
    }

    async fn submit<R>(&mut self, remote: &R) -> ToastState
    where
        R: RemoteCollection<Entity = E>,
    {
        let creating = self.mode == ListMode::Create;
        let result = if creating {
            self.view.submit_create(remote).await
        } else {
            self.view.submit_update(remote).await
        };

        match result {
            Ok(_) => {
                self.mode = ListMode::Browse;
                self.last_refresh = Some(Local::now());
                self.clamp_selection();
                let verb = if creating { "created" } else { "updated" };
                ToastState::success(format!("The {} has been {verb} successfully.", E::LABEL))
            }
            Err(ListError::Validation(err)) => {
                let lead = if creating {
                    "Please fill in all fields"
                } else {
                    "Please fill in all required fields"
                };
                ToastState::warning(format!("{lead} ({}).", err.missing.join(", ")))
            }
            Err(err) => {
                let verb = if creating { "creating" } else { "updating" };
                ToastState::error(format!(
                    "There was a problem {verb} the {}: {}",
                    E::LABEL,
                    remote_message(&err)
                ))
            }
        }
    }

    async fn handle_confirm<R>(
        &mut self,
        id: EntityId,
        action: AppAction,
        remote: &R,
    ) -> Option<ToastState>
    where
        R: RemoteCollection<Entity = E>,
    {
        let answer = match action {
            AppAction::Input('y' | 'Y') => true,
            AppAction::Input('n' | 'N') | AppAction::Cancel => false,
            _ => return None,
        };
        self.mode = ListMode::Browse;

        match self.view.request_delete(id, remote, &Answered(answer)).await {
            Ok(DeleteOutcome::Deleted) => {
                self.last_refresh = Some(Local::now());
                self.clamp_selection();
                Some(ToastState::success(format!(
                    "The {} has been deleted successfully.",
                    E::LABEL
                )))
            }
            Ok(DeleteOutcome::Declined) => None,
            Err(err) => Some(ToastState::error(format!(
                "An error occurred while deleting the {}: {}",
                E::LABEL,
                remote_message(&err)
            ))),
        }
    }

    fn go_to(&mut self, target: PageTarget) {
        if self.view.go_to_page(target) {
            self.selected = 0;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.view.page_len().saturating_sub(1));
    }
}

fn remote_message(err: &ListError) -> String {
    match err {
        ListError::Remote(remote) if remote.kind() == RemoteErrorKind::Transport => {
            format!("server unreachable ({})", remote.message)
        }
        ListError::Remote(remote) => remote.message.clone(),
        other => other.to_string(),
    }
}
