//! Client-side list management for the admin console.
//!
//! A [`ListView`] keeps a local copy of a server-owned collection and derives a
//! searchable, sortable, paginated page from it. Create, update and delete go
//! through a [`RemoteCollection`] and always end with a full reload, so the
//! local copy is never patched by hand.
pub use api_types::EntityId;
pub use entity::{Draft, Entity, SortDirection, SortScope};
pub use error::{
    GENERIC_REMOTE_MESSAGE, ListError, RemoteError, RemoteErrorKind, ValidationError,
};
pub use list::{DELETE_PROMPT, DeleteOutcome, ListView, LoadOutcome, LoadTicket, Sort};
pub use pages::{PAGE_SIZES, PageState, PageTarget, Summary, next_page_size, total_pages};
pub use pending::{Action, PendingActions, PendingToken};
pub use pokemon::{PokemonDraft, PokemonSortField};
pub use remote::{Answered, Confirmer, RemoteCollection};
pub use users::{UserDraft, UserSortField};

mod entity;
mod error;
mod list;
mod pages;
mod pending;
mod pokemon;
mod remote;
mod users;
