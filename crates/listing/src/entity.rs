use std::{cmp::Ordering, fmt};

use api_types::EntityId;

use crate::error::ValidationError;

/// A record type browsable through a [`ListView`](crate::ListView).
pub trait Entity: Clone + fmt::Debug {
    type SortField: Copy + Eq + Default + fmt::Debug;
    type Draft: Draft;

    /// Singular name used in prompts and notifications.
    const LABEL: &'static str;

    fn id(&self) -> EntityId;

    /// `needle` is already lowercased and non-empty.
    fn matches(&self, needle: &str) -> bool;

    /// Ascending comparison on `field`.
    fn compare(&self, other: &Self, field: Self::SortField) -> Ordering;

    /// Fresh edit buffer holding a copy of this record.
    fn to_draft(&self) -> Self::Draft;
}

/// Edit buffer behind the create and edit forms.
///
/// `Default` is the empty buffer `beginCreate` starts from.
pub trait Draft: Clone + Default + fmt::Debug {
    type New;
    type Update;

    /// `0` for a buffer that was never loaded from a record.
    fn id(&self) -> EntityId;

    fn to_new(&self) -> Result<Self::New, ValidationError>;

    fn to_update(&self) -> Result<(EntityId, Self::Update), ValidationError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Which rows a sort reorders.
///
/// `Page` sorts the visible page only: moving to another page slices the
/// unsorted filtered rows again and sorts that slice. `Filtered` sorts every
/// filtered row before slicing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortScope {
    #[default]
    Page,
    Filtered,
}

/// Case-insensitive ordering used for text columns.
pub(crate) fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
