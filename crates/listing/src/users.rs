use std::cmp::Ordering;

use api_types::{
    EntityId,
    user::{User, UserNew, UserUpdate},
};

use crate::{
    entity::{Draft, Entity, compare_text, is_blank},
    error::ValidationError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortField {
    #[default]
    Id,
    Name,
    Email,
}

impl UserSortField {
    pub const ALL: [Self; 3] = [Self::Id, Self::Name, Self::Email];

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Email => "Email",
        }
    }
}

impl Entity for User {
    type SortField = UserSortField;
    type Draft = UserDraft;

    const LABEL: &'static str = "user";

    fn id(&self) -> EntityId {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.id.to_string().contains(needle)
    }

    fn compare(&self, other: &Self, field: UserSortField) -> Ordering {
        match field {
            UserSortField::Id => self.id.cmp(&other.id),
            UserSortField::Name => compare_text(&self.name, &other.name),
            UserSortField::Email => compare_text(&self.email, &other.email),
        }
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Draft for UserDraft {
    type New = UserNew;
    type Update = UserUpdate;

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_new(&self) -> Result<UserNew, ValidationError> {
        ValidationError::check(&[
            ("name", !is_blank(&self.name)),
            ("email", !is_blank(&self.email)),
            ("password", !self.password.is_empty()),
        ])?;
        Ok(UserNew {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    fn to_update(&self) -> Result<(EntityId, UserUpdate), ValidationError> {
        ValidationError::check(&[
            ("id", self.id != 0),
            ("name", !is_blank(&self.name)),
            ("email", !is_blank(&self.email)),
        ])?;
        let password = (!self.password.is_empty()).then(|| self.password.clone());
        Ok((
            self.id,
            UserUpdate {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                password,
            },
        ))
    }
}
