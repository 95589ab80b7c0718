use api_types::{pokemon::Pokemon, user::User};
use listing::{Draft, Entity, PokemonDraft, PokemonSortField, UserDraft, UserSortField};

/// Columns, sort keys and copy for a collection shown as a table.
pub trait TableEntity: Entity<Draft: FormDraft> {
    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Sort field bound to the 1-based column key, if that column sorts.
    fn sort_field(column: usize) -> Option<Self::SortField>;

    fn column_of(field: Self::SortField) -> usize;

    fn detail(&self) -> Vec<(&'static str, String)>;
}

/// Text inputs of an edit buffer, in focus order.
pub trait FormDraft: Draft {
    const FIELDS: &'static [&'static str];
    /// Field rendered masked.
    const SECRET: Option<usize> = None;

    fn field(&self, idx: usize) -> &str;

    fn field_mut(&mut self, idx: usize) -> Option<&mut String>;

    /// Extra read-only line shown under the inputs.
    fn note(&self) -> Option<String> {
        None
    }
}

impl TableEntity for Pokemon {
    const TITLE: &'static str = "Pokémon";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Image"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.image.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }

    fn sort_field(column: usize) -> Option<PokemonSortField> {
        PokemonSortField::ALL.get(column.checked_sub(1)?).copied()
    }

    fn column_of(field: PokemonSortField) -> usize {
        match field {
            PokemonSortField::Id => 0,
            PokemonSortField::Name => 1,
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Image", self.image.clone().unwrap_or_else(|| "-".to_string())),
        ]
    }
}

impl TableEntity for User {
    const TITLE: &'static str = "Users";
    const COLUMNS: &'static [&'static str] = &["ID", "Name", "Email"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.email.clone()]
    }

    fn sort_field(column: usize) -> Option<UserSortField> {
        UserSortField::ALL.get(column.checked_sub(1)?).copied()
    }

    fn column_of(field: UserSortField) -> usize {
        match field {
            UserSortField::Id => 0,
            UserSortField::Name => 1,
            UserSortField::Email => 2,
        }
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Email", self.email.clone()),
        ]
    }
}

impl FormDraft for PokemonDraft {
    const FIELDS: &'static [&'static str] = &["Name", "Image file"];

    fn field(&self, idx: usize) -> &str {
        match idx {
            0 => &self.name,
            1 => &self.image_path,
            _ => "",
        }
    }

    fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.name),
            1 => Some(&mut self.image_path),
            _ => None,
        }
    }

    fn note(&self) -> Option<String> {
        self.current_image
            .as_ref()
            .map(|image| format!("Current image: {image} (leave file empty to keep)"))
    }
}

impl FormDraft for UserDraft {
    const FIELDS: &'static [&'static str] = &["Name", "Email", "Password"];
    const SECRET: Option<usize> = Some(2);

    fn field(&self, idx: usize) -> &str {
        match idx {
            0 => &self.name,
            1 => &self.email,
            2 => &self.password,
            _ => "",
        }
    }

    fn field_mut(&mut self, idx: usize) -> Option<&mut String> {
        match idx {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.password),
            _ => None,
        }
    }

    fn note(&self) -> Option<String> {
        (self.id != 0).then(|| "Leave password empty to keep the current one".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_keys_map_to_sort_fields() {
        assert_eq!(<User as TableEntity>::sort_field(0), None);
        assert_eq!(<User as TableEntity>::sort_field(3), Some(UserSortField::Email));
        assert_eq!(<User as TableEntity>::sort_field(4), None);
        assert_eq!(<Pokemon as TableEntity>::sort_field(2), Some(PokemonSortField::Name));
        assert_eq!(<Pokemon as TableEntity>::sort_field(3), None);
        for field in UserSortField::ALL {
            let column = <User as TableEntity>::column_of(field);
            assert_eq!(<User as TableEntity>::sort_field(column + 1), Some(field));
        }
    }

    #[test]
    fn form_fields_write_through() {
        let mut draft = UserDraft::default();
        for (idx, value) in ["Ash", "ash@kanto.test", "pikachu"].iter().enumerate() {
            draft.field_mut(idx).unwrap().push_str(value);
        }
        assert_eq!(draft.field(1), "ash@kanto.test");
        assert_eq!(draft.password, "pikachu");
        assert!(draft.field_mut(3).is_none());
    }
}
