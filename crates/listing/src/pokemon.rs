use std::cmp::Ordering;

use api_types::{
    EntityId,
    pokemon::{ImageUpload, Pokemon, PokemonNew, PokemonUpdate},
};

use crate::{
    entity::{Draft, Entity, compare_text, is_blank},
    error::ValidationError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PokemonSortField {
    #[default]
    Id,
    Name,
}

impl PokemonSortField {
    pub const ALL: [Self; 2] = [Self::Id, Self::Name];

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
        }
    }
}

impl Entity for Pokemon {
    type SortField = PokemonSortField;
    type Draft = PokemonDraft;

    const LABEL: &'static str = "Pokémon";

    fn id(&self) -> EntityId {
        self.id
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.id.to_string().contains(needle)
    }

    fn compare(&self, other: &Self, field: PokemonSortField) -> Ordering {
        match field {
            PokemonSortField::Id => self.id.cmp(&other.id),
            PokemonSortField::Name => compare_text(&self.name, &other.name),
        }
    }

    fn to_draft(&self) -> PokemonDraft {
        PokemonDraft {
            id: self.id,
            name: self.name.clone(),
            current_image: self.image.clone(),
            image_path: String::new(),
        }
    }
}

/// Pokémon form buffer. `image_path` is a local file picked for upload;
/// `current_image` is the stored image, shown but never sent back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonDraft {
    pub id: EntityId,
    pub name: String,
    pub current_image: Option<String>,
    pub image_path: String,
}

impl PokemonDraft {
    fn upload(&self) -> Option<ImageUpload> {
        let path = self.image_path.trim();
        (!path.is_empty()).then(|| ImageUpload::new(path))
    }
}

impl Draft for PokemonDraft {
    type New = PokemonNew;
    type Update = PokemonUpdate;

    fn id(&self) -> EntityId {
        self.id
    }

    fn to_new(&self) -> Result<PokemonNew, ValidationError> {
        let upload = self.upload();
        ValidationError::check(&[
            ("name", !is_blank(&self.name)),
            ("image", upload.is_some()),
        ])?;
        match upload {
            Some(image) => Ok(PokemonNew {
                name: self.name.trim().to_string(),
                image,
            }),
            None => Err(ValidationError {
                missing: vec!["image"],
            }),
        }
    }

    fn to_update(&self) -> Result<(EntityId, PokemonUpdate), ValidationError> {
        ValidationError::check(&[("id", self.id != 0), ("name", !is_blank(&self.name))])?;
        Ok((
            self.id,
            PokemonUpdate {
                name: self.name.trim().to_string(),
                image: self.upload(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pokemon(id: EntityId, name: &str) -> Pokemon {
        Pokemon {
            id,
            name: name.to_string(),
            image: Some(format!("images/{id}.png")),
        }
    }

    #[test]
    fn matches_name_case_insensitively_or_id() {
        let pikachu = pokemon(25, "Pikachu");
        assert!(pikachu.matches("pika"));
        assert!(pikachu.matches("25"));
        assert!(pikachu.matches("2"));
        assert!(!pikachu.matches("bulba"));
    }

    #[test]
    fn create_requires_name_and_image() {
        let err = PokemonDraft::default().to_new().unwrap_err();
        assert_eq!(err.missing, vec!["name", "image"]);

        let draft = PokemonDraft {
            name: "Eevee".to_string(),
            image_path: "  /tmp/eevee.png ".to_string(),
            ..PokemonDraft::default()
        };
        let payload = draft.to_new().unwrap();
        assert_eq!(payload.name, "Eevee");
        assert_eq!(payload.image.file_name(), "eevee.png");
    }

    #[test]
    fn update_keeps_image_optional() {
        let draft = pokemon(133, "Eevee").to_draft();
        assert_eq!(draft.current_image.as_deref(), Some("images/133.png"));
        let (id, payload) = draft.to_update().unwrap();
        assert_eq!(id, 133);
        assert!(payload.image.is_none());
    }

    #[test]
    fn update_rejects_blank_name() {
        let mut draft = pokemon(1, "Bulbasaur").to_draft();
        draft.name = "   ".to_string();
        assert_eq!(draft.to_update().unwrap_err().missing, vec!["name"]);
    }
}
