use serde::{Deserialize, Serialize};

/// Server-assigned record identifier. `0` never names a stored record.
pub type EntityId = u64;

/// Error body returned by the API on non-2xx responses.
///
/// The backend uses `message`; older endpoints answered with `error`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "error")]
    pub message: String,
}

/// Body of a create/update/get response.
///
/// Some endpoints return the record itself, others wrap it as
/// `{"message": ..., "data": {...}}` (or under the entity name).
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped {
        #[serde(alias = "user", alias = "pokemon")]
        data: T,
    },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(inner) => inner,
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct User {
        pub id: EntityId,
        pub name: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// Request body for `PUT /api/users/{id}`.
    ///
    /// `password` is left out of the JSON entirely when `None`; the server keeps
    /// the stored one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: String,
        pub email: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub password: Option<String>,
    }
}

pub mod pokemon {
    use std::path::PathBuf;

    use super::*;

    /// Multipart field carrying the name.
    pub const NAME_FIELD: &str = "nombre";
    /// Multipart field carrying the image file.
    pub const IMAGE_FIELD: &str = "imagen";
    /// Form field that makes the backend treat a POST as an update.
    pub const METHOD_OVERRIDE_FIELD: &str = "_method";

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Pokemon {
        pub id: EntityId,
        #[serde(rename = "nombre")]
        pub name: String,
        /// Server-side path or URL of the stored image.
        #[serde(rename = "imagen", default)]
        pub image: Option<String>,
    }

    /// A local file to be sent as the image part of a multipart request.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ImageUpload {
        pub path: PathBuf,
    }

    impl ImageUpload {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// File name sent alongside the bytes; falls back to `image` for paths
        /// without a final component.
        pub fn file_name(&self) -> String {
            self.path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string())
        }
    }

    #[derive(Clone, Debug)]
    pub struct PokemonNew {
        pub name: String,
        pub image: ImageUpload,
    }

    /// Update payload; the image part is only sent when a new file was picked.
    #[derive(Clone, Debug)]
    pub struct PokemonUpdate {
        pub name: String,
        pub image: Option<ImageUpload>,
    }
}

pub mod auth {
    use super::*;
    use crate::user::User;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    /// Response body of `POST /api/login`. A missing `user` means the login failed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        #[serde(default)]
        pub user: Option<User>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_update_omits_missing_password() {
        let body = user::UserUpdate {
            name: "Ash".to_string(),
            email: "ash@kanto.test".to_string(),
            password: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "Ash", "email": "ash@kanto.test" })
        );
    }

    #[test]
    fn pokemon_uses_backend_field_names() {
        let raw = r#"{"id":25,"nombre":"Pikachu","imagen":"images/pikachu.png","created_at":null}"#;
        let parsed: pokemon::Pokemon = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, 25);
        assert_eq!(parsed.name, "Pikachu");
        assert_eq!(parsed.image.as_deref(), Some("images/pikachu.png"));
    }

    #[test]
    fn error_response_accepts_legacy_key() {
        let parsed: ErrorResponse = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(parsed.message, "nope");
    }

    #[test]
    fn login_response_without_user_parses_as_none() {
        let parsed: auth::LoginResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(parsed.user.is_none());
    }

    #[test]
    fn envelope_accepts_bare_and_wrapped_records() {
        let bare: Envelope<user::User> =
            serde_json::from_str(r#"{"id":1,"name":"Ash","email":"ash@kanto.test"}"#).unwrap();
        assert_eq!(bare.into_inner().name, "Ash");

        let wrapped: Envelope<pokemon::Pokemon> = serde_json::from_str(
            r#"{"message":"created","pokemon":{"id":4,"nombre":"Charmander","imagen":null}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_inner().id, 4);
    }

    #[test]
    fn image_upload_file_name() {
        let upload = pokemon::ImageUpload::new("/tmp/sprites/bulbasaur.png");
        assert_eq!(upload.file_name(), "bulbasaur.png");
        assert_eq!(pokemon::ImageUpload::new("/").file_name(), "image");
    }
}
