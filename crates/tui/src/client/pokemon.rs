use api_types::{
    EntityId,
    pokemon::{
        IMAGE_FIELD, ImageUpload, METHOD_OVERRIDE_FIELD, NAME_FIELD, Pokemon, PokemonNew,
        PokemonUpdate,
    },
};
use listing::{RemoteCollection, RemoteError};
use reqwest::multipart::{Form, Part};

use super::{Client, expect_list, expect_record, expect_success, transport};

const COLLECTION: &str = "api/pokemon";

/// `/api/pokemon`. Writes are multipart because they may carry an image;
/// updates go out as POST with `_method=PUT`.
#[derive(Debug, Clone)]
pub struct PokedexClient {
    client: Client,
}

impl PokedexClient {
    pub(super) fn new(client: Client) -> Self {
        Self { client }
    }

    fn member(&self, id: EntityId) -> Result<reqwest::Url, RemoteError> {
        self.client.endpoint(&format!("{COLLECTION}/{id}"))
    }

    async fn form(name: &str, image: Option<&ImageUpload>) -> Result<Form, RemoteError> {
        let mut form = Form::new().text(NAME_FIELD, name.to_string());
        if let Some(image) = image {
            let bytes = tokio::fs::read(&image.path).await.map_err(|err| {
                RemoteError::local_input(format!(
                    "cannot read image {}: {err}",
                    image.path.display()
                ))
            })?;
            form = form.part(IMAGE_FIELD, Part::bytes(bytes).file_name(image.file_name()));
        }
        Ok(form)
    }
}

impl RemoteCollection for PokedexClient {
    type Entity = Pokemon;

    async fn list(&self) -> Result<Vec<Pokemon>, RemoteError> {
        let res = self
            .client
            .http()
            .get(self.client.endpoint(COLLECTION)?)
            .send()
            .await
            .map_err(transport)?;
        expect_list(res).await
    }

    async fn get(&self, id: EntityId) -> Result<Pokemon, RemoteError> {
        let res = self
            .client
            .http()
            .get(self.member(id)?)
            .send()
            .await
            .map_err(transport)?;
        expect_record(res).await
    }

    async fn create(&self, payload: &PokemonNew) -> Result<Pokemon, RemoteError> {
        let form = Self::form(&payload.name, Some(&payload.image)).await?;
        let res = self
            .client
            .http()
            .post(self.client.endpoint(COLLECTION)?)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        expect_record(res).await
    }

    async fn update(&self, id: EntityId, payload: &PokemonUpdate) -> Result<Pokemon, RemoteError> {
        let form = Self::form(&payload.name, payload.image.as_ref())
            .await?
            .text(METHOD_OVERRIDE_FIELD, "PUT");
        let res = self
            .client
            .http()
            .post(self.member(id)?)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        expect_record(res).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), RemoteError> {
        let res = self
            .client
            .http()
            .delete(self.member(id)?)
            .send()
            .await
            .map_err(transport)?;
        expect_success(res).await
    }
}
