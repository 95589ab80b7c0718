use api_types::{
    EntityId,
    user::{User, UserNew, UserUpdate},
};
use listing::{RemoteCollection, RemoteError};

use super::{Client, expect_list, expect_record, expect_success, transport};

const COLLECTION: &str = "api/users";

/// `/api/users`, JSON bodies throughout.
#[derive(Debug, Clone)]
pub struct UsersClient {
    client: Client,
}

impl UsersClient {
    pub(super) fn new(client: Client) -> Self {
        Self { client }
    }

    fn member(&self, id: EntityId) -> Result<reqwest::Url, RemoteError> {
        self.client.endpoint(&format!("{COLLECTION}/{id}"))
    }
}

impl RemoteCollection for UsersClient {
    type Entity = User;

    async fn list(&self) -> Result<Vec<User>, RemoteError> {
        let res = self
            .client
            .http()
            .get(self.client.endpoint(COLLECTION)?)
            .send()
            .await
            .map_err(transport)?;
        expect_list(res).await
    }

    async fn get(&self, id: EntityId) -> Result<User, RemoteError> {
        let res = self
            .client
            .http()
            .get(self.member(id)?)
            .send()
            .await
            .map_err(transport)?;
        expect_record(res).await
    }

    async fn create(&self, payload: &UserNew) -> Result<User, RemoteError> {
        let res = self
            .client
            .http()
            .post(self.client.endpoint(COLLECTION)?)
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        expect_record(res).await
    }

    async fn update(&self, id: EntityId, payload: &UserUpdate) -> Result<User, RemoteError> {
        let res = self
            .client
            .http()
            .put(self.member(id)?)
            .json(payload)
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
