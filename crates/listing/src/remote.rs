use std::future::Future;

use api_types::EntityId;

use crate::{
    entity::{Draft, Entity},
    error::RemoteError,
};

/// Request/response access to one server-owned collection.
///
/// Every call is a fresh round-trip: no caching, no retry.
pub trait RemoteCollection {
    type Entity: Entity;

    fn list(&self) -> impl Future<Output = Result<Vec<Self::Entity>, RemoteError>> + Send;

    fn get(&self, id: EntityId) -> impl Future<Output = Result<Self::Entity, RemoteError>> + Send;

    fn create(
        &self,
        payload: &<<Self::Entity as Entity>::Draft as Draft>::New,
    ) -> impl Future<Output = Result<Self::Entity, RemoteError>> + Send;

    fn update(
        &self,
        id: EntityId,
        payload: &<<Self::Entity as Entity>::Draft as Draft>::Update,
    ) -> impl Future<Output = Result<Self::Entity, RemoteError>> + Send;

    fn delete(&self, id: EntityId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// Asks the operator before a destructive action. Never fails: a dismissed
/// prompt is a `false`.
pub trait Confirmer {
    fn confirm_destructive(&self, prompt: &str) -> impl Future<Output = bool> + Send;
}

/// Confirmer replaying an answer the operator already gave, e.g. in a modal
/// that was dismissed before the delete started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered(pub bool);

impl Confirmer for Answered {
    async fn confirm_destructive(&self, _prompt: &str) -> bool {
        self.0
    }
}
