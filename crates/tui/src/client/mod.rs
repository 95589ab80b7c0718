use std::time::Duration;

use api_types::{
    Envelope, ErrorResponse,
    auth::{LoginRequest, LoginResponse},
    user::User,
};
use listing::{GENERIC_REMOTE_MESSAGE, RemoteError};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

pub use pokemon::PokedexClient;
pub use users::UsersClient;

mod pokemon;
mod users;

/// Fallback shown when a failed login carries no server message.
const LOGIN_FAILED: &str = "Authentication failed";

/// Shared HTTP handle. Cheap to clone; the collection clients each hold one.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // `Url::join` drops the last path segment unless it ends with '/'.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.clone())
    }

    pub fn pokedex(&self) -> PokedexClient {
        PokedexClient::new(self.clone())
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, RemoteError> {
        self.base_url
            .join(path)
            .map_err(|err| RemoteError::transport(format!("invalid endpoint {path}: {err}")))
    }

    fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// `POST /api/login`. Anything but a 2xx carrying `{user: {...}}` is a failure.
    pub async fn login(&self, email: &str, password: &str) -> std::result::Result<User, RemoteError> {
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let res = self
            .http
            .post(self.endpoint("api/login")?)
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = server_message(res)
                .await
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            return Err(RemoteError::new(status, message));
        }

        let status = res.status().as_u16();
        let body = res.json::<LoginResponse>().await.map_err(transport)?;
        body.user
            .ok_or_else(|| RemoteError::new(status, LOGIN_FAILED))
    }

    /// `POST /api/logout`. Callers treat failures as best-effort.
    pub async fn logout(&self) -> std::result::Result<(), RemoteError> {
        let res = self
            .http
            .post(self.endpoint("api/logout")?)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(transport)?;
        expect_success(res).await
    }
}

pub(crate) fn transport(err: reqwest::Error) -> RemoteError {
    RemoteError::transport(err.to_string())
}

/// Decodes a 2xx body as `T`, bare or wrapped.
pub(crate) async fn expect_record<T: DeserializeOwned>(
    res: Response,
) -> std::result::Result<T, RemoteError> {
    if res.status().is_success() {
        return res
            .json::<Envelope<T>>()
            .await
            .map(Envelope::into_inner)
            .map_err(transport);
    }
    Err(error_from(res).await)
}

pub(crate) async fn expect_list<T: DeserializeOwned>(
    res: Response,
) -> std::result::Result<Vec<T>, RemoteError> {
    if res.status().is_success() {
        return res.json::<Vec<T>>().await.map_err(transport);
    }
    Err(error_from(res).await)
}

/// Accepts any 2xx and ignores the body.
pub(crate) async fn expect_success(res: Response) -> std::result::Result<(), RemoteError> {
    if res.status().is_success() {
        return Ok(());
    }
    Err(error_from(res).await)
}

async fn error_from(res: Response) -> RemoteError {
    let status = res.status().as_u16();
    let message = server_message(res)
        .await
        .unwrap_or_else(|| GENERIC_REMOTE_MESSAGE.to_string());
    RemoteError::new(status, message)
}

async fn server_message(res: Response) -> Option<String> {
    res.json::<ErrorResponse>().await.ok().map(|body| body.message)
}
