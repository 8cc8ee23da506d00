//! Typed HTTP client for the recipe API.
//!
//! Authenticated calls take the caller's [`BearerCredential`] explicitly and
//! attach it to that single request. The client itself holds no identity, so
//! one instance can serve many users concurrently.

pub mod errors;

use crate::{
    application::{auth::dto::AuthResponse, like_recipe::dto::LikeCountResponse},
    domain::{
        like::repository::ReconcileReport, recipe::entity::Recipe,
        shared::pagination::PaginatedResponse, user::entity::UserProfile,
    },
};
use errors::{ClientError, ErrorBody};
use reqwest::{
    RequestBuilder, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{fmt, time::Duration};
use tracing::{debug, instrument};
use uuid::Uuid;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// An issued bearer token. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredential(String);

impl BearerCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerCredential(***)")
    }
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub credential: BearerCredential,
    pub user: UserProfile,
}

impl From<AuthResponse> for AuthSession {
    fn from(res: AuthResponse) -> Self {
        Self {
            credential: BearerCredential::new(res.token),
            user: res.user,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecipeQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub ethnicity: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    pub title: String,
    pub ingredients: Vec<String>,
    pub cook_time: Option<String>,
    pub ethnicity: Option<String>,
    pub images: Vec<ImageFile>,
}

impl RecipeForm {
    fn into_multipart(self) -> Result<Form, ClientError> {
        let mut form = Form::new().text("title", self.title);
        for ingredient in self.ingredients {
            form = form.text("ingredients", ingredient);
        }
        if let Some(cook_time) = self.cook_time {
            form = form.text("cookTime", cook_time);
        }
        if let Some(ethnicity) = self.ethnicity {
            form = form.text("ethnicity", ethnicity);
        }
        for image in self.images {
            let part = Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }
        Ok(form)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let request = self
            .http
            .post(self.url("/auth/register"))
            .json(&json!({ "email": email, "password": password }));
        let res: AuthResponse = send(request).await?;
        Ok(res.into())
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        let res: AuthResponse = send(request).await?;
        Ok(res.into())
    }

    pub async fn me(&self, credential: &BearerCredential) -> Result<UserProfile, ClientError> {
        send(
            self.http
                .get(self.url("/auth/me"))
                .bearer_auth(credential.as_str()),
        )
        .await
    }

    pub async fn list_recipes(
        &self,
        query: &RecipeQuery,
    ) -> Result<PaginatedResponse<Recipe>, ClientError> {
        let mut request = self.http.get(self.url("/recipes")).build()?;
        {
            let mut pairs = request.url_mut().query_pairs_mut();
            if let Some(limit) = query.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = query.offset {
                pairs.append_pair("offset", &offset.to_string());
            }
            if let Some(ethnicity) = &query.ethnicity {
                pairs.append_pair("ethnicity", ethnicity);
            }
        }
        if request.url().query() == Some("") {
            request.url_mut().set_query(None);
        }
        decode(self.http.execute(request).await?).await
    }

    pub async fn get_recipe(&self, id: Uuid) -> Result<Recipe, ClientError> {
        send(self.http.get(self.url(&format!("/recipes/{}", id)))).await
    }

    #[instrument(skip(self, form), fields(title = %form.title, images = form.images.len()))]
    pub async fn create_recipe(&self, form: RecipeForm) -> Result<Recipe, ClientError> {
        let multipart = form.into_multipart()?;
        send(self.http.post(self.url("/recipes")).multipart(multipart)).await
    }

    #[instrument(skip(self, credential))]
    pub async fn like(
        &self,
        credential: &BearerCredential,
        recipe_id: Uuid,
    ) -> Result<LikeCountResponse, ClientError> {
        self.post_authed(credential, &format!("/recipes/{}/like", recipe_id))
            .await
    }

    #[instrument(skip(self, credential))]
    pub async fn unlike(
        &self,
        credential: &BearerCredential,
        recipe_id: Uuid,
    ) -> Result<LikeCountResponse, ClientError> {
        self.post_authed(credential, &format!("/recipes/{}/unlike", recipe_id))
            .await
    }

    #[instrument(skip(self, credential))]
    pub async fn reconcile(
        &self,
        credential: &BearerCredential,
        recipe_id: Uuid,
    ) -> Result<ReconcileReport, ClientError> {
        self.post_authed(credential, &format!("/recipes/{}/reconcile", recipe_id))
            .await
    }

    async fn post_authed<T: DeserializeOwned>(
        &self,
        credential: &BearerCredential,
        path: &str,
    ) -> Result<T, ClientError> {
        send(
            self.http
                .post(self.url(path))
                .bearer_auth(credential.as_str()),
        )
        .await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    decode(request.send().await?).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    debug!(%status, url = %response.url(), "response received");
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
    };
    Err(ClientError::Api { status, message })
}
