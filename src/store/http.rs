//! HTTP adapter for the hosted backend's row API.
//!
//! The backend exposes each table over REST with query-string filters
//! (`category=eq.brand`, `owner_id=is.null`, ...), authenticated with an
//! api key sent both as the `apikey` header and as a bearer token. That's
//! all the catalog needs, so that's all this speaks.

use std::time::Duration;

use reqwest::StatusCode;

use crate::{
    config::Config,
    types::{Category, UserId},
};

use super::{StoreError, TagRow, TagStore};

/// The table holding every tag row, global and custom alike.
const TAGS_TABLE: &str = "tags";

const USER_AGENT: &str = "Lookbook/0.1.0 (https://github.com/lookbook-app/lookbook)";

/// A [`TagStore`] talking to the real hosted backend.
pub struct HttpTagStore {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTagStore {
    /// Builds a store client from the shared app config.
    pub async fn from_config() -> Result<Self, StoreError> {
        let conf = Config::read().await;
        Self::new(
            &conf.store.base_url,
            &conf.store.api_key,
            conf.store.request_timeout_secs,
        )
    }

    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn rows_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TAGS_TABLE)
    }

    /// Maps an unhappy response into the store error taxonomy.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();

        if status == StatusCode::CONFLICT {
            return Err(StoreError::AlreadyExists);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Auth(format!("status {}", status.as_u16())));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn owner_filter(owner: Option<UserId>) -> String {
        match owner {
            Some(id) => format!("eq.{id}"),
            None => String::from("is.null"),
        }
    }
}

impl TagStore for HttpTagStore {
    async fn fetch_tags(
        &self,
        category: &Category,
        owner: Option<UserId>,
    ) -> Result<Vec<TagRow>, StoreError> {
        let response = self
            .http_client
            .get(self.rows_url())
            .query(&[
                ("select", String::from("*")),
                ("category", format!("eq.{category}")),
                ("owner_id", Self::owner_filter(owner)),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let rows: Vec<TagRow> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::MalformedRow(e.to_string()))?;

        tracing::debug!(
            category = %category,
            global = owner.is_none(),
            row_ct = rows.len(),
            "fetched tag rows"
        );

        Ok(rows)
    }

    async fn insert_tag(
        &self,
        category: &Category,
        owner: UserId,
        name: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .http_client
            .post(self.rows_url())
            .json(&serde_json::json!({
                "category": category.as_str(),
                "owner_id": owner,
                "name": name,
            }))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Self::check(response).await?;
        tracing::debug!(category = %category, name, "inserted custom tag row");
        Ok(())
    }

    async fn delete_tag(
        &self,
        category: &Category,
        owner: UserId,
        name: &str,
    ) -> Result<(), StoreError> {
        let response = self
            .http_client
            .delete(self.rows_url())
            .query(&[
                ("category", format!("eq.{category}")),
                ("owner_id", format!("eq.{owner}")),
                ("name", format!("eq.{name}")),
            ])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        Self::check(response).await?;
        tracing::debug!(category = %category, name, "deleted custom tag row");
        Ok(())
    }
}
