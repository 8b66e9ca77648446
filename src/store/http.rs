use super::{DocumentStore, SlugLookup, StoreError, StoreResult};
use crate::models::{document_path, Document, DocumentDraft};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use url::Url;

/// Client for the CMS JSON API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: Url,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vix/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    fn request(&self, method: Method, path: &str) -> StoreResult<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(self.client.request(method, url))
    }

    async fn send(builder: RequestBuilder) -> StoreResult<Response> {
        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout
            } else {
                StoreError::Transport(e.to_string())
            }
        })
    }

    async fn json_body(response: Response) -> StoreResult<serde_json::Value> {
        let text = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn expect_document(response: Response) -> StoreResult<Document> {
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let body = Self::json_body(response).await?;
        serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn status_error(status: StatusCode) -> StoreError {
    if status == StatusCode::NOT_FOUND {
        StoreError::NotFound
    } else {
        StoreError::Status(status.as_u16())
    }
}

#[async_trait]
impl SlugLookup for HttpStore {
    /// Any successful, non-empty body means the slug is taken; the body does
    /// not have to decode as a document.
    async fn exists(&self, slug: &str) -> StoreResult<bool> {
        let response = Self::send(self.request(Method::GET, &document_path(Some(slug)))?).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(status_error(status));
        }
        Ok(!Self::json_body(response).await?.is_null())
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn fetch(&self, slug: &str) -> StoreResult<Option<Document>> {
        let response = Self::send(self.request(Method::GET, &document_path(Some(slug)))?).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status));
        }

        match Self::json_body(response).await? {
            serde_json::Value::Null => Ok(None),
            body => serde_json::from_value(body)
                .map(Some)
                .map_err(|e| StoreError::Decode(e.to_string())),
        }
    }

    async fn list(&self, feed: &str) -> StoreResult<Vec<Document>> {
        let path = format!("/json/feed/{}", feed);
        let response = Self::send(self.request(Method::GET, &path)?).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        match Self::json_body(response).await? {
            serde_json::Value::Null => Ok(Vec::new()),
            body => serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string())),
        }
    }

    async fn create(&self, draft: &DocumentDraft) -> StoreResult<Document> {
        let builder = self.request(Method::POST, &document_path(None))?.json(draft);
        Self::expect_document(Self::send(builder).await?).await
    }

    async fn update(&self, slug: &str, draft: &DocumentDraft) -> StoreResult<Document> {
        let builder = self
            .request(Method::PUT, &document_path(Some(slug)))?
            .json(draft);
        Self::expect_document(Self::send(builder).await?).await
    }

    async fn delete(&self, slug: &str) -> StoreResult<()> {
        let response =
            Self::send(self.request(Method::DELETE, &document_path(Some(slug)))?).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status_error(status))
        }
    }
}
