use anyhow::{anyhow, Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Equality-style filter rendered as REST query parameters
/// (`field=eq.value&other=neq.value`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<(String, String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl ToString) -> Self {
        self.clauses.push((field.to_string(), "eq".to_string(), value.to_string()));
        self
    }

    pub fn neq(mut self, field: &str, value: impl ToString) -> Self {
        self.clauses.push((field.to_string(), "neq".to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.clauses
            .iter()
            .map(|(field, op, value)| {
                format!("{}={}.{}", field, op, urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOneResult {
    pub inserted_id: String,
}

/// REST client for the managed document store.
///
/// One client is built per request and dropped with it, so no connection
/// state outlives a request.
pub struct DocumentStoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DocumentStoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.document_store_url.trim_end_matches('/').to_string(),
            api_key: config.document_store_api_key.clone(),
        }
    }

    fn get_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key).context("Invalid document store API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .context("Invalid document store API key")?,
        );

        Ok(headers)
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making {} request to {}", method, url);

        let mut headers = self.get_headers()?;
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Document store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("Document store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    pub async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Value>> {
        let path = if filter.is_empty() {
            format!("/rest/v1/{}", collection)
        } else {
            format!("/rest/v1/{}?{}", collection, filter.to_query_string())
        };

        self.request(Method::GET, &path, None).await
    }

    pub async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Value>> {
        let path = format!("/rest/v1/{}?{}&limit=1", collection, filter.to_query_string());
        let mut result: Vec<Value> = self.request(Method::GET, &path, None).await?;

        if result.is_empty() {
            return Ok(None);
        }
        Ok(Some(result.swap_remove(0)))
    }

    pub async fn insert_one(&self, collection: &str, document: Value) -> Result<InsertOneResult> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let path = format!("/rest/v1/{}", collection);
        let result: Vec<Value> = self
            .request_with_headers(Method::POST, &path, Some(document), Some(headers))
            .await?;

        let inserted = result
            .first()
            .ok_or_else(|| anyhow!("Document store returned no inserted document"))?;

        let inserted_id = match inserted.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(anyhow!("Inserted document has no id")),
        };

        debug!("Inserted document {} into {}", inserted_id, collection);
        Ok(InsertOneResult { inserted_id })
    }
}
