use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::msg::ErrorNotifier;
use crate::config::ApiConfig;
use crate::error::{ErrorCode, ErrorKind, RequestError};
use crate::session::storage::{Storage, TOKEN_KEY};
use crate::utils::{random_string, unique_slash};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Encoding for POST/PUT bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentType {
    #[default]
    FormUrlEncoded,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub content_type: ContentType,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn json() -> Self {
        Self {
            content_type: ContentType::Json,
            headers: Vec::new(),
        }
    }
}

/// Admin REST transport. Every call resolves to `Ok(data)` or a normalised
/// `RequestError`, which has already been passed to the notifier.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    prefix: String,
    nation: String,
    storage: Arc<dyn Storage>,
    notifier: Arc<ErrorNotifier>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        storage: Arc<dyn Storage>,
        notifier: Arc<ErrorNotifier>,
    ) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            prefix: config.prefix.clone(),
            nation: config.nation.clone(),
            storage,
            notifier,
        })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        unique_slash(&format!("{}/{}/{}", self.base_url, self.prefix, endpoint))
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: Option<Value>) -> Result<T, RequestError> {
        self.request(Method::Get, endpoint, params, &RequestOptions::default()).await
    }

    pub async fn post<T: DeserializeOwned>(&self, endpoint: &str, data: Value) -> Result<T, RequestError> {
        self.request(Method::Post, endpoint, Some(data), &RequestOptions::default()).await
    }

    pub async fn put<T: DeserializeOwned>(&self, endpoint: &str, data: Value) -> Result<T, RequestError> {
        self.request(Method::Put, endpoint, Some(data), &RequestOptions::default()).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str, params: Option<Value>) -> Result<T, RequestError> {
        self.request(Method::Delete, endpoint, params, &RequestOptions::default()).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<Value>,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        let result = self.send(method, endpoint, data, options).await;
        if let Err(err) = &result {
            self.notifier.show(err);
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        data: Option<Value>,
        options: &RequestOptions,
    ) -> Result<T, RequestError> {
        let mut payload = match data {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(RequestError::new(
                    ErrorKind::Fetch,
                    "INVALID_PAYLOAD",
                    "Request payload must be a JSON object",
                ))
            }
        };
        payload.insert("_rid".to_string(), json!(random_string(24)));

        let token = self
            .storage
            .get(TOKEN_KEY)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let url = self.endpoint_url(endpoint);
        tracing::debug!("{:?} {}", method, url);

        let mut builder = self
            .http
            .request(method.into(), &url)
            .header("token", token)
            .header("nation", &self.nation);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match method {
            Method::Get | Method::Delete => builder.query(&flatten_pairs(&payload)),
            Method::Post | Method::Put => match options.content_type {
                ContentType::FormUrlEncoded => builder.form(&flatten_pairs(&payload)),
                ContentType::Json => builder.json(&payload),
            },
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::http(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RequestError::decode(e.to_string()))?;
        let data = unwrap_envelope(body)?;
        serde_json::from_value(data).map_err(|e| RequestError::decode(e.to_string()))
    }
}

/// Serialize a typed body into a request payload
pub fn payload<S: Serialize>(value: &S) -> Result<Value, RequestError> {
    serde_json::to_value(value).map_err(|e| RequestError::decode(e.to_string()))
}

/// `{code: 1, data}` -> `data`; bodies carrying `sdp` pass through whole;
/// anything else is a backend error with the body's `code` and `msg`.
pub fn unwrap_envelope(body: Value) -> Result<Value, RequestError> {
    if body.get("sdp").is_some() {
        return Ok(body);
    }

    let code = body.get("code");
    let ok = match code {
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => s == "1",
        _ => false,
    };
    if ok {
        return Ok(body.get("data").cloned().unwrap_or(Value::Null));
    }

    let code = code
        .cloned()
        .and_then(|c| serde_json::from_value::<ErrorCode>(c).ok())
        .unwrap_or_else(|| ErrorCode::Text("UNKNOWN".to_string()));
    let msg = body.get("msg").and_then(Value::as_str).unwrap_or_default();
    Err(RequestError::backend(code, msg))
}

/// Flat `key=value` pairs for query strings and form bodies. Nested values
/// are sent as JSON text, nulls are dropped.
fn flatten_pairs(payload: &Map<String, Value>) -> Vec<(String, String)> {
    payload
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}
