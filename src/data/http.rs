use crate::core::config::HttpConfig;
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Thin wrapper over a shared `reqwest::Client`.
///
/// Every request carries the configured allow-origin and trace headers.
/// There is no retry, no backoff and no authentication: a failed call is
/// handed straight back to the caller.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().default_headers(default_headers(config)?);
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// GET `url` and decode the JSON body into `T`
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(Method::GET, url, self.client.get(url)).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value> {
        let response = self
            .send(Method::POST, url, self.client.post(url).json(body))
            .await?;
        read_body(response).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value> {
        let response = self
            .send(Method::PUT, url, self.client.put(url).json(body))
            .await?;
        read_body(response).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value> {
        let response = self
            .send(Method::DELETE, url, self.client.delete(url))
            .await?;
        read_body(response).await
    }

    async fn send(&self, method: Method, url: &str, request: RequestBuilder) -> Result<Response> {
        log::debug!("{} {}", method, url);
        let response = request.send().await.map_err(|e| {
            log::warn!("{} {} failed: {}", method, url, e);
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{} {} answered {}", method, url, status);
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

fn default_headers(config: &HttpConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header_value(&config.allow_origin)?,
    );
    let trace_name = HeaderName::from_bytes(config.trace_header.as_bytes())
        .map_err(|e| Error::InvalidHeader(format!("{}: {}", config.trace_header, e)))?;
    headers.insert(trace_name, header_value(&config.trace_value)?);
    Ok(headers)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader(format!("{}: {}", value, e)))
}

/// Mutation endpoints answer with a record, a confirmation string or nothing
async fn read_body(response: Response) -> Result<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
