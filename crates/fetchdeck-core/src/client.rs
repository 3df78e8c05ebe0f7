use std::fmt::Display;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use fetchdeck_models::ErrorBody;

use crate::alert::{Alert, AlertOverride, AlertSink};
use crate::session::Session;

const DISABLE_SYSTEM_PROXY_ENV: &str = "FETCHDECK_DISABLE_SYSTEM_PROXY";

/// Fallback name when the server sends no usable content-disposition.
const DEFAULT_DOWNLOAD_NAME: &str = "downloaded-file";

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again";

fn build_http_client() -> Client {
    if should_disable_system_proxy() {
        Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build reqwest client")
    } else {
        Client::new()
    }
}

fn should_disable_system_proxy() -> bool {
    std::env::var_os(DISABLE_SYSTEM_PROXY_ENV).is_some()
}

/// Authenticated API client with centralized failure classification.
///
/// Every failure is absorbed here: the status is classified per the fixed
/// taxonomy (401 redirect, 422 validation table, overridable client/server
/// errors, generic fallback), exactly one notification reaches the
/// [`AlertSink`], and the call resolves to `None`. Callers treat `None` as
/// "operation did not succeed, user already notified" and must not re-notify.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Session,
    sink: Arc<dyn AlertSink>,
}

impl ApiClient {
    pub fn new(base_url: Url, session: Session, sink: Arc<dyn AlertSink>) -> Self {
        Self {
            http: build_http_client(),
            base_url,
            session,
            sink,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Forwards a notification to the sink on behalf of a caller (success
    /// confirmations, programming-error reports).
    pub fn alert(&self, alert: Alert) {
        self.sink.notify(alert);
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        self.get_with(endpoint, &AlertOverride::default()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        alert: &AlertOverride,
    ) -> Option<T> {
        let url = self.url(endpoint)?;
        self.send(self.http.get(url), alert).await
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_with(endpoint, body, &AlertOverride::default()).await
    }

    pub async fn post_with<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        alert: &AlertOverride,
    ) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint)?;
        self.send(self.http.post(url).json(body), alert).await
    }

    /// POST with a form-encoded body (the login endpoint contract).
    pub async fn post_form<F, T>(&self, endpoint: &str, form: &F) -> Option<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint)?;
        self.send(self.http.post(url).form(form), &AlertOverride::default())
            .await
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint)?;
        self.send(self.http.put(url).json(body), &AlertOverride::default())
            .await
    }

    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint)?;
        self.send(self.http.patch(url).json(body), &AlertOverride::default())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        let url = self.url(endpoint)?;
        self.send(self.http.delete(url), &AlertOverride::default())
            .await
    }

    /// POST returning a binary body. Extracts the target filename from the
    /// `content-disposition` header, falling back to a fixed name.
    pub async fn download_post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Option<Download> {
        let url = self.url(endpoint)?;
        let response = match self.dispatch(self.http.post(url).json(body)).await {
            Ok(response) => response,
            Err(err) => {
                self.report_unexpected(&err);
                return None;
            }
        };

        if !response.status().is_success() {
            self.classify(response, &AlertOverride::default()).await;
            return None;
        }

        let filename = filename_from_disposition(
            response
                .headers()
                .get(CONTENT_DISPOSITION)
                .and_then(|value| value.to_str().ok()),
        );
        match response.bytes().await {
            Ok(bytes) => Some(Download { filename, bytes }),
            Err(err) => {
                self.report_unexpected(&err);
                None
            }
        }
    }

    fn url(&self, endpoint: &str) -> Option<Url> {
        match self.base_url.join(endpoint) {
            Ok(url) => Some(url),
            Err(err) => {
                self.report_unexpected(&err);
                None
            }
        }
    }

    /// Attaches the bearer credential, read fresh from the session, and sends.
    async fn dispatch(&self, request: RequestBuilder) -> reqwest::Result<Response> {
        let request = match self.session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request.send().await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        alert: &AlertOverride,
    ) -> Option<T> {
        let response = match self.dispatch(request).await {
            Ok(response) => response,
            Err(err) => {
                self.report_unexpected(&err);
                return None;
            }
        };

        if response.status().is_success() {
            match response.json::<T>().await {
                Ok(value) => Some(value),
                Err(err) => {
                    self.report_unexpected(&err);
                    None
                }
            }
        } else {
            self.classify(response, alert).await;
            None
        }
    }

    /// Status classification, in fixed priority order. Terminal for the call:
    /// every branch notifies (or redirects) and the caller sees `None`.
    async fn classify(&self, response: Response, alert: &AlertOverride) {
        let status = response.status();
        let url = response.url().clone();
        match status.as_u16() {
            401 => {
                debug!(%url, "unauthenticated response, redirecting to login");
                self.sink.unauthorized();
            }
            422 => {
                // Binary bodies are decoded as text before parsing.
                let body = response.text().await.unwrap_or_default();
                warn!(%url, "validation failure");
                self.sink.notify(validation_alert(&body));
            }
            code @ (400 | 403 | 404 | 409 | 500) => {
                let body = response.text().await.unwrap_or_default();
                let default_title = match code {
                    400 => "Bad Request",
                    403 => "Forbidden",
                    404 => "Not Found",
                    409 => "Conflict",
                    _ => "Internal Server Error",
                };
                let title = alert
                    .title_for(code)
                    .unwrap_or(default_title)
                    .to_string();
                let message = match alert.message_for(code) {
                    Some(message) => message.to_string(),
                    None => detail_text(&body).unwrap_or_default(),
                };
                warn!(%url, status = code, title, "request failed");
                self.sink.notify(Alert::error(title, message));
            }
            code => {
                let body = response.text().await.unwrap_or_default();
                let message = if body.is_empty() {
                    status.to_string()
                } else {
                    pretty_body(&body)
                };
                warn!(%url, status = code, "unclassified request failure");
                self.sink.notify(Alert::error("Request Error", message));
            }
        }
    }

    /// Non-HTTP failure: logged in full, surfaced only as a fixed user-safe
    /// message.
    fn report_unexpected(&self, err: &dyn Display) {
        error!(error = %err, "unexpected client error");
        self.sink
            .notify(Alert::error("Unexpected Error", UNEXPECTED_ERROR_MESSAGE));
    }
}

/// A downloaded binary response, ready to be saved.
#[derive(Debug, Clone)]
pub struct Download {
    pub filename: String,
    pub bytes: Bytes,
}

impl Download {
    /// Writes the payload into `dir` under the server-provided filename.
    ///
    /// The content goes through a temporary file that is atomically renamed
    /// into place; the temporary handle is cleaned up on success and failure
    /// alike.
    pub fn persist(&self, dir: &Path) -> io::Result<PathBuf> {
        let target = dir.join(&self.filename);
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}

fn validation_alert(body: &str) -> Alert {
    let items = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|detail| detail.items().map(|items| items.to_vec()));

    match items {
        Some(items) => {
            let mut detail = Vec::with_capacity(items.len() * 4);
            for item in &items {
                detail.push(("Type".to_string(), item.kind.clone()));
                detail.push(("Location".to_string(), item.location()));
                detail.push(("Message".to_string(), item.msg.clone()));
                detail.push(("Input".to_string(), pretty_value(&item.input)));
            }
            Alert::error("Validation Error", "").with_detail(detail)
        }
        None => Alert::error("Validation Error", pretty_body(body)),
    }
}

/// The `detail` string of an error body, when it carries one.
fn detail_text(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|detail| detail.as_text().map(str::to_string))
}

fn pretty_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => pretty_value(&value),
        Err(_) => body.to_string(),
    }
}

fn pretty_value(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn filename_from_disposition(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split("filename=").nth(1))
        .map(|name| name.trim().trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}
