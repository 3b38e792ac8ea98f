//! HTTP client for the article authoring backend.
//!
//! Both actions POST JSON and answer with either an event stream or, from
//! backends that do not stream, the terminal result as a plain JSON body.

use std::sync::Arc;

use futures_util::TryStreamExt;
use tracing::{debug, info};

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::dispatch::{consume_stream, StreamCallbacks, StreamDispatcher};
use crate::error::{
    classify_http_error, EncycloResult, ErrorContext, NetworkError, ResultExt, StreamError,
};
use crate::models::{StartRequest, TerminalResult};
use crate::traits::{Headers, HttpClient, StreamingResponse};

pub const START_PATH: &str = "/api/start";
pub const CONTINUE_PATH: &str = "/api/continue";

/// Client for the authoring backend, generic over the transport so tests can
/// replay arbitrary chunkings.
pub struct EncycloClient<C: HttpClient = ReqwestHttpClient> {
    base_url: String,
    http: Arc<C>,
}

impl<C: HttpClient> Clone for EncycloClient<C> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: Arc::clone(&self.http),
        }
    }
}

impl EncycloClient<ReqwestHttpClient> {
    /// Build the production client from configuration.
    pub fn from_config(config: &ClientConfig) -> EncycloResult<Self> {
        let http = match config.request_timeout {
            Some(timeout) => ReqwestHttpClient::with_timeout(timeout)
                .map_err(|e| classify_http_error(e, &config.base_url))?,
            None => ReqwestHttpClient::new(),
        };
        Ok(Self::new(&config.base_url, http))
    }
}

impl<C: HttpClient> EncycloClient<C> {
    pub fn new(base_url: &str, http: C) -> Self {
        Self::with_shared(base_url, Arc::new(http))
    }

    pub fn with_shared(base_url: &str, http: Arc<C>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Generate a new article.
    pub async fn start(
        &self,
        request: &StartRequest,
        callbacks: StreamCallbacks<'_>,
    ) -> EncycloResult<Option<TerminalResult>> {
        let ctx = ErrorContext::new("start")
            .with_endpoint(START_PATH)
            .with_topic(&request.topic);
        let body = serde_json::to_string(request).map_err(|e| NetworkError::Other {
            message: e.to_string(),
        })?;

        info!(topic = %request.topic, max_rounds = ?request.max_rounds, "Starting article");
        self.post_and_consume(START_PATH, &body, callbacks)
            .await
            .context(ctx)
    }

    /// Run another critique/revise pass on a previous terminal result, which
    /// is sent back verbatim.
    pub async fn continue_article(
        &self,
        previous: &TerminalResult,
        callbacks: StreamCallbacks<'_>,
    ) -> EncycloResult<Option<TerminalResult>> {
        let mut ctx = ErrorContext::new("continue").with_endpoint(CONTINUE_PATH);
        if let Some(topic) = previous.topic() {
            ctx = ctx.with_topic(topic);
        }
        let body = previous.to_body().map_err(|e| NetworkError::Other {
            message: e.to_string(),
        })?;

        info!(topic = ?previous.topic(), "Continuing article");
        self.post_and_consume(CONTINUE_PATH, &body, callbacks)
            .await
            .context(ctx)
    }

    async fn post_and_consume(
        &self,
        path: &str,
        body: &str,
        callbacks: StreamCallbacks<'_>,
    ) -> EncycloResult<Option<TerminalResult>> {
        let url = self.endpoint(path);
        let response = self
            .http
            .post_stream(&url, body, &request_headers())
            .await
            .map_err(|e| classify_http_error(e, &url))?;

        debug!(status = response.status, content_type = ?response.content_type(), "Response received");

        if response.is_json() {
            let result = read_json_result(response).await?;
            let mut dispatcher = StreamDispatcher::new(callbacks);
            dispatcher.accept_result(result);
            let (result, _) = dispatcher.finish();
            return Ok(result);
        }

        consume_stream(response.body, callbacks).await
    }
}

fn request_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Accept".to_string(), "text/event-stream".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}

async fn read_json_result(response: StreamingResponse) -> EncycloResult<TerminalResult> {
    let chunks: Vec<bytes::Bytes> = response
        .body
        .try_collect()
        .await
        .map_err(NetworkError::from)?;
    let bytes = chunks.concat();
    let text = String::from_utf8(bytes).map_err(|e| StreamError::InvalidResult {
        message: e.to_string(),
    })?;
    Ok(TerminalResult::from_body(&text)?)
}
