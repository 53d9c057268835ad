//! Gmail API provider implementation.
//!
//! This module provides a [`MailProvider`] implementation using the Gmail
//! REST API. It handles OAuth 2.0 token refresh and the capability calls the
//! mailbox operations need.
//!
//! # Authentication
//!
//! Gmail uses OAuth 2.0. The provider is constructed with a client id,
//! client secret, and refresh token (see [`crate::config::Settings`]);
//! [`authenticate`](GmailProvider::authenticate) exchanges the refresh token
//! for an access token before the provider is shared with the operations.
//!
//! # API Usage
//!
//! This provider uses the Gmail API v1:
//! - `users.messages.list` for query-filtered message listings
//! - `users.messages.get` (format=metadata) for header summaries
//! - `users.threads.get` (format=full) for complete threads
//! - `users.drafts.create` for saving reply drafts
//! - `users.labels.list` for the label directory
//! - `users.threads.modify` for applying labels

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use super::{
    Header, MailProvider, MessageHandle, MessageMetadata, MimeBody, MimePart, ProviderError,
    Result, ThreadEntry,
};
use crate::config::GoogleSettings;
use crate::domain::{DraftId, Label, LabelId, MessageId, ThreadId};

const GMAIL_API_BASE: &str = "https://gmail.googleapis.com/gmail/v1/users/me";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Gmail API message list response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageListResponse {
    messages: Option<Vec<GmailMessageRef>>,
    #[allow(dead_code)]
    next_page_token: Option<String>,
    #[allow(dead_code)]
    result_size_estimate: Option<u32>,
}

/// Gmail API message reference (id pair only).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailMessageRef {
    id: String,
    thread_id: String,
}

/// Gmail API thread.
#[derive(Debug, Deserialize)]
struct GmailThread {
    #[allow(dead_code)]
    id: String,
    messages: Option<Vec<GmailMessage>>,
}

/// Gmail API message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailMessage {
    #[allow(dead_code)]
    id: String,
    snippet: Option<String>,
    payload: Option<GmailPayload>,
}

/// Gmail message payload (headers and body parts).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailPayload {
    mime_type: Option<String>,
    headers: Option<Vec<GmailHeader>>,
    body: Option<GmailBody>,
    parts: Option<Vec<GmailPart>>,
}

/// Gmail message header.
#[derive(Debug, Deserialize)]
struct GmailHeader {
    name: String,
    value: String,
}

impl GmailHeader {
    fn into_header(self) -> Header {
        Header {
            name: self.name,
            value: self.value,
        }
    }
}

/// Gmail message part (for multipart messages).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailPart {
    mime_type: Option<String>,
    body: Option<GmailBody>,
    parts: Option<Vec<GmailPart>>,
    #[allow(dead_code)]
    filename: Option<String>,
}

impl GmailPart {
    fn into_part(self) -> MimePart {
        MimePart {
            mime_type: self.mime_type,
            body: self.body.map(|b| MimeBody { data: b.data }),
            parts: self
                .parts
                .map(|parts| parts.into_iter().map(GmailPart::into_part).collect()),
        }
    }
}

/// Gmail message body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GmailBody {
    data: Option<String>,
    #[allow(dead_code)]
    size: Option<u32>,
}

/// Gmail API label.
#[derive(Debug, Deserialize)]
struct GmailLabel {
    id: String,
    name: String,
}

/// Gmail labels list response.
#[derive(Debug, Deserialize)]
struct LabelsListResponse {
    labels: Option<Vec<GmailLabel>>,
}

/// Gmail draft creation request body.
#[derive(Debug, Serialize)]
struct CreateDraftRequest {
    message: DraftContent,
}

/// Message half of a draft creation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftContent {
    raw: String,
    thread_id: String,
}

/// Gmail draft creation response.
#[derive(Debug, Deserialize)]
struct DraftResponse {
    id: String,
}

/// Gmail thread modify request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ModifyRequest {
    add_label_ids: Vec<String>,
}

/// OAuth token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    expires_in: u64,
    #[allow(dead_code)]
    token_type: String,
}

/// OAuth credentials for the Gmail API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GmailCredentials {
    /// OAuth refresh token.
    pub refresh_token: String,
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl From<GoogleSettings> for GmailCredentials {
    fn from(settings: GoogleSettings) -> Self {
        Self {
            refresh_token: settings.refresh_token,
            client_id: settings.client_id,
            client_secret: settings.client_secret,
        }
    }
}

/// Gmail API provider.
///
/// Implements [`MailProvider`] using the Gmail REST API with OAuth 2.0
/// authentication.
///
/// # Example
///
/// ```ignore
/// use satchel::providers::mail::{GmailCredentials, GmailProvider, MailProvider};
///
/// let mut provider = GmailProvider::new(credentials);
/// provider.authenticate().await?;
///
/// let handles = provider.list_messages("is:unread", 10).await?;
/// ```
pub struct GmailProvider {
    /// HTTP client for API requests.
    client: reqwest::Client,
    /// OAuth credentials.
    credentials: GmailCredentials,
    /// Current OAuth access token (obtained by `authenticate`).
    access_token: Option<String>,
    /// Whether the provider is authenticated.
    authenticated: bool,
}

impl GmailProvider {
    /// Creates a new Gmail provider with the given credentials.
    ///
    /// The provider is not usable until [`authenticate`](Self::authenticate)
    /// is called.
    pub fn new(credentials: GmailCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            access_token: None,
            authenticated: false,
        }
    }

    /// Returns whether the provider is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Exchanges the refresh token for an access token.
    ///
    /// Must be called once before the provider is shared; every capability
    /// method fails with [`ProviderError::Authentication`] until it has run.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.refresh_access_token().await?;
        self.authenticated = true;

        tracing::info!("Gmail provider authenticated");
        Ok(())
    }

    /// Refreshes the OAuth access token using the refresh token.
    async fn refresh_access_token(&mut self) -> Result<String> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(GOOGLE_TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Authentication(format!(
                "token refresh failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Internal(format!("parse token response: {}", e)))?;

        self.access_token = Some(token_response.access_token.clone());
        Ok(token_response.access_token)
    }

    /// Builds authorization headers for API requests.
    fn auth_headers(&self) -> Result<HeaderMap> {
        let token = self
            .access_token
            .as_ref()
            .ok_or_else(|| ProviderError::Authentication("not authenticated".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ProviderError::Internal(format!("invalid header: {}", e)))?,
        );
        Ok(headers)
    }

    /// Makes an authenticated GET request to the Gmail API.
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", GMAIL_API_BASE, endpoint);
        let headers = self.auth_headers()?;

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Makes an authenticated POST request to the Gmail API.
    async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", GMAIL_API_BASE, endpoint);
        let mut headers = self.auth_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Makes an authenticated POST request that doesn't return a body.
    async fn post_no_response<B: Serialize>(&self, endpoint: &str, body: &B) -> Result<()> {
        let url = format!("{}{}", GMAIL_API_BASE, endpoint);
        let mut headers = self.auth_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.handle_error(response).await);
        }
        Ok(())
    }

    /// Handles API response, checking for errors.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            return Err(self.handle_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Internal(format!("parse response: {}", e)))
    }

    /// Handles API error responses.
    async fn handle_error(&self, response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            400 => ProviderError::InvalidRequest(body),
            401 => ProviderError::Authentication(format!("unauthorized: {}", body)),
            404 => ProviderError::NotFound(body),
            429 => ProviderError::RateLimited {
                retry_after_secs: None,
            },
            _ => ProviderError::Internal(format!("API error ({}): {}", status, body)),
        }
    }

    /// Builds the metadata endpoint with one repeated parameter per header.
    fn metadata_endpoint(id: &MessageId, header_names: &[String]) -> String {
        let mut endpoint = format!("/messages/{}?format=metadata", id);
        for name in header_names {
            endpoint.push_str(&format!("&metadataHeaders={}", name));
        }
        endpoint
    }

    /// Converts a full Gmail message to a thread entry.
    fn message_to_entry(msg: GmailMessage) -> ThreadEntry {
        let snippet = msg.snippet.unwrap_or_default();
        match msg.payload {
            Some(payload) => ThreadEntry {
                headers: payload
                    .headers
                    .unwrap_or_default()
                    .into_iter()
                    .map(GmailHeader::into_header)
                    .collect(),
                payload: Some(MimePart {
                    mime_type: payload.mime_type,
                    body: payload.body.map(|b| MimeBody { data: b.data }),
                    parts: payload
                        .parts
                        .map(|parts| parts.into_iter().map(GmailPart::into_part).collect()),
                }),
                snippet,
            },
            None => ThreadEntry {
                headers: Vec::new(),
                payload: None,
                snippet,
            },
        }
    }
}

#[async_trait]
impl MailProvider for GmailProvider {
    async fn list_messages(&self, query: &str, max_results: u32) -> Result<Vec<MessageHandle>> {
        if !self.authenticated {
            return Err(ProviderError::Authentication(
                "not authenticated".to_string(),
            ));
        }

        let endpoint = format!("/messages?q={}&maxResults={}", query, max_results);
        let response: MessageListResponse = self.get(&endpoint).await?;

        Ok(response
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| MessageHandle {
                id: MessageId::from(m.id),
                thread_id: ThreadId::from(m.thread_id),
            })
            .collect())
    }

    async fn get_message_metadata(
        &self,
        id: &MessageId,
        header_names: &[String],
    ) -> Result<MessageMetadata> {
        if !self.authenticated {
            return Err(ProviderError::Authentication(
                "not authenticated".to_string(),
            ));
        }

        let endpoint = Self::metadata_endpoint(id, header_names);
        let message: GmailMessage = self.get(&endpoint).await?;

        Ok(MessageMetadata {
            headers: message
                .payload
                .and_then(|p| p.headers)
                .unwrap_or_default()
                .into_iter()
                .map(GmailHeader::into_header)
                .collect(),
            snippet: message.snippet.unwrap_or_default(),
        })
    }

    async fn get_thread(&self, thread_id: &ThreadId) -> Result<Vec<ThreadEntry>> {
        if !self.authenticated {
            return Err(ProviderError::Authentication(
                "not authenticated".to_string(),
            ));
        }

        let endpoint = format!("/threads/{}?format=full", thread_id);
        let response: GmailThread = self.get(&endpoint).await?;

        Ok(response
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(Self::message_to_entry)
            .collect())
    }

    async fn create_draft(&self, thread_id: &ThreadId, raw: &str) -> Result<DraftId> {
        if !self.authenticated {
            return Err(ProviderError::Authentication(
                "not authenticated".to_string(),
            ));
        }

        let request = CreateDraftRequest {
            message: DraftContent {
                raw: raw.to_string(),
                thread_id: thread_id.0.clone(),
            },
        };

        let response: DraftResponse = self.post("/drafts", &request).await?;

        tracing::info!(draft_id = %response.id, "Draft created via Gmail API");
        Ok(DraftId::from(response.id))
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        if !self.authenticated {
            return Err(ProviderError::Authentication(
                "not authenticated".to_string(),
            ));
        }

        let response: LabelsListResponse = self.get("/labels").await?;

        Ok(response
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|l| Label {
                id: LabelId::from(l.id),
                name: l.name,
            })
            .collect())
    }

    async fn modify_thread_labels(
        &self,
        thread_id: &ThreadId,
        add_label_ids: &[LabelId],
    ) -> Result<()> {
        if !self.authenticated {
            return Err(ProviderError::Authentication(
                "not authenticated".to_string(),
            ));
        }

        let endpoint = format!("/threads/{}/modify", thread_id);
        let body = ModifyRequest {
            add_label_ids: add_label_ids.iter().map(|l| l.0.clone()).collect(),
        };

        self.post_no_response(&endpoint, &body).await
    }
}
