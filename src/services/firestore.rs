use crate::config::FirestoreSettings;
use crate::models::UserProfile;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Number, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading from the document database
#[derive(Debug, Error)]
pub enum FirestoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: StatusCode, body: String },

    #[error("Unauthorized: invalid API key or missing read permission")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(&'static str),
}

/// Read-only client for the hosted document database REST API
///
/// Lists the users collection page by page and turns the typed document
/// fields into [`UserProfile`] values.
pub struct FirestoreClient {
    base_url: String,
    project_id: String,
    database_id: String,
    collection: String,
    api_key: Option<String>,
    page_size: u32,
    client: Client,
}

impl FirestoreClient {
    /// Create a new client from settings
    pub fn new(settings: &FirestoreSettings) -> Result<Self, FirestoreError> {
        let project_id = settings
            .configured_project()
            .map(str::to_string)
            .ok_or(FirestoreError::MissingConfig("firestore.project_id"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: settings.endpoint.trim_end_matches('/').to_string(),
            project_id,
            database_id: settings.database_id.clone(),
            collection: settings.collection.clone(),
            api_key: settings.api_key.clone().filter(|key| !key.is_empty()),
            page_size: settings.page_size,
            client,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.base_url, self.project_id, self.database_id, self.collection
        )
    }

    /// Fetch every user document, newest first
    ///
    /// Documents that cannot be decoded are skipped with a warning so one
    /// malformed profile does not hide the rest of the population.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, FirestoreError> {
        let mut profiles = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(page_token.as_deref()).await?;
            pages += 1;

            let documents = match page.get("documents") {
                // An empty collection comes back without a documents field
                None => &[][..],
                Some(Value::Array(documents)) => documents.as_slice(),
                Some(_) => {
                    return Err(FirestoreError::InvalidResponse(
                        "documents is not an array".into(),
                    ))
                }
            };

            for doc in documents {
                match decode_document(doc) {
                    Ok(profile) => profiles.push(profile),
                    Err(e) => tracing::warn!("Skipping undecodable user document: {}", e),
                }
            }

            page_token = page
                .get("nextPageToken")
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(str::to_string);

            if page_token.is_none() {
                break;
            }
        }

        tracing::debug!("Fetched {} user documents in {} pages", profiles.len(), pages);

        Ok(profiles)
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<Value, FirestoreError> {
        let mut url = format!("{}?pageSize={}", self.documents_url(), self.page_size);
        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }
        url.push_str(&format!("&orderBy={}", urlencoding::encode("createdAt desc")));
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&key={}", urlencoding::encode(key)));
        }

        tracing::trace!("Fetching user page from {}", self.documents_url());

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FirestoreError::Unauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(FirestoreError::ApiError { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Decode one REST document into a profile
///
/// The document id (last segment of `name`) becomes `id`, replacing any
/// stored `id` field.
pub fn decode_document(doc: &Value) -> Result<UserProfile, FirestoreError> {
    let mut fields = match doc.get("fields") {
        Some(Value::Object(fields)) => decode_fields(fields),
        Some(_) => return Err(FirestoreError::InvalidResponse("fields is not an object".into())),
        None => Map::new(),
    };

    let document_id = doc
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| name.rsplit('/').next())
        .unwrap_or_default();

    // The document id is authoritative over any stored copy
    if !document_id.is_empty() {
        fields.insert("id".to_string(), Value::String(document_id.to_string()));
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| {
        FirestoreError::InvalidResponse(format!("Failed to parse profile {}: {}", document_id, e))
    })
}

fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

/// Turn a typed value (`{"stringValue": "x"}`) into plain JSON
fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|obj| obj.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        // 64-bit integers are sent as strings
        "integerValue" => match inner {
            Value::String(raw) => raw
                .parse::<i64>()
                .map(|n| Value::Number(Number::from(n)))
                .unwrap_or(Value::Null),
            other => other.clone(),
        },
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => inner.clone(),
    }
}
