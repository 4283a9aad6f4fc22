//! HTTP client for the hosted document API.
//!
//! Endpoints:
//! ```text
//! POST   {endpoint}/databases/{db}/collections/{collection}/documents
//! GET    {endpoint}/databases/{db}/collections/{collection}/documents[?queries[]=...]
//! GET    {endpoint}/databases/{db}/collections/{collection}/documents/{id}
//! PATCH  {endpoint}/databases/{db}/collections/{collection}/documents/{id}
//! DELETE {endpoint}/databases/{db}/collections/{collection}/documents/{id}
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use trailmatch_core::TrailmatchError;

use super::{Collection, Document, DocumentStore, Filter, Order, Query, StoreError, StoreResult};
use crate::config::StoreConfig;

const PROJECT_HEADER: &str = "X-Project-Id";
const API_KEY_HEADER: &str = "X-Api-Key";

#[derive(Debug, Deserialize)]
struct DocumentList {
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// [`DocumentStore`] backed by the hosted REST API.
///
/// Uses the default update-then-create `upsert`.
pub struct RestDocumentStore {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
}

impl RestDocumentStore {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the first missing setting.
    pub fn new(config: &StoreConfig) -> Result<Self, TrailmatchError> {
        let require = |value: &Option<String>, name: &str| {
            value
                .clone()
                .ok_or_else(|| TrailmatchError::config(format!("{} is not set", name)))
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TrailmatchError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: require(&config.endpoint, "STORE_ENDPOINT")?,
            project_id: require(&config.project_id, "STORE_PROJECT_ID")?,
            api_key: require(&config.api_key, "STORE_API_KEY")?,
            database_id: require(&config.database_id, "STORE_DATABASE_ID")?,
        })
    }

    fn documents_url(&self, collection: Collection) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection
        )
    }

    fn document_url(&self, collection: Collection, id: &str) -> String {
        format!("{}/{}", self.documents_url(collection), id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(PROJECT_HEADER, &self.project_id)
            .header(API_KEY_HEADER, &self.api_key)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        collection: Collection,
        id: Option<&str>,
    ) -> StoreResult<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());
        tracing::warn!(
            "Document store {} on {}/{}: {}",
            status,
            collection,
            id.unwrap_or("*"),
            message
        );

        Err(classify(status, collection, id, message))
    }

    async fn read_document(response: Response) -> StoreResult<Document> {
        response
            .json::<Document>()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

/// Maps a failed response status to a [`StoreError`].
///
/// Throttling and server errors are `Unavailable` so callers may retry;
/// every other non-success status is the store refusing the request.
fn classify(
    status: StatusCode,
    collection: Collection,
    id: Option<&str>,
    message: String,
) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::not_found(collection, id.unwrap_or_default()),
        StatusCode::CONFLICT => StoreError::already_exists(collection, id.unwrap_or_default()),
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            StoreError::Unavailable(message)
        }
        _ => StoreError::Rejected(message),
    }
}

/// Encodes a filter in the API's JSON query syntax.
fn encode_filter(filter: &Filter) -> Value {
    match filter {
        Filter::Equal(field, value) => json!({
            "method": "equal",
            "attribute": field,
            "values": [value],
        }),
        Filter::And(filters) => json!({
            "method": "and",
            "values": filters.iter().map(encode_filter).collect::<Vec<_>>(),
        }),
        Filter::Or(filters) => json!({
            "method": "or",
            "values": filters.iter().map(encode_filter).collect::<Vec<_>>(),
        }),
    }
}

/// One `queries[]` parameter per clause.
fn encode_query(query: &Query) -> Vec<(&'static str, String)> {
    let mut clauses = Vec::new();
    if let Some(filter) = &query.filter {
        clauses.push(encode_filter(filter));
    }
    if let Some((field, order)) = &query.order_by {
        let method = match order {
            Order::Asc => "orderAsc",
            Order::Desc => "orderDesc",
        };
        clauses.push(json!({"method": method, "attribute": field}));
    }
    if let Some(limit) = query.limit {
        clauses.push(json!({"method": "limit", "values": [limit]}));
    }
    if query.offset > 0 {
        clauses.push(json!({"method": "offset", "values": [query.offset]}));
    }
    clauses
        .into_iter()
        .map(|clause| ("queries[]", clause.to_string()))
        .collect()
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn create(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        let request = self
            .client
            .post(self.documents_url(collection))
            .json(&json!({"documentId": id, "data": data}));
        let response = self.send(request, collection, Some(id)).await?;
        Self::read_document(response).await
    }

    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Document> {
        let request = self.client.get(self.document_url(collection, id));
        let response = self.send(request, collection, Some(id)).await?;
        Self::read_document(response).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: Document,
    ) -> StoreResult<Document> {
        let request = self
            .client
            .patch(self.document_url(collection, id))
            .json(&json!({"data": data}));
        let response = self.send(request, collection, Some(id)).await?;
        Self::read_document(response).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<()> {
        let request = self.client.delete(self.document_url(collection, id));
        match self.send(request, collection, Some(id)).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn list(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Document>> {
        let request = self
            .client
            .get(self.documents_url(collection))
            .query(&encode_query(query));
        let response = self.send(request, collection, None).await?;
        response
            .json::<DocumentList>()
            .await
            .map(|list| list.documents)
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_connection_settings() {
        let config = StoreConfig {
            endpoint: Some("https://store.example.com/v1".to_string()),
            ..StoreConfig::default()
        };
        let err = RestDocumentStore::new(&config).err().unwrap();
        assert_eq!(
            err,
            TrailmatchError::Config("STORE_PROJECT_ID is not set".to_string())
        );
    }

    #[test]
    fn test_classify_statuses() {
        let classify_user =
            |status| classify(status, Collection::User, Some("u1"), "boom".to_string());

        assert_eq!(
            classify_user(StatusCode::NOT_FOUND),
            StoreError::not_found(Collection::User, "u1")
        );
        assert_eq!(
            classify_user(StatusCode::CONFLICT),
            StoreError::already_exists(Collection::User, "u1")
        );
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::TOO_MANY_REQUESTS,
        ] {
            assert_eq!(classify_user(status), StoreError::Unavailable("boom".to_string()));
        }
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
        ] {
            assert_eq!(classify_user(status), StoreError::Rejected("boom".to_string()));
        }
    }

    #[test]
    fn test_classify_feeds_lookup_split() {
        let missing = classify(StatusCode::NOT_FOUND, Collection::Matches, None, String::new());
        assert!(missing.is_not_found());
        assert_eq!(
            missing,
            StoreError::NotFound {
                collection: "matches".to_string(),
                id: String::new(),
            }
        );

        let outage = TrailmatchError::from(classify(
            StatusCode::SERVICE_UNAVAILABLE,
            Collection::User,
            Some("u1"),
            "down".to_string(),
        ));
        assert!(outage.is_transient());
    }

    #[test]
    fn test_encode_query_clauses() {
        let query = Query::new()
            .filter(Filter::Or(vec![
                Filter::equal("sender_id", "u1"),
                Filter::equal("receiver_id", "u1"),
            ]))
            .order_by("created_at", Order::Asc)
            .page(100, 200);

        let clauses = encode_query(&query);
        assert_eq!(clauses.len(), 4);
        assert!(clauses.iter().all(|(key, _)| *key == "queries[]"));

        let filter: Value = serde_json::from_str(&clauses[0].1).unwrap();
        assert_eq!(filter["method"], "or");
        assert_eq!(filter["values"][1]["attribute"], "receiver_id");
        assert_eq!(clauses[1].1, r#"{"attribute":"created_at","method":"orderAsc"}"#);
        assert_eq!(clauses[3].1, r#"{"method":"offset","values":[200]}"#);
    }

    #[test]
    fn test_first_page_has_no_offset_clause() {
        let clauses = encode_query(&Query::new().page(100, 0));
        assert_eq!(clauses.len(), 1);
    }
}
