use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

/// HTTP client for the JurisAI API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { base_url, client })
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    pub fn index_url(&self) -> String {
        format!("{}/index", self.base_url)
    }

    /// Search payload as sent to `/search`
    pub fn search_payload(query: &str, limit: usize) -> Value {
        json!({ "query": query, "max_results": limit })
    }

    /// Index query parameters as sent to `/index`
    pub fn index_params(content: &str, title: &str) -> Vec<(String, String)> {
        let metadata = json!({ "title": title });
        vec![
            ("content".to_string(), content.to_string()),
            ("metadata".to_string(), metadata.to_string()),
        ]
    }

    /// POST `/search`; non-2xx responses are errors
    pub async fn search(&self, payload: &Value) -> Result<Vec<Value>> {
        let url = self.search_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// POST `/index`, returning the raw response body
    pub async fn index(&self, params: &[(String, String)]) -> Result<String> {
        let url = self.index_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{web, App, HttpResponse, HttpServer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct IndexParams {
        content: String,
        metadata: String,
    }

    async fn fake_index(params: web::Query<IndexParams>) -> HttpResponse {
        let metadata: Value = serde_json::from_str(&params.metadata).unwrap_or(Value::Null);
        HttpResponse::Ok().json(json!({
            "status": "indexed",
            "id": format!("doc_{}", params.content.len()),
            "title": metadata["title"],
        }))
    }

    async fn fake_search(body: web::Json<Value>) -> HttpResponse {
        if body["query"] == "explode" {
            return HttpResponse::InternalServerError().json(json!({ "detail": "boom" }));
        }
        HttpResponse::Ok().json(json!([{
            "id": "doc_1",
            "content": body["query"],
            "metadata": { "title": "Doc1" },
            "score": 0.1,
            "limit": body["max_results"],
        }]))
    }

    fn spawn_fake_api() -> String {
        let server = HttpServer::new(|| {
            App::new()
                .route("/index", web::post().to(fake_index))
                .route("/search", web::post().to(fake_search))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{}", addr)
    }

    #[test]
    fn test_urls() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.search_url(), "http://localhost:8000/search");
        assert_eq!(client.index_url(), "http://localhost:8000/index");
    }

    #[test]
    fn test_index_params_encode_title_as_json() {
        let params = ApiClient::index_params("contract law basics", "Doc1");
        assert_eq!(params[0], ("content".to_string(), "contract law basics".to_string()));
        let metadata: Value = serde_json::from_str(&params[1].1).unwrap();
        assert_eq!(metadata, json!({ "title": "Doc1" }));
    }

    #[actix_web::test]
    async fn test_index_sends_query_params() {
        let client = ApiClient::new(spawn_fake_api()).unwrap();

        let body = client
            .index(&ApiClient::index_params("contract law", "Doc & Co"))
            .await
            .unwrap();
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["id"], "doc_12");
        assert_eq!(body["title"], "Doc & Co");
    }

    #[actix_web::test]
    async fn test_search_posts_payload() {
        let client = ApiClient::new(spawn_fake_api()).unwrap();

        let results = client
            .search(&ApiClient::search_payload("contract law", 5))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["content"], "contract law");
        assert_eq!(results[0]["limit"], 5);
    }

    #[actix_web::test]
    async fn test_server_error_is_an_error() {
        let client = ApiClient::new(spawn_fake_api()).unwrap();

        let err = client
            .search(&ApiClient::search_payload("explode", 5))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[actix_web::test]
    async fn test_unreachable_server_is_an_error() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        assert!(client.search(&ApiClient::search_payload("q", 1)).await.is_err());
    }
}
