//! Request builder and response parser for the postgres todos API.
//!
//! # Design
//! `TodoApi` holds only the resolved collection URL. Each operation is split
//! into a `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`, so the caller owns the round-trip and this
//! module stays deterministic.
//!
//! Responses are checked for a 2xx status before the body is looked at, and
//! bodies are deserialized into typed values. A 4xx/5xx never reaches serde.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo};

/// Collection path relative to the base URL.
pub const TODOS_PATH: &str = "/api/v1/examples/postgres";

#[derive(Debug, Clone)]
pub struct TodoApi {
    collection_url: String,
}

impl TodoApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            collection_url: format!("{}{TODOS_PATH}", config.base_url.trim().trim_end_matches('/')),
        }
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url.clone(),
            headers: json_headers(),
            body: None,
        }
    }

    pub fn build_create(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.collection_url.clone(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_remove(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/{id}", self.collection_url),
            headers: json_headers(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The server's confirmation body is not interpreted, only checked to be
    /// JSON when present.
    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(());
        }
        decode::<serde_json::Value>(&response.body).map(|_| ())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> TodoApi {
        TodoApi::new(&ClientConfig::new("http://localhost:3000").unwrap())
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = api().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/v1/examples/postgres");
        assert_eq!(req.headers, json_headers());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_sends_text_body() {
        let req = api().build_create(&CreateTodo::new("buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/v1/examples/postgres");
        assert_eq!(req.headers, json_headers());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "text": "buy milk" }));
    }

    #[test]
    fn build_remove_appends_id() {
        let req = api().build_remove("1");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/v1/examples/postgres/1");
        assert_eq!(req.headers, json_headers());
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let api = TodoApi::new(&ClientConfig::new("http://localhost:3000/").unwrap());
        assert_eq!(api.build_list().url, "http://localhost:3000/api/v1/examples/postgres");
    }

    #[test]
    fn parse_list_success() {
        let todos = api().parse_list(response(200, r#"[{"id":"1","text":"a"}]"#)).unwrap();
        assert_eq!(
            todos,
            vec![Todo {
                id: "1".to_string(),
                text: "a".to_string()
            }]
        );
    }

    #[test]
    fn parse_list_wrong_shape() {
        let err = api().parse_list(response(200, r#"{"todos":[]}"#)).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_server_error_is_not_parsed() {
        let err = api().parse_list(response(500, r#"[]"#)).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                body: "[]".to_string()
            }
        );
    }

    #[test]
    fn parse_create_accepts_200_and_201() {
        let body = r#"{"id":"7","text":"buy milk"}"#;
        assert_eq!(api().parse_create(response(200, body)).unwrap().id, "7");
        assert_eq!(api().parse_create(response(201, body)).unwrap().id, "7");
    }

    #[test]
    fn parse_remove_accepts_empty_and_json_bodies() {
        assert!(api().parse_remove(response(204, "")).is_ok());
        assert!(api().parse_remove(response(200, r#"{"id":"1","text":"a"}"#)).is_ok());
    }

    #[test]
    fn parse_remove_rejects_non_json_body() {
        let err = api().parse_remove(response(200, "deleted")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_remove_not_found() {
        let err = api().parse_remove(response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }
}
