//! HTTP client for the items backend.
//!
//! # Design
//! Request construction (`build_*`) and response normalization
//! (`parse_response`) are pure and never touch the network, so every status
//! and body combination can be tested with plain values. The async `get` and
//! `post` wrappers glue the two halves together through a [`Transport`],
//! which is the only place I/O happens.
//!
//! All fields use owned types (`String`, `Vec`) so requests can be moved
//! onto a blocking worker without lifetime concerns.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, TransportError};

/// Message used when a non-2xx body carries neither `error` nor `message`.
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown error from backend";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `endpoint` is the path relative to the base URL (e.g. `/items`) and is
/// kept for error messages; `url` is the absolute address to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data, as returned by a transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// True when the `content-type` header announces JSON.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A parsed response body: JSON when the server said so, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Extract a server-provided failure message: the `error` field, then the
    /// `message` field. Empty strings count as absent.
    pub fn error_message(&self) -> Option<String> {
        let ResponseBody::Json(value) = self else {
            return None;
        };
        ["error", "message"]
            .iter()
            .filter_map(|field| value.get(*field).and_then(|v| v.as_str()))
            .find(|message| !message.is_empty())
            .map(str::to_string)
    }
}

/// Client for the items backend, bound to one base URL and one transport.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    base_url: String,
    transport: T,
}

impl<T> HttpClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_get(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            endpoint: endpoint.to_string(),
            url: format!("{}{endpoint}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn build_post<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            endpoint: endpoint.to_string(),
            url: format!("{}{endpoint}", self.base_url),
            headers: vec![
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    /// Normalize a response into a body or a typed error.
    ///
    /// Every non-2xx response becomes `ApiError::Server`; a JSON body that
    /// fails to parse there is kept as text. Only a 2xx response with a
    /// malformed JSON body is `ApiError::Decode`.
    pub fn parse_response(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ResponseBody, ApiError> {
        if response.is_success() {
            return decode_body(request, response);
        }
        let status = response.status;
        let body = decode_error_body(response);
        let message = body
            .error_message()
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        Err(ApiError::Server {
            status,
            message,
            details: body,
        })
    }
}

impl<T: Transport> HttpClient<T> {
    pub async fn get(&self, endpoint: &str) -> Result<ResponseBody, ApiError> {
        let request = self.build_get(endpoint);
        self.send(request).await
    }

    pub async fn post<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<ResponseBody, ApiError> {
        let request = self.build_post(endpoint, payload)?;
        self.send(request).await
    }

    /// Execute `request` through the transport without interpreting the
    /// status. Only a missing response is an error here.
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self
            .transport
            .execute(request.clone())
            .await
            .map_err(|e| transport_error(request, e))?;
        debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<ResponseBody, ApiError> {
        let response = self.execute(&request).await?;
        self.parse_response(&request, response)
    }
}

fn transport_error(request: &HttpRequest, err: TransportError) -> ApiError {
    ApiError::Transport {
        message: format!("Network error on {} {}", request.method, request.endpoint),
        details: err.to_string(),
    }
}

fn decode_body(request: &HttpRequest, response: HttpResponse) -> Result<ResponseBody, ApiError> {
    if !response.is_json() {
        return Ok(ResponseBody::Text(response.body));
    }
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(ResponseBody::Json(value)),
        Err(e) => Err(ApiError::Decode {
            status: Some(response.status),
            message: format!(
                "Malformed JSON response from {} {}: {e}",
                request.method, request.endpoint
            ),
            details: response.body,
        }),
    }
}

fn decode_error_body(response: HttpResponse) -> ResponseBody {
    if !response.is_json() {
        return ResponseBody::Text(response.body);
    }
    match serde_json::from_str(&response.body) {
        Ok(value) => ResponseBody::Json(value),
        Err(_) => ResponseBody::Text(response.body),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn client() -> HttpClient<()> {
        HttpClient::new(&ClientConfig::new("http://localhost:8000"), ())
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![(
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            )],
            body: body.to_string(),
        }
    }

    fn text_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get("/items");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8000/items");
        assert_eq!(req.endpoint, "/items");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_post_serializes_payload_as_json() {
        let req = client().build_post("/items", &json!({ "name": "Widget" })).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req
            .headers
            .contains(&("content-type".to_string(), "application/json".to_string())));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "name": "Widget" }));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = HttpClient::new(&ClientConfig::new("http://localhost:8000//"), ());
        assert_eq!(client.build_get("/items").url, "http://localhost:8000/items");
    }

    #[test]
    fn success_with_json_content_type_is_parsed() {
        let c = client();
        let req = c.build_get("/items");
        let body = c.parse_response(&req, json_response(200, r#"[{"id":1,"name":"A"}]"#)).unwrap();
        assert_eq!(body, ResponseBody::Json(json!([{ "id": 1, "name": "A" }])));
    }

    #[test]
    fn success_without_json_content_type_is_text() {
        let c = client();
        let req = c.build_get("/health");
        let body = c.parse_response(&req, text_response(200, "ok")).unwrap();
        assert_eq!(body, ResponseBody::Text("ok".to_string()));
    }

    #[test]
    fn server_error_prefers_error_field() {
        let c = client();
        let req = c.build_get("/items");
        let err = c
            .parse_response(&req, json_response(500, r#"{"error":"db down","message":"ignored"}"#))
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), "db down");
        assert_eq!(
            err.details(),
            Some(ResponseBody::Json(json!({ "error": "db down", "message": "ignored" })))
        );
    }

    #[test]
    fn server_error_falls_back_to_message_field() {
        let c = client();
        let req = c.build_get("/items");
        let err = c
            .parse_response(&req, json_response(422, r#"{"message":"bad name"}"#))
            .unwrap_err();
        assert_eq!(err.message(), "bad name");
    }

    #[test]
    fn server_error_with_plain_text_uses_generic_message() {
        let c = client();
        let req = c.build_get("/items");
        let err = c.parse_response(&req, text_response(502, "Bad Gateway")).unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.message(), UNKNOWN_SERVER_ERROR);
        assert_eq!(err.details(), Some(ResponseBody::Text("Bad Gateway".to_string())));
    }

    #[test]
    fn server_error_with_unparseable_json_uses_generic_message() {
        let c = client();
        let req = c.build_get("/items");
        let err = c
            .parse_response(&req, json_response(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
        assert_eq!(err.message(), UNKNOWN_SERVER_ERROR);
        assert_eq!(
            err.details(),
            Some(ResponseBody::Text("<html>Bad Gateway</html>".to_string()))
        );
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let c = client();
        let req = c.build_get("/items");
        let err = c.parse_response(&req, json_response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: Some(200), .. }));
        assert!(err.message().starts_with("Malformed JSON response from GET /items"));
    }

    #[test]
    fn transport_error_names_method_and_endpoint() {
        let c = client();
        let req = c.build_post("/items", &json!({ "name": "x" })).unwrap();
        let err = transport_error(&req, TransportError("connection refused".to_string()));
        assert_eq!(err.message(), "Network error on POST /items");
        assert_eq!(err.status(), None);
    }
}
