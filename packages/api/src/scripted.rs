use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// In-memory Transport for tests and offline previews.
///
/// Responses are queued per URL prefix and consumed in order; the longest
/// matching prefix wins. Every request is recorded. A request with no queued
/// response fails as a transport error.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<HashMap<String, VecDeque<Result<HttpResponse, ApiError>>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, url_prefix: &str, response: Result<HttpResponse, ApiError>) -> &Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses
                .entry(url_prefix.to_string())
                .or_default()
                .push_back(response);
        }
        self
    }

    /// Queue a 200 response with the given JSON body.
    pub fn respond_json(&self, url_prefix: &str, body: &str) -> &Self {
        self.respond(url_prefix, Ok(HttpResponse::ok_json(body)))
    }

    pub fn fail(&self, url_prefix: &str) -> &Self {
        self.respond(
            url_prefix,
            Err(ApiError::Transport("connection refused".to_string())),
        )
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Requests whose URL starts with `url_prefix`.
    pub fn requests_to(&self, url_prefix: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.starts_with(url_prefix))
            .collect()
    }

    fn next_response(&self, url: &str) -> Option<Result<HttpResponse, ApiError>> {
        let mut responses = self.responses.lock().ok()?;
        let prefix = responses
            .iter()
            .filter(|(prefix, queue)| url.starts_with(prefix.as_str()) && !queue.is_empty())
            .map(|(prefix, _)| prefix.clone())
            .max_by_key(|prefix| prefix.len())?;
        responses.get_mut(&prefix)?.pop_front()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.url.clone();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.next_response(&url)
            .unwrap_or_else(|| Err(ApiError::Transport(format!("no scripted response for {url}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json("/auth/", r#"{"n":1}"#)
            .respond_json("/auth/", r#"{"n":2}"#);

        let first = transport.send(HttpRequest::get("/auth/me/")).await.unwrap();
        let second = transport.send(HttpRequest::get("/auth/me/")).await.unwrap();
        let third = transport.send(HttpRequest::get("/auth/me/")).await;

        assert_eq!(first.body, r#"{"n":1}"#);
        assert_eq!(second.body, r#"{"n":2}"#);
        assert!(matches!(third, Err(ApiError::Transport(_))));
        assert_eq!(transport.requests_to("/auth/me/").len(), 3);
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let transport = ScriptedTransport::new();
        transport
            .respond_json("/auth/", "generic")
            .respond_json("/auth/login/", "login");

        let response = transport.send(HttpRequest::post_form("/auth/login/")).await.unwrap();
        assert_eq!(response.body, "login");
    }
}
