//! One round-trip against the auth backend, reduced to three outcomes.
//!
//! Every auth endpoint answers `{"successful": bool, "message"?: string}`.
//! [`submit_step`] sends a prepared request and classifies the result so the
//! UI only has to pick between advancing, showing the server's message, or
//! showing the "network unavailable" text.

use serde::de::DeserializeOwned;

use crate::http::{HttpRequest, Transport};

/// Replies that carry the backend's success flag.
pub trait Acknowledged {
    fn successful(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome<T> {
    /// The backend accepted the step.
    Accepted(T),
    /// The backend refused; carries its message when one was given.
    Rejected(Option<String>),
    /// No usable reply: the request failed or the body was not JSON.
    Unreachable,
}

impl<T> StepOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, StepOutcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            StepOutcome::Accepted(reply) => Some(reply),
            _ => None,
        }
    }
}

pub async fn submit_step<T, R>(transport: &T, request: HttpRequest) -> StepOutcome<R>
where
    T: Transport,
    R: Acknowledged + DeserializeOwned,
{
    let url = request.url.clone();
    let response = match transport.send(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(%url, error = %e, "auth request failed");
            return StepOutcome::Unreachable;
        }
    };
    let reply: R = match response.json() {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(%url, status = response.status, error = %e, "auth reply not understood");
            return StepOutcome::Unreachable;
        }
    };
    if reply.successful() {
        StepOutcome::Accepted(reply)
    } else {
        let message = reply
            .message()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        tracing::debug!(%url, ?message, "auth step rejected");
        StepOutcome::Rejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthReply;
    use crate::http::HttpResponse;
    use crate::scripted::ScriptedTransport;

    async fn run(transport: &ScriptedTransport) -> StepOutcome<AuthReply> {
        submit_step(transport, HttpRequest::post_form("/auth/verify/")).await
    }

    #[tokio::test]
    async fn test_accepted() {
        let transport = ScriptedTransport::new();
        transport.respond_json("/auth/verify/", r#"{"successful": true, "need_avatar": true}"#);

        let outcome = run(&transport).await;
        let reply = outcome.accepted().unwrap();
        assert_eq!(reply.need_avatar, Some(true));
    }

    #[tokio::test]
    async fn test_rejected_with_and_without_message() {
        let transport = ScriptedTransport::new();
        transport
            .respond(
                "/auth/verify/",
                Ok(HttpResponse {
                    status: 400,
                    body: r#"{"successful": false, "message": "Неверный код подтверждения."}"#
                        .into(),
                }),
            )
            .respond_json("/auth/verify/", r#"{"successful": false, "message": "  "}"#);

        assert_eq!(
            run(&transport).await,
            StepOutcome::Rejected(Some("Неверный код подтверждения.".into()))
        );
        assert_eq!(run(&transport).await, StepOutcome::Rejected(None));
    }

    #[tokio::test]
    async fn test_transport_and_decode_failures_are_unreachable() {
        let transport = ScriptedTransport::new();
        transport
            .fail("/auth/verify/")
            .respond_json("/auth/verify/", "<html>502 Bad Gateway</html>");

        assert_eq!(run(&transport).await, StepOutcome::Unreachable);
        assert_eq!(run(&transport).await, StepOutcome::Unreachable);
    }
}
