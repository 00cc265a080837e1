//! Plain request/response values and the [`Transport`] seam.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One form-data entry value.
#[derive(Clone, Debug, PartialEq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: FormValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Empty,
    /// Form fields sent as a browser `FormData` body. Files make the
    /// request multipart.
    Form(Vec<FormField>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    pub fn post_form(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Form(Vec::new()),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_field(name.into(), FormValue::Text(value.into()));
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: FormValue) -> Self {
        self.push_field(name.into(), value);
        self
    }

    fn push_field(&mut self, name: String, value: FormValue) {
        match &mut self.body {
            Body::Form(fields) => fields.push(FormField { name, value }),
            Body::Empty => self.body = Body::Form(vec![FormField { name, value }]),
        }
    }

    /// Text value of a form field, if present.
    pub fn form_text(&self, name: &str) -> Option<&str> {
        let Body::Form(fields) = &self.body else {
            return None;
        };
        fields.iter().find(|f| f.name == name).and_then(|f| match &f.value {
            FormValue::Text(s) => Some(s.as_str()),
            FormValue::File { .. } => None,
        })
    }

    pub fn has_field(&self, name: &str) -> bool {
        matches!(&self.body, Body::Form(fields) if fields.iter().any(|f| f.name == name))
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Decode the body as JSON regardless of the status code; the auth
    /// backend reports rejections as JSON on 4xx responses.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Async HTTP seam used by every client in this crate.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, ApiError>>;
}

impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, ApiError>> {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_builder_collects_fields() {
        let req = HttpRequest::post_form("/x")
            .header("X-CSRFToken", "t")
            .text("email", "a@b.c")
            .field(
                "avatar",
                FormValue::File {
                    file_name: "me.png".into(),
                    content_type: "image/png".into(),
                    bytes: vec![1, 2, 3],
                },
            );

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.form_text("email"), Some("a@b.c"));
        assert_eq!(req.form_text("avatar"), None);
        assert!(req.has_field("avatar"));
        assert!(!req.has_field("phone"));
        assert_eq!(req.header_value("x-csrftoken"), Some("t"));
    }

    #[test]
    fn test_json_decodes_error_status_bodies() {
        #[derive(serde::Deserialize)]
        struct Reply {
            successful: bool,
        }
        let response = HttpResponse {
            status: 401,
            body: r#"{"successful": false}"#.into(),
        };
        let reply: Reply = response.json().unwrap();
        assert!(!reply.successful);
    }
}
