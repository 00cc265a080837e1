//! # Browser `fetch` transport
//!
//! [`FetchTransport`] sends requests through `gloo-net`. Form bodies become
//! a `FormData` object, so the browser picks `multipart/form-data` with the
//! right boundary; file parts are rebuilt as `Blob`s carrying their original
//! name and MIME type. Cookies ride along under the default same-origin
//! credentials policy, which is what the session backend relies on.

use gloo_net::http::Request;
use wasm_bindgen::JsCast;

use crate::error::ApiError;
use crate::http::{Body, FormField, FormValue, HttpRequest, HttpResponse, Method, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

/// Current `document.cookie`, if there is a document.
pub fn document_cookies() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()
}

fn js_error(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Request(format!("{e:?}"))
}

fn form_data(fields: &[FormField]) -> Result<web_sys::FormData, ApiError> {
    let data = web_sys::FormData::new().map_err(js_error)?;
    for field in fields {
        match &field.value {
            FormValue::Text(text) => data.append_with_str(&field.name, text).map_err(js_error)?,
            FormValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes.as_slice()));
                let options = web_sys::BlobPropertyBag::new();
                options.set_type(content_type);
                let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                    .map_err(js_error)?;
                data.append_with_blob_and_filename(&field.name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(data)
}

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let sent = match &request.body {
            Body::Empty => builder.send().await,
            Body::Form(fields) => {
                let body = form_data(fields)?;
                builder
                    .body(body)
                    .map_err(|e| ApiError::Request(e.to_string()))?
                    .send()
                    .await
            }
        };
        let response = sent.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
