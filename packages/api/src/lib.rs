//! # API crate — typed clients for everything the site talks to over HTTP
//!
//! The browser controllers in `ui` never build URLs or parse JSON themselves;
//! they go through the clients defined here. All clients are generic over a
//! [`Transport`], so the same code runs against the browser's `fetch`
//! ([`FetchTransport`], `web` feature on wasm32) and against
//! [`ScriptedTransport`] in tests.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`http`] | Request/response value types and the [`Transport`] trait |
//! | [`csrf`] | Cookie parsing and the `X-CSRFToken` header |
//! | [`step`] | One submit step against the auth backend, as a tagged [`StepOutcome`] |
//! | [`auth`] | Session-auth endpoints, registration draft, session probe |
//! | [`weather`] | Open-Meteo current conditions and the weather glyph table |
//! | [`geocode`] | Nominatim reverse geocoding, country codes and flag images |
//!
//! ## Endpoints consumed
//!
//! | Endpoint | Method | Client call |
//! |----------|--------|-------------|
//! | `/auth/login/` | POST form | [`AuthClient::login`] |
//! | `/auth/request-code/` | POST form | [`AuthClient::request_code`], [`AuthClient::resend_code`] |
//! | `/auth/verify/` | POST form | [`AuthClient::verify`] |
//! | `/auth/upload-avatar/` | POST multipart | [`AuthClient::upload_avatar`] |
//! | `/auth/me/` | GET | [`AuthClient::me`] |
//! | open-meteo forecast | GET | [`WeatherClient::current`] |
//! | nominatim reverse | GET | [`GeocodeClient::reverse`] |

pub mod auth;
pub mod csrf;
mod error;
pub mod geocode;
pub mod http;
mod scripted;
pub mod step;
pub mod weather;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod fetch;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use fetch::{document_cookies, FetchTransport};

pub use auth::{AuthClient, AuthReply, DraftError, RegistrationDraft, SessionUser};
pub use error::ApiError;
pub use geocode::{FlagImage, GeocodeClient, Place};
pub use http::{Body, FormField, FormValue, HttpRequest, HttpResponse, Method, Transport};
pub use scripted::ScriptedTransport;
pub use step::StepOutcome;
pub use weather::{Glyph, WeatherClient, WeatherReading};
