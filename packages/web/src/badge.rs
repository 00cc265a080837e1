//! Location badge and weather widget on the home page.

use std::rc::Rc;

use api::{FetchTransport, FlagImage};
use store::SiteConfig;
use ui::{
    need, BadgeView, GeoBadge, GeoEnvironment, GeoNext, Mount, PermissionState, PositionError,
    RequestToken, WeatherDisplay, WeatherView,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, GeolocationPosition, GeolocationPositionError, PermissionStatus};

use crate::dom;

/// `#weatherText` plus the glyph element picked by `icon_selector`.
pub struct DomWeather {
    text: Option<Element>,
    icon: Option<Element>,
}

impl DomWeather {
    pub fn find(icon_selector: &str) -> Self {
        Self {
            text: dom::by_id("weatherText"),
            icon: dom::query(icon_selector),
        }
    }
}

impl WeatherView for DomWeather {
    fn show_weather(&self, display: &WeatherDisplay) {
        if let Some(text) = &self.text {
            dom::set_text(text, &display.temperature);
        }
        if let Some(icon) = &self.icon {
            let glyph = display.glyph.as_str();
            dom::set_text(icon, glyph);
            dom::set_attr(icon, "aria-label", &display.aria_label());
            dom::set_attr(icon, "title", glyph);
        }
    }
}

pub struct DomBadge {
    badge: Element,
    weather: DomWeather,
}

impl DomBadge {
    fn flag_img(flag: &FlagImage) -> Option<Element> {
        let img = dom::document()?.create_element("img").ok()?;
        dom::set_attr(&img, "class", "flag-img");
        dom::set_attr(&img, "src", &flag.src);
        dom::set_attr(&img, "srcset", &flag.srcset);
        dom::set_attr(&img, "width", &flag.width.to_string());
        dom::set_attr(&img, "height", &flag.height.to_string());
        dom::set_attr(&img, "alt", &flag.alt);
        dom::set_attr(&img, "title", &flag.title);
        Some(img)
    }
}

impl BadgeView for DomBadge {
    fn set_badge_text(&self, text: &str) {
        dom::set_text(&self.badge, text);
    }

    fn show_place(&self, label: &str, flag: Option<&FlagImage>) {
        self.badge.set_text_content(None);
        if let Some(img) = flag.and_then(Self::flag_img) {
            let _ = self.badge.append_child(&img);
        }
        match dom::document().and_then(|d| d.create_element("span").ok()) {
            Some(span) => {
                dom::set_text(&span, label);
                let _ = self.badge.append_child(&span);
            }
            None => dom::set_text(&self.badge, label),
        }
    }
}

impl WeatherView for DomBadge {
    fn show_weather(&self, display: &WeatherDisplay) {
        self.weather.show_weather(display);
    }
}

type Badge = GeoBadge<FetchTransport, DomBadge>;

pub fn mount(config: &SiteConfig) {
    let Some(badge) = Mount::attempt(|| {
        let badge = need(dom::by_id::<Element>("locationBadge"), "locationBadge")?;
        let view = DomBadge {
            badge,
            weather: DomWeather::find(".weather .icon"),
        };
        Ok(GeoBadge::new(FetchTransport::new(), view, config))
    })
    .log("geo_badge") else {
        return;
    };

    let badge = Rc::new(badge);
    let next = badge.start(&environment());
    follow(badge, next);
}

fn environment() -> GeoEnvironment {
    let Some(window) = dom::window() else {
        return GeoEnvironment {
            secure_context: false,
            hostname: String::new(),
            has_geolocation: false,
            has_permissions: false,
        };
    };
    let navigator = window.navigator();
    let has = |name: &str| js_sys::Reflect::has(&navigator, &JsValue::from_str(name)).unwrap_or(false);
    GeoEnvironment {
        secure_context: window.is_secure_context(),
        hostname: window.location().hostname().unwrap_or_default(),
        has_geolocation: has("geolocation"),
        has_permissions: has("permissions"),
    }
}

fn follow(badge: Rc<Badge>, next: GeoNext) {
    match next {
        GeoNext::Stop => {}
        GeoNext::QueryPermission => spawn_local(query_permission(badge)),
        GeoNext::RequestPosition(token) => request_position(badge, token),
    }
}

async fn permission_status() -> Result<PermissionStatus, JsValue> {
    let window = dom::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let permissions = window.navigator().permissions()?;
    let descriptor = js_sys::Object::new();
    js_sys::Reflect::set(&descriptor, &"name".into(), &"geolocation".into())?;
    let status = JsFuture::from(permissions.query(&descriptor)?).await?;
    status.dyn_into::<PermissionStatus>()
}

fn permission_state(status: &PermissionStatus) -> Option<PermissionState> {
    match status.state() {
        web_sys::PermissionState::Granted => Some(PermissionState::Granted),
        web_sys::PermissionState::Prompt => Some(PermissionState::Prompt),
        web_sys::PermissionState::Denied => Some(PermissionState::Denied),
        _ => None,
    }
}

async fn query_permission(badge: Rc<Badge>) {
    let status = match permission_status().await {
        Ok(status) => status,
        Err(e) => {
            tracing::debug!(error = %dom::js_message(&e), "permission query failed");
            let next = badge.permission_resolved(None);
            follow(badge, next);
            return;
        }
    };

    let next = badge.permission_resolved(permission_state(&status));
    if next != GeoNext::Stop {
        watch_permission(badge.clone(), &status);
    }
    follow(badge, next);
}

fn watch_permission(badge: Rc<Badge>, status: &PermissionStatus) {
    let watched = status.clone();
    let on_change = Closure::<dyn FnMut()>::new(move || {
        let Some(state) = permission_state(&watched) else {
            return;
        };
        let next = badge.permission_changed(state);
        follow(badge.clone(), next);
    });
    status.set_onchange(Some(on_change.as_ref().unchecked_ref()));
    on_change.forget();
}

fn request_position(badge: Rc<Badge>, token: RequestToken) {
    let geolocation = match dom::window().map(|w| w.navigator().geolocation()) {
        Some(Ok(geolocation)) => geolocation,
        _ => {
            badge.position_failed(token, PositionError::PositionUnavailable);
            return;
        }
    };

    let wanted = badge.position_options();
    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(wanted.high_accuracy);
    options.set_timeout(wanted.timeout_ms);
    options.set_maximum_age(wanted.maximum_age_ms);

    let located = badge.clone();
    let on_success = Closure::once_into_js(move |position: JsValue| {
        let Ok(position) = position.dyn_into::<GeolocationPosition>() else {
            located.position_failed(token, PositionError::PositionUnavailable);
            return;
        };
        let coords = position.coords();
        let (lat, lon) = (coords.latitude(), coords.longitude());
        spawn_local(async move {
            located.position_acquired(token, lat, lon).await;
        });
    });
    let failed = badge.clone();
    let on_error = Closure::once_into_js(move |error: JsValue| {
        let code = error
            .dyn_ref::<GeolocationPositionError>()
            .map(|e| e.code())
            .unwrap_or(0);
        failed.position_failed(token, PositionError::from_code(code));
    });

    if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
        on_success.unchecked_ref(),
        Some(on_error.unchecked_ref()),
        &options,
    ) {
        tracing::warn!(error = %dom::js_message(&e), "getCurrentPosition threw");
        badge.position_failed(token, PositionError::PositionUnavailable);
    }
}
