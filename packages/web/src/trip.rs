//! Trip detail page, trip cards and the background video.

use api::{FetchTransport, WeatherClient};
use store::SiteConfig;
use ui::trip::{pill_height, TripSources};
use ui::{need, weather_widget, Mount};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, HtmlVideoElement};

use crate::badge::DomWeather;
use crate::dom;

pub fn mount_trip_page(config: &SiteConfig) {
    let Some(hero) = Mount::attempt(|| need(dom::by_id::<HtmlElement>("tripHero"), "tripHero"))
        .log("trip_page")
    else {
        return;
    };
    let sources = TripSources {
        query_bg: dom::query_param("bg"),
        query_lat: dom::query_param("lat"),
        query_lon: dom::query_param("lon"),
        data_bg: hero.get_attribute("data-bg"),
        data_lat: hero.get_attribute("data-lat"),
        data_lon: hero.get_attribute("data-lon"),
    };

    if let Some(image) = sources.hero_image() {
        dom::set_style(&hero, &[("--hero-img", image.as_str())]);
        if let Some(body) = dom::body() {
            dom::set_style(&body, &[("--hero-img", image.as_str())]);
        }
    }

    let (lat, lon) = sources.coordinates(&config.trip);
    let client = WeatherClient::new(FetchTransport::new(), config.weather.clone());
    spawn_local(async move {
        let reading = client.current_or_fallback(lat, lon).await;
        weather_widget::render(&DomWeather::find(".hero-weather .icon"), &reading);
    });

    if let Some(fab) = dom::by_id::<Element>("favFab") {
        let target = fab.clone();
        dom::on(&fab, "click", move |_| {
            let _ = target.class_list().toggle("is-active");
        });
    }
}

fn sync_pills() {
    for card in dom::query_all::<HtmlElement>(".trip-card") {
        let height = card.get_bounding_client_rect().height();
        dom::set_style(&card, &[("--cardH", pill_height(height).as_str())]);
    }
}

pub fn mount_trip_cards() {
    let Some(window) = dom::window() else {
        return;
    };
    dom::on(&window, "load", |_| sync_pills());
    dom::on(&window, "resize", |_| sync_pills());
    if let Some(document) = dom::document() {
        if let Ok(ready) = document.fonts().ready() {
            let on_ready = Closure::<dyn FnMut(wasm_bindgen::JsValue)>::new(|_| sync_pills());
            let _ = ready.then(&on_ready);
            on_ready.forget();
        }
    }

    dom::on_document("click", |event| {
        let button = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".trip-fav").ok().flatten());
        if let Some(button) = button {
            let _ = button.class_list().toggle("is-active");
        }
    });
}

pub fn respect_reduced_motion() {
    let Some(video) = dom::by_id::<HtmlVideoElement>("bgCircleVideo") else {
        return;
    };
    let reduce = dom::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches());
    if reduce {
        let _ = video.remove_attribute("autoplay");
        let _ = video.pause();
    }
}
