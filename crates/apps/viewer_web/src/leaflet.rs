//! Bindings for the parts of Leaflet the download map uses. Expects the
//! global `L` from leaflet.js.

use foundation::LatLonBounds;
use js_sys::{Array, Object, Reflect};
use layers::TileStyle;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>";
pub const OSM_MAX_ZOOM: u32 = 15;

#[wasm_bindgen]
extern "C" {
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Layer, map: &LeafletMap) -> Layer;

    #[wasm_bindgen(method, js_name = bindTooltip)]
    pub fn bind_tooltip(this: &Layer, content: &str) -> Layer;

    #[wasm_bindgen(method)]
    pub fn on(this: &Layer, event: &str, handler: &js_sys::Function) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = rectangle)]
    pub fn rectangle(bounds: &Array, options: &Object) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    pub fn tile_layer(url_template: &str, options: &Object) -> Layer;
}

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    pub fn map(container: &HtmlElement) -> LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    pub fn set_view(this: &LeafletMap, center: &Array, zoom: u32) -> LeafletMap;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &LeafletMap, layer: &Layer) -> LeafletMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &LeafletMap, bounds: &LatLngBounds) -> LeafletMap;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = Layer)]
    pub type FeatureGroup;

    #[wasm_bindgen(js_namespace = L, js_name = featureGroup)]
    pub fn feature_group() -> FeatureGroup;

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &FeatureGroup, layer: &Layer) -> FeatureGroup;

    #[wasm_bindgen(method, js_name = getBounds)]
    pub fn get_bounds(this: &FeatureGroup) -> LatLngBounds;
}

#[wasm_bindgen]
extern "C" {
    pub type LatLngBounds;

    #[wasm_bindgen(method, js_name = isValid)]
    pub fn is_valid(this: &LatLngBounds) -> bool;
}

/// `[[south, west], [north, east]]` as a JS array.
pub fn bounds_array(bounds: &LatLonBounds) -> Array {
    let [sw, ne] = bounds.corners();
    Array::of2(&lat_lng(sw[0], sw[1]), &lat_lng(ne[0], ne[1]))
}

pub fn lat_lng(lat: f64, lon: f64) -> Array {
    Array::of2(&JsValue::from_f64(lat), &JsValue::from_f64(lon))
}

pub fn path_options(style: TileStyle) -> Result<Object, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"color".into(), &style.color.into())?;
    Reflect::set(&options, &"weight".into(), &JsValue::from(style.weight))?;
    Ok(options)
}

/// OpenStreetMap base layer.
pub fn osm_base_layer() -> Result<Layer, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"maxZoom".into(), &JsValue::from(OSM_MAX_ZOOM))?;
    Reflect::set(&options, &"attribution".into(), &OSM_ATTRIBUTION.into())?;
    Ok(tile_layer(OSM_TILE_URL, &options))
}
