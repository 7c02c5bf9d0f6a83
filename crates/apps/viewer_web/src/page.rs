use catalog::DownloadManifest;
use layers::{ClickOutcome, OverlayConfig, build_link_list, build_overlay};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::dom;
use crate::leaflet::{self, FeatureGroup, LeafletMap};

const INITIAL_CENTER: [f64; 2] = [45.0, -100.0];
const INITIAL_ZOOM: u32 = 4;

/// A mounted download page. Owns the map and the click handlers; dropping it
/// detaches the handlers, so keep it alive for the lifetime of the page.
#[wasm_bindgen]
pub struct DownloadPage {
    map: LeafletMap,
    tiles: FeatureGroup,
    handlers: Vec<Closure<dyn FnMut(JsValue)>>,
    skipped: Vec<String>,
    link_count: usize,
}

#[wasm_bindgen]
impl DownloadPage {
    #[wasm_bindgen(getter)]
    pub fn tile_count(&self) -> usize {
        self.handlers.len()
    }

    #[wasm_bindgen(getter)]
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    /// Manifest keys that were not valid bucket names.
    #[wasm_bindgen(getter)]
    pub fn skipped(&self) -> Vec<String> {
        self.skipped.clone()
    }

    /// Re-fits the view to the drawn tiles, e.g. after the container resized.
    pub fn fit(&self) {
        let bounds = self.tiles.get_bounds();
        if bounds.is_valid() {
            self.map.fit_bounds(&bounds);
        }
    }
}

impl DownloadPage {
    /// Draws the manifest into `map_container` and lists it in
    /// `links_container`. Both containers are only appended to.
    pub fn mount(
        manifest: &DownloadManifest,
        map_container: &HtmlElement,
        links_container: &Element,
        config: &OverlayConfig<'_>,
    ) -> Result<DownloadPage, JsValue> {
        let map = leaflet::map(map_container);
        map.set_view(
            &leaflet::lat_lng(INITIAL_CENTER[0], INITIAL_CENTER[1]),
            INITIAL_ZOOM,
        );
        leaflet::osm_base_layer()?.add_to(&map);

        let plan = build_overlay(manifest, config);
        for skipped in &plan.skipped {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "skipping manifest entry {:?}: {}",
                skipped.key, skipped.error
            )));
        }

        let tiles = leaflet::feature_group();
        let mut handlers = Vec::with_capacity(plan.tiles.len());
        for tile in &plan.tiles {
            let rect = leaflet::rectangle(
                &leaflet::bounds_array(&tile.bounds),
                &leaflet::path_options(tile.style())?,
            );
            rect.bind_tooltip(&tile.tooltip);

            let outcome = tile.click();
            let handler = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
                if let Err(err) = perform(&outcome) {
                    web_sys::console::log_1(&JsValue::from_str(&format!(
                        "tile click failed: {:?}",
                        err
                    )));
                }
            });
            rect.on("click", handler.as_ref().unchecked_ref());
            handlers.push(handler);

            tiles.add_layer(&rect);
        }
        map.add_layer(&tiles);

        let links = build_link_list(manifest);
        dom::append_link_list(links_container, &links)?;

        let page = DownloadPage {
            map,
            tiles,
            handlers,
            skipped: plan.skipped.into_iter().map(|s| s.key).collect(),
            link_count: links.len(),
        };
        page.fit();
        Ok(page)
    }
}

fn perform(outcome: &ClickOutcome) -> Result<(), JsValue> {
    match outcome {
        ClickOutcome::Download { url, filename } => dom::trigger_download(url, filename),
        ClickOutcome::Notice(message) => dom::alert(message),
    }
}
