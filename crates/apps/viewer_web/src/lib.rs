use catalog::DownloadManifest;
use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use layers::OverlayConfig;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

mod dom;
mod error;
mod leaflet;
mod page;

pub use error::LoadError;
pub use page::DownloadPage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Fetches the manifest at `manifest_url` and mounts the download page into
/// the elements `#map_id` and `#links_id`.
///
/// `staleness_cutoff` is an optional `YYYYMMDD` override. Once both
/// containers are found, any failure appends an error note to the links
/// container and the promise rejects.
#[wasm_bindgen]
pub async fn load_download_page(
    manifest_url: String,
    map_id: String,
    links_id: String,
    staleness_cutoff: Option<String>,
) -> Result<DownloadPage, JsValue> {
    let document = dom::document()?;
    let map_container: HtmlElement = dom::element_by_id(&document, &map_id)?;
    let links_container: Element = dom::element_by_id(&document, &links_id)?;

    match load(
        &manifest_url,
        staleness_cutoff,
        &map_container,
        &links_container,
    )
    .await
    {
        Ok(page) => Ok(page),
        Err(err) => {
            web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
            dom::append_error(&links_container, &err.notice())?;
            Err(err.into())
        }
    }
}

async fn load(
    manifest_url: &str,
    staleness_cutoff: Option<String>,
    map_container: &HtmlElement,
    links_container: &Element,
) -> Result<DownloadPage, LoadError> {
    let mut config = OverlayConfig::default();
    if let Some(raw) = staleness_cutoff {
        config.staleness_cutoff = raw.parse()?;
    }

    let manifest = fetch_manifest(manifest_url).await?;
    DownloadPage::mount(&manifest, map_container, links_container, &config)
        .map_err(|e| LoadError::Mount(error::describe(&e)))
}

async fn fetch_manifest(url: &str) -> Result<DownloadManifest, LoadError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;
    if !resp.ok() {
        return Err(LoadError::Fetch(format!(
            "HTTP {} fetching {url}",
            resp.status()
        )));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| LoadError::Fetch(e.to_string()))?;
    Ok(DownloadManifest::from_json_str(&text)?)
}
