use layers::LinkList;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlAnchorElement};

pub fn document() -> Result<Document, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

fn anchor(document: &Document, href: &str, download: &str) -> Result<HtmlAnchorElement, JsValue> {
    let a = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()?;
    a.set_href(href);
    a.set_download(download);
    Ok(a)
}

/// Asks the browser to save `url` as `filename`.
pub fn trigger_download(url: &str, filename: &str) -> Result<(), JsValue> {
    let document = document()?;
    anchor(&document, url, filename)?.click();
    Ok(())
}

pub fn alert(message: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.alert_with_message(message)
}

/// Appends a `<dt>`/`<dd>` pair per row to `parent`, usually a `<dl>`.
pub fn append_link_list(parent: &Element, list: &LinkList) -> Result<(), JsValue> {
    let document = document()?;
    for row in &list.rows {
        let label = document.create_element("dt")?;
        label.set_id(&row.label);
        label.append_child(&document.create_text_node(&row.label))?;
        parent.append_child(&label)?;

        let description = document.create_element("dd")?;
        let link = anchor(&document, &row.href, &row.download)?;
        link.set_text_content(Some(&row.text));
        description.append_child(&link)?;
        description.append_child(&document.create_text_node(&row.description))?;
        parent.append_child(&description)?;
    }
    Ok(())
}

pub fn append_error(parent: &Element, message: &str) -> Result<(), JsValue> {
    let document = document()?;
    let p = document.create_element("p")?;
    p.set_class_name("error");
    p.set_text_content(Some(message));
    parent.append_child(&p)?;
    Ok(())
}
