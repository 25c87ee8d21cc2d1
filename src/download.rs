//! Save generated text as a file through the browser.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

fn js_error(context: &str, err: JsValue) -> String {
    format!("{}: {:?}", context, err)
}

fn blob_url_from_str(contents: &str, mime: &str) -> Result<String, String> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("failed to create blob", e))?;
    Url::create_object_url_with_blob(&blob).map_err(|e| js_error("failed to create object URL", e))
}

/// Offer `contents` as a download named `file_name`.
pub fn save_text(file_name: &str, contents: &str, mime: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document available".to_string())?;

    let url = blob_url_from_str(contents, mime)?;
    let anchor = document
        .create_element("a")
        .map_err(|e| js_error("failed to create link", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "created element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    let _ = Url::revoke_object_url(&url);
    tracing::info!(file_name, bytes = contents.len(), "download started");
    Ok(())
}

pub fn save_csv(file_name: &str, contents: &str) -> Result<(), String> {
    save_text(file_name, contents, CSV_MIME)
}
