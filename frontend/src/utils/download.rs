pub const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Saves `csv_data` through a temporary object URL and hidden anchor.
#[cfg(target_arch = "wasm32")]
pub fn trigger_csv_download(filename: &str, csv_data: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(csv_data));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(CSV_MIME);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "Could not prepare the export".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Could not prepare the export".to_string())?;

    let result = (|| -> Result<(), String> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;
        let anchor = document
            .create_element("a")
            .map_err(|_| "Could not create download link".to_string())?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "Could not create download link".to_string())?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();
        let body = document.body().ok_or("No body")?;
        body.append_child(&anchor)
            .map_err(|_| "Could not attach download link".to_string())?;
        anchor.click();
        anchor.remove();
        Ok(())
    })();
    let _ = web_sys::Url::revoke_object_url(&url);
    result
}

#[cfg(not(target_arch = "wasm32"))]
pub fn trigger_csv_download(filename: &str, _csv_data: &str) -> Result<(), String> {
    log::debug!("skipping download of {} outside the browser", filename);
    Err("Downloads are only available in the browser".to_string())
}
