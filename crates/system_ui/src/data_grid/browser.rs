//! Browser delivery of export artifacts: file downloads and clipboard writes.

use std::time::Duration;

use data_grid_core::{ExportArtifact, ExportTarget};
#[cfg(target_arch = "wasm32")]
use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

/// How long a download's object URL outlives the click that started it.
const REVOKE_DELAY: Duration = Duration::from_secs(30);

/// Hands `artifact` to the browser.
pub(crate) async fn deliver_export(artifact: &ExportArtifact) -> Result<(), String> {
    match &artifact.target {
        ExportTarget::Download {
            file_name,
            mime_type,
        } => download(file_name, mime_type, &artifact.contents),
        ExportTarget::Clipboard => copy_to_clipboard(&artifact.contents).await,
    }
}

fn download(file_name: &str, mime_type: &str, contents: &str) -> Result<(), String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (file_name, mime_type, contents, REVOKE_DELAY);
        Err("file downloads are only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let document = window
            .document()
            .ok_or_else(|| "document unavailable".to_string())?;

        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(js_error_to_string)?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error_to_string)?;

        let anchor = document
            .create_element("a")
            .map_err(|err| format!("failed to create download anchor: {err:?}"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "failed to cast download anchor".to_string())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.set_hidden(true);

        // Firefox ignores clicks on detached anchors.
        match document.body() {
            Some(body) => {
                if let Err(err) = body.append_child(&anchor) {
                    logging::warn!(
                        "download anchor could not be attached: {}",
                        js_error_to_string(err)
                    );
                }
            }
            None => logging::warn!("document has no body; download anchor left detached"),
        }
        anchor.click();
        anchor.remove();

        // Revoking right after `click()` cancels the download in some browsers.
        leptos::set_timeout(
            move || {
                if let Err(err) = web_sys::Url::revoke_object_url(&url) {
                    logging::warn!("object URL revoke failed: {}", js_error_to_string(err));
                }
            },
            REVOKE_DELAY,
        );
        Ok(())
    }
}

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = text;
        Err("clipboard access is only available when compiled for wasm32".to_string())
    }

    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let clipboard = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
            .map_err(js_error_to_string)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err("clipboard API unavailable".to_string());
        }

        let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(js_error_to_string)?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| "clipboard.writeText unavailable".to_string())?;
        let promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(js_error_to_string)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| "clipboard.writeText did not return a promise".to_string())?;

        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(js_error_to_string)
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn downloads_outside_the_browser_report_an_error() {
        assert_eq!(
            download("team.json", "application/json", "[]"),
            Err("file downloads are only available when compiled for wasm32".to_string())
        );
    }
}
