//! ztunnel - endless procedural tunnel
//!
//! Streams a single-path chain of rings ahead of a moving viewpoint:
//! - core: chain, generator, pruner / origin rebase, camera, projector, renderer
//! - app: egui viewer with live parameter tuning (native + WASM)

pub mod core;
pub mod time;

#[cfg(any(feature = "native", feature = "wasm"))]
pub mod app;
#[cfg(any(feature = "native", feature = "wasm"))]
mod theme;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web {
    use tracing::warn;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use crate::app::TunnelApp;
    use crate::core::TunnelConfig;

    /// Optional JSON config injected by the host page as `window.__ztunnel_config`
    fn page_config() -> TunnelConfig {
        let Some(text) = js_sys::eval("window.__ztunnel_config")
            .ok()
            .and_then(|v| v.as_string())
        else {
            return TunnelConfig::default();
        };
        TunnelConfig::from_json(&text).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring page config");
            TunnelConfig::default()
        })
    }

    #[wasm_bindgen(start)]
    pub fn main() {
        console_error_panic_hook::set_once();

        // Initialize tracing for browser console
        tracing_wasm::set_as_global_default();

        let web_options = eframe::WebOptions::default();
        let config = page_config();

        wasm_bindgen_futures::spawn_local(async move {
            let canvas = web_sys::window()
                .expect("no window")
                .document()
                .expect("no document")
                .get_element_by_id("canvas")
                .expect("no canvas element")
                .dyn_into::<web_sys::HtmlCanvasElement>()
                .expect("not a canvas element");

            eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(move |cc| Ok(Box::new(TunnelApp::new(cc, config)))),
                )
                .await
                .expect("Failed to start eframe");
        });
    }
}
