//! WebAssembly entry point of the trail loader demo.
//!
//! Hydrates the server-rendered page so every `loader` starts its
//! animation-frame loop in the browser, and routes `log` output to the console.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the demo site on the client.
///
/// Initializes `console_log` and `console_error_panic_hook`, then hydrates
/// the DOM with `app::component`.
pub fn hydrate() {
    use app::component;
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::debug!("Hydrating trail loader demo");

    leptos::mount::hydrate_body(component);
}
