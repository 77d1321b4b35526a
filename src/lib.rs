mod api;
mod app;
mod components;
mod models;
mod pages;
mod state;
mod storage;
mod util;

use crate::app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::AccountInfo;
    use crate::storage::{
        clear_session_storage, load_token_from_storage, load_user_from_storage,
        save_user_to_storage, TOKEN_KEY,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_user_storage_roundtrip() {
        clear_session_storage();
        assert!(load_user_from_storage().is_none());

        let user = AccountInfo {
            id: "u-1".to_string(),
            extra: serde_json::json!({"username": "u"}),
        };
        save_user_to_storage(&user);

        let loaded = load_user_from_storage().expect("should load user from localStorage");
        assert_eq!(loaded.id, "u-1");

        clear_session_storage();
        assert!(load_user_from_storage().is_none());
    }

    #[wasm_bindgen_test]
    fn test_token_storage_read() {
        clear_session_storage();
        assert!(load_token_from_storage().is_none());

        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .expect("localStorage should be available");
        storage.set_item(TOKEN_KEY, "t1").expect("should write token");

        assert_eq!(load_token_from_storage().as_deref(), Some("t1"));

        clear_session_storage();
        assert!(load_token_from_storage().is_none());
    }
}
