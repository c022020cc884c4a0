//! Browser Token Storage
//!
//! Persists the access token in `localStorage`.

use simulator_core::session::{TokenStore, TOKEN_STORAGE_KEY};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
                    log::warn!("could not persist access token");
                }
            }
            None => log::warn!("localStorage unavailable, session lasts until reload"),
        }
    }

    fn clear(&self) {
        match local_storage() {
            Some(storage) => {
                if storage.remove_item(TOKEN_STORAGE_KEY).is_err() {
                    log::warn!("could not remove access token, it will be restored on reload");
                }
            }
            None => log::warn!("localStorage unavailable, nothing to clear"),
        }
    }
}
