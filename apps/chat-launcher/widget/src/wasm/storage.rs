use chat_launcher_core::{LauncherError, SidebarStateStore};

use super::describe_js_error;

/// `window.localStorage`, read only.
pub(super) struct LocalSidebarStore;

impl SidebarStateStore for LocalSidebarStore {
    fn read(&self, key: &str) -> Result<Option<String>, LauncherError> {
        let window = web_sys::window().ok_or(LauncherError::WindowUnavailable)?;
        let storage = window
            .local_storage()
            .map_err(|error| LauncherError::StorageUnavailable(describe_js_error(&error)))?
            .ok_or_else(|| {
                LauncherError::StorageUnavailable("localStorage is disabled".to_string())
            })?;
        storage
            .get_item(key)
            .map_err(|error| LauncherError::StorageRead {
                key: key.to_string(),
                message: describe_js_error(&error),
            })
    }
}
