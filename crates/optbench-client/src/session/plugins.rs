//! Managing plugin libraries loaded into the backend.

use std::path::Path;
use std::sync::Arc;

use optbench_core::{emit_gateway_fallback, PluginBundle};
use tracing::info;

use super::or_fallback;
use crate::error::GatewayError;
use crate::gateway::BackendGateway;

pub struct PluginManager {
    gateway: Arc<dyn BackendGateway>,
    plugins: Vec<PluginBundle>,
}

impl PluginManager {
    pub async fn open(gateway: Arc<dyn BackendGateway>) -> Self {
        let mut manager = Self {
            gateway,
            plugins: Vec::new(),
        };
        manager.refresh().await;
        manager
    }

    pub fn plugins(&self) -> &[PluginBundle] {
        &self.plugins
    }

    pub async fn refresh(&mut self) -> &[PluginBundle] {
        let result = self.gateway.plugins().await;
        self.plugins = or_fallback("plugins", result, Vec::new());
        &self.plugins
    }

    /// Upload the library at `path` under its file name.
    pub async fn upload(&mut self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            emit_gateway_fallback(
                "upload_plugin",
                &format!("no file name in {}", path.display()),
            );
            return false;
        };
        let contents = match tokio::fs::read(path).await {
            Ok(contents) => contents,
            Err(err) => {
                emit_gateway_fallback("upload_plugin", &GatewayError::Io(err));
                return false;
            }
        };
        self.upload_bytes(file_name, contents).await
    }

    /// Upload `contents` as `file_name`, then re-list on success.
    pub async fn upload_bytes(&mut self, file_name: &str, contents: Vec<u8>) -> bool {
        let result = self
            .gateway
            .upload_plugin(file_name, contents)
            .await
            .map(|_| true);
        let uploaded = or_fallback("upload_plugin", result, false);
        if uploaded {
            info!(plugin = file_name, "plugin uploaded");
            self.refresh().await;
        }
        uploaded
    }

    /// Delete a plugin; the list changes only when the backend confirms.
    pub async fn delete(&mut self, file_name: &str) -> bool {
        let result = self.gateway.delete_plugin(file_name).await.map(|_| true);
        let deleted = or_fallback("delete_plugin", result, false);
        if deleted {
            self.plugins.retain(|p| p.file_name != file_name);
            info!(plugin = file_name, "plugin deleted");
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryGateway;

    #[tokio::test]
    async fn test_upload_from_disk_relists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bees.dll");
        std::fs::write(&path, b"MZ\x90\x00").unwrap();

        let gw = Arc::new(MemoryGateway::new());
        let mut manager = PluginManager::open(gw).await;
        assert!(manager.plugins().is_empty());

        assert!(manager.upload(&path).await);
        assert_eq!(manager.plugins().len(), 1);
        assert_eq!(manager.plugins()[0].file_name, "Bees.dll");
    }

    #[tokio::test]
    async fn test_upload_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let gw = Arc::new(MemoryGateway::new());
        let mut manager = PluginManager::open(gw).await;

        assert!(!manager.upload(&dir.path().join("absent.dll")).await);
        assert!(manager.plugins().is_empty());
    }
}
