//! The file manager: gateway ownership and handler creation.

use std::sync::Arc;

use zosgate::{FileConfig, RestClient};

use crate::gateway::FileGateway;
use crate::handler::FileHandler;
use crate::rseapi::RseapiFiles;
use crate::zosmf::ZosmfFiles;

/// File manager for one gateway.
///
/// Hands out [`FileHandler`]s; each handler keeps its own artifact ledger
/// and run-scoped scratch names, so independent runs do not collide.
pub struct ZosFiles {
    gateway: Arc<dyn FileGateway>,
    config: FileConfig,
}

impl ZosFiles {
    /// Build a manager over any gateway implementation.
    pub fn new(gateway: Arc<dyn FileGateway>, config: FileConfig) -> Self {
        Self { gateway, config }
    }

    /// Manager over an RSE API gateway.
    pub fn rseapi(client: RestClient, config: FileConfig) -> Self {
        Self::new(Arc::new(RseapiFiles::new(client)), config)
    }

    /// Manager over a z/OSMF gateway.
    pub fn zosmf(client: RestClient, config: FileConfig) -> Self {
        Self::new(Arc::new(ZosmfFiles::new(client)), config)
    }

    /// A fresh handler with its own cleanup ledger.
    pub fn handler(&self) -> FileHandler {
        FileHandler::new(Arc::clone(&self.gateway), self.config.clone())
    }
}

impl std::fmt::Debug for ZosFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZosFiles")
            .field("scratch_hlq", &self.config.scratch_hlq)
            .finish()
    }
}
