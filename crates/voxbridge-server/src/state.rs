use std::sync::Arc;
use voxbridge::providers::factory::ProviderRegistry;

/// Shared application state
///
/// Built once at startup and never mutated; cloning only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderRegistry>,
}

impl AppState {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}
