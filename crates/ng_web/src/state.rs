use ng_client::ClientConfig;
use ng_core::ArticleFetcher;
use std::sync::Arc;

pub struct AppState {
    pub fetcher: Arc<dyn ArticleFetcher>,
    pub config: ClientConfig,
}
