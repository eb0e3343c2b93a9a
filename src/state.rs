use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::info;

use crate::api::NotificationEvent;
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountAllocator, DefaultSignupService, HttpMailerService, MailerService,
    SeaOrmAccountAllocator, SignupService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Betapool/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub allocator: Arc<dyn AccountAllocator>,

    pub mailer: Arc<dyn MailerService>,

    pub signup: Arc<dyn SignupService>,

    pub event_bus: broadcast::Sender<NotificationEvent>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (event_bus, _) = broadcast::channel(config.general.event_bus_buffer_size);
        Self::init_with_event_bus(config, event_bus).await
    }

    pub async fn with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> anyhow::Result<Self> {
        Self::init_with_event_bus(config, event_bus).await
    }

    async fn init_with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let inserted = store.initialize_pool(&config).await?;
        if inserted > 0 {
            info!("Provisioned {} new beta account(s) from config", inserted);
        }

        let http_client = build_shared_http_client(config.email.request_timeout_seconds.into())?;

        let allocator: Arc<dyn AccountAllocator> =
            Arc::new(SeaOrmAccountAllocator::new(store.clone()));

        let mailer: Arc<dyn MailerService> =
            Arc::new(HttpMailerService::new(config.email.clone(), http_client));

        let signup: Arc<dyn SignupService> = Arc::new(DefaultSignupService::new(
            store.clone(),
            allocator.clone(),
            mailer.clone(),
            event_bus.clone(),
            config.pool.low_watermark,
        ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            allocator,
            mailer,
            signup,
            event_bus,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
