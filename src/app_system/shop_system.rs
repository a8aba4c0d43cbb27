use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use crate::actor_framework::ResourceActor;
use crate::actors::{BotPreviewService, ShopService};
use crate::bot_preview::demo_script;
use crate::catalog::Catalog;
use crate::clients::{BotClient, OrderClient, ShopClient};
use crate::config::{BotSettings, ShopConfig};
use crate::domain::Order;

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct ShopSystem {
    pub shop_client: ShopClient,
    pub order_client: OrderClient,
    mailbox_size: usize,
    bot_settings: BotSettings,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    pub fn new(config: &ShopConfig, catalog: Catalog) -> Self {
        let mailbox_size = config.shop.mailbox_size;

        // 1. Order log
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(mailbox_size, demo_order_ids());
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        // 2. Root coordinator
        let (shop_service, shop_client) = ShopService::new(
            mailbox_size,
            Arc::new(catalog),
            order_client.clone(),
            config.shop.added_indicator(),
        );
        let shop_handle = tokio::spawn(shop_service.run());

        info!("Shop system started");
        Self {
            shop_client,
            order_client,
            mailbox_size,
            bot_settings: config.bot.clone(),
            handles: vec![shop_handle, order_handle],
        }
    }

    /// Mounts a fresh bot preview. The replay starts over every time and
    /// stops when the returned handle is dropped.
    pub fn open_bot_preview(&self) -> BotPreview {
        let (service, client) = BotPreviewService::new(
            self.mailbox_size,
            demo_script(),
            self.bot_settings.step_delay(),
            self.bot_settings.reply_delay(),
        );
        let handle = tokio::spawn(service.run());
        BotPreview { client, handle }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        self.shop_client.shutdown().await.map_err(|e| e.to_string())?;

        // The order log stops once the coordinator's client and ours are gone.
        drop(self.shop_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

/// A mounted bot preview. Dropping it tears the replay down.
pub struct BotPreview {
    pub client: BotClient,
    handle: JoinHandle<()>,
}

impl Drop for BotPreview {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// `DEMO-<unix millis>`, bumped by one when two orders land in the same millisecond.
fn demo_order_ids() -> impl Fn() -> String + Send + Sync + 'static {
    let last = Arc::new(AtomicI64::new(0));
    move || {
        let now = Utc::now().timestamp_millis();
        let prev = match last.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(now.max(prev + 1))) {
            Ok(prev) | Err(prev) => prev,
        };
        format!("DEMO-{}", now.max(prev + 1))
    }
}
