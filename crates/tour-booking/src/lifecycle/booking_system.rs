use crate::clients::{HistoryClient, OrderClient, RevenueClient, TourClient};
use crate::config::Config;
use crate::engine::{Clock, OrderLifecycle, SystemClock};
use crate::sweeper::ExpirySweeper;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// The runtime orchestrator for the booking back office.
///
/// `BookingSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the four collection actors
///   and the expiry sweeper
/// - **Dependency Wiring**: the Order actor validates new orders against the
///   Tour catalog, so it runs with a `TourClient` as its context
/// - **Engine Construction**: one [`OrderLifecycle`] shared by admin calls and
///   the sweeper
///
/// # Example
///
/// ```ignore
/// let mut system = BookingSystem::start(Config::load()).await;
/// system.spawn_sweeper();
///
/// let order_id = system.order_client.place_order(checkout).await?;
/// system.lifecycle.confirm_payment(&AuthContext::admin("ops"), order_id).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BookingSystem {
    pub order_client: OrderClient,
    pub tour_client: TourClient,
    pub history_client: HistoryClient,
    pub revenue_client: RevenueClient,
    pub lifecycle: OrderLifecycle,
    pub sweeper: ExpirySweeper,
    config: Config,
    shutdown_tx: watch::Sender<bool>,
    sweeper_handle: Option<JoinHandle<()>>,
    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl BookingSystem {
    /// Spawns every collection actor, wired and ready. Uses the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Like [`BookingSystem::new`], with the clock the engine and sweeper read.
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        // 1. Create actors (no dependencies)
        let (tour_actor, tour_client) = crate::tour_actor::new(config.mailbox_size);
        let (order_actor, order_client) = crate::order_actor::new(config.mailbox_size);
        let (history_actor, history_client) = crate::history_actor::new(config.mailbox_size);
        let (revenue_actor, revenue_client) = crate::revenue_actor::new(config.mailbox_size);

        // 2. Start actors with injected context
        let tour_handle = tokio::spawn(tour_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(tour_client.clone()));
        let history_handle = tokio::spawn(history_actor.run(()));
        let revenue_handle = tokio::spawn(revenue_actor.run(()));

        let lifecycle = OrderLifecycle::new(
            order_client.clone(),
            tour_client.clone(),
            history_client.clone(),
            revenue_client.clone(),
        )
        .with_clock(clock);
        let sweeper = ExpirySweeper::new(lifecycle.clone(), config.pending_payment_ttl_hours);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            order_client,
            tour_client,
            history_client,
            revenue_client,
            lifecycle,
            sweeper,
            config,
            shutdown_tx,
            sweeper_handle: None,
            handles: vec![order_handle, tour_handle, history_handle, revenue_handle],
        }
    }

    /// Creates the system and purges expired unpaid orders once before
    /// returning. A failed purge is logged and does not stop start-up.
    pub async fn start(config: Config) -> Self {
        let system = Self::new(config);
        let now = system.lifecycle.now();
        if let Err(e) = system
            .sweeper
            .sweep_pending_payment(now, system.config.pending_payment_ttl_hours)
            .await
        {
            warn!(error = %e, "Start-up sweep failed");
        }
        system
    }

    /// Runs the sweeper in the background at the configured interval.
    /// Calling it again while the sweeper runs does nothing.
    pub fn spawn_sweeper(&mut self) {
        if self.sweeper_handle.is_some() {
            return;
        }
        let sweeper = self.sweeper.clone();
        let shutdown = self.shutdown_tx.subscribe();
        self.sweeper_handle = Some(tokio::spawn(
            sweeper.run(self.config.sweep_interval, shutdown),
        ));
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Stops the sweeper first, then drops every client so each actor sees its
    /// channel close, then waits for all tasks.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if everything stopped cleanly
    /// - `Err(String)` if any task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down booking system...");

        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.sweeper_handle {
            if let Err(e) = handle.await {
                error!("Sweeper task failed: {:?}", e);
                return Err(format!("Sweeper task failed: {:?}", e));
            }
        }

        drop(self.sweeper);
        drop(self.lifecycle);
        drop(self.order_client);
        drop(self.tour_client);
        drop(self.history_client);
        drop(self.revenue_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Booking system shutdown complete.");
        Ok(())
    }
}
