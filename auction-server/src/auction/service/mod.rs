use {
    super::repository::{
        Database,
        Repository,
    },
    crate::config::AuctionOptions,
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub mod add_auction;
pub mod close_expired_auctions;
pub mod get_auction_by_id;
pub mod get_auctions;
pub mod reload_active_auctions;
pub mod update_auction_status;
pub mod workers;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Time from creation until an auction expires.
    pub auction_interval:  Duration,
    /// Cadence of the auto-close loop. An expired auction stays open for at most
    /// one check interval plus one store round-trip.
    pub check_interval:    Duration,
    /// Upper bound for each store call made by the auto-close loop.
    pub operation_timeout: Duration,
}

impl Config {
    pub fn from_options(options: &AuctionOptions) -> Self {
        Self {
            auction_interval:  options.auction_interval(),
            check_interval:    options.check_interval(),
            operation_timeout: options.operation_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(&AuctionOptions::default())
    }
}

pub struct ServiceInner {
    config:       Config,
    repo:         Arc<Repository>,
    task_tracker: TaskTracker,
    exit_token:   CancellationToken,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    /// Builds the service without starting the auto-close loop.
    pub fn new(db: impl Database, config: Config) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(Repository::new(db, config.auction_interval)),
            config,
            task_tracker: TaskTracker::new(),
            exit_token: CancellationToken::new(),
        }))
    }

    /// Builds the service and spawns the auto-close loop on the current runtime.
    ///
    /// The loop holds its own handle to the service, so dropping every other handle
    /// does not end it. Call [`Service::stop`] or [`Service::shutdown`] to terminate it.
    pub fn start(db: impl Database, config: Config) -> Self {
        let service = Self::new(db, config);
        service.task_tracker.spawn({
            let service = service.clone();
            async move { service.run_auto_close_loop().await }
        });
        service
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Signals the auto-close loop to stop. Calling it more than once has no further effect.
    pub fn stop(&self) {
        self.exit_token.cancel();
        self.task_tracker.close();
    }

    pub fn is_stopped(&self) -> bool {
        self.exit_token.is_cancelled()
    }

    /// Stops the auto-close loop and waits until the tick in flight, if any, has finished.
    pub async fn shutdown(&self) {
        self.stop();
        self.task_tracker.wait().await;
    }
}
