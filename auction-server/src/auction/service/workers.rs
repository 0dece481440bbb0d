use {
    super::Service,
    tokio::time::{
        interval_at,
        Instant,
        MissedTickBehavior,
    },
};

impl Service {
    /// Periodically closes expired auctions until the service is stopped.
    ///
    /// The stop signal is checked between ticks. A tick that already started runs to
    /// completion, including its store calls, but no further tick begins.
    pub async fn run_auto_close_loop(&self) {
        tracing::info!(
            auction_interval = ?self.config.auction_interval,
            check_interval = ?self.config.check_interval,
            operation_timeout = ?self.config.operation_timeout,
            "Starting auction auto-close loop...",
        );
        let mut check_interval = interval_at(
            Instant::now() + self.config.check_interval,
            self.config.check_interval,
        );
        check_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.exit_token.cancelled() => break,
                _ = check_interval.tick() => {
                    self.close_expired_auctions().await;
                }
            }
        }
        tracing::info!("Shutting down auction auto-close loop...");
    }
}
