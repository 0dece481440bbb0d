use {
    super::Service,
    crate::error::AuctionError,
};

impl Service {
    /// Registers deadlines for auctions created before this process started.
    /// Auctions already past their deadline are closed on the next tick.
    pub async fn reload_active_auctions(&self) -> Result<usize, AuctionError> {
        let count = self.repo.register_active_auctions().await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to reload active auctions");
            e
        })?;
        tracing::info!(count, "Reloaded active auction deadlines");
        Ok(count)
    }
}
