use {
    super::{
        AuctionFilter,
        Repository,
    },
    crate::{
        auction::entities,
        error::AuctionError,
    },
};

impl Repository {
    /// Registers a deadline for every auction the store still reports as active.
    /// Returns the number of registered auctions.
    pub async fn register_active_auctions(&self) -> Result<usize, AuctionError> {
        let auctions = self
            .db
            .get_auctions(AuctionFilter {
                status: Some(entities::AuctionStatus::Active),
                ..Default::default()
            })
            .await?;
        auctions
            .iter()
            .for_each(|auction| self.register_deadline(auction));
        Ok(auctions.len())
    }
}
