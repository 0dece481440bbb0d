use {
    super::Repository,
    crate::{
        auction::entities,
        error::AuctionError,
    },
};

impl Repository {
    /// Persist the new status. The deadline registry is left untouched.
    pub async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<(), AuctionError> {
        self.db.update_auction_status(auction_id, status).await
    }
}
