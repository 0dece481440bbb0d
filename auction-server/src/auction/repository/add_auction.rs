use {
    super::Repository,
    crate::{
        auction::entities,
        error::AuctionError,
    },
};

impl Repository {
    // The deadline is registered only once the store holds the auction.
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> Result<entities::Auction, AuctionError> {
        self.db.add_auction(&auction).await?;
        self.register_deadline(&auction);
        Ok(auction)
    }
}
