use {
    super::Repository,
    crate::{
        auction::entities,
        error::AuctionError,
    },
};

impl Repository {
    pub async fn get_auction_by_id(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::Auction, AuctionError> {
        self.db.get_auction(auction_id).await
    }
}
