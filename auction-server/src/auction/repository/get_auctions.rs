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
    pub async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<entities::Auction>, AuctionError> {
        self.db.get_auctions(filter).await
    }
}
