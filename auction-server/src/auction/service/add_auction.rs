use {
    super::Service,
    crate::{
        auction::entities,
        error::AuctionError,
    },
};

pub struct AddAuctionInput {
    pub auction_create: entities::AuctionCreate,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id), err(level = tracing::Level::TRACE))]
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, AuctionError> {
        let auction = entities::Auction::try_new(input.auction_create).map_err(|e| {
            tracing::warn!(error = ?e, "Rejected auction");
            e
        })?;
        tracing::Span::current().record("auction_id", auction.id.to_string());

        let auction = self.repo.add_auction(auction).await.map_err(|e| {
            tracing::error!(error = ?e, "Failed to add auction");
            e
        })?;
        tracing::debug!(
            deadline = ?self.repo.get_deadline(&auction.id),
            "Auction registered for auto-close",
        );
        Ok(auction)
    }
}
