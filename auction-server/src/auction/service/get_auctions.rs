use {
    super::Service,
    crate::{
        auction::{
            entities,
            repository::AuctionFilter,
        },
        error::AuctionError,
    },
};

#[derive(Clone, Debug, Default)]
pub struct GetAuctionsInput {
    pub status:       Option<entities::AuctionStatus>,
    pub category:     Option<String>,
    pub product_name: Option<String>,
}

impl Service {
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, AuctionError> {
        self.repo
            .get_auctions(AuctionFilter {
                status:       input.status,
                category:     input.category,
                product_name: input.product_name,
            })
            .await
    }
}
