use {
    super::models::{
        AuctionFilter,
        Database,
    },
    crate::{
        auction::entities,
        error::AuctionError,
    },
    async_trait::async_trait,
    std::collections::HashMap,
    tokio::sync::RwLock,
};

/// Process-local auction store, used when no Postgres database is configured.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    auctions: RwLock<HashMap<entities::AuctionId, entities::Auction>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), AuctionError> {
        let mut write_guard = self.auctions.write().await;
        if write_guard.contains_key(&auction.id) {
            return Err(AuctionError::Persistence(format!(
                "auction {} already exists",
                auction.id
            )));
        }
        write_guard.insert(auction.id, auction.clone());
        Ok(())
    }

    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<(), AuctionError> {
        match self.auctions.write().await.get_mut(&auction_id) {
            Some(auction) => {
                auction.status = status;
                Ok(())
            }
            None => Err(AuctionError::NotFound),
        }
    }

    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::Auction, AuctionError> {
        self.auctions
            .read()
            .await
            .get(&auction_id)
            .cloned()
            .ok_or(AuctionError::NotFound)
    }

    async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<entities::Auction>, AuctionError> {
        let mut auctions: Vec<entities::Auction> = self
            .auctions
            .read()
            .await
            .values()
            .filter(|auction| filter.matches(auction))
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        Ok(auctions)
    }
}
