#[cfg(test)]
use mockall::automock;
use {
    crate::{
        auction::entities,
        error::AuctionError,
    },
    async_trait::async_trait,
    sqlx::FromRow,
    std::fmt::Debug,
    time::{
        PrimitiveDateTime,
        UtcOffset,
    },
    uuid::Uuid,
};

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    New,
    Active,
    Completed,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::New => AuctionStatus::New,
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Completed => AuctionStatus::Completed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::New => entities::AuctionStatus::New,
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Completed => entities::AuctionStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

#[derive(Clone, FromRow, Debug)]
pub struct Auction {
    pub id:                Uuid,
    pub product_name:      String,
    pub category:          String,
    pub description:       String,
    pub product_condition: ProductCondition,
    pub status:            AuctionStatus,
    pub creation_time:     PrimitiveDateTime,
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.product_condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

/// Optional filters for listing auctions. `None` matches every auction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionFilter {
    pub status:       Option<entities::AuctionStatus>,
    pub category:     Option<String>,
    pub product_name: Option<String>,
}

impl AuctionFilter {
    pub fn matches(&self, auction: &entities::Auction) -> bool {
        self.status.map_or(true, |status| auction.status == status)
            && self
                .category
                .as_ref()
                .map_or(true, |category| &auction.category == category)
            && self
                .product_name
                .as_ref()
                .map_or(true, |product_name| &auction.product_name == product_name)
    }
}

/// The persistence gateway for auctions.
///
/// `update_auction_status` is an unconditional overwrite, so applying the same
/// status twice must succeed both times.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), AuctionError>;
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<(), AuctionError>;
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::Auction, AuctionError>;
    async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<entities::Auction>, AuctionError>;
}
