use {
    crate::error::AuctionError,
    serde::{
        Deserialize,
        Serialize,
    },
    std::time::Duration,
    strum::{
        Display,
        EnumString,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type AuctionId = Uuid;

const MIN_PRODUCT_NAME_LEN: usize = 2;
const MIN_CATEGORY_LEN: usize = 3;
const MIN_DESCRIPTION_LEN: usize = 11;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AuctionStatus {
    New,
    Active,
    Completed,
}

impl AuctionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuctionStatus::Completed)
    }

    /// Only completion is accepted, from any status, so that closing twice is a no-op.
    pub fn can_transition_to(&self, next: AuctionStatus) -> bool {
        next.is_terminal()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

impl AuctionCreate {
    fn validate(&self) -> Result<(), AuctionError> {
        if self.product_name.chars().count() < MIN_PRODUCT_NAME_LEN {
            return Err(AuctionError::InvalidAuction(format!(
                "product name must have at least {} characters",
                MIN_PRODUCT_NAME_LEN
            )));
        }
        if self.category.chars().count() < MIN_CATEGORY_LEN {
            return Err(AuctionError::InvalidAuction(format!(
                "category must have at least {} characters",
                MIN_CATEGORY_LEN
            )));
        }
        if self.description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(AuctionError::InvalidAuction(format!(
                "description must have at least {} characters",
                MIN_DESCRIPTION_LEN
            )));
        }
        Ok(())
    }
}

impl Auction {
    /// Builds an open auction. Construction moves the status from `New` to `Active`.
    pub fn try_new(auction_create: AuctionCreate) -> Result<Self, AuctionError> {
        auction_create.validate()?;
        Ok(Self {
            id:            Uuid::new_v4(),
            product_name:  auction_create.product_name,
            category:      auction_create.category,
            description:   auction_create.description,
            condition:     auction_create.condition,
            status:        AuctionStatus::Active,
            creation_time: OffsetDateTime::now_utc(),
        })
    }

    pub fn deadline(&self, auction_interval: Duration) -> OffsetDateTime {
        self.creation_time + auction_interval
    }
}
