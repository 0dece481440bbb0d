use {
    crate::auction::entities::AuctionStatus,
    std::time::Duration,
    thiserror::Error,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuctionError {
    /// The persistence gateway rejected or failed the operation
    #[error("Persistence failure: {0}")]
    Persistence(String),
    /// No auction matches the requested id
    #[error("Auction with the specified id was not found")]
    NotFound,
    /// The auction failed construction checks
    #[error("Invalid auction: {0}")]
    InvalidAuction(String),
    /// The requested status change is not allowed from the current status
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: AuctionStatus,
        to:   AuctionStatus,
    },
    /// A gateway call did not finish within the configured operation timeout
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}
