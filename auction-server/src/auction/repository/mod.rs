use {
    crate::auction::entities,
    std::time::Duration,
};

mod add_auction;
mod db;
mod deadline_registry;
mod get_auction_by_id;
mod get_auctions;
mod get_deadline;
mod get_expired_auction_ids;
mod in_memory_db;
mod models;
mod register_active_auctions;
mod remove_deadline;
mod update_auction_status;

pub use {
    deadline_registry::DeadlineRegistry,
    in_memory_db::InMemoryDatabase,
    models::*,
};

/// Wraps the persistence gateway together with the deadline registry.
///
/// The registry is private to the repository, so every deadline change goes through
/// the methods below.
#[derive(Debug)]
pub struct Repository {
    pub db:            Box<dyn Database>,
    deadline_registry: DeadlineRegistry,
    auction_interval:  Duration,
}

impl Repository {
    pub fn new(db: impl Database, auction_interval: Duration) -> Self {
        Self {
            db: Box::new(db),
            deadline_registry: DeadlineRegistry::default(),
            auction_interval,
        }
    }

    fn register_deadline(&self, auction: &entities::Auction) {
        self.deadline_registry
            .put(auction.id, auction.deadline(self.auction_interval));
    }

    pub fn pending_deadlines(&self) -> usize {
        self.deadline_registry.len()
    }
}
