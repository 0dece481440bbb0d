use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    pub fn get_expired_auction_ids(&self, now: OffsetDateTime) -> Vec<entities::AuctionId> {
        self.deadline_registry.snapshot_expired(now)
    }
}
