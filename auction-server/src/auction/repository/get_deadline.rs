use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    pub fn get_deadline(&self, auction_id: &entities::AuctionId) -> Option<OffsetDateTime> {
        self.deadline_registry.deadline(auction_id)
    }
}
