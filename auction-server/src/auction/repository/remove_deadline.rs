use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub fn remove_deadline(&self, auction_id: &entities::AuctionId) {
        self.deadline_registry.remove_if_present(auction_id);
    }
}
