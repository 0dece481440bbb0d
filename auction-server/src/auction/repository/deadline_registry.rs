use {
    crate::auction::entities,
    std::{
        collections::HashMap,
        sync::{
            Mutex,
            MutexGuard,
            PoisonError,
        },
    },
    time::OffsetDateTime,
};

/// Expiration instants of the auctions this process still believes to be active.
///
/// Every operation holds the lock only for the map access and the guard never
/// leaves this type.
#[derive(Debug, Default)]
pub struct DeadlineRegistry {
    deadlines: Mutex<HashMap<entities::AuctionId, OffsetDateTime>>,
}

impl DeadlineRegistry {
    // Nothing panics while the lock is held, so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<entities::AuctionId, OffsetDateTime>> {
        self.deadlines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put(&self, auction_id: entities::AuctionId, deadline: OffsetDateTime) {
        self.lock().insert(auction_id, deadline);
    }

    pub fn remove_if_present(&self, auction_id: &entities::AuctionId) {
        self.lock().remove(auction_id);
    }

    /// Ids whose deadline is strictly before `now`.
    pub fn snapshot_expired(&self, now: OffsetDateTime) -> Vec<entities::AuctionId> {
        self.lock()
            .iter()
            .filter(|(_, deadline)| **deadline < now)
            .map(|(auction_id, _)| *auction_id)
            .collect()
    }

    pub fn deadline(&self, auction_id: &entities::AuctionId) -> Option<OffsetDateTime> {
        self.lock().get(auction_id).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}
