use {
    super::Service,
    crate::{
        auction::entities,
        error::AuctionError,
    },
    futures::future::join_all,
    time::OffsetDateTime,
};

impl Service {
    async fn close_expired_auction(
        &self,
        auction_id: entities::AuctionId,
        now: OffsetDateTime,
    ) -> Result<(), AuctionError> {
        tokio::time::timeout(
            self.config.operation_timeout,
            self.repo
                .update_auction_status(auction_id, entities::AuctionStatus::Completed),
        )
        .await
        .map_err(|_| AuctionError::Timeout(self.config.operation_timeout))??;

        self.repo.remove_deadline(&auction_id);
        tracing::info!(
            auction_id = %auction_id,
            timestamp = %now,
            "Auction closed automatically",
        );
        Ok(())
    }

    /// Closes every auction whose deadline has passed and returns the ids that were closed.
    ///
    /// Candidates are handled independently. A failed close keeps its deadline so the
    /// auction is picked up again on the next tick, unless the store no longer has it.
    pub async fn close_expired_auctions(&self) -> Vec<entities::AuctionId> {
        let now = OffsetDateTime::now_utc();
        let expired = self.repo.get_expired_auction_ids(now);
        if expired.is_empty() {
            return vec![];
        }
        tracing::debug!(
            expired = expired.len(),
            pending = self.repo.pending_deadlines(),
            "Closing expired auctions",
        );

        join_all(expired.into_iter().map(|auction_id| async move {
            match self.close_expired_auction(auction_id, now).await {
                Ok(()) => Some(auction_id),
                // The row is gone, so no later tick could close it either.
                Err(AuctionError::NotFound) => {
                    self.repo.remove_deadline(&auction_id);
                    tracing::warn!(
                        auction_id = %auction_id,
                        "Expired auction no longer exists in the store, dropping its deadline",
                    );
                    None
                }
                Err(e) => {
                    tracing::error!(
                        auction_id = %auction_id,
                        error = ?e,
                        "Failed to close expired auction",
                    );
                    None
                }
            }
        }))
        .await
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            entities::tests::auction_create,
            repository::MockDatabase,
            service::{
                add_auction::AddAuctionInput,
                get_auction_by_id::GetAuctionByIdInput,
                tests::{
                    test_config,
                    FlakyDatabase,
                },
                Config,
            },
        },
        std::{
            sync::{
                atomic::AtomicUsize,
                Arc,
                Mutex,
            },
            time::Duration,
        },
    };

    fn expired_config() -> Config {
        test_config(Duration::ZERO, Duration::from_secs(1))
    }

    async fn add_auctions(service: &Service, count: usize) -> Vec<entities::Auction> {
        let mut auctions = vec![];
        for _ in 0..count {
            auctions.push(
                service
                    .add_auction(AddAuctionInput {
                        auction_create: auction_create(),
                    })
                    .await
                    .unwrap(),
            );
        }
        // Deadlines equal the creation time and only count once strictly in the past.
        tokio::time::sleep(Duration::from_millis(5)).await;
        auctions
    }

    async fn status(service: &Service, auction_id: entities::AuctionId) -> entities::AuctionStatus {
        service
            .get_auction_by_id(GetAuctionByIdInput { auction_id })
            .await
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn test_closes_expired_auctions() {
        let service = Service::new_in_memory(expired_config());
        let auctions = add_auctions(&service, 3).await;

        let mut closed = service.close_expired_auctions().await;
        closed.sort();
        let mut expected: Vec<_> = auctions.iter().map(|auction| auction.id).collect();
        expected.sort();
        assert_eq!(closed, expected);

        for auction in auctions {
            assert_eq!(
                status(&service, auction.id).await,
                entities::AuctionStatus::Completed
            );
        }
        assert_eq!(service.repo.pending_deadlines(), 0);
        assert!(service.close_expired_auctions().await.is_empty());
    }

    #[tokio::test]
    async fn test_pending_auctions_are_left_alone() {
        let mut db = MockDatabase::default();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_update_auction_status().never();
        let service = Service::new(
            db,
            test_config(Duration::from_secs(60), Duration::from_secs(1)),
        );
        add_auctions(&service, 2).await;

        assert!(service.close_expired_auctions().await.is_empty());
        assert_eq!(service.repo.pending_deadlines(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_auction() {
        let failing: Arc<Mutex<Option<entities::AuctionId>>> = Arc::new(Mutex::new(None));
        let mut db = MockDatabase::default();
        db.expect_add_auction().returning({
            let failing = failing.clone();
            move |auction| {
                failing.lock().unwrap().get_or_insert(auction.id);
                Ok(())
            }
        });
        db.expect_update_auction_status()
            .times(3)
            .returning({
                let failing = failing.clone();
                move |auction_id, _| {
                    if Some(auction_id) == *failing.lock().unwrap() {
                        Err(AuctionError::Persistence("write rejected".to_string()))
                    } else {
                        Ok(())
                    }
                }
            });
        let service = Service::new(db, expired_config());
        let auctions = add_auctions(&service, 3).await;
        let failing_id = (*failing.lock().unwrap()).unwrap();

        let closed = service.close_expired_auctions().await;

        assert_eq!(closed.len(), 2);
        assert!(!closed.contains(&failing_id));
        assert!(auctions
            .iter()
            .filter(|auction| auction.id != failing_id)
            .all(|auction| closed.contains(&auction.id)));
        assert_eq!(
            service
                .repo
                .get_expired_auction_ids(OffsetDateTime::now_utc()),
            vec![failing_id]
        );
    }

    #[tokio::test]
    async fn test_missing_auction_drops_deadline() {
        let mut db = MockDatabase::default();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_update_auction_status()
            .times(1)
            .returning(|_, _| Err(AuctionError::NotFound));
        let service = Service::new(db, expired_config());
        add_auctions(&service, 1).await;

        assert!(service.close_expired_auctions().await.is_empty());
        assert_eq!(service.repo.pending_deadlines(), 0);

        for _ in 0..3 {
            assert!(service.close_expired_auctions().await.is_empty());
        }
        assert_eq!(service.repo.pending_deadlines(), 0);
    }

    #[tokio::test]
    async fn test_failed_close_is_retried_on_next_tick() {
        let db = FlakyDatabase {
            failures: AtomicUsize::new(1),
            ..Default::default()
        };
        let service = Service::new(db, expired_config());
        let auction = add_auctions(&service, 1).await.remove(0);

        assert!(service.close_expired_auctions().await.is_empty());
        assert_eq!(status(&service, auction.id).await, entities::AuctionStatus::Active);
        assert_eq!(service.repo.pending_deadlines(), 1);

        assert_eq!(service.close_expired_auctions().await, vec![auction.id]);
        assert_eq!(
            status(&service, auction.id).await,
            entities::AuctionStatus::Completed
        );
        assert_eq!(service.repo.pending_deadlines(), 0);
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let db = FlakyDatabase {
            delay: Some(Duration::from_millis(500)),
            ..Default::default()
        };
        let service = Service::new(
            db,
            Config {
                operation_timeout: Duration::from_millis(50),
                ..expired_config()
            },
        );
        let auction = add_auctions(&service, 1).await.remove(0);

        assert!(service.close_expired_auctions().await.is_empty());
        assert_eq!(service.repo.pending_deadlines(), 1);
        assert_eq!(status(&service, auction.id).await, entities::AuctionStatus::Active);
    }
}
