use {
    super::Service,
    crate::{
        auction::entities,
        error::AuctionError,
    },
};

pub struct UpdateAuctionStatusInput {
    pub auction_id: entities::AuctionId,
    pub status:     entities::AuctionStatus,
}

impl Service {
    /// Administrative status change. Completing an auction that is already
    /// completed succeeds without changing anything.
    #[tracing::instrument(skip_all, fields(auction_id, status), err(level = tracing::Level::TRACE))]
    pub async fn update_auction_status(
        &self,
        input: UpdateAuctionStatusInput,
    ) -> Result<(), AuctionError> {
        tracing::Span::current().record("auction_id", input.auction_id.to_string());
        tracing::Span::current().record("status", input.status.to_string());

        let auction = self.repo.get_auction_by_id(input.auction_id).await?;
        if !auction.status.can_transition_to(input.status) {
            return Err(AuctionError::InvalidStatusTransition {
                from: auction.status,
                to:   input.status,
            });
        }

        self.repo
            .update_auction_status(input.auction_id, input.status)
            .await?;
        if input.status.is_terminal() {
            self.repo.remove_deadline(&input.auction_id);
        }
        Ok(())
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
                tests::test_config,
            },
        },
        std::time::Duration,
        time::OffsetDateTime,
        uuid::Uuid,
    };

    fn service() -> Service {
        Service::new_in_memory(test_config(Duration::ZERO, Duration::from_secs(1)))
    }

    #[tokio::test]
    async fn test_completing_twice_is_idempotent() {
        let service = service();
        let auction = service
            .add_auction(AddAuctionInput {
                auction_create: auction_create(),
            })
            .await
            .unwrap();

        for _ in 0..2 {
            service
                .update_auction_status(UpdateAuctionStatusInput {
                    auction_id: auction.id,
                    status:     entities::AuctionStatus::Completed,
                })
                .await
                .unwrap();
        }

        let auction = service
            .get_auction_by_id(GetAuctionByIdInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(auction.status, entities::AuctionStatus::Completed);
    }

    #[tokio::test]
    async fn test_manual_close_removes_deadline() {
        let service = service();
        let auction = service
            .add_auction(AddAuctionInput {
                auction_create: auction_create(),
            })
            .await
            .unwrap();
        assert_eq!(service.repo.pending_deadlines(), 1);

        service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id: auction.id,
                status:     entities::AuctionStatus::Completed,
            })
            .await
            .unwrap();

        assert!(service
            .repo
            .get_expired_auction_ids(OffsetDateTime::now_utc() + Duration::from_secs(1))
            .is_empty());
    }

    #[tokio::test]
    async fn test_reopening_is_rejected() {
        let service = service();
        let auction = service
            .add_auction(AddAuctionInput {
                auction_create: auction_create(),
            })
            .await
            .unwrap();
        service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id: auction.id,
                status:     entities::AuctionStatus::Completed,
            })
            .await
            .unwrap();

        let result = service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id: auction.id,
                status:     entities::AuctionStatus::Active,
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            AuctionError::InvalidStatusTransition {
                from: entities::AuctionStatus::Completed,
                to:   entities::AuctionStatus::Active,
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_auction() {
        let result = service()
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id: Uuid::new_v4(),
                status:     entities::AuctionStatus::Completed,
            })
            .await;
        assert_eq!(result.unwrap_err(), AuctionError::NotFound);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_deadline() {
        let mut db = MockDatabase::default();
        db.expect_add_auction().returning(|_| Ok(()));
        db.expect_get_auction().returning(|auction_id| {
            let mut auction = entities::Auction::try_new(auction_create()).unwrap();
            auction.id = auction_id;
            Ok(auction)
        });
        db.expect_update_auction_status()
            .returning(|_, _| Err(AuctionError::Persistence("write conflict".to_string())));
        let service = Service::new(db, test_config(Duration::ZERO, Duration::from_secs(1)));
        let auction = service
            .add_auction(AddAuctionInput {
                auction_create: auction_create(),
            })
            .await
            .unwrap();

        let result = service
            .update_auction_status(UpdateAuctionStatusInput {
                auction_id: auction.id,
                status:     entities::AuctionStatus::Completed,
            })
            .await;

        assert!(matches!(result, Err(AuctionError::Persistence(_))));
        assert_eq!(service.repo.pending_deadlines(), 1);
    }
}
