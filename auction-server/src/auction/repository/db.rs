use {
    super::models::{
        self,
        AuctionFilter,
        Database,
    },
    crate::{
        auction::entities,
        error::AuctionError,
        kernel::db::DB,
    },
    async_trait::async_trait,
    sqlx::QueryBuilder,
    time::PrimitiveDateTime,
    tracing::instrument,
};

fn persistence_error(context: &str, error: sqlx::Error) -> AuctionError {
    tracing::Span::current().record("result", "error");
    tracing::error!(error = ?error, "DB: {}", context);
    AuctionError::Persistence(format!("{}: {}", context, error))
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(category = "db_queries", result = "success", name = "add_auction", tracing_enabled),
        skip_all
    )]
    async fn add_auction(&self, auction: &entities::Auction) -> Result<(), AuctionError> {
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, product_condition, status, creation_time) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(auction.id)
        .bind(&auction.product_name)
        .bind(&auction.category)
        .bind(&auction.description)
        .bind(models::ProductCondition::from(auction.condition))
        .bind(models::AuctionStatus::from(auction.status))
        .bind(PrimitiveDateTime::new(
            auction.creation_time.date(),
            auction.creation_time.time(),
        ))
        .execute(self)
        .await
        .map_err(|e| persistence_error("Failed to insert auction", e))?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_update_auction_status",
        fields(category = "db_queries", result = "success", name = "update_auction_status", tracing_enabled),
        skip_all
    )]
    async fn update_auction_status(
        &self,
        auction_id: entities::AuctionId,
        status: entities::AuctionStatus,
    ) -> Result<(), AuctionError> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2")
            .bind(models::AuctionStatus::from(status))
            .bind(auction_id)
            .execute(self)
            .await
            .map_err(|e| persistence_error("Failed to update auction status", e))?;
        // Postgres counts matched rows, so an unchanged status still reports one row.
        if result.rows_affected() == 0 {
            return Err(AuctionError::NotFound);
        }
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(category = "db_queries", result = "success", name = "get_auction", tracing_enabled),
        skip_all
    )]
    async fn get_auction(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::Auction, AuctionError> {
        let auction = sqlx::query_as::<_, models::Auction>("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_optional(self)
            .await
            .map_err(|e| persistence_error("Failed to fetch auction", e))?;
        auction.map(Into::into).ok_or(AuctionError::NotFound)
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(category = "db_queries", result = "success", name = "get_auctions", tracing_enabled),
        skip_all
    )]
    async fn get_auctions(
        &self,
        filter: AuctionFilter,
    ) -> Result<Vec<entities::Auction>, AuctionError> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE TRUE");
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(models::AuctionStatus::from(status));
        }
        if let Some(category) = filter.category {
            query.push(" AND category = ");
            query.push_bind(category);
        }
        if let Some(product_name) = filter.product_name {
            query.push(" AND product_name = ");
            query.push_bind(product_name);
        }
        query.push(" ORDER BY creation_time ASC");
        let auctions: Vec<models::Auction> = query
            .build_query_as()
            .fetch_all(self)
            .await
            .map_err(|e| persistence_error("Failed to fetch auctions", e))?;
        Ok(auctions.into_iter().map(Into::into).collect())
    }
}
