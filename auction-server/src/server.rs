use {
    crate::{
        auction::{
            entities::{
                AuctionCreate,
                AuctionStatus,
                ProductCondition,
            },
            repository::InMemoryDatabase,
            service::{
                add_auction::AddAuctionInput,
                get_auction_by_id::GetAuctionByIdInput,
                get_auctions::GetAuctionsInput,
                update_auction_status::UpdateAuctionStatusInput,
                Config,
                Service,
            },
        },
        config::{
            CloseOptions,
            RunOptions,
            SimulateOptions,
        },
        kernel::db::DB,
    },
    anyhow::anyhow,
    sqlx::postgres::PgPoolOptions,
    std::time::Duration,
};

// Extra time a simulation waits past the worst-case closing latency.
const SIMULATION_GRACE_PERIOD: Duration = Duration::from_secs(1);

async fn connect_db(options: &crate::config::server::Options) -> anyhow::Result<DB> {
    let pool = PgPoolOptions::new()
        .max_connections(options.database_max_connections)
        .connect(&options.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))?;
    Ok(pool)
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let pool = connect_db(&run_options.server).await?;
    let service = Service::start(pool, Config::from_options(&run_options.auction));

    if run_options.reload_active {
        service.reload_active_auctions().await?;
    }

    tracing::info!("Registered shutdown signal handler...");
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shut down signal received, waiting for tasks...");
    service.shutdown().await;
    Ok(())
}

pub async fn run_simulation(simulate_options: SimulateOptions) -> anyhow::Result<()> {
    let service = Service::start(
        InMemoryDatabase::new(),
        Config::from_options(&simulate_options.auction),
    );
    let config = *service.config();

    let mut auction_ids = Vec::with_capacity(simulate_options.count);
    for index in 0..simulate_options.count {
        let auction = service
            .add_auction(AddAuctionInput {
                auction_create: AuctionCreate {
                    product_name: format!("Product {}", index),
                    category:     "Simulation".to_string(),
                    description:  format!("Simulated auction number {}", index),
                    condition:    ProductCondition::New,
                },
            })
            .await?;
        tracing::info!(auction_id = %auction.id, status = %auction.status, "Auction created");
        auction_ids.push(auction.id);
    }

    let deadline = tokio::time::Instant::now()
        + config.auction_interval
        + config.check_interval
        + config.operation_timeout
        + SIMULATION_GRACE_PERIOD;
    let mut poll_interval = tokio::time::interval(config.check_interval);
    loop {
        poll_interval.tick().await;
        let completed = service
            .get_auctions(GetAuctionsInput {
                status: Some(AuctionStatus::Completed),
                ..Default::default()
            })
            .await?;
        tracing::info!(
            completed = completed.len(),
            total = auction_ids.len(),
            "Waiting for auctions to close..."
        );
        if completed.len() == auction_ids.len() || tokio::time::Instant::now() >= deadline {
            break;
        }
    }
    service.shutdown().await;

    let mut auctions = Vec::with_capacity(auction_ids.len());
    for auction_id in auction_ids {
        auctions.push(
            service
                .get_auction_by_id(GetAuctionByIdInput { auction_id })
                .await?,
        );
    }
    println!("{}", serde_json::to_string_pretty(&auctions)?);

    let open = auctions
        .iter()
        .filter(|auction| auction.status != AuctionStatus::Completed)
        .count();
    if open > 0 {
        return Err(anyhow!("{} auctions were not closed in time", open));
    }
    Ok(())
}

pub async fn close_auction(close_options: CloseOptions) -> anyhow::Result<()> {
    let pool = connect_db(&close_options.server).await?;
    let service = Service::new(pool, Config::default());
    service
        .update_auction_status(UpdateAuctionStatusInput {
            auction_id: close_options.auction_id,
            status:     AuctionStatus::Completed,
        })
        .await?;
    tracing::info!(auction_id = %close_options.auction_id, "Auction closed");
    Ok(())
}
