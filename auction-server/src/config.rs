use {
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::time::Duration,
    uuid::Uuid,
};

pub mod server;

pub const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

// `Options` is a structup definition to provide clean command-line args for the auction server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
    /// Create auctions against an in-memory store and wait for them to close.
    Simulate(SimulateOptions),
    /// Close an auction by hand.
    Close(CloseOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: AuctionOptions,

    /// Register deadlines for auctions that are still active in the database at startup.
    #[arg(long = "reload-active")]
    #[arg(env = "AUCTION_RELOAD_ACTIVE")]
    pub reload_active: bool,
}

#[derive(Args, Clone, Debug)]
pub struct SimulateOptions {
    #[command(flatten)]
    pub auction: AuctionOptions,

    /// Number of auctions to create.
    #[arg(long = "count")]
    #[arg(default_value_t = 5)]
    pub count: usize,
}

#[derive(Args, Clone, Debug)]
pub struct CloseOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    /// Id of the auction to close.
    #[arg(long = "auction-id")]
    pub auction_id: Uuid,
}

/// Durations are kept as raw strings so that a malformed value falls back to its
/// default instead of aborting startup.
#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct AuctionOptions {
    /// Time from creation until an auction expires, e.g. "30s" or "5m".
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    pub auction_interval:  Option<String>,
    /// How often expired auctions are looked for.
    #[arg(long = "check-interval")]
    #[arg(env = "AUCTION_CHECK_INTERVAL")]
    pub check_interval:    Option<String>,
    /// Maximum duration of a single store call made while closing auctions.
    #[arg(long = "operation-timeout")]
    #[arg(env = "AUCTION_CONTEXT_TIMEOUT")]
    pub operation_timeout: Option<String>,
}

/// Parses a duration such as "1s", "2m" or "1h30m", returning `default` when the
/// value is missing or cannot be parsed.
pub fn duration_or_default(raw: Option<&str>, default: Duration) -> Duration {
    raw.and_then(|value| humantime::parse_duration(value.trim()).ok())
        .unwrap_or(default)
}

/// Like [`duration_or_default`], but a zero duration also falls back to `default`.
pub fn non_zero_duration_or_default(raw: Option<&str>, default: Duration) -> Duration {
    match duration_or_default(raw, default) {
        duration if duration.is_zero() => default,
        duration => duration,
    }
}

impl AuctionOptions {
    pub fn auction_interval(&self) -> Duration {
        duration_or_default(self.auction_interval.as_deref(), DEFAULT_AUCTION_INTERVAL)
    }

    pub fn check_interval(&self) -> Duration {
        non_zero_duration_or_default(self.check_interval.as_deref(), DEFAULT_CHECK_INTERVAL)
    }

    pub fn operation_timeout(&self) -> Duration {
        non_zero_duration_or_default(
            self.operation_timeout.as_deref(),
            DEFAULT_OPERATION_TIMEOUT,
        )
    }
}
