use mimalloc::MiMalloc;
use shopdb::db::{self, reports};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = shopdb::Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(database_url = %cfg.database_url, loglevel = %cfg.loglevel);

    let mut conn = db::connect(&cfg.database_url).await?;
    db::init_schema(&mut conn).await?;

    shopdb::seed::seed(&mut conn).await?;

    reports::avg_price_by_item_id(&mut conn).await?;
    reports::avg_price_by_item_title(&mut conn).await?;
    reports::sum_price_by_customer(&mut conn).await?;
    reports::explain_purchase_join(&mut conn).await?;

    sqlx::Connection::close(conn).await?;
    Ok(())
}
