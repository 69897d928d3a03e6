mod common;

use chrono::{Duration, Utc};
use common::get_providers;
use trek::{SearchQuery, SearchService};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,trek=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. Register providers; registration order is dedup priority.
    let svc = get_providers()?
        .into_iter()
        .fold(SearchService::builder(), |b, p| b.with_provider(p))
        .build()?;

    println!("Any provider reachable: {}", svc.is_available().await?);

    // 2. Search tomorrow's departures.
    let query = SearchQuery::builder("MOW", "LED", Utc::now() + Duration::days(1)).build()?;
    let Some(resp) = svc.search(&query).await? else {
        println!("No routes found.");
        return Ok(());
    };

    println!("\n## Routes ({} after dedup):", resp.routes.len());
    println!("{:<6} | {:<6} | {:<17} | {:>8} | {:>7}", "From", "To", "Departure", "Price", "Minutes");
    for r in &resp.routes {
        println!(
            "{:<6} | {:<6} | {:<17} | {:>8} | {:>7}",
            r.origin,
            r.destination,
            r.origin_date_time.format("%Y-%m-%d %H:%M"),
            r.price,
            r.duration_minutes()
        );
    }
    println!(
        "\nPrice {}..{}, duration {}..{} min",
        resp.min_price, resp.max_price, resp.min_minutes_route, resp.max_minutes_route
    );

    // 3. The same query again is answered from the cache.
    let cached = SearchQuery::builder("MOW", "LED", query.origin_date_time())
        .only_cached(true)
        .build()?;
    let again = svc.search(&cached).await?;
    println!("Served from cache: {}", again.is_some());

    Ok(())
}
