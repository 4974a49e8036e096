//! PokeSet Matcher - want-list matching service
//!
//! Runs the web server by default. With `--match-file` it matches one
//! want-list against the store, prints a report and exits.

use clap::Parser;
use pokeset_common::{proposed_cart, read_want_list, OrderRequest};
use pokeset_matcher::{format_match_report, serve, submit_order_request, AirtableClient, AppState, Args, Snapshot};
use std::path::Path;

/// Match a want-list file and optionally request orders for what is missing
async fn run_match_file(
    store: &AirtableClient,
    path: &Path,
    order_email: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = read_want_list(path)?;

    let snapshot = Snapshot::load(store).await?;
    let results = snapshot.match_rows(&rows);
    let cart = proposed_cart(&results);

    print!("{}", format_match_report(&results, &cart));

    let Some(email) = order_email else {
        return Ok(());
    };

    let mut requested = 0;
    for result in results.iter().filter(|r| r.status.can_request_order()) {
        let request = OrderRequest::from_match(result, email);
        let record = submit_order_request(store, &request).await?;
        println!("Order requested: {} ({})", record.id, result.key);
        requested += 1;
    }
    log::info!("Requested {} orders for {}", requested, email);

    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.store_config();

    log::info!("Starting pokeset_matcher...");
    let missing = config.missing_settings();
    if !missing.is_empty() {
        log::warn!(
            "{} not set; store requests will fail until configured",
            missing.join(" and ")
        );
    }

    let store = AirtableClient::new(config);

    if let Some(path) = &args.match_file {
        if let Err(e) = run_match_file(&store, path, args.order_email.as_deref()).await {
            log::error!("Match failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let admin_key = args.admin_key();
    if admin_key.is_none() {
        log::info!("No admin key configured; inventory and catalog edits are open");
    }

    let state = AppState::new(store, admin_key);
    if let Err(e) = serve(state, args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
