// src/main.rs
use anyhow::{Context, Result};
use site_checker::{
    checker::Checker,
    config::{self, Config},
    logging,
    report::{self, Summary},
};
use tracing::{dispatcher, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => config::load_config(&path).await?,
        None => {
            let config = Config::default();
            config.validate()?;
            config
        }
    };

    // Initialize logging
    let dispatch = logging::build_dispatch(&config.logging)?;

    let checker = Checker::new(config.checker.timeout_secs)
        .context("Failed to create checker")?
        .with_dispatch(dispatch.clone());

    dispatcher::with_default(&dispatch, || {
        info!(
            sites = config.sites.len(),
            timeout = ?checker.timeout(),
            "Starting website checks"
        )
    });

    println!("Starting website checks for {} sites...", config.sites.len());
    println!("{}", report::rule());

    let mut results = Vec::with_capacity(config.sites.len());
    for site in &config.sites {
        println!("\n Checking {}...", site.name);
        let result = checker.check(&site.url).await;
        println!("{}", report::site_line(&site.name, &result));
        results.push(result);
    }

    let summary = Summary::from_results(&results);
    print!("{}", summary.render(config.logging.file.as_deref()));

    dispatcher::with_default(&dispatch, || {
        info!(
            total = summary.total,
            up = summary.up,
            down = summary.down_count(),
            "Website checks complete"
        )
    });

    Ok(())
}
