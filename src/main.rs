use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classfit::api::router;
use classfit::config::AppConfig;
use classfit::report;
use classfit::services::FilterService;
use classfit::state::AppState;

fn wants_server() -> bool {
    std::env::args().skip(1).any(|a| a == "serve")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "classfit=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    if wants_server() {
        serve(config).await
    } else {
        run_batch(config)
    }
}

fn run_batch(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let results_path = config.results_path.clone();
    let detail = config.report_detail;
    let run = FilterService::new(config).run()?;

    for evaluation in &run.evaluations {
        for line in report::render_verdict(&evaluation.entry, &evaluation.result, detail) {
            println!("{}", line);
        }
    }

    let results = run.master_results();
    println!();
    for line in report::render_summary(&results) {
        println!("{}", line);
    }

    results.write_to(&results_path)?;
    println!("\n📄 Master data exported to '{}'", results_path.display());
    Ok(())
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_addr;
    let criteria = config.criteria.clone();
    let (blackout, committed) = FilterService::new(config).build_blackout()?;
    info!(
        "Blackout schedule built from {} committed classes ({} windows)",
        committed,
        blackout.len()
    );

    let app = router(AppState::new(blackout, criteria));

    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
