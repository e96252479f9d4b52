use anyhow::{Context, Result};
use chrono::Local;
use stargazer::cli::Args;
use stargazer::render::ReportView;
use stargazer::{NightSkyReportBuilder, StargazerConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let config = StargazerConfig::load_from_path(args.config.clone())?;
    logging::init(&config.logging, args.verbose)?;

    let request = match args.to_request(Local::now().date_naive()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(2);
        }
    };

    let builder = NightSkyReportBuilder::from_config(&config)
        .context("Failed to create provider clients")?;

    tracing::info!(
        "Fetching stargazing information for '{}' on {}",
        request.place_name,
        request.target_date
    );

    let report = tokio::select! {
        report = builder.build(&request.place_name, request.target_date) => report,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, cancelling provider requests");
            std::process::exit(130);
        }
    };

    if report.is_partial() {
        tracing::warn!(
            "Report for '{}' is incomplete; see log for provider failures",
            report.place_name
        );
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        print!("{}", ReportView(&report));
    }

    if report.resolution_failed() && report.sky_content.is_none() {
        std::process::exit(1);
    }

    Ok(())
}
