// Engine main entry point: polls the mock rate source and logs dashboard rows
use chrono::Utc;
use engine::config::EngineSettings;
use engine::services::{MockRateSource, RateProvider};
use shared::history::convert_historical_to_chart_data;
use shared::models::{CurrencyRate, RefreshState};
use shared::utils::{
    format_change, format_change_percent, format_currency, format_date_for_chart, format_rate,
    get_time_ago,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting FX rates engine...");

    // An explicit path argument wins over FX_ENGINE_CONFIG
    let settings = match std::env::args().nth(1) {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::from_env()?,
    };
    info!(
        base = %settings.base_currency,
        poll_interval_secs = settings.poll_interval_secs,
        "Engine settings loaded"
    );

    let source = MockRateSource::new(settings.clone())?;
    if !source.check_api_health().await {
        warn!("Rate API health check failed, polling anyway");
    }

    let mut refresh = RefreshState::default();
    let mut interval = tokio::time::interval(settings.poll_interval());
    let mut polls: u32 = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, stopping...");
                break;
            }
        }

        refresh.begin();
        match source.fetch_current_rates(None).await {
            Ok(rates) => {
                refresh.succeed(Utc::now());
                log_rates(&settings.base_currency, &rates);
            }
            Err(e) => {
                error!(error = %e, "Rate refresh failed");
                refresh.fail(e.to_string());
            }
        }
        if let Some(last) = refresh.last_refresh {
            info!("Last refresh {}", get_time_ago(last));
        }

        log_history(&source, &settings).await;

        polls += 1;
        if settings.max_polls.map_or(false, |max| polls >= max) {
            info!(polls, "Reached max_polls, stopping");
            break;
        }
    }

    Ok(())
}

fn log_rates(base: &str, rates: &[CurrencyRate]) {
    for rate in rates {
        info!(
            "{} {} {:>12} {:>10} {:>8}  100 {} = {}",
            rate.flag.as_deref().unwrap_or("  "),
            rate.code,
            format_rate(rate.rate),
            format_change(rate.change),
            format_change_percent(rate.change_percent),
            base,
            format_currency(100.0 * rate.rate, &rate.code)
        );
    }
}

async fn log_history(source: &MockRateSource, settings: &EngineSettings) {
    let time_frame = settings.history_time_frame;
    let history = match source
        .fetch_historical_rates(&settings.base_currency, &settings.history_target, time_frame.days())
        .await
    {
        Ok(history) => history,
        Err(e) => {
            error!(error = %e, "History refresh failed");
            return;
        }
    };

    let chart = convert_historical_to_chart_data(&history);
    let labels: Vec<String> = chart
        .iter()
        .filter_map(|point| format_date_for_chart(&point.date.to_string(), time_frame).ok())
        .collect();
    let (low, high) = chart
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.rate), hi.max(p.rate)));

    info!(
        pair = %format!("{}/{}", settings.base_currency, settings.history_target),
        time_frame = %time_frame,
        points = chart.len(),
        "Range {} - {} over [{}]",
        format_rate(low),
        format_rate(high),
        labels.join(", ")
    );
}
