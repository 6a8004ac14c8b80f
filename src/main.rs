#[macro_use]
mod logging;

mod ballast;
mod config;
mod lifecycle;
mod procfs;
mod signals;

use std::{process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{ballast::Ballast, config::Config, lifecycle::Reporter, signals::SignalWaiter};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_anyhow_with_source!(e, "ballast terminated with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = Config::from_env()?;
    info!(
        size_mib = cfg.size_mib,
        report_rss = cfg.report_rss,
        "config loaded"
    );

    let mut reporter = Reporter::stdout();

    let started = Instant::now();
    let ballast = Ballast::allocate(cfg.size_bytes()).context("allocate ballast")?;
    info!(
        bytes = ballast.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ballast allocated"
    );

    if cfg.report_rss {
        match procfs::resident_bytes() {
            Ok(rss) => info!(rss_bytes = rss, "resident memory after fill"),
            Err(e) => log_warn_display!(e, "cannot read resident memory"),
        }
    }

    // registrace před "ready", aby se signál poslaný hned po něm neztratil
    let waiter = SignalWaiter::register().context("register signal handlers")?;

    reporter.advance().context("write ready line")?;
    let signal = waiter.wait().await;

    reporter.advance().context("write shutdown line")?;
    debug!(%signal, "releasing ballast");
    drop(ballast);

    reporter.advance()?;
    Ok(())
}
