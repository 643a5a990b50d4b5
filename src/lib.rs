//! s3snip: snip a screen region and share it as an S3 link.
//!
//! Wires together:
//! - Configuration (config.rs)
//! - Interactive screen capture (capture/)
//! - Content hashing (hash.rs)
//! - S3 upload (upload.rs)
//! - Clipboard publishing (publish.rs)

pub mod capture;
pub mod config;
pub mod error;
pub mod hash;
pub mod pipeline;
pub mod publish;
pub mod upload;

use error::AppError;
use pipeline::{Pipeline, Snip};
use std::process::ExitCode;

/// Entry point, called by the binary.
///
/// Every failure ends up here, is reported once, and becomes a non-zero
/// exit status.
pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match snip() {
        Ok(snip) => {
            log::info!("Done: {} ({} bytes)", snip.url, snip.bytes);
            ExitCode::SUCCESS
        }
        Err(e) => ExitCode::from(report(&e, &mut std::io::stderr().lock())),
    }
}

/// Print the failure once and turn it into the exit status.
fn report<W: std::io::Write>(err: &AppError, out: &mut W) -> u8 {
    // Errors are not logged; this line is their only output.
    let _ = writeln!(out, "s3snip: {}", err);
    err.exit_code()
}

fn snip() -> Result<Snip, AppError> {
    let start = std::time::Instant::now();

    let config = config::load_config(&config::UserHome)?;

    // Capture, upload and publish run one after another; no worker threads.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    let snip = runtime.block_on(async {
        let tool = capture::PlatformTool::current()?;
        let store = upload::S3Store::new(&config)?;
        let mut clipboard = publish::SystemClipboard::new()?;
        Pipeline::new(&config, &store, &mut clipboard).run(tool).await
    })?;

    log::info!("Snip finished in {}ms", start.elapsed().as_millis());
    Ok(snip)
}
