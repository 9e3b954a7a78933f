//! Tracing subscriber setup.
//!
//! Console output goes to stderr so `--json` output on stdout stays clean.
//! With `LOG_TO_FILE` enabled, errors are also written to a daily-rolling
//! `sms.log` and everything at the configured level to `sms.json`.

use anyhow::{Context, Result};
use sms_config::LoggingConfig;
use std::fs;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    // Console layer with filtering
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .compact()
        .with_filter(console_filter);

    let (file_layer, json_layer) = if config.to_file {
        fs::create_dir_all(&config.log_dir).with_context(|| {
            format!(
                "Failed to create logs directory {}",
                config.log_dir.display()
            )
        })?;

        // File layer for errors
        let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "sms.log");
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_filter(EnvFilter::new("error"));

        // JSON file layer for structured logs
        let json_appender = RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "sms.json");
        let json_layer = fmt::layer()
            .json()
            .with_writer(json_appender)
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(EnvFilter::new(config.filter_directive()));

        (Some(file_layer), Some(json_layer))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
