pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod views;

use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::services::{platform_service::PlatformService, report_service::ReportOptions};

#[derive(Clone)]
pub struct AppState {
    pub platform: PlatformService,
    pub report_options: ReportOptions,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let platform = PlatformService::new(
            config.platform_api_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )?;

        Ok(Self {
            platform,
            report_options: ReportOptions::with_offset_minutes(config.report_utc_offset_minutes),
        })
    }
}
