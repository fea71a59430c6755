// Copyright 2025 cvbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared application state and response bodies.

use crate::config::AppConfig;
use cvbench_records::RecordLoader;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// State shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Configuration the server was started with.
    pub config: AppConfig,
    /// Loader built from `config`.
    pub loader: RecordLoader,
    /// Serializes appends made through this process. Other processes
    /// writing the data directory are not covered.
    pub append_lock: Mutex<()>,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            loader: config.loader(),
            config,
            append_lock: Mutex::new(()),
        }
    }
}

/// Success body of the write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}
