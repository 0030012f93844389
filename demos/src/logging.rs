// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable that overrides `--log-level` with a full filter.
const FILTER_ENV: &str = "CANOPY_LOG";

/// Install a compact stderr subscriber, unless logging is silenced.
pub(crate) fn setup_tracing(level: LogLevel) {
    let Some(directive) = level.directive() else {
        return;
    };
    let filter = EnvFilter::try_from_env(FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}
