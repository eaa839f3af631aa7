// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Integration tests for logging setup
//!
//! Only one test in this binary installs the global subscriber; the rest
//! cover configuration building.

use quorumkv_observability::{
    init_tracing, init_tracing_with_config, LogConfig, LogError, LogFormat, LogOutput,
};

#[test]
fn test_config_builder_chaining() {
    let config = LogConfig::new()
        .with_format(LogFormat::Json)
        .with_level("debug")
        .with_timestamps(false)
        .with_color(false)
        .with_thread_ids(true)
        .with_targets(false)
        .with_output(LogOutput::Stdout);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, Some("debug".to_string()));
    assert!(!config.use_timestamps);
    assert!(!config.use_color);
    assert!(config.include_thread_ids);
    assert!(!config.include_targets);
    assert_eq!(config.output, LogOutput::Stdout);
}

#[test]
fn test_default_config() {
    let config = LogConfig::default();
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.output, LogOutput::Stderr);
    assert!(config.use_color);
    assert!(config.use_timestamps);
}

#[test]
fn test_invalid_filter_is_reported_before_install() {
    let config = LogConfig::new().with_level("quorumkv_metrics=loud");
    assert!(matches!(
        init_tracing_with_config(&config),
        Err(LogError::InvalidFilter { .. })
    ));
}

#[test]
fn test_second_install_is_an_error() {
    init_tracing(LogFormat::Compact, Some("debug")).expect("first install succeeds");
    tracing::debug!(component = "observability-test", "subscriber installed");

    let second = init_tracing_with_config(&LogConfig::new().with_format(LogFormat::Json));
    assert!(matches!(second, Err(LogError::AlreadyInitialized(_))));
}
