// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Configuration file used when no environment-specific file exists.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Variable selecting `config.<ENV>.yaml`.
pub const ENV_VAR: &str = "ENV";
pub const DEFAULT_DOTENV_PATH: &str = ".env";

pub const DEFAULT_WORKSPACE_NAME: &str = "default";

/// Leading prefix segment reserved for the local on-disk layout.
pub const RESERVED_STORAGE_PREFIX: &str = "storage/datastore";
pub const DEFAULT_OBJECT_STORAGE_PATH: &str = "storage/datastore";
pub const DEFAULT_TRIPLE_STORE_PATH: &str = "storage/triplestore";
pub const DEFAULT_TRIPLES_PATH: &str = "triples";
pub const DEFAULT_CACHE_PATH: &str = "storage/cache";
pub const DEFAULT_BUS_CAPACITY: usize = 1024;
