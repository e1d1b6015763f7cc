// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod dotenv;
mod env;
mod memory;

pub use dotenv::DotenvSecretAdapter;
pub use env::EnvSecretAdapter;
pub use memory::MemorySecretAdapter;
