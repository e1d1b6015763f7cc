// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod fs;
mod memory;

pub use fs::FsObjectStorageAdapter;
pub use memory::MemoryObjectStorageAdapter;
