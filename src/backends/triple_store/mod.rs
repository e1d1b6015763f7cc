// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod blob;
mod memory;

pub use blob::ObjectStorageTripleStoreAdapter;
pub use memory::MemoryTripleStoreAdapter;
