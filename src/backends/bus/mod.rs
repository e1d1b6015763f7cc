// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod memory;

pub use memory::MemoryBusAdapter;

/// Whether a published `topic` is delivered to a subscription on `pattern`.
/// Topics are dot-separated; a `*` segment in the pattern matches any one
/// segment.
pub fn topic_matches(pattern: &str, topic: &str) -> bool {
    let mut expected = pattern.split('.');
    let mut actual = topic.split('.');
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return true,
            (Some(e), Some(a)) if e == "*" || e == a => {}
            _ => return false,
        }
    }
}
