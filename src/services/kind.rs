// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The service kinds a module may depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Secret,
    ObjectStorage,
    TripleStore,
    VectorStore,
    KeyValue,
    Cache,
    Bus,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 7] = [
        ServiceKind::Secret,
        ServiceKind::ObjectStorage,
        ServiceKind::TripleStore,
        ServiceKind::VectorStore,
        ServiceKind::KeyValue,
        ServiceKind::Cache,
        ServiceKind::Bus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Secret => "secret",
            ServiceKind::ObjectStorage => "object_storage",
            ServiceKind::TripleStore => "triple_store",
            ServiceKind::VectorStore => "vector_store",
            ServiceKind::KeyValue => "key_value",
            ServiceKind::Cache => "cache",
            ServiceKind::Bus => "bus",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown service kind '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.as_str().parse::<ServiceKind>().unwrap(), kind);
            let yaml = serde_yaml::to_string(&kind).unwrap();
            assert_eq!(yaml.trim(), kind.as_str());
        }
        assert!("graph_db".parse::<ServiceKind>().is_err());
    }
}
