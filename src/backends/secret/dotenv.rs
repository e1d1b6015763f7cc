// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::errors::PortError;
use crate::traits::SecretPort;

/// Secrets kept in a dotenv file.
///
/// The file is re-read on every call so external edits are picked up.
/// Updates rewrite only the affected line and keep comments and ordering.
pub struct DotenvSecretAdapter {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DotenvSecretAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_values(&self) -> Result<BTreeMap<String, String>, PortError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => parse_dotenv(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_lines(&self) -> Result<Vec<String>, PortError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_lines(&self, lines: &[String]) -> Result<(), PortError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn parse_dotenv(content: &str) -> Result<BTreeMap<String, String>, PortError> {
    let mut values = BTreeMap::new();
    for item in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) = item.map_err(|e| PortError::Serialization(e.to_string()))?;
        values.insert(key, value);
    }
    Ok(values)
}

/// The variable a `KEY=value` line assigns, ignoring blanks, comments and
/// a leading `export`.
fn key_from_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, _) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Writes `value` double-quoted. dotenvy substitutes `$VAR` inside double
/// quotes, so `$` is escaped along with `\\`, `"` and line breaks.
fn format_line(key: &str, value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    format!("{}=\"{}\"", key, escaped)
}

#[async_trait]
impl SecretPort for DotenvSecretAdapter {
    async fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.read_values().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        let _guard = self.write_lock.lock().await;
        let mut lines = self.read_lines().await?;
        let line = format_line(key, value);

        match lines.iter().position(|l| key_from_line(l) == Some(key)) {
            Some(index) => lines[index] = line,
            None => lines.push(line),
        }
        // Later duplicates would shadow the updated line.
        let mut seen = false;
        lines.retain(|l| {
            if key_from_line(l) != Some(key) {
                return true;
            }
            let keep = !seen;
            seen = true;
            keep
        });

        self.write_lines(&lines).await
    }

    async fn remove(&self, key: &str) -> Result<(), PortError> {
        let _guard = self.write_lock.lock().await;
        let mut lines = self.read_lines().await?;
        let before = lines.len();
        lines.retain(|l| key_from_line(l) != Some(key));
        if lines.len() == before {
            return Ok(());
        }
        self.write_lines(&lines).await
    }

    async fn list(&self) -> Result<BTreeMap<String, String>, PortError> {
        self.read_values().await
    }

    fn name(&self) -> &'static str {
        "dotenv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_from_line() {
        assert_eq!(key_from_line("FOO=bar"), Some("FOO"));
        assert_eq!(key_from_line("  API_KEY = y  "), Some("API_KEY"));
        assert_eq!(key_from_line("export TOKEN=abc"), Some("TOKEN"));
        assert_eq!(key_from_line("# FOO=bar"), None);
        assert_eq!(key_from_line(""), None);
        assert_eq!(key_from_line("no_equals_sign"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let adapter = DotenvSecretAdapter::new(dir.path().join(".env"));

        assert_eq!(adapter.get("ANY").await.unwrap(), None);
        assert!(adapter.list().await.unwrap().is_empty());
        adapter.remove("ANY").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_preserves_comments_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "# api keys\nA=1\nB=2\n").unwrap();
        let adapter = DotenvSecretAdapter::new(&path);

        adapter.set("A", "one").await.unwrap();
        adapter.set("C", "with \"quotes\"").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# api keys\nA=\"one\"\nB=2\nC=\"with \\\"quotes\\\"\"\n"
        );
        assert_eq!(adapter.get("A").await.unwrap(), Some("one".to_string()));
        assert_eq!(adapter.get("C").await.unwrap(), Some("with \"quotes\"".to_string()));
    }

    #[tokio::test]
    async fn test_set_round_trips_special_characters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PLAIN=ok\n").unwrap();
        let adapter = DotenvSecretAdapter::new(&path);

        let values = [
            ("PW", "pa$word"),
            ("VAR", "${HOME}/$USER"),
            ("SINGLE", "it's"),
            ("DOUBLE", "say \"hi\""),
            ("BACKSLASH", "C:\\temp\\"),
            ("MULTILINE", "line one\nline two"),
            ("MIXED", "a'b\"c$d\\e\nf"),
        ];
        for (key, value) in values {
            adapter.set(key, value).await.unwrap();
        }

        for (key, value) in values {
            assert_eq!(adapter.get(key).await.unwrap().as_deref(), Some(value), "{}", key);
        }
        let listed = adapter.list().await.unwrap();
        assert_eq!(listed.len(), values.len() + 1);
        assert_eq!(listed["PLAIN"], "ok");
        assert_eq!(listed["MIXED"], "a'b\"c$d\\e\nf");
    }

    #[tokio::test]
    async fn test_remove_drops_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "A=1\nB=2\n").unwrap();
        let adapter = DotenvSecretAdapter::new(&path);

        adapter.remove("A").await.unwrap();

        assert_eq!(adapter.get("A").await.unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "B=2\n");
    }
}
