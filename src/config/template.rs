// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! `{{ namespace.path }}` substitution over a parsed configuration tree.
//!
//! Two namespaces are recognised:
//!
//! * `secret` resolves `path` through the [`SecretService`]
//! * `config` resolves `path` as a dotted lookup into the document itself
//!
//! Scalars are visited in document order and each one is written back
//! before the next is resolved, so a `config` reference sees earlier
//! substitutions but not later ones. Anything that cannot be resolved is
//! left verbatim.
//!
//! ```rust
//! use the_loom::config::template::find_spans;
//!
//! let spans = find_spans("{{ secret.FOO }}-{{ secret.BAR }}");
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[1].namespace, "secret");
//! assert_eq!(spans[1].path, "BAR");
//! ```

use serde_yaml::Value;

use crate::errors::{ConfigError, PortError};
use crate::services::SecretService;

pub const SECRET_NAMESPACE: &str = "secret";
pub const CONFIG_NAMESPACE: &str = "config";

/// One `{{ ... }}` occurrence inside a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpan<'a> {
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
    pub namespace: &'a str,
    pub path: &'a str,
}

/// Finds every well-formed span in `text`. Spans without a `.` separator
/// are not spans.
pub fn find_spans(text: &str) -> Vec<TemplateSpan<'_>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find("{{") {
        let start = cursor + open;
        let Some(close) = text[start + 2..].find("}}") else {
            break;
        };
        let close = start + 2 + close;
        // An unmatched opener before the span is literal text.
        let start = match text[start..close].rfind("{{") {
            Some(innermost) => start + innermost,
            None => start,
        };
        let inner_start = start + 2;
        let end = close + 2;
        let inner = text[inner_start..close].trim();

        if let Some((namespace, path)) = inner.split_once('.') {
            let (namespace, path) = (namespace.trim(), path.trim());
            if !namespace.is_empty() && !path.is_empty() {
                spans.push(TemplateSpan {
                    start,
                    end,
                    namespace,
                    path,
                });
            }
        }
        cursor = end;
    }
    spans
}

/// The key of the first `{{ secret.* }}` span still present in `text`.
pub fn unresolved_secret(text: &str) -> Option<&str> {
    find_spans(text)
        .into_iter()
        .find(|s| s.namespace == SECRET_NAMESPACE)
        .map(|s| s.path)
}

/// Dotted lookup; numeric segments index into sequences.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Mapping(map) => map.get(segment),
        Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        Value::Tagged(tagged) => lookup(&tagged.value, segment),
        _ => None,
    })
}

#[derive(Debug, Clone)]
enum Step {
    Key(Value),
    Index(usize),
}

fn collect_scalar_paths(node: &Value, prefix: &mut Vec<Step>, out: &mut Vec<Vec<Step>>) {
    match node {
        Value::String(s) if s.contains("{{") => out.push(prefix.clone()),
        Value::Mapping(map) => {
            for (key, value) in map {
                prefix.push(Step::Key(key.clone()));
                collect_scalar_paths(value, prefix, out);
                prefix.pop();
            }
        }
        Value::Sequence(items) => {
            for (index, value) in items.iter().enumerate() {
                prefix.push(Step::Index(index));
                collect_scalar_paths(value, prefix, out);
                prefix.pop();
            }
        }
        _ => {}
    }
}

fn node_at<'a>(root: &'a Value, path: &[Step]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, step| match (node, step) {
        (Value::Mapping(map), Step::Key(key)) => map.get(key),
        (Value::Sequence(items), Step::Index(i)) => items.get(*i),
        _ => None,
    })
}

fn node_at_mut<'a>(root: &'a mut Value, path: &[Step]) -> Option<&'a mut Value> {
    path.iter().try_fold(root, |node, step| match (node, step) {
        (Value::Mapping(map), Step::Key(key)) => map.get_mut(key),
        (Value::Sequence(items), Step::Index(i)) => items.get_mut(*i),
        _ => None,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Resolves every span in `root`, in document order.
///
/// `secrets` may be `None`, in which case `secret` spans are left as is.
pub async fn render_templates(
    root: &mut Value,
    secrets: Option<&SecretService>,
) -> Result<(), ConfigError> {
    let mut paths = Vec::new();
    collect_scalar_paths(root, &mut Vec::new(), &mut paths);

    for path in paths {
        let Some(Value::String(original)) = node_at(root, &path).cloned() else {
            continue;
        };
        let rendered = render_scalar(&original, root, secrets)
            .await
            .map_err(ConfigError::Secret)?;
        if let Some(slot) = node_at_mut(root, &path) {
            *slot = rendered;
        }
    }
    Ok(())
}

async fn render_scalar(
    original: &str,
    root: &Value,
    secrets: Option<&SecretService>,
) -> Result<Value, PortError> {
    let spans = find_spans(original);

    // A scalar that is exactly one config reference keeps the target's type.
    if let [span] = spans.as_slice() {
        if span.start == 0 && span.end == original.len() && span.namespace == CONFIG_NAMESPACE {
            if let Some(target) = lookup(root, span.path) {
                if matches!(target, Value::Bool(_) | Value::Number(_) | Value::String(_)) {
                    return Ok(target.clone());
                }
            }
            return Ok(Value::String(original.to_string()));
        }
    }

    let mut rendered = String::with_capacity(original.len());
    let mut cursor = 0;
    for span in &spans {
        let replacement = match span.namespace {
            SECRET_NAMESPACE => match secrets {
                Some(service) => service.get(span.path).await?,
                None => None,
            },
            CONFIG_NAMESPACE => lookup(root, span.path).and_then(scalar_text),
            _ => None,
        };

        rendered.push_str(&original[cursor..span.start]);
        match replacement {
            Some(value) => rendered.push_str(&value),
            None => rendered.push_str(&original[span.start..span.end]),
        }
        cursor = span.end;
    }
    rendered.push_str(&original[cursor..]);
    Ok(Value::String(rendered))
}
