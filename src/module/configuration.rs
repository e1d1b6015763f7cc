// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::config::template::unresolved_secret;
use crate::errors::EngineError;

/// Deserializes a module's `config` block into its configuration type.
///
/// Scalars that still carry a `{{ secret.* }}` token after templating are
/// treated as absent, so an optional field falls back to its default and a
/// required one fails with the field named.
pub fn validate_module_configuration<C: DeserializeOwned>(
    module: &str,
    raw: &Value,
) -> Result<C, EngineError> {
    let mut value = match raw {
        Value::Null => Value::Mapping(Mapping::new()),
        other => other.clone(),
    };
    strip_unresolved_secrets(&mut value);

    serde_yaml::from_value(value).map_err(|e| {
        let reason = e.to_string();
        EngineError::ModuleConfiguration {
            module: module.to_string(),
            field: offending_field(&reason),
            reason,
        }
    })
}

fn is_unresolved(value: &Value) -> bool {
    matches!(value, Value::String(s) if unresolved_secret(s).is_some())
}

fn strip_unresolved_secrets(node: &mut Value) {
    match node {
        Value::Mapping(map) => {
            let entries = std::mem::take(map);
            for (key, mut value) in entries {
                if is_unresolved(&value) {
                    continue;
                }
                strip_unresolved_secrets(&mut value);
                map.insert(key, value);
            }
        }
        Value::Sequence(items) => {
            items.retain(|item| !is_unresolved(item));
            items.iter_mut().for_each(strip_unresolved_secrets);
        }
        Value::Tagged(tagged) => strip_unresolved_secrets(&mut tagged.value),
        _ => {}
    }
}

/// Pulls the field name out of serde's "missing field `x`" and
/// "unknown field `x`" messages.
fn offending_field(reason: &str) -> Option<String> {
    ["missing field `", "unknown field `"]
        .iter()
        .find_map(|marker| {
            let start = reason.find(marker)? + marker.len();
            let end = reason[start..].find('`')?;
            Some(reason[start..start + end].to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct CrmConfiguration {
        api_key: String,
        #[serde(default)]
        region: Option<String>,
        #[serde(default = "default_retries")]
        retries: u32,
    }

    fn default_retries() -> u32 {
        3
    }

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config: CrmConfiguration =
            validate_module_configuration("acme.crm", &yaml("api_key: abc")).unwrap();
        assert_eq!(
            config,
            CrmConfiguration {
                api_key: "abc".into(),
                region: None,
                retries: 3
            }
        );
    }

    #[test]
    fn test_unresolved_secret_in_required_field_names_the_field() {
        let err = validate_module_configuration::<CrmConfiguration>(
            "acme.crm",
            &yaml("api_key: \"{{ secret.CRM_KEY }}\"\nregion: eu"),
        )
        .unwrap_err();

        match err {
            EngineError::ModuleConfiguration { module, field, .. } => {
                assert_eq!(module, "acme.crm");
                assert_eq!(field.as_deref(), Some("api_key"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unresolved_secret_in_optional_field_uses_default() {
        let config: CrmConfiguration = validate_module_configuration(
            "acme.crm",
            &yaml("api_key: abc\nregion: \"eu-{{ secret.REGION }}\""),
        )
        .unwrap();
        assert_eq!(config.region, None);
    }

    #[test]
    fn test_null_block_is_an_empty_mapping() {
        #[derive(Debug, Default, Deserialize)]
        struct Empty {}

        assert!(validate_module_configuration::<Empty>("core.ontology", &Value::Null).is_ok());
    }

    #[test]
    fn test_unknown_field_is_reported() {
        let err = validate_module_configuration::<CrmConfiguration>(
            "acme.crm",
            &yaml("api_key: abc\nregoin: eu"),
        )
        .unwrap_err();
        match err {
            EngineError::ModuleConfiguration { field, .. } => {
                assert_eq!(field.as_deref(), Some("regoin"))
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
