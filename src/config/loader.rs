// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::consts::{
    DEFAULT_CONFIG_FILE, DEFAULT_DOTENV_PATH, DEFAULT_WORKSPACE_NAME, ENV_VAR,
};
use crate::config::services::{
    DotenvSecretConfiguration, SecretAdapterConfiguration, SecretServiceConfiguration,
    ServicesConfiguration,
};
use crate::config::template::render_templates;
use crate::errors::ConfigError;
use crate::modules::CORE_ONTOLOGY_MODULE;
use crate::observability::messages::config::{ConfigurationDiscovered, ConfigurationLoaded};
use crate::observability::messages::StructuredLog;

/// The parsed, templated engine configuration.
///
/// # Example
/// ```yaml
/// workspace:
///   name: acme
/// global:
///   ai_mode: local
/// services:
///   object_storage:
///     adapter: fs
///     config:
///       base_path: storage/datastore
/// modules:
///   core.ontology:
///     enabled: true
///   acme.crm:
///     enabled: true
///     config:
///       api_key: "{{ secret.CRM_API_KEY }}"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfiguration {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub services: ServicesConfiguration,
    #[serde(default)]
    pub modules: ModulesConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    #[serde(default = "default_workspace_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            name: default_workspace_name(),
            description: None,
        }
    }
}

fn default_workspace_name() -> String {
    DEFAULT_WORKSPACE_NAME.to_string()
}

/// Settings visible to every module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    #[serde(default)]
    pub ai_mode: AiMode,
}

/// Where models are expected to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiMode {
    #[default]
    Cloud,
    Local,
    Airgap,
}

/// One entry under `modules`. `config` is validated later against the
/// module's own configuration type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    pub enabled: bool,
    #[serde(default = "empty_mapping", skip_serializing_if = "is_empty_mapping")]
    pub config: Value,
}

impl ModuleEntry {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            config: empty_mapping(),
        }
    }
}

fn empty_mapping() -> Value {
    Value::Mapping(Mapping::new())
}

fn is_empty_mapping(value: &Value) -> bool {
    matches!(value, Value::Mapping(m) if m.is_empty())
}

/// The `modules` section, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModulesConfiguration {
    entries: Vec<(String, ModuleEntry)>,
}

impl ModulesConfiguration {
    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replaces an existing entry in place or appends a new one.
    pub fn insert(&mut self, name: impl Into<String>, entry: ModuleEntry) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Names of enabled modules, in document order.
    pub fn enabled(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, e)| e.enabled)
            .map(|(n, _)| n.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ModulesConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ModulesConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModulesVisitor;

        impl<'de> Visitor<'de> for ModulesVisitor {
            type Value = ModulesConfiguration;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of module name to module entry")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(ModulesConfiguration::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut modules = ModulesConfiguration::default();
                while let Some((name, entry)) = access.next_entry::<String, ModuleEntry>()? {
                    if modules.contains(&name) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate module '{}'",
                            name
                        )));
                    }
                    modules.entries.push((name, entry));
                }
                Ok(modules)
            }
        }

        deserializer.deserialize_any(ModulesVisitor)
    }
}

impl EngineConfiguration {
    /// Adds the built-in modules the document does not mention.
    pub fn ensure_default_modules(&mut self) {
        if !self.modules.contains(CORE_ONTOLOGY_MODULE) {
            self.modules.insert(CORE_ONTOLOGY_MODULE, ModuleEntry::enabled());
        }
    }

    /// The resolved configuration as YAML.
    pub fn render(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Render(e.to_string()))
    }
}

/// Loads the engine configuration.
///
/// With `raw_content` the text is parsed directly; otherwise the default
/// file is discovered in the working directory (see
/// [`discover_configuration`]).
pub async fn load_configuration(raw_content: Option<&str>) -> Result<EngineConfiguration, ConfigError> {
    match raw_content {
        Some(raw) => parse_configuration(raw, "<inline>").await,
        None => {
            let path = discover_configuration(Path::new("."))?;
            load_configuration_file(&path).await
        }
    }
}

pub async fn load_configuration_file(path: &Path) -> Result<EngineConfiguration, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_configuration(&content, &path.display().to_string()).await
}

/// Finds `config.<ENV>.yaml` (when `ENV` is set in the process environment
/// or in `<dir>/.env`), falling back to `config.yaml`.
pub fn discover_configuration(dir: &Path) -> Result<PathBuf, ConfigError> {
    let mut searched = Vec::new();

    if let Some(env) = environment_name(dir) {
        let candidate = dir.join(format!("config.{}.yaml", env));
        if candidate.is_file() {
            ConfigurationDiscovered {
                path: &candidate,
                environment: Some(env.as_str()),
            }
            .log();
            return Ok(candidate);
        }
        searched.push(candidate.display().to_string());
    }

    let fallback = dir.join(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        ConfigurationDiscovered {
            path: &fallback,
            environment: None,
        }
        .log();
        return Ok(fallback);
    }
    searched.push(fallback.display().to_string());

    Err(ConfigError::NotFound { searched })
}

fn environment_name(dir: &Path) -> Option<String> {
    if let Ok(env) = std::env::var(ENV_VAR) {
        if !env.is_empty() {
            return Some(env);
        }
    }
    dotenvy::from_path_iter(dir.join(DEFAULT_DOTENV_PATH))
        .ok()?
        .filter_map(Result::ok)
        .find(|(key, value)| key == ENV_VAR && !value.is_empty())
        .map(|(_, value)| value)
}

/// Parses, templates and validates `content`.
///
/// The `services.secret` block is templated first against a bootstrap
/// secret service (the process environment, then the first configured
/// dotenv file whose path is a literal), so the secret service itself may
/// be configured through `{{ secret.* }}` references. The whole document is
/// then templated with the configured service.
pub async fn parse_configuration(content: &str, source: &str) -> Result<EngineConfiguration, ConfigError> {
    let mut document: Value = serde_yaml::from_str(content).map_err(ConfigError::Parse)?;
    if document.is_null() {
        document = empty_mapping();
    }
    document.apply_merge().map_err(ConfigError::Parse)?;
    if !document.is_mapping() {
        return Err(ConfigError::Schema(
            "the configuration document must be a mapping".to_string(),
        ));
    }

    let secrets = bootstrap_secret_service(&mut document).await?;
    render_templates(&mut document, Some(&secrets)).await?;

    let mut configuration: EngineConfiguration =
        serde_yaml::from_value(document).map_err(|e| ConfigError::Schema(e.to_string()))?;
    configuration.ensure_default_modules();

    ConfigurationLoaded {
        source,
        workspace: &configuration.workspace.name,
        module_count: configuration.modules.len(),
        enabled_count: configuration.modules.enabled().len(),
    }
    .log();

    Ok(configuration)
}

async fn bootstrap_secret_service(
    document: &mut Value,
) -> Result<crate::services::SecretService, ConfigError> {
    if document
        .get("services")
        .and_then(|services| services.get("secret"))
        .is_none()
    {
        return Ok(SecretServiceConfiguration::default().load());
    }

    // Render inside a copy of the document so `config` references keep
    // working.
    let mut scratch = document.clone();
    let bootstrap = SecretServiceConfiguration {
        adapters: bootstrap_secret_adapters(document)?,
    }
    .load();
    render_templates(&mut scratch, Some(&bootstrap)).await?;

    let rendered = scratch
        .get("services")
        .and_then(|services| services.get("secret"))
        .cloned()
        .unwrap_or_default();
    let configuration: SecretServiceConfiguration = serde_yaml::from_value(rendered.clone())
        .map_err(|e| ConfigError::Schema(format!("services.secret: {}", e)))?;

    if let Some(slot) = document
        .get_mut("services")
        .and_then(|services| services.get_mut("secret"))
    {
        *slot = rendered;
    }
    Ok(configuration.load())
}

/// The environment, followed by the first dotenv adapter of the raw
/// `services.secret` block. A dotenv path that is itself templated cannot be
/// read yet and is skipped.
fn bootstrap_secret_adapters(
    document: &Value,
) -> Result<Vec<SecretAdapterConfiguration>, ConfigError> {
    let mut adapters = vec![SecretAdapterConfiguration::Env];

    let Some(entries) = document
        .get("services")
        .and_then(|services| services.get("secret"))
        .and_then(|secret| secret.get("adapters"))
        .and_then(Value::as_sequence)
    else {
        return Ok(adapters);
    };

    let Some(dotenv) = entries
        .iter()
        .find(|entry| entry.get("adapter").and_then(Value::as_str) == Some("dotenv"))
    else {
        return Ok(adapters);
    };

    let path = match dotenv.get("config").and_then(|config| config.get("path")) {
        None | Some(Value::Null) => DEFAULT_DOTENV_PATH.to_string(),
        Some(Value::String(path)) if !path.trim().is_empty() => path.clone(),
        Some(_) => {
            return Err(ConfigError::Schema(
                "services.secret: dotenv adapter path must be a non-empty string".to_string(),
            ))
        }
    };
    if !path.contains("{{") {
        adapters.push(SecretAdapterConfiguration::Dotenv(DotenvSecretConfiguration {
            path: PathBuf::from(path),
        }));
    }
    Ok(adapters)
}
