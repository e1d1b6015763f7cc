// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::config::GlobalConfig;
use crate::errors::{EngineError, ValidationError};
use crate::module::{validate_module_configuration, ModuleContext, ModuleServices};
use crate::modules::CoreOntologyModule;
use crate::services::ServiceKind;
use crate::traits::Module;

/// What a module needs loaded before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDependencies {
    pub modules: Vec<String>,
    pub services: Vec<ServiceKind>,
}

impl ModuleDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module(mut self, name: impl Into<String>) -> Self {
        self.modules.push(name.into());
        self
    }

    pub fn service(mut self, kind: ServiceKind) -> Self {
        if !self.services.contains(&kind) {
            self.services.push(kind);
        }
        self
    }
}

/// Static description of a module type.
///
/// ```rust
/// use async_trait::async_trait;
/// use serde::Deserialize;
/// use the_loom::errors::EngineError;
/// use the_loom::module::{Contributions, ModuleContext, ModuleDefinition, ModuleDependencies, ModuleRegistry};
/// use the_loom::services::ServiceKind;
/// use the_loom::traits::Module;
///
/// #[derive(Deserialize)]
/// struct CrmConfiguration {
///     api_key: String,
/// }
///
/// struct Crm {
///     contributions: Contributions,
/// }
///
/// #[async_trait]
/// impl Module for Crm {
///     fn name(&self) -> &str {
///         Self::NAME
///     }
///
///     fn contributions(&self) -> &Contributions {
///         &self.contributions
///     }
/// }
///
/// impl ModuleDefinition for Crm {
///     const NAME: &'static str = "acme.crm";
///     type Configuration = CrmConfiguration;
///
///     fn dependencies() -> ModuleDependencies {
///         ModuleDependencies::new().service(ServiceKind::KeyValue)
///     }
///
///     fn new(_context: ModuleContext<CrmConfiguration>) -> Result<Self, EngineError> {
///         Ok(Self { contributions: Contributions::default() })
///     }
/// }
///
/// let mut registry = ModuleRegistry::new();
/// registry.register::<Crm>().unwrap();
/// assert!(registry.register::<Crm>().is_err());
/// ```
pub trait ModuleDefinition: Module + Sized + 'static {
    const NAME: &'static str;

    type Configuration: DeserializeOwned;

    fn dependencies() -> ModuleDependencies;

    fn new(context: ModuleContext<Self::Configuration>) -> Result<Self, EngineError>;
}

type Constructor =
    fn(&str, &Value, &GlobalConfig, ModuleServices) -> Result<Box<dyn Module>, EngineError>;

/// A registered module type: its name, dependencies and factory.
#[derive(Clone)]
pub struct ModuleDescriptor {
    name: &'static str,
    dependencies: ModuleDependencies,
    constructor: Constructor,
}

impl ModuleDescriptor {
    pub fn of<M: ModuleDefinition>() -> Self {
        Self {
            name: M::NAME,
            dependencies: M::dependencies(),
            constructor: construct::<M>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn dependencies(&self) -> &ModuleDependencies {
        &self.dependencies
    }

    /// Validates `raw_configuration` and builds the module.
    pub fn construct(
        &self,
        raw_configuration: &Value,
        global: &GlobalConfig,
        services: ModuleServices,
    ) -> Result<Box<dyn Module>, EngineError> {
        (self.constructor)(self.name, raw_configuration, global, services)
    }
}

impl std::fmt::Debug for ModuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleDescriptor")
            .field("name", &self.name)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

fn construct<M: ModuleDefinition>(
    name: &str,
    raw_configuration: &Value,
    global: &GlobalConfig,
    services: ModuleServices,
) -> Result<Box<dyn Module>, EngineError> {
    let configuration = validate_module_configuration::<M::Configuration>(name, raw_configuration)?;
    let module = M::new(ModuleContext {
        name: name.to_string(),
        configuration,
        global: global.clone(),
        services,
    })?;
    Ok(Box::new(module))
}

/// Name to factory lookup for every module the engine can load.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    descriptors: Vec<ModuleDescriptor>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the modules shipped with the engine.
    pub fn with_builtin() -> Self {
        Self {
            descriptors: vec![ModuleDescriptor::of::<CoreOntologyModule>()],
        }
    }

    pub fn register<M: ModuleDefinition>(&mut self) -> Result<(), ValidationError> {
        if self.contains(M::NAME) {
            return Err(ValidationError::DuplicateModule {
                module: M::NAME.to_string(),
            });
        }
        self.descriptors.push(ModuleDescriptor::of::<M>());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
