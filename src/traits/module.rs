// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::any::Any;

use crate::errors::EngineError;
use crate::module::Contributions;

/// Upcast helper so loaded modules can be downcast to their concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A loaded module instance, owned by the Engine.
#[async_trait]
pub trait Module: AsAny + Send + Sync {
    fn name(&self) -> &str;

    /// Agents, workflows, integrations, pipelines, orchestrations and
    /// ontologies this module exposes.
    fn contributions(&self) -> &Contributions;

    /// Runs once, right after the module is constructed and registered.
    /// Modules build their exposed state here from their injected services.
    async fn on_initialized(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    async fn on_unloaded(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}
