// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::backends::stub::RejectingTripleStoreAdapter;
use crate::config::{parse_configuration, EngineConfiguration};
use crate::engine::Engine;
use crate::errors::{EngineError, PortError, ValidationError};
use crate::module::{
    Contributions, ModuleContext, ModuleDefinition, ModuleDependencies, ModuleRegistry,
    ModuleServices, Ontology,
};
use crate::modules::{CoreOntologyModule, CORE_ONTOLOGY_MODULE};
use crate::services::{
    SchemaLoad, Service, ServiceKind, ServiceRegistry, TripleEvent, TriplePattern,
    TripleStoreService,
};
use crate::traits::{Module, Triple};

const UNLOAD_LOG: &str = "unload-order";

/// Static shape of a test module.
trait Fixture: Send + Sync + 'static {
    const NAME: &'static str;

    fn dependencies() -> ModuleDependencies;

    const FAILS_TO_INITIALIZE: bool = false;

    fn ontologies() -> Vec<Ontology> {
        Vec::new()
    }
}

/// A module that counts its initializations and records its teardown in
/// the key-value service.
struct TestModule<F: Fixture> {
    services: ModuleServices,
    initialized: usize,
    contributions: Contributions,
    _fixture: PhantomData<F>,
}

#[async_trait]
impl<F: Fixture> Module for TestModule<F> {
    fn name(&self) -> &str {
        F::NAME
    }

    fn contributions(&self) -> &Contributions {
        &self.contributions
    }

    async fn on_initialized(&mut self) -> Result<(), EngineError> {
        if F::FAILS_TO_INITIALIZE {
            return Err(PortError::Invalid("refused to start".to_string()).into());
        }
        self.initialized += 1;
        self.contributions.ontologies = F::ontologies();
        Ok(())
    }

    async fn on_unloaded(&mut self) -> Result<(), EngineError> {
        let Ok(store) = self.services.key_value() else {
            return Ok(());
        };
        let mut order = match store.get(UNLOAD_LOG).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(PortError::NotFound { .. }) => String::new(),
            Err(e) => return Err(e.into()),
        };
        if !order.is_empty() {
            order.push(',');
        }
        order.push_str(F::NAME);
        store.set(UNLOAD_LOG, order.into_bytes(), None).await?;
        Ok(())
    }
}

impl<F: Fixture> ModuleDefinition for TestModule<F> {
    const NAME: &'static str = F::NAME;

    type Configuration = serde_yaml::Value;

    fn dependencies() -> ModuleDependencies {
        F::dependencies()
    }

    fn new(context: ModuleContext<Self::Configuration>) -> Result<Self, EngineError> {
        Ok(Self {
            services: context.services,
            initialized: 0,
            contributions: Contributions::default(),
            _fixture: PhantomData,
        })
    }
}

macro_rules! fixture {
    ($ty:ident, $name:expr, [$($module:expr),*], [$($service:expr),*]) => {
        struct $ty;

        impl Fixture for $ty {
            const NAME: &'static str = $name;

            fn dependencies() -> ModuleDependencies {
                ModuleDependencies::new()
                    $(.module($module))*
                    $(.service($service))*
            }
        }
    };
}

fixture!(BaseFixture, "test.base", [], [ServiceKind::KeyValue]);
fixture!(LeftFixture, "test.left", ["test.base"], [ServiceKind::KeyValue]);
fixture!(RightFixture, "test.right", ["test.base"], [ServiceKind::KeyValue, ServiceKind::Cache]);
fixture!(TopFixture, "test.top", ["test.left", "test.right"], [ServiceKind::KeyValue]);
fixture!(CycleAFixture, "test.cycle_a", ["test.cycle_b"], []);
fixture!(CycleBFixture, "test.cycle_b", ["test.cycle_a"], []);
fixture!(OrphanFixture, "test.orphan", ["test.missing"], []);
fixture!(WatcherFixture, "test.watcher", [], [ServiceKind::TripleStore, ServiceKind::Bus]);

struct FaultyFixture;

impl Fixture for FaultyFixture {
    const NAME: &'static str = "test.faulty";
    const FAILS_TO_INITIALIZE: bool = true;

    fn dependencies() -> ModuleDependencies {
        ModuleDependencies::new().module("test.base")
    }
}

struct ChartedFixture;

impl Fixture for ChartedFixture {
    const NAME: &'static str = "test.charted";

    fn dependencies() -> ModuleDependencies {
        ModuleDependencies::new()
    }

    fn ontologies() -> Vec<Ontology> {
        vec![
            Ontology::new("charted-bad", "@prefix bad: <http://bad/> ."),
            Ontology::new("charted-good", "@prefix good: <http://good/> ."),
        ]
    }
}

type Base = TestModule<BaseFixture>;
type Left = TestModule<LeftFixture>;
type Right = TestModule<RightFixture>;
type Top = TestModule<TopFixture>;

/// A module with a required configuration field.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CrmConfiguration {
    api_key: String,
    #[serde(default)]
    region: Option<String>,
}

struct Crm {
    configuration: CrmConfiguration,
    contributions: Contributions,
}

#[async_trait]
impl Module for Crm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn contributions(&self) -> &Contributions {
        &self.contributions
    }
}

impl ModuleDefinition for Crm {
    const NAME: &'static str = "test.crm";

    type Configuration = CrmConfiguration;

    fn dependencies() -> ModuleDependencies {
        ModuleDependencies::new().service(ServiceKind::Secret)
    }

    fn new(context: ModuleContext<CrmConfiguration>) -> Result<Self, EngineError> {
        Ok(Self {
            configuration: context.configuration,
            contributions: Contributions::default(),
        })
    }
}

const IN_MEMORY_SERVICES: &str = r#"
services:
  secret:
    adapters:
      - adapter: memory
        config:
          values:
            CRM_KEY: from-secret
  object_storage:
    adapter: memory
  triple_store:
    adapter: memory
  cache:
    adapter: memory
"#;

async fn configuration(modules: &str) -> EngineConfiguration {
    parse_configuration(&format!("{}{}", IN_MEMORY_SERVICES, modules), "test")
        .await
        .unwrap()
}

fn registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::with_builtin();
    registry.register::<Base>().unwrap();
    registry.register::<Left>().unwrap();
    registry.register::<Right>().unwrap();
    registry.register::<Top>().unwrap();
    registry.register::<TestModule<CycleAFixture>>().unwrap();
    registry.register::<TestModule<CycleBFixture>>().unwrap();
    registry.register::<TestModule<OrphanFixture>>().unwrap();
    registry.register::<TestModule<ChartedFixture>>().unwrap();
    registry.register::<TestModule<WatcherFixture>>().unwrap();
    registry.register::<TestModule<FaultyFixture>>().unwrap();
    registry.register::<Crm>().unwrap();
    registry
}

fn names(list: &[&str]) -> Option<Vec<String>> {
    Some(list.iter().map(|s| s.to_string()).collect())
}

#[tokio::test]
async fn test_unknown_dependency_fails_before_any_module_is_constructed() {
    let mut engine = Engine::new(configuration("").await, registry());

    let err = engine
        .load(names(&["test.base", "test.orphan"]))
        .await
        .unwrap_err();

    match err {
        EngineError::Dependency(errors) => assert_eq!(
            errors,
            vec![ValidationError::UnresolvedDependency {
                module: "test.orphan".to_string(),
                missing_dependency: "test.missing".to_string(),
            }]
        ),
        other => panic!("unexpected error: {}", other),
    }
    assert!(engine.load_order().is_empty());
    assert!(engine.services().kinds().is_empty());
}

#[tokio::test]
async fn test_shared_service_kind_is_one_instance() {
    let mut engine = Engine::new(configuration("").await, registry());
    engine
        .load(names(&["test.left", "test.right"]))
        .await
        .unwrap();

    let left = engine.module_as::<Left>().unwrap().services.key_value().unwrap();
    let right = engine.module_as::<Right>().unwrap().services.key_value().unwrap();
    assert!(Arc::ptr_eq(&left, &right));
    assert!(Arc::ptr_eq(&left, engine.services().key_value().unwrap()));
}

#[tokio::test]
async fn test_diamond_constructs_shared_dependency_once() {
    let mut engine = Engine::new(configuration("").await, registry());
    engine.load(names(&["test.top"])).await.unwrap();

    assert_eq!(
        engine.load_order(),
        vec!["test.base", "test.left", "test.right", "test.top"]
    );
    assert_eq!(engine.module_as::<Base>().unwrap().initialized, 1);
    assert_eq!(engine.module_as::<Top>().unwrap().initialized, 1);
}

#[tokio::test]
async fn test_repeated_load_is_additive() {
    let mut engine = Engine::new(configuration("").await, registry());
    engine.load(names(&["test.left"])).await.unwrap();
    engine.load(names(&["test.top", "test.left"])).await.unwrap();

    assert_eq!(
        engine.load_order(),
        vec!["test.base", "test.left", "test.right", "test.top"]
    );
    assert_eq!(engine.module_as::<Base>().unwrap().initialized, 1);
    assert_eq!(engine.module_as::<Left>().unwrap().initialized, 1);
}

#[tokio::test]
async fn test_only_declared_services_are_constructed() {
    let mut engine = Engine::new(configuration("").await, registry());
    engine.load(names(&["test.base"])).await.unwrap();

    assert_eq!(
        engine.services().kinds(),
        vec![ServiceKind::Secret, ServiceKind::KeyValue]
    );
    assert!(engine.services_wired("test.base"));
    assert!(!engine.services_wired("test.right"));
}

#[tokio::test]
async fn test_missing_required_field_names_module_and_field() {
    let mut engine = Engine::new(
        configuration(
            "modules:\n  test.crm:\n    enabled: true\n    config:\n      api_key: \"{{ secret.NOT_SET }}\"\n",
        )
        .await,
        registry(),
    );

    match engine.load(names(&["test.crm"])).await.unwrap_err() {
        EngineError::ModuleConfiguration { module, field, .. } => {
            assert_eq!(module, "test.crm");
            assert_eq!(field.as_deref(), Some("api_key"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(!engine.is_loaded("test.crm"));
}

#[tokio::test]
async fn test_templated_secret_reaches_module_configuration() {
    let mut engine = Engine::new(
        configuration(
            "modules:\n  test.crm:\n    enabled: true\n    config:\n      api_key: \"{{ secret.CRM_KEY }}\"\n",
        )
        .await,
        registry(),
    );
    engine.load(names(&["test.crm"])).await.unwrap();

    let crm = engine.module_as::<Crm>().unwrap();
    assert_eq!(crm.configuration.api_key, "from-secret");
    assert_eq!(crm.configuration.region, None);
}

#[tokio::test]
async fn test_cycle_is_fatal() {
    let mut engine = Engine::new(configuration("").await, registry());

    match engine.load(names(&["test.cycle_a"])).await.unwrap_err() {
        EngineError::Dependency(errors) => assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec![
                    "test.cycle_a".to_string(),
                    "test.cycle_b".to_string(),
                    "test.cycle_a".to_string()
                ]
            }]
        ),
        other => panic!("unexpected error: {}", other),
    }
    assert!(engine.load_order().is_empty());
}

#[tokio::test]
async fn test_unknown_and_disabled_modules_are_fatal() {
    let mut engine = Engine::new(
        configuration("modules:\n  test.base:\n    enabled: false\n").await,
        registry(),
    );

    assert!(matches!(
        engine.load(names(&["nope"])).await,
        Err(EngineError::UnknownModule { name }) if name == "nope"
    ));
    assert!(matches!(
        engine.load(names(&["test.left"])).await,
        Err(EngineError::ModuleDisabled { name }) if name == "test.base"
    ));
    assert!(engine.load_order().is_empty());
}

#[tokio::test]
async fn test_default_load_follows_enabled_modules() {
    let mut engine = Engine::new(
        configuration(
            "modules:\n  test.right:\n    enabled: true\n  test.left:\n    enabled: true\n  test.top:\n    enabled: false\n",
        )
        .await,
        registry(),
    );
    engine.load(None).await.unwrap();

    assert_eq!(
        engine.load_order(),
        vec![CORE_ONTOLOGY_MODULE, "test.base", "test.right", "test.left"]
    );
    assert!(!engine.is_loaded("test.top"));

    let store = engine.services().triple_store().unwrap();
    assert_eq!(store.schema("loom-core").await.unwrap().name, "loom-core");
    assert!(engine.module_as::<CoreOntologyModule>().is_some());
}

#[tokio::test]
async fn test_ontology_failure_does_not_block_other_ontologies() {
    let store = Arc::new(TripleStoreService::new(Arc::new(
        RejectingTripleStoreAdapter::new(&["charted-bad"]),
    )));
    let mut services = ServiceRegistry::new();
    services.insert(Service::TripleStore(store.clone()));

    let mut engine = Engine::with_services(configuration("").await, registry(), services);
    engine
        .load(names(&["test.charted", CORE_ONTOLOGY_MODULE]))
        .await
        .unwrap();

    assert!(matches!(
        store.schema("charted-bad").await,
        Err(PortError::NotFound { .. })
    ));
    assert!(store.schema("charted-good").await.is_ok());
    assert!(store.schema("loom-core").await.is_ok());
    assert!(Arc::ptr_eq(engine.services().triple_store().unwrap(), &store));

    // a second engine over the same store sees unchanged content
    assert_eq!(
        store
            .load_schema("charted-good", "@prefix good: <http://good/> .")
            .await
            .unwrap(),
        SchemaLoad::Unchanged
    );
}

#[tokio::test]
async fn test_triple_store_over_object_storage_builds_storage_first() {
    let configuration = parse_configuration(
        r#"
services:
  secret:
    adapters:
      - adapter: env
  object_storage:
    adapter: memory
  triple_store:
    adapter: object_storage
    config:
      triples_prefix: graph
"#,
        "test",
    )
    .await
    .unwrap();

    let mut engine = Engine::new(configuration, registry());
    engine.load(names(&[CORE_ONTOLOGY_MODULE])).await.unwrap();

    assert_eq!(
        engine.services().kinds(),
        vec![
            ServiceKind::Secret,
            ServiceKind::ObjectStorage,
            ServiceKind::TripleStore
        ]
    );
    let storage = engine.services().object_storage().unwrap();
    assert!(!storage.list_objects("graph", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unload_runs_hooks_in_reverse_order() {
    let mut engine = Engine::new(configuration("").await, registry());
    engine.load(names(&["test.top"])).await.unwrap();
    let store = engine.services().key_value().unwrap().clone();

    engine.unload().await.unwrap();

    assert!(engine.load_order().is_empty());
    assert!(engine.module("test.base").is_none());
    assert_eq!(
        store.get(UNLOAD_LOG).await.unwrap(),
        b"test.top,test.right,test.left,test.base".to_vec()
    );
}

#[tokio::test]
async fn test_triple_store_publishes_on_bus_once_wired() {
    let mut engine = Engine::new(configuration("").await, registry());

    engine.load(names(&[CORE_ONTOLOGY_MODULE])).await.unwrap();
    let store = engine.services().triple_store().unwrap().clone();
    assert!(!store.services_wired());
    assert!(!engine.services().contains(ServiceKind::Bus));

    engine.load(names(&["test.watcher"])).await.unwrap();
    assert!(engine.services_wired("test.watcher"));
    assert!(store.services_wired());
    assert!(Arc::ptr_eq(engine.services().triple_store().unwrap(), &store));

    let mut changes = store
        .subscribe(&TriplePattern::any().subject("ex:alice"), Some(TripleEvent::Insert))
        .await
        .unwrap();
    let triple = Triple::new("ex:alice", "rdf:type", "ex:Person");
    store.insert(std::slice::from_ref(&triple)).await.unwrap();

    let received: Triple = serde_json::from_slice(&changes.recv().await.unwrap()).unwrap();
    assert_eq!(received, triple);
}

#[tokio::test]
async fn test_prebuilt_services_are_wired() {
    let mut services = ServiceRegistry::new();
    services.insert(Service::TripleStore(Arc::new(TripleStoreService::new(Arc::new(
        crate::backends::triple_store::MemoryTripleStoreAdapter::new(),
    )))));
    services.insert(Service::Bus(Arc::new(crate::services::BusService::new(Arc::new(
        crate::backends::bus::MemoryBusAdapter::new(8).unwrap(),
    )))));

    let engine = Engine::with_services(configuration("").await, registry(), services);

    assert!(engine.services().triple_store().unwrap().services_wired());
}

#[tokio::test]
async fn test_initialization_failure_names_module() {
    let mut engine = Engine::new(configuration("").await, registry());

    let err = engine.load(names(&["test.faulty"])).await.unwrap_err();

    match err {
        EngineError::Module { module, hook, source } => {
            assert_eq!(module, "test.faulty");
            assert_eq!(hook, "on_initialized");
            assert!(matches!(*source, EngineError::Port(PortError::Invalid(_))));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(engine.load_order(), vec!["test.base"]);
    assert!(!engine.is_loaded("test.faulty"));
}
