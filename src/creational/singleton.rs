//! Singleton: one instance per type, reachable from anywhere.
//!
//! Instances live in an explicit registry keyed by `TypeId` instead of being
//! intercepted at construction, so tests can clear it between runs. The flawed
//! variant keeps the instance identity but reinitializes it on every request,
//! which only a check on state (not just identity) catches.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use colored::Colorize;
use lazy_static::lazy_static;
use thiserror::Error;
use tracing::debug;

use crate::application::Application;
use crate::error::Result;
use crate::session::Session;

pub type Handle<T> = Arc<Mutex<T>>;

/// How a type builds its one instance.
pub trait Initialize: Send + 'static {
    fn initialize() -> Self;
}

/// A field the verification routine can mutate and read back.
pub trait Marked {
    fn marker(&self) -> &str;
    fn set_marker(&mut self, marker: &str);
}

/// Locks a handle, recovering the data if a previous holder panicked.
pub fn lock<T>(handle: &Mutex<T>) -> MutexGuard<'_, T> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Registry
// ============================================================================

type Stored = Arc<dyn Any + Send + Sync>;

fn downcast<T: Initialize>(stored: &Stored) -> Option<Handle<T>> {
    Arc::clone(stored).downcast::<Mutex<T>>().ok()
}

#[derive(Default)]
pub struct SingletonRegistry {
    instances: Mutex<HashMap<TypeId, Stored>>,
}

lazy_static! {
    static ref GLOBAL: SingletonRegistry = SingletonRegistry::new();
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static SingletonRegistry {
        &GLOBAL
    }

    fn existing<T: Initialize>(&self) -> Option<Handle<T>> {
        lock(&self.instances).get(&TypeId::of::<T>()).and_then(downcast::<T>)
    }

    /// Returns the cached instance of `T`, creating it on first request.
    pub fn get_or_init<T: Initialize>(&self) -> Handle<T> {
        let mut instances = lock(&self.instances);
        let key = TypeId::of::<T>();
        if let Some(handle) = instances.get(&key).and_then(downcast::<T>) {
            return handle;
        }
        debug!(instance = std::any::type_name::<T>(), "creating singleton");
        let handle: Handle<T> = Arc::new(Mutex::new(T::initialize()));
        instances.insert(key, handle.clone());
        handle
    }

    /// Keeps the cached identity of `T` but runs its initializer again,
    /// discarding whatever state the instance had.
    pub fn get_and_reinit<T: Initialize>(&self) -> Handle<T> {
        match self.existing::<T>() {
            Some(handle) => {
                debug!(instance = std::any::type_name::<T>(), "reinitializing singleton");
                *lock(&handle) = T::initialize();
                handle
            }
            None => self.get_or_init::<T>(),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.instances).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every instance. Handles already given out stay valid but are no
    /// longer returned by later requests.
    pub fn reset(&self) {
        lock(&self.instances).clear();
    }
}

// ============================================================================
// Instances
// ============================================================================

/// Classic approach: there is always exactly one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Singleton {
    pub a: String,
    pub b: String,
}

impl Initialize for Singleton {
    fn initialize() -> Self {
        Self {
            a: "a".to_string(),
            b: "b".to_string(),
        }
    }
}

impl Singleton {
    pub fn instance(registry: &SingletonRegistry) -> Handle<Self> {
        registry.get_or_init()
    }
}

/// Same identity on every request, but the fields are reset each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlawedSingleton1 {
    pub a: String,
    pub b: String,
}

impl Initialize for FlawedSingleton1 {
    fn initialize() -> Self {
        Self {
            a: "a".to_string(),
            b: "b".to_string(),
        }
    }
}

impl FlawedSingleton1 {
    pub fn instance(registry: &SingletonRegistry) -> Handle<Self> {
        registry.get_and_reinit()
    }
}

/// Object pool of size one: a shared global instance is available, yet callers
/// may still build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyManager {
    pub a: String,
    pub b: String,
}

impl Initialize for DependencyManager {
    fn initialize() -> Self {
        Self::new()
    }
}

impl DependencyManager {
    pub fn new() -> Self {
        Self {
            a: "a".to_string(),
            b: "b".to_string(),
        }
    }

    pub fn global_instance() -> Handle<Self> {
        SingletonRegistry::global().get_or_init()
    }
}

impl Default for DependencyManager {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! marked_by_a {
    ($($ty:ty),*) => {
        $(impl Marked for $ty {
            fn marker(&self) -> &str {
                &self.a
            }

            fn set_marker(&mut self, marker: &str) {
                self.a = marker.to_string();
            }
        })*
    };
}

marked_by_a!(Singleton, FlawedSingleton1, DependencyManager);

// ============================================================================
// Verification
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SingletonViolation {
    #[error("two construction calls returned different instances")]
    DistinctInstances,

    #[error("a change made through one handle was not visible through another")]
    MutationHidden,

    #[error("a later construction call reset the state ('{expected}' became '{found}')")]
    StateReset { expected: String, found: String },
}

const PROBE: &str = "1";

/// Checks identity, shared mutation and state stability for a construction entry point.
pub fn verify_singleton<T, F>(construct: F) -> Result<(), SingletonViolation>
where
    T: Marked,
    F: Fn() -> Handle<T>,
{
    let first = construct();
    let second = construct();
    if !Arc::ptr_eq(&first, &second) {
        return Err(SingletonViolation::DistinctInstances);
    }

    lock(&first).set_marker(PROBE);
    if lock(&second).marker() != PROBE {
        return Err(SingletonViolation::MutationHidden);
    }

    let third = construct();
    if !Arc::ptr_eq(&first, &third) {
        return Err(SingletonViolation::DistinctInstances);
    }
    let found = lock(&third).marker().to_string();
    if found != PROBE {
        return Err(SingletonViolation::StateReset {
            expected: PROBE.to_string(),
            found,
        });
    }
    Ok(())
}

// ============================================================================
// Demo
// ============================================================================

struct Scenario {
    name: &'static str,
    expect_single: bool,
    check: fn(&SingletonRegistry) -> Result<(), SingletonViolation>,
}

const SCENARIOS: [Scenario; 4] = [
    Scenario {
        name: "Singleton",
        expect_single: true,
        check: |registry| verify_singleton(|| Singleton::instance(registry)),
    },
    Scenario {
        name: "DependencyManager::global_instance",
        expect_single: true,
        check: |_| verify_singleton(DependencyManager::global_instance),
    },
    Scenario {
        name: "FlawedSingleton1",
        expect_single: false,
        check: |registry| verify_singleton(|| FlawedSingleton1::instance(registry)),
    },
    Scenario {
        name: "DependencyManager::new",
        expect_single: false,
        check: |_| verify_singleton(|| Arc::new(Mutex::new(DependencyManager::new()))),
    },
];

pub struct SingletonApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(SingletonApplication)
}

impl fmt::Display for SingletonApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Singleton")
    }
}

impl Application for SingletonApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let registry = SingletonRegistry::global();
        for scenario in &SCENARIOS {
            registry.reset();
            let outcome = (scenario.check)(registry);
            debug!(scenario = scenario.name, instances = registry.len(), "scenario checked");
            let verdict = match &outcome {
                Ok(()) => "single instance".green(),
                Err(violation) => violation.to_string().red(),
            };
            let expectation = if outcome.is_ok() == scenario.expect_single {
                "as expected"
            } else {
                "UNEXPECTED"
            };
            writeln!(session, "{}: {verdict} ({expectation})", scenario.name)?;
        }
        registry.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::session::transcript;

    // tests that touch the global registry must not interleave
    static GLOBAL_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_same_instance() {
        let registry = SingletonRegistry::new();
        let s1 = Singleton::instance(&registry);
        let s2 = Singleton::instance(&registry);
        assert!(Arc::ptr_eq(&s1, &s2));

        lock(&s1).a = "1".to_string();
        assert_eq!(lock(&s2).a, "1");
        assert_eq!(lock(&Singleton::instance(&registry)).a, "1");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_types_get_separate_instances() {
        let registry = SingletonRegistry::new();
        let _ = Singleton::instance(&registry);
        let _ = registry.get_or_init::<DependencyManager>();
        assert!(registry.existing::<Singleton>().is_some());
        assert!(registry.existing::<DependencyManager>().is_some());
        assert!(registry.existing::<FlawedSingleton1>().is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_reset_forgets_instances() {
        let registry = SingletonRegistry::new();
        let before = Singleton::instance(&registry);
        lock(&before).a = "changed".to_string();

        registry.reset();
        assert!(registry.is_empty());

        let after = Singleton::instance(&registry);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(lock(&after).a, "a");
    }

    #[test]
    fn test_flawed_keeps_identity_but_resets_state() {
        let registry = SingletonRegistry::new();
        let f1 = FlawedSingleton1::instance(&registry);
        lock(&f1).a = "1".to_string();

        let f2 = FlawedSingleton1::instance(&registry);
        assert!(Arc::ptr_eq(&f1, &f2));
        assert_eq!(lock(&f1).a, "a");
    }

    #[test]
    fn test_verification_outcomes() {
        let registry = SingletonRegistry::new();
        assert_eq!(verify_singleton(|| Singleton::instance(&registry)), Ok(()));
        assert_eq!(
            verify_singleton(|| FlawedSingleton1::instance(&registry)),
            Err(SingletonViolation::StateReset {
                expected: "1".to_string(),
                found: "a".to_string(),
            })
        );
        assert_eq!(
            verify_singleton(|| Arc::new(Mutex::new(DependencyManager::new()))),
            Err(SingletonViolation::DistinctInstances)
        );
    }

    #[test]
    fn test_global_instance_is_shared() {
        let _guard = lock(&GLOBAL_GUARD);
        SingletonRegistry::global().reset();

        let m1 = DependencyManager::global_instance();
        let m2 = DependencyManager::global_instance();
        assert!(Arc::ptr_eq(&m1, &m2));
        assert_ne!(
            Arc::as_ptr(&m1),
            Arc::as_ptr(&Arc::new(Mutex::new(DependencyManager::new())))
        );
        SingletonRegistry::global().reset();
    }

    #[test]
    fn test_demo_reports_every_scenario() {
        let _guard = lock(&GLOBAL_GUARD);
        let text = transcript("", Settings::default(), |session| {
            SingletonApplication.main(session)
        });

        assert!(text.contains("Singleton: "));
        assert!(text.contains("single instance"));
        assert!(text.contains("a later construction call reset the state ('1' became 'a')"));
        assert!(text.contains("two construction calls returned different instances"));
        assert_eq!(text.matches("(as expected)").count(), 4);
        assert!(!text.contains("UNEXPECTED"));
        assert!(SingletonRegistry::global().is_empty());
    }
}
