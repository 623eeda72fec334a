//! Creational patterns: how objects get made.

pub mod abstract_factory;
pub mod builder;
pub mod factory_method;
pub mod singleton;

use crate::application::{AppFactory, Application, PatternSet};
use crate::error::Result;
use crate::registry::Registry;

pub fn patterns() -> Result<Registry<AppFactory>> {
    Registry::new([
        ("abstract_factory", abstract_factory::application as AppFactory),
        ("factory_method", factory_method::application as AppFactory),
        ("builder", builder::application as AppFactory),
        ("singleton", singleton::application as AppFactory),
    ])
}

pub fn package() -> Box<dyn Application> {
    Box::new(PatternSet::new("Creational patterns", patterns))
}
