//! Structural patterns: how objects are composed into larger structures.

pub mod adapter;
pub mod decorator;
pub mod facade;

use crate::application::{AppFactory, Application, PatternSet};
use crate::error::Result;
use crate::registry::Registry;

pub fn patterns() -> Result<Registry<AppFactory>> {
    Registry::new([
        ("adapter", adapter::application as AppFactory),
        ("decorator", decorator::application as AppFactory),
        ("facade", facade::application as AppFactory),
    ])
}

pub fn package() -> Box<dyn Application> {
    Box::new(PatternSet::new("Structural patterns", patterns))
}
