//! Behavioral patterns: how objects share responsibilities and talk to each other.

pub mod command;
pub mod observer;
pub mod strategy;

use crate::application::{AppFactory, Application, PatternSet};
use crate::error::Result;
use crate::registry::Registry;

pub fn patterns() -> Result<Registry<AppFactory>> {
    Registry::new([
        ("strategy", strategy::application as AppFactory),
        ("observer", observer::application as AppFactory),
        ("command", command::application as AppFactory),
    ])
}

pub fn package() -> Box<dyn Application> {
    Box::new(PatternSet::new("Behavioral patterns", patterns))
}
