use std::fmt;

use crate::error::Result;
use crate::menu::launch;
use crate::registry::Registry;
use crate::session::Session;
use crate::{behavioral, creational, structural};

/// Anything the menus can start.
pub trait Application: fmt::Display {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()>;
}

pub type AppFactory = fn() -> Box<dyn Application>;

/// A category of patterns, itself an application running a menu over its members.
pub struct PatternSet {
    name: &'static str,
    patterns: fn() -> Result<Registry<AppFactory>>,
}

impl PatternSet {
    pub fn new(name: &'static str, patterns: fn() -> Result<Registry<AppFactory>>) -> Self {
        Self { name, patterns }
    }

    pub fn patterns(&self) -> Result<Registry<AppFactory>> {
        (self.patterns)()
    }
}

impl fmt::Display for PatternSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Application for PatternSet {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let registry = self.patterns()?;
        launch(session, &registry, "What pattern?", |input| {
            format!("Pattern {input} not found.")
        })
    }
}

pub fn categories() -> Result<Registry<AppFactory>> {
    Registry::new([
        ("creational", creational::package as AppFactory),
        ("behavioral", behavioral::package as AppFactory),
        ("structural", structural::package as AppFactory),
    ])
}

/// The outermost menu: pick a category until a selection matches nothing.
pub fn run(session: &mut Session<'_>) -> Result<()> {
    let categories = categories()?;
    launch(session, &categories, "Which type?", |input| {
        format!("Type {input} not found. Finishing software.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::session::transcript;

    #[test]
    fn test_categories() {
        let registry = categories().unwrap();
        assert_eq!(registry.options(), "creational, behavioral, structural");
    }

    #[test]
    fn test_every_package_builds_its_registry() {
        let packages = [
            creational::package,
            behavioral::package,
            structural::package,
        ];
        for package in packages {
            let set = package();
            assert!(!set.to_string().is_empty());
        }
        assert_eq!(
            creational::patterns().unwrap().options(),
            "abstract_factory, factory_method, builder, singleton"
        );
        assert_eq!(
            structural::patterns().unwrap().options(),
            "adapter, decorator, facade"
        );
        assert_eq!(
            behavioral::patterns().unwrap().options(),
            "strategy, observer, command"
        );
    }

    #[test]
    fn test_unknown_type_finishes() {
        let text = transcript("quantum\n", Settings::default(), run);
        let prompt = "Which type? (creational, behavioral, structural): ";
        assert!(text.starts_with(prompt));
        assert!(text.contains("Type quantum not found. Finishing software."));
    }

    #[test]
    fn test_nested_levels_unwind_one_at_a_time() {
        // "sea" runs inside factory_method, "air" leaves it, "nope" leaves creational,
        // "cre" re-enters creational by substring, "xyz" leaves it, "" ends the program
        let input = "creational\nfactory\nsea\nair\nnope\ncre\nxyz\n\n";
        let text = transcript(input, Settings::default(), run);

        assert!(text.contains("Initializing Creational patterns."));
        assert!(text.contains("Initializing Factory Method."));
        assert!(text.contains("Delivering cargo by sea ..."));
        assert!(text.contains("Unknown delivery method: air"));
        assert!(text.contains("Exiting Factory Method."));
        assert!(text.contains("Pattern nope not found."));
        assert!(text.contains("Pattern xyz not found."));
        assert_eq!(text.matches("Exiting Creational patterns.").count(), 2);
        assert!(text.contains("Type  not found. Finishing software."));
    }
}
