//! Abstract Factory: produce families of related objects without naming their
//! concrete types.

use std::fmt;
use std::io::{self, Write};

use crate::application::Application;
use crate::error::Result;
use crate::menu::Menu;
use crate::registry::Registry;
use crate::session::Session;

// ============================================================================
// Products
// ============================================================================

pub trait Chair {
    fn kind(&self) -> &'static str;
    fn has_legs(&self) -> bool;

    fn sit_on(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Sitting on a {}.", self.kind())
    }
}

pub trait Sofa {
    fn kind(&self) -> &'static str;
    fn lie_on(&self, out: &mut dyn Write) -> io::Result<()>;

    fn sit_on(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Sitting on a {}.", self.kind())
    }
}

pub struct VictorianChair;

impl Chair for VictorianChair {
    fn kind(&self) -> &'static str {
        "VictorianChair"
    }

    fn has_legs(&self) -> bool {
        true
    }
}

pub struct ModernChair;

impl Chair for ModernChair {
    fn kind(&self) -> &'static str {
        "ModernChair"
    }

    fn has_legs(&self) -> bool {
        false
    }

    fn sit_on(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Sitting on a {}.", self.kind())?;
        writeln!(out, "Wow! I am flying!")
    }
}

pub struct VictorianSofa;

impl Sofa for VictorianSofa {
    fn kind(&self) -> &'static str {
        "VictorianSofa"
    }

    fn lie_on(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Lying on a pretty sofa!")
    }
}

pub struct ModernSofa;

impl Sofa for ModernSofa {
    fn kind(&self) -> &'static str {
        "ModernSofa"
    }

    fn lie_on(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Lying on a carpet!")
    }

    fn sit_on(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Sitting on a {}.", self.kind())?;
        writeln!(out, "Wow! I am flying!")
    }
}

// ============================================================================
// Factories
// ============================================================================

/// A chair and sofa that always come from the same family.
pub struct FurnitureSet {
    pub chair: Box<dyn Chair>,
    pub sofa: Box<dyn Sofa>,
}

pub trait FurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair>;
    fn create_sofa(&self) -> Box<dyn Sofa>;

    fn build(&self, out: &mut dyn Write) -> io::Result<FurnitureSet> {
        let set = FurnitureSet {
            chair: self.create_chair(),
            sofa: self.create_sofa(),
        };
        writeln!(
            out,
            "Building furniture: {} and {}",
            set.chair.kind(),
            set.sofa.kind()
        )?;
        Ok(set)
    }
}

pub struct VictorianFurnitureFactory;

impl FurnitureFactory for VictorianFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(VictorianChair)
    }

    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(VictorianSofa)
    }
}

pub struct ModernFurnitureFactory;

impl FurnitureFactory for ModernFurnitureFactory {
    fn create_chair(&self) -> Box<dyn Chair> {
        Box::new(ModernChair)
    }

    fn create_sofa(&self) -> Box<dyn Sofa> {
        Box::new(ModernSofa)
    }
}

type FactoryFn = fn() -> Box<dyn FurnitureFactory>;

fn victorian() -> Box<dyn FurnitureFactory> {
    Box::new(VictorianFurnitureFactory)
}

fn modern() -> Box<dyn FurnitureFactory> {
    Box::new(ModernFurnitureFactory)
}

pub fn factories() -> Result<Registry<FactoryFn>> {
    Registry::new([
        ("victorian", victorian as FactoryFn),
        ("modern", modern as FactoryFn),
    ])
}

// ============================================================================
// Demo
// ============================================================================

pub struct AbstractFactoryApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(AbstractFactoryApplication)
}

impl fmt::Display for AbstractFactoryApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Abstract Factory")
    }
}

impl Application for AbstractFactoryApplication {
    /// The client picks a factory once and then works only with the abstract
    /// product traits it hands back.
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let factories = factories()?;
        Menu::new(&factories, "What category of furniture?")
            .on_miss(|input| format!("Unknown furniture family: {input}"))
            .run(session, |session, _, factory| {
                writeln!(session)?;
                let set = factory().build(session)?;
                set.chair.sit_on(session)?;
                set.sofa.lie_on(session)?;
                let legs = if set.chair.has_legs() { "has" } else { "has no" };
                writeln!(session, "The {} {legs} legs.", set.chair.kind())?;
                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::session::transcript;

    #[test]
    fn test_families_stay_matched() {
        let mut out = Vec::new();
        let victorian = VictorianFurnitureFactory.build(&mut out).unwrap();
        assert_eq!(victorian.chair.kind(), "VictorianChair");
        assert_eq!(victorian.sofa.kind(), "VictorianSofa");
        assert!(victorian.chair.has_legs());

        let modern = ModernFurnitureFactory.build(&mut out).unwrap();
        assert_eq!(modern.chair.kind(), "ModernChair");
        assert_eq!(modern.sofa.kind(), "ModernSofa");
        assert!(!modern.chair.has_legs());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Building furniture: VictorianChair and VictorianSofa\n\
             Building furniture: ModernChair and ModernSofa\n"
        );
    }

    #[test]
    fn test_modern_furniture_floats() {
        let mut out = Vec::new();
        ModernChair.sit_on(&mut out).unwrap();
        VictorianChair.sit_on(&mut out).unwrap();
        ModernSofa.sit_on(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Wow! I am flying!").count(), 2);
        assert!(text.contains("Sitting on a VictorianChair."));
    }

    #[test]
    fn test_demo_session() {
        let text = transcript("modern\nvictorian\ngothic\n", Settings::default(), |session| {
            AbstractFactoryApplication.main(session)
        });
        assert!(text.contains("(victorian, modern)"));
        assert!(text.contains("Building furniture: ModernChair and ModernSofa"));
        assert!(text.contains("Lying on a carpet!"));
        assert!(text.contains("Building furniture: VictorianChair and VictorianSofa"));
        assert!(text.contains("Lying on a pretty sofa!"));
        assert!(text.contains("The VictorianChair has legs."));
        assert!(text.contains("Unknown furniture family: gothic"));
    }

    #[test]
    fn test_family_names_match_exactly() {
        let text = transcript("mod\nmodern\n", Settings::default(), |session| {
            AbstractFactoryApplication.main(session)
        });
        assert!(text.contains("Unknown furniture family: mod"));
        assert!(!text.contains("Building furniture"));
    }
}
