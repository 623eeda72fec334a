//! Factory Method: the creator's business logic is fixed, subclasses decide
//! which product it works with.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use tracing::debug;

use crate::application::Application;
use crate::error::Result;
use crate::menu::Menu;
use crate::registry::Registry;
use crate::session::Session;

// ============================================================================
// Products
// ============================================================================

pub trait Transport {
    fn deliver(&self, out: &mut dyn Write) -> io::Result<()>;
}

pub struct Truck;

impl Transport for Truck {
    fn deliver(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Delivering cargo by land ...")
    }
}

pub struct Ship;

impl Transport for Ship {
    fn deliver(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Delivering cargo by sea ...")
    }
}

// ============================================================================
// Creators
// ============================================================================

pub trait Logistics {
    fn name(&self) -> &'static str;

    /// The factory method.
    fn create_transport(&self) -> Box<dyn Transport>;

    fn plan_delivery(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{} app is planning the delivery", self.name())?;
        let transport = self.create_transport();
        transport.deliver(out)?;
        writeln!(out, "Cargo delivered.")
    }

    fn exit(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Exiting {} app.", self.name())
    }
}

pub struct RoadLogistics;

impl Logistics for RoadLogistics {
    fn name(&self) -> &'static str {
        "RoadLogistics"
    }

    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Truck)
    }
}

pub struct SeaLogistics;

impl Logistics for SeaLogistics {
    fn name(&self) -> &'static str {
        "SeaLogistics"
    }

    fn create_transport(&self) -> Box<dyn Transport> {
        Box::new(Ship)
    }
}

type CreatorFn = fn() -> Box<dyn Logistics>;

fn road() -> Box<dyn Logistics> {
    Box::new(RoadLogistics)
}

fn sea() -> Box<dyn Logistics> {
    Box::new(SeaLogistics)
}

pub fn creators() -> Result<Registry<CreatorFn>> {
    Registry::new([("land", road as CreatorFn), ("sea", sea as CreatorFn)])
}

// ============================================================================
// Demo
// ============================================================================

pub struct FactoryMethodApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(FactoryMethodApplication)
}

impl fmt::Display for FactoryMethodApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Factory Method")
    }
}

impl Application for FactoryMethodApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let creators = creators()?;
        let cache_creators = session.settings().cache_creators;
        let mut warm: BTreeMap<&'static str, Box<dyn Logistics>> = BTreeMap::new();

        let outcome = Menu::new(&creators, "Deliver by?")
            .on_miss(|input| format!("Unknown delivery method: {input}"))
            .run(session, |session, key, create| {
                if !cache_creators {
                    let logistics = create();
                    let delivered = logistics.plan_delivery(session);
                    logistics.exit(session)?;
                    return Ok(delivered?);
                }

                let logistics = warm.entry(key).or_insert_with(|| {
                    debug!(key, "warming creator");
                    create()
                });
                logistics.plan_delivery(session)?;
                Ok(())
            });

        for logistics in warm.values() {
            logistics.exit(session)?;
        }
        outcome
    }
}
