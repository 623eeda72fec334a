//! Builder: construct complex objects step by step, reusing the same
//! construction sequence for different products.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::mem;

use crate::application::Application;
use crate::error::Result;
use crate::menu::Menu;
use crate::registry::Registry;
use crate::session::Session;

/// A built part. The demo only cares whether a part is present, the text says what it is.
pub type Part = &'static str;

pub trait Builder {
    fn reset(&mut self, out: &mut dyn Write) -> io::Result<()>;
    fn build_base(&mut self, out: &mut dyn Write) -> io::Result<()>;
    fn build_defenses(&mut self, out: &mut dyn Write) -> io::Result<()>;
    fn build_doors(&mut self, out: &mut dyn Write) -> io::Result<()>;
    fn build_top(&mut self, out: &mut dyn Write) -> io::Result<()>;
    /// Only called for fancy products.
    fn build_extra(&mut self, out: &mut dyn Write) -> io::Result<()>;
}

// ============================================================================
// House
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct House {
    pub foundation: Option<Part>,
    pub walls: Option<Part>,
    pub windows: Option<Part>,
    pub doors: Option<Part>,
    pub roof: Option<Part>,
    pub garage: Option<Part>,
    pub swimming_pool: Option<Part>,
}

impl House {
    pub fn is_fancy(&self) -> bool {
        self.garage.is_some() && self.swimming_pool.is_some()
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_fancy() { "FancyHouse" } else { "SimpleHouse" })
    }
}

pub struct HouseBuilder {
    params: BTreeMap<&'static str, String>,
    house: House,
}

impl HouseBuilder {
    pub fn new(params: BTreeMap<&'static str, String>) -> Self {
        Self {
            params,
            house: House::default(),
        }
    }

    /// Hands over the finished house and starts over with an empty one.
    pub fn get_house(&mut self, out: &mut dyn Write) -> io::Result<House> {
        writeln!(out, "Delivering {}.", self.house)?;
        Ok(mem::take(&mut self.house))
    }
}

impl Builder for HouseBuilder {
    fn reset(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.house = House::default();
        let params = &self.params;
        writeln!(out, "Start building a house. House params are: {params:?}.")
    }

    fn build_base(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.house.foundation = Some("concrete slab");
        writeln!(out, "Foundation was built.")
    }

    fn build_defenses(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.house.walls = Some("brick walls");
        self.house.windows = Some("double glazing");
        writeln!(out, "Walls and windows were built.")
    }

    fn build_doors(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.house.doors = Some("oak doors");
        writeln!(out, "Doors were built.")
    }

    fn build_top(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.house.roof = Some("tiled roof");
        writeln!(out, "Roof was built.")
    }

    fn build_extra(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.house.swimming_pool = Some("swimming pool");
        writeln!(out, "Swimming pool was built.")?;
        self.house.garage = Some("double garage");
        writeln!(out, "Garage was built.")
    }
}

// ============================================================================
// Car
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Car {
    pub chassis: Option<Part>,
    pub wheels: Option<Part>,
    pub bodywork: Option<Part>,
    pub doors: Option<Part>,
    pub cover: Option<Part>,
    pub air_conditioner: Option<Part>,
    pub hydraulics: Option<Part>,
}

impl Car {
    pub fn is_fancy(&self) -> bool {
        self.air_conditioner.is_some() && self.hydraulics.is_some()
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_fancy() { "FancyCar" } else { "SimpleCar" })
    }
}

pub struct CarBuilder {
    params: BTreeMap<&'static str, String>,
    car: Car,
}

impl CarBuilder {
    pub fn new(params: BTreeMap<&'static str, String>) -> Self {
        Self {
            params,
            car: Car::default(),
        }
    }

    pub fn get_car(&mut self, out: &mut dyn Write) -> io::Result<Car> {
        writeln!(out, "Delivering {}.", self.car)?;
        Ok(mem::take(&mut self.car))
    }
}

impl Builder for CarBuilder {
    fn reset(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.car = Car::default();
        writeln!(out, "Start building a car. Car params are: {:?}.", self.params)
    }

    fn build_base(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.car.chassis = Some("steel chassis");
        writeln!(out, "Chassis built.")?;
        self.car.wheels = Some("alloy wheels");
        writeln!(out, "Wheels placed.")
    }

    fn build_defenses(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.car.bodywork = Some("painted bodywork");
        writeln!(out, "Bodywork fitted.")
    }

    fn build_doors(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.car.doors = Some("four doors");
        writeln!(out, "Doors built and placed.")
    }

    fn build_top(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.car.cover = Some("hard top");
        writeln!(out, "Roof built and placed.")
    }

    fn build_extra(&mut self, out: &mut dyn Write) -> io::Result<()> {
        self.car.air_conditioner = Some("air conditioner");
        writeln!(out, "Air conditioner built and placed.")?;
        self.car.hydraulics = Some("hydraulic suspension");
        writeln!(out, "Hydraulics built.")
    }
}

// ============================================================================
// Director
// ============================================================================

/// Owns the order of construction steps, whatever builder is plugged in.
pub struct Director<'b> {
    builder: &'b mut dyn Builder,
}

impl<'b> Director<'b> {
    pub fn new(builder: &'b mut dyn Builder) -> Self {
        Self { builder }
    }

    pub fn change_builder(&mut self, builder: &'b mut dyn Builder) {
        self.builder = builder;
    }

    pub fn make(&mut self, fancy: bool, out: &mut dyn Write) -> io::Result<()> {
        self.builder.reset(out)?;
        self.builder.build_base(out)?;
        self.builder.build_defenses(out)?;
        self.builder.build_doors(out)?;
        self.builder.build_top(out)?;
        if fancy {
            self.builder.build_extra(out)?;
        }
        Ok(())
    }
}

// ============================================================================
// Demo
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Car,
    House,
}

pub fn products() -> Result<Registry<Product>> {
    Registry::new([("car", Product::Car), ("house", Product::House)])
}

/// Anything starting with `y` means yes; the default is no.
pub fn parse_fancy(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

pub struct BuilderApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(BuilderApplication)
}

impl fmt::Display for BuilderApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Builder")
    }
}

fn instruct(session: &mut Session<'_>, builder: &mut dyn Builder) -> Result<()> {
    let fancy = session
        .prompt("Fancy? (y/N) ")?
        .is_some_and(|answer| parse_fancy(&answer));
    writeln!(session)?;
    Director::new(builder).make(fancy, session)?;
    Ok(())
}

impl Application for BuilderApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let products = products()?;
        Menu::new(&products, "Want to build what?")
            .on_miss(|input| format!("Unknown product: {input}"))
            .run(session, |session, _, product| {
                writeln!(session)?;
                match product {
                    Product::Car => {
                        let params = BTreeMap::from([("wheels", "4".to_string())]);
                        let mut builder = CarBuilder::new(params);
                        instruct(session, &mut builder)?;
                        builder.get_car(session)?;
                    }
                    Product::House => {
                        let params = BTreeMap::from([("color", "yellow".to_string())]);
                        let mut builder = HouseBuilder::new(params);
                        instruct(session, &mut builder)?;
                        builder.get_house(session)?;
                    }
                }
                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::session::transcript;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Reset,
        Base,
        Defenses,
        Doors,
        Top,
        Extra,
    }

    #[derive(Default)]
    struct RecordingBuilder {
        steps: Vec<Step>,
    }

    impl Builder for RecordingBuilder {
        fn reset(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.steps.push(Step::Reset);
            Ok(())
        }

        fn build_base(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.steps.push(Step::Base);
            Ok(())
        }

        fn build_defenses(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.steps.push(Step::Defenses);
            Ok(())
        }

        fn build_doors(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.steps.push(Step::Doors);
            Ok(())
        }

        fn build_top(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.steps.push(Step::Top);
            Ok(())
        }

        fn build_extra(&mut self, _out: &mut dyn Write) -> io::Result<()> {
            self.steps.push(Step::Extra);
            Ok(())
        }
    }

    const PLAIN: [Step; 5] = [Step::Reset, Step::Base, Step::Defenses, Step::Doors, Step::Top];

    #[test]
    fn test_director_sequence() {
        for fancy in [false, true] {
            let mut builder = RecordingBuilder::default();
            Director::new(&mut builder).make(fancy, &mut io::sink()).unwrap();

            let mut expected = PLAIN.to_vec();
            if fancy {
                expected.push(Step::Extra);
            }
            assert_eq!(builder.steps, expected);
        }
    }

    #[test]
    fn test_director_swaps_builders() {
        let mut first = RecordingBuilder::default();
        let mut second = RecordingBuilder::default();
        {
            let mut director = Director::new(&mut first);
            director.make(false, &mut io::sink()).unwrap();
            director.change_builder(&mut second);
            director.make(true, &mut io::sink()).unwrap();
        }
        assert_eq!(first.steps, PLAIN.to_vec());
        assert_eq!(second.steps.len(), 6);
        assert_eq!(second.steps.last(), Some(&Step::Extra));
    }

    #[test]
    fn test_house_labels() {
        let mut builder = HouseBuilder::new(BTreeMap::new());
        let mut out = Vec::new();

        Director::new(&mut builder).make(false, &mut out).unwrap();
        let simple = builder.get_house(&mut out).unwrap();
        assert_eq!(simple.to_string(), "SimpleHouse");
        assert!(simple.roof.is_some());
        assert!(simple.garage.is_none());

        Director::new(&mut builder).make(true, &mut out).unwrap();
        let fancy = builder.get_house(&mut out).unwrap();
        assert_eq!(fancy.to_string(), "FancyHouse");

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Delivering SimpleHouse."));
        assert!(text.contains("Delivering FancyHouse."));
    }

    #[test]
    fn test_car_labels() {
        let mut car = Car::default();
        assert_eq!(car.to_string(), "SimpleCar");
        car.air_conditioner = Some("ac");
        assert_eq!(car.to_string(), "SimpleCar");
        car.hydraulics = Some("hydraulics");
        assert_eq!(car.to_string(), "FancyCar");
    }

    #[test]
    fn test_get_leaves_builder_empty() {
        let mut builder = CarBuilder::new(BTreeMap::new());
        Director::new(&mut builder).make(true, &mut io::sink()).unwrap();
        let car = builder.get_car(&mut io::sink()).unwrap();
        assert!(car.is_fancy());
        assert_eq!(builder.get_car(&mut io::sink()).unwrap(), Car::default());
    }

    #[test]
    fn test_parse_fancy() {
        assert!(parse_fancy("y"));
        assert!(parse_fancy("Yes please"));
        assert!(!parse_fancy(""));
        assert!(!parse_fancy("n"));
        assert!(!parse_fancy("maybe"));
    }

    #[test]
    fn test_demo_session() {
        let text = transcript("house\n\ncar\ny\nboat\n", Settings::default(), |session| {
            BuilderApplication.main(session)
        });
        assert!(text.contains("Want to build what? (car, house): "));
        assert!(text.contains(r#"House params are: {"color": "yellow"}."#));
        assert!(text.contains("Delivering SimpleHouse."));
        assert!(text.contains(r#"Car params are: {"wheels": "4"}."#));
        assert!(text.contains("Hydraulics built."));
        assert!(text.contains("Delivering FancyCar."));
        assert!(text.contains("Unknown product: boat"));
    }
}
