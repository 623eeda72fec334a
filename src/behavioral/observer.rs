//! Observer: subscribers get notified whenever the subject's state changes.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use colored::Colorize;

use crate::application::Application;
use crate::error::Result;
use crate::session::Session;

pub trait Observer {
    fn update(&mut self, temperature: f32, out: &mut dyn Write) -> io::Result<()>;
}

pub struct TemperatureDisplay {
    name: String,
}

impl TemperatureDisplay {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Observer for TemperatureDisplay {
    fn update(&mut self, temperature: f32, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{} display: {temperature:.1}°C", self.name)
    }
}

#[derive(Default)]
pub struct TemperatureLogger {
    log: Vec<f32>,
}

impl TemperatureLogger {
    pub fn readings(&self) -> &[f32] {
        &self.log
    }

    pub fn average(&self) -> Option<f32> {
        if self.log.is_empty() {
            return None;
        }
        Some(self.log.iter().sum::<f32>() / self.log.len() as f32)
    }
}

impl Observer for TemperatureLogger {
    fn update(&mut self, temperature: f32, out: &mut dyn Write) -> io::Result<()> {
        self.log.push(temperature);
        let total = self.log.len();
        writeln!(out, "Logged {temperature:.1}°C (total: {total} readings)")
    }
}

/// Warns once the temperature crosses a limit, and again only after it has dropped back.
pub struct HeatAlarm {
    limit: f32,
    raised: bool,
}

impl HeatAlarm {
    pub fn new(limit: f32) -> Self {
        Self {
            limit,
            raised: false,
        }
    }
}

impl Observer for HeatAlarm {
    fn update(&mut self, temperature: f32, out: &mut dyn Write) -> io::Result<()> {
        let hot = temperature > self.limit;
        if hot && !self.raised {
            let limit = self.limit;
            let alarm = format!("Heat alarm: {temperature:.1}°C is above {limit:.1}°C");
            writeln!(out, "{}", alarm.red())?;
        }
        self.raised = hot;
        Ok(())
    }
}

pub type Subscriber = Rc<RefCell<dyn Observer>>;

#[derive(Default)]
pub struct WeatherStation {
    temperature: Option<f32>,
    observers: Vec<Subscriber>,
}

impl WeatherStation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, observer: Subscriber) {
        self.observers.push(observer);
    }

    pub fn detach(&mut self, observer: &Subscriber) {
        self.observers.retain(|attached| !Rc::ptr_eq(attached, observer));
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn set_temperature(&mut self, temperature: f32, out: &mut dyn Write) -> io::Result<()> {
        self.temperature = Some(temperature);
        self.notify(out)
    }

    fn notify(&self, out: &mut dyn Write) -> io::Result<()> {
        let Some(temperature) = self.temperature else {
            return Ok(());
        };
        for observer in &self.observers {
            observer.borrow_mut().update(temperature, out)?;
        }
        Ok(())
    }
}

const READING_PROMPT: &str =
    "Temperature reading? (a number, `mute` silences the alarm, anything else stops): ";

pub struct ObserverApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(ObserverApplication)
}

impl fmt::Display for ObserverApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Observer")
    }
}

impl Application for ObserverApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let logger = Rc::new(RefCell::new(TemperatureLogger::default()));
        let mut station = WeatherStation::new();
        station.attach(Rc::new(RefCell::new(TemperatureDisplay::new("Main"))));
        station.attach(logger.clone());
        let alarm: Subscriber = Rc::new(RefCell::new(HeatAlarm::new(30.0)));
        station.attach(Rc::clone(&alarm));

        while let Some(reading) = session.prompt(READING_PROMPT)? {
            match reading.trim().parse::<f32>() {
                Ok(temperature) if temperature.is_finite() => {
                    station.set_temperature(temperature, session)?;
                }
                _ if reading.trim() == "mute" => {
                    station.detach(&alarm);
                    writeln!(session, "Heat alarm muted.")?;
                }
                _ => {
                    writeln!(session, "{}", format!("Not a temperature: {reading}").red())?;
                    break;
                }
            }
        }

        let logger = logger.borrow();
        match logger.average() {
            Some(average) => writeln!(
                session,
                "{} readings, average {average:.1}°C",
                logger.readings().len()
            )?,
            None => writeln!(session, "No readings taken.")?,
        }
        Ok(())
    }
}
