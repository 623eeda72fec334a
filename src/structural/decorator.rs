//! Decorator: stack behaviour on top of a data source by wrapping it in
//! objects that share its interface.

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use crate::application::Application;
use crate::error::Result;
use crate::session::Session;

pub trait DataSource {
    /// Fails with `InvalidData` when a layer cannot undo what it stored.
    fn read(&self) -> io::Result<String>;
    fn write(&mut self, data: &str);
}

/// Plain storage. The backing buffer is shared so callers can inspect what
/// actually got stored underneath the decorators.
pub struct MemoryDataSource {
    stored: Rc<RefCell<String>>,
}

impl MemoryDataSource {
    pub fn new(stored: Rc<RefCell<String>>) -> Self {
        Self { stored }
    }
}

impl DataSource for MemoryDataSource {
    fn read(&self) -> io::Result<String> {
        Ok(self.stored.borrow().clone())
    }

    fn write(&mut self, data: &str) {
        *self.stored.borrow_mut() = data.to_string();
    }
}

pub struct EncryptionDecorator {
    wrapped: Box<dyn DataSource>,
}

impl EncryptionDecorator {
    pub fn new(wrapped: Box<dyn DataSource>) -> Self {
        Self { wrapped }
    }
}

impl DataSource for EncryptionDecorator {
    fn read(&self) -> io::Result<String> {
        Ok(rot13(&self.wrapped.read()?))
    }

    fn write(&mut self, data: &str) {
        self.wrapped.write(&rot13(data));
    }
}

pub struct CompressionDecorator {
    wrapped: Box<dyn DataSource>,
}

impl CompressionDecorator {
    pub fn new(wrapped: Box<dyn DataSource>) -> Self {
        Self { wrapped }
    }
}

impl DataSource for CompressionDecorator {
    fn read(&self) -> io::Result<String> {
        let packed = self.wrapped.read()?;
        run_length_decode(&packed).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("not run-length encoded: {packed}"),
            )
        })
    }

    fn write(&mut self, data: &str) {
        self.wrapped.write(&run_length_encode(data));
    }
}

/// Toy cipher, its own inverse.
pub fn rot13(data: &str) -> String {
    data.chars()
        .map(|c| match c {
            'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
            'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
            _ => c,
        })
        .collect()
}

/// Encodes every run as `{count}x{char}`, so digits in the data stay unambiguous.
pub fn run_length_encode(data: &str) -> String {
    let mut packed = String::new();
    let mut chars = data.chars().peekable();
    while let Some(c) = chars.next() {
        let mut count = 1;
        while chars.next_if_eq(&c).is_some() {
            count += 1;
        }
        packed.push_str(&format!("{count}x{c}"));
    }
    packed
}

pub fn run_length_decode(packed: &str) -> Option<String> {
    let mut data = String::new();
    let mut chars = packed.chars();
    loop {
        let mut count = String::new();
        let marker = loop {
            match chars.next() {
                None if count.is_empty() => return Some(data),
                Some(digit) if digit.is_ascii_digit() => count.push(digit),
                other => break other,
            }
        };
        if marker != Some('x') {
            return None;
        }
        let c = chars.next()?;
        let count: usize = count.parse().ok()?;
        data.extend(std::iter::repeat(c).take(count));
    }
}

pub struct DecoratorApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(DecoratorApplication)
}

impl fmt::Display for DecoratorApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Decorator")
    }
}

impl Application for DecoratorApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let Some(message) = session.prompt("Message to store? ")? else {
            return Ok(());
        };

        let stored = Rc::new(RefCell::new(String::new()));
        let mut source: Box<dyn DataSource> = Box::new(MemoryDataSource::new(Rc::clone(&stored)));
        source = Box::new(EncryptionDecorator::new(source));
        source = Box::new(CompressionDecorator::new(source));

        source.write(&message);
        writeln!(
            session,
            "Stored through compression and encryption: {}",
            stored.borrow()
        )?;
        writeln!(session, "Read back through the same stack: {}", source.read()?)?;
        Ok(())
    }
}
