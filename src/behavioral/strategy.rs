//! Strategy: swap the algorithm a context uses at runtime.

use std::fmt;
use std::io::{self, Write};

use crate::application::Application;
use crate::error::Result;
use crate::menu::Menu;
use crate::registry::Registry;
use crate::session::Session;

pub trait CompressionStrategy {
    fn name(&self) -> &'static str;
    fn compress(&self, data: &[u8]) -> Vec<u8>;
}

/// Collapses runs of equal bytes into `(count, byte)` pairs.
pub struct ZipCompression;

impl CompressionStrategy for ZipCompression {
    fn name(&self) -> &'static str {
        "ZIP"
    }

    fn compress(&self, data: &[u8]) -> Vec<u8> {
        let mut packed = Vec::new();
        for chunk in data.chunk_by(|a, b| a == b) {
            for run in chunk.chunks(u8::MAX as usize) {
                packed.push(run.len() as u8);
                packed.push(run[0]);
            }
        }
        packed
    }
}

/// Drops every repeated byte after its first occurrence, keeping order.
pub struct RarCompression;

impl CompressionStrategy for RarCompression {
    fn name(&self) -> &'static str {
        "RAR"
    }

    fn compress(&self, data: &[u8]) -> Vec<u8> {
        let mut seen = [false; 256];
        data.iter()
            .copied()
            .filter(|byte| !std::mem::replace(&mut seen[*byte as usize], true))
            .collect()
    }
}

pub struct FileCompressor {
    strategy: Box<dyn CompressionStrategy>,
}

impl FileCompressor {
    pub fn new(strategy: Box<dyn CompressionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn CompressionStrategy>) {
        self.strategy = strategy;
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn compress_file(&self, data: &[u8], out: &mut dyn Write) -> io::Result<Vec<u8>> {
        let packed = self.strategy.compress(data);
        writeln!(
            out,
            "{} compressed {} bytes into {} bytes",
            self.strategy_name(),
            data.len(),
            packed.len()
        )?;
        Ok(packed)
    }
}

type StrategyFn = fn() -> Box<dyn CompressionStrategy>;

fn zip() -> Box<dyn CompressionStrategy> {
    Box::new(ZipCompression)
}

fn rar() -> Box<dyn CompressionStrategy> {
    Box::new(RarCompression)
}

pub fn strategies() -> Result<Registry<StrategyFn>> {
    Registry::new([("zip", zip as StrategyFn), ("rar", rar as StrategyFn)])
}

const SAMPLE: &[u8] = b"aaaaaaaabbbbccccccccccccddddeeeeeeee";

pub struct StrategyApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(StrategyApplication)
}

impl fmt::Display for StrategyApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Strategy")
    }
}

impl Application for StrategyApplication {
    /// One compressor lives for the whole demo; each selection only swaps its strategy.
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let strategies = strategies()?;
        let mut compressor = FileCompressor::new(Box::new(ZipCompression));
        Menu::new(&strategies, "Compress with?")
            .on_miss(|input| format!("Unknown strategy: {input}"))
            .run(session, |session, _, strategy| {
                let previous = compressor.strategy_name();
                compressor.set_strategy(strategy());
                let current = compressor.strategy_name();
                writeln!(session, "Switched from {previous} to {current}")?;
                compressor.compress_file(SAMPLE, session)?;
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
    fn test_zip_runs() {
        assert_eq!(ZipCompression.compress(b"aaab"), vec![3, b'a', 1, b'b']);
        assert!(ZipCompression.compress(b"").is_empty());

        let long = vec![b'z'; 300];
        assert_eq!(ZipCompression.compress(&long), vec![255, b'z', 45, b'z']);
    }

    #[test]
    fn test_rar_keeps_first_occurrences() {
        assert_eq!(RarCompression.compress(b"abracadabra"), b"abrcd".to_vec());
    }

    #[test]
    fn test_strategy_swap() {
        let mut compressor = FileCompressor::new(Box::new(ZipCompression));
        let zipped = compressor.compress_file(SAMPLE, &mut io::sink()).unwrap();
        assert_eq!(zipped.len(), 10);

        compressor.set_strategy(Box::new(RarCompression));
        assert_eq!(compressor.strategy_name(), "RAR");
        let rared = compressor.compress_file(SAMPLE, &mut io::sink()).unwrap();
        assert_eq!(rared, b"abcde".to_vec());
    }

    #[test]
    fn test_demo_session() {
        let text = transcript("rar\nzip\ngzip\n", Settings::default(), |session| {
            StrategyApplication.main(session)
        });
        assert!(text.contains("Switched from ZIP to RAR"));
        assert!(text.contains("RAR compressed 36 bytes into 5 bytes"));
        assert!(text.contains("Switched from RAR to ZIP"));
        assert!(text.contains("ZIP compressed 36 bytes into 10 bytes"));
        assert!(text.contains("Unknown strategy: gzip"));
    }
}
