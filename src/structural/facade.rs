//! Facade: one simple entry point in front of a subsystem with many moving parts.

use std::fmt;
use std::io::{self, Write};

use crate::application::Application;
use crate::error::Result;
use crate::session::Session;

mod video {
    use std::io::{self, Write};

    pub struct VideoDecoder;

    impl VideoDecoder {
        pub fn decode(&self, file: &str, out: &mut dyn Write) -> io::Result<Vec<u8>> {
            writeln!(out, "  Decoding video stream of {file}...")?;
            Ok(file.bytes().collect())
        }
    }

    pub struct AudioExtractor;

    impl AudioExtractor {
        pub fn extract(&self, frames: &[u8], out: &mut dyn Write) -> io::Result<Vec<u8>> {
            writeln!(out, "  Extracting audio from {} frames...", frames.len())?;
            Ok(frames.iter().rev().copied().collect())
        }
    }

    pub struct CodecManager;

    impl CodecManager {
        pub fn configure(&self, format: &str, out: &mut dyn Write) -> io::Result<()> {
            writeln!(out, "  Configuring {format} codecs...")
        }
    }

    pub struct FormatConverter;

    impl FormatConverter {
        pub fn convert(
            &self,
            file: &str,
            frames: &[u8],
            audio: &[u8],
            format: &str,
            out: &mut dyn Write,
        ) -> io::Result<String> {
            writeln!(
                out,
                "  Muxing {} video and {} audio samples...",
                frames.len(),
                audio.len()
            )?;
            let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
            Ok(format!("{stem}.{format}"))
        }
    }
}

pub struct VideoConverter {
    decoder: video::VideoDecoder,
    audio: video::AudioExtractor,
    codecs: video::CodecManager,
    converter: video::FormatConverter,
}

impl VideoConverter {
    pub fn new() -> Self {
        Self {
            decoder: video::VideoDecoder,
            audio: video::AudioExtractor,
            codecs: video::CodecManager,
            converter: video::FormatConverter,
        }
    }

    /// Runs the whole pipeline and returns the name of the converted file.
    pub fn convert(&self, file: &str, format: &str, out: &mut dyn Write) -> io::Result<String> {
        self.codecs.configure(format, out)?;
        let frames = self.decoder.decode(file, out)?;
        let audio = self.audio.extract(&frames, out)?;
        self.converter.convert(file, &frames, &audio, format, out)
    }
}

impl Default for VideoConverter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FacadeApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(FacadeApplication)
}

impl fmt::Display for FacadeApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Facade")
    }
}

impl Application for FacadeApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let converter = VideoConverter::new();
        writeln!(session, "Converting holiday.avi to mp4:")?;
        let output = converter.convert("holiday.avi", "mp4", session)?;
        writeln!(session, "Converted: {output}")?;
        Ok(())
    }
}
