//! Adapter: make existing players with their own interfaces fit the one the
//! client expects.

use std::fmt;
use std::io::{self, Write};

use crate::application::Application;
use crate::error::Result;
use crate::menu::Menu;
use crate::registry::Registry;
use crate::session::Session;

/// The interface the client code is written against.
pub trait MediaPlayer {
    fn play(&self, filename: &str, out: &mut dyn Write) -> io::Result<()>;
}

// Third-party players with incompatible interfaces.

pub struct VlcPlayer;

impl VlcPlayer {
    pub fn play_vlc(&self, file_path: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Playing VLC: {file_path}")
    }
}

pub struct Mp3Player;

impl Mp3Player {
    pub fn play_mp3(&self, file_name: &str, volume: u8, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Playing MP3: {file_name} at volume {volume}")
    }
}

pub struct VlcAdapter {
    player: VlcPlayer,
}

impl MediaPlayer for VlcAdapter {
    fn play(&self, filename: &str, out: &mut dyn Write) -> io::Result<()> {
        self.player.play_vlc(filename, out)
    }
}

pub struct Mp3Adapter {
    player: Mp3Player,
    volume: u8,
}

impl MediaPlayer for Mp3Adapter {
    fn play(&self, filename: &str, out: &mut dyn Write) -> io::Result<()> {
        self.player.play_mp3(filename, self.volume, out)
    }
}

struct Choice {
    file: &'static str,
    player: fn() -> Box<dyn MediaPlayer>,
}

fn vlc() -> Box<dyn MediaPlayer> {
    Box::new(VlcAdapter { player: VlcPlayer })
}

fn mp3() -> Box<dyn MediaPlayer> {
    Box::new(Mp3Adapter {
        player: Mp3Player,
        volume: 7,
    })
}

fn players() -> Result<Registry<Choice>> {
    Registry::new([
        (
            "vlc",
            Choice {
                file: "video.mp4",
                player: vlc,
            },
        ),
        (
            "mp3",
            Choice {
                file: "song.mp3",
                player: mp3,
            },
        ),
    ])
}

pub struct AdapterApplication;

pub fn application() -> Box<dyn Application> {
    Box::new(AdapterApplication)
}

impl fmt::Display for AdapterApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Adapter")
    }
}

impl Application for AdapterApplication {
    fn main(&mut self, session: &mut Session<'_>) -> Result<()> {
        let players = players()?;
        Menu::new(&players, "Play with?")
            .on_miss(|input| format!("Unknown player: {input}"))
            .run(session, |session, _, choice| {
                let player = (choice.player)();
                player.play(choice.file, session)?;
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
    fn test_adapters_share_one_interface() {
        let players: Vec<Box<dyn MediaPlayer>> = vec![vlc(), mp3()];
        let mut out = Vec::new();
        for player in &players {
            player.play("clip", &mut out).unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Playing VLC: clip\nPlaying MP3: clip at volume 7\n"
        );
    }

    #[test]
    fn test_demo_session() {
        let text = transcript("mp3\nvlc\nwinamp\n", Settings::default(), |session| {
            AdapterApplication.main(session)
        });
        assert!(text.contains("Play with? (vlc, mp3): "));
        assert!(text.contains("Playing MP3: song.mp3 at volume 7"));
        assert!(text.contains("Playing VLC: video.mp4"));
        assert!(text.contains("Unknown player: winamp"));
    }
}
