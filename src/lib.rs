//! An interactive console catalogue of classic design patterns.
//!
//! Three menu levels: pick a category, then a pattern, then drive the
//! pattern's own demo. Each level loops until a selection matches nothing.
//!
//! ```no_run
//! use patterns::{application, Session, Settings};
//!
//! let mut session = Session::stdio(Settings::default());
//! application::run(&mut session).ok();
//! ```

pub mod application;
pub mod behavioral;
pub mod config;
pub mod creational;
pub mod error;
pub mod logging;
pub mod menu;
pub mod registry;
pub mod session;
pub mod structural;

pub use application::{AppFactory, Application, PatternSet};
pub use config::Settings;
pub use error::{PatternError, Result};
pub use menu::Menu;
pub use registry::{MatchPolicy, Registry};
pub use session::Session;
