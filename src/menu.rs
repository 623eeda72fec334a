//! The prompt → match → dispatch loop shared by every menu level.

use std::io::Write;

use colored::Colorize;
use tracing::{debug, info};

use crate::application::{AppFactory, Application};
use crate::error::{PatternError, Result};
use crate::registry::{MatchPolicy, Registry};
use crate::session::Session;

pub struct Menu<'r, T> {
    registry: &'r Registry<T>,
    question: &'r str,
    policy: MatchPolicy,
    miss: fn(&str) -> String,
}

impl<'r, T> Menu<'r, T> {
    /// A menu over `registry`, matching exactly unless told otherwise.
    pub fn new(registry: &'r Registry<T>, question: &'r str) -> Self {
        Self {
            registry,
            question,
            policy: MatchPolicy::Exact,
            miss: |input| format!("{input} not found."),
        }
    }

    pub fn policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Message printed when a selection matches nothing.
    pub fn on_miss(mut self, miss: fn(&str) -> String) -> Self {
        self.miss = miss;
        self
    }

    pub fn prompt(&self) -> String {
        format!("{} ({}): ", self.question, self.registry.options())
    }

    /// Prompts until a selection fails to match or input runs out.
    ///
    /// `on_pick` runs for every matched selection; its errors abort the loop and
    /// propagate. A failed match is reported and ends the loop with `Ok(())`.
    pub fn run<'io, F>(&self, session: &mut Session<'io>, mut on_pick: F) -> Result<()>
    where
        F: FnMut(&mut Session<'io>, &'static str, &T) -> Result<()>,
    {
        let prompt = self.prompt();
        loop {
            let Some(input) = session.prompt(&prompt)? else {
                debug!(question = self.question, "input closed");
                return Ok(());
            };

            match self.registry.resolve(&input, self.policy) {
                Ok((key, value)) => on_pick(session, key, value)?,
                Err(err) if err.is_lookup_failure() => {
                    writeln!(session, "{}", (self.miss)(&input).red())?;
                    if let PatternError::Ambiguous { .. } = err {
                        writeln!(session, "{}", err.to_string().red())?;
                    }
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Application-level menu: every match builds a fresh application and runs it
/// between separators.
pub fn launch(
    session: &mut Session<'_>,
    registry: &Registry<AppFactory>,
    question: &str,
    miss: fn(&str) -> String,
) -> Result<()> {
    let policy = session.settings().match_policy;
    Menu::new(registry, question)
        .policy(policy)
        .on_miss(miss)
        .run(session, |session, key, factory| {
            let mut app = factory();
            info!(key, app = %app, "initializing application");

            session.separator()?;
            writeln!(session, "Initializing {app}.")?;
            session.separator()?;
            run_scoped(session, app.as_mut())?;
            session.separator()?;
            Ok(())
        })
}

/// Runs `app` and announces its exit whether it returned normally or failed.
pub fn run_scoped(session: &mut Session<'_>, app: &mut dyn Application) -> Result<()> {
    let outcome = app.main(session);
    let announced = writeln!(session, "Exiting {app}.");
    info!(app = %app, ok = outcome.is_ok(), "application exited");
    outcome?;
    Ok(announced?)
}
