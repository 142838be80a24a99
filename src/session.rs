//! Runs scripts against a history engine.

use tracing::info;

use crate::error::{MoveError, Result};
use crate::history::HistoryEngine;
use crate::render::{FrameId, FrameSink};
use crate::script::{Action, ScriptLine};

/// What a single action did, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(String),
    Undone(String),
    Redone(String),
    Repeated(String),
    Replayed { frames: usize },
    Drawn(String),
}

/// A history engine paired with the sink its frames go to.
pub struct Session<'a> {
    engine: HistoryEngine,
    sink: &'a mut dyn FrameSink,
}

impl<'a> Session<'a> {
    pub fn new(engine: HistoryEngine, sink: &'a mut dyn FrameSink) -> Self {
        Self { engine, sink }
    }

    /// Perform one action.
    pub fn perform(&mut self, action: &Action) -> Result<Outcome> {
        let outcome = match action {
            Action::Apply(op) => {
                self.engine.apply(*op)?;
                Outcome::Applied(op.to_string())
            }
            Action::Undo => Outcome::Undone(self.engine.undo()?.to_string()),
            Action::Redo => Outcome::Redone(self.engine.redo()?.to_string()),
            Action::Repeat => Outcome::Repeated(self.engine.repeat()?.to_string()),
            Action::RepeatAll => Outcome::Replayed {
                frames: self.engine.repeat_all(&mut *self.sink)?,
            },
            Action::Draw(name) => {
                let frame = self.engine.canvas().snapshot();
                self.sink.emit(&frame, FrameId::Named(name.clone()))?;
                Outcome::Drawn(name.clone())
            }
        };
        Ok(outcome)
    }

    /// Run a whole script, stopping at the first failing action.
    ///
    /// `on_step` sees every outcome as it happens. Errors are wrapped in
    /// `MoveError::Script` with the line they came from.
    pub fn run(
        &mut self,
        script: &[ScriptLine],
        mut on_step: impl FnMut(&ScriptLine, &Outcome),
    ) -> Result<Vec<Outcome>> {
        info!(actions = script.len(), "running script");
        let mut outcomes = Vec::with_capacity(script.len());

        for step in script {
            let outcome = self
                .perform(&step.action)
                .map_err(|e| at_line(e, step.line))?;
            on_step(step, &outcome);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    pub fn engine(&self) -> &HistoryEngine {
        &self.engine
    }

    pub fn into_engine(self) -> HistoryEngine {
        self.engine
    }
}

fn at_line(err: MoveError, line: usize) -> MoveError {
    MoveError::Script {
        line,
        source: Box::new(err),
    }
}
