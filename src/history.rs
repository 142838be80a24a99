//! Undo/redo history for canvas operations.
//!
//! The engine owns the live canvas and three ordered containers:
//! - the undo history, a stack of operations currently in effect
//! - the redo history, a stack of operations taken off by `undo`
//! - the log, every operation ever applied to the live canvas, in order,
//!   including the inverses that `undo` performs
//!
//! Replaying the log from the initial canvas walks through exactly the
//! states the live canvas went through, which is what `repeat_all` renders.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::PixelCanvas;
use crate::error::{HistoryKind, MoveError, Result};
use crate::render::{FrameId, FrameSink};
use crate::types::Operation;

/// What a fresh action (apply or repeat) does to the redo history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RedoPolicy {
    /// Drop everything that could be redone, like most editors do.
    #[default]
    Clear,
    /// Leave the redo history alone. A later `redo` may then reapply an
    /// operation recorded against an older canvas state.
    Keep,
}

/// Which operation `repeat` replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatPolicy {
    /// The last entry in the log, whatever produced it. After an `undo`
    /// this is the inverse the undo just performed.
    #[default]
    LastLogged,
    /// The top of the undo history: the most recent operation still in
    /// effect.
    LastApplied,
}

impl std::fmt::Display for RedoPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedoPolicy::Clear => f.write_str("clear"),
            RedoPolicy::Keep => f.write_str("keep"),
        }
    }
}

impl std::fmt::Display for RepeatPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatPolicy::LastLogged => f.write_str("last-logged"),
            RepeatPolicy::LastApplied => f.write_str("last-applied"),
        }
    }
}

/// Behavioural switches for a `HistoryEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub redo_policy: RedoPolicy,
    pub repeat_policy: RepeatPolicy,
}

/// Serializable copy of the three containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryExport {
    pub undo: Vec<Operation>,
    pub redo: Vec<Operation>,
    pub log: Vec<Operation>,
}

/// The do/undo/redo/repeat engine around a live canvas.
#[derive(Debug, Clone)]
pub struct HistoryEngine {
    canvas: PixelCanvas,
    config: HistoryConfig,
    undo_history: Vec<Operation>,
    redo_history: Vec<Operation>,
    log: Vec<Operation>,
}

impl HistoryEngine {
    /// Wrap a canvas in its initial state, with default policies.
    pub fn new(canvas: PixelCanvas) -> Self {
        Self::with_config(canvas, HistoryConfig::default())
    }

    pub fn with_config(canvas: PixelCanvas, config: HistoryConfig) -> Self {
        Self {
            canvas,
            config,
            undo_history: Vec::new(),
            redo_history: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Apply a new operation to the canvas and record it.
    pub fn apply(&mut self, op: Operation) -> Result<()> {
        self.canvas.apply(op)?;
        debug!(%op, "applied");
        self.record_fresh(op);
        Ok(())
    }

    pub fn shift_left(&mut self, d: usize) -> Result<()> {
        self.apply(Operation::shift_left(d))
    }

    pub fn shift_right(&mut self, d: usize) -> Result<()> {
        self.apply(Operation::shift_right(d))
    }

    pub fn shift_up(&mut self, d: usize) -> Result<()> {
        self.apply(Operation::shift_up(d))
    }

    pub fn shift_down(&mut self, d: usize) -> Result<()> {
        self.apply(Operation::shift_down(d))
    }

    pub fn rotate_ccw(&mut self) -> Result<()> {
        self.apply(Operation::rotate_ccw())
    }

    pub fn rotate_cw(&mut self) -> Result<()> {
        self.apply(Operation::rotate_cw())
    }

    /// Reverse the most recent operation still in effect.
    ///
    /// The inverse is what actually touches the canvas, so the inverse is
    /// what gets logged. Returns the operation that was undone.
    pub fn undo(&mut self) -> Result<Operation> {
        let op = *self.undo_history.last().ok_or(MoveError::EmptyHistory {
            history: HistoryKind::Undo,
        })?;
        let inverse = op.inverse();
        self.canvas.apply(inverse)?;

        self.undo_history.pop();
        self.redo_history.push(op);
        self.log.push(inverse);
        debug!(%op, %inverse, "undone");
        Ok(op)
    }

    /// Reapply the most recently undone operation. Returns it.
    pub fn redo(&mut self) -> Result<Operation> {
        let op = *self.redo_history.last().ok_or(MoveError::EmptyHistory {
            history: HistoryKind::Redo,
        })?;
        self.canvas.apply(op)?;

        self.redo_history.pop();
        self.undo_history.push(op);
        self.log.push(op);
        debug!(%op, "redone");
        Ok(op)
    }

    /// Apply the operation selected by the repeat policy once more, as a
    /// fresh action. Returns the repeated operation.
    pub fn repeat(&mut self) -> Result<Operation> {
        if self.log.is_empty() {
            return Err(MoveError::EmptyLog);
        }
        let op = match self.config.repeat_policy {
            RepeatPolicy::LastLogged => *self.log.last().ok_or(MoveError::EmptyLog)?,
            RepeatPolicy::LastApplied => {
                *self.undo_history.last().ok_or(MoveError::EmptyHistory {
                    history: HistoryKind::Undo,
                })?
            }
        };
        self.canvas.apply(op)?;
        debug!(%op, "repeated");
        self.record_fresh(op);
        Ok(op)
    }

    /// Undo everything, then render the initial canvas followed by one
    /// frame per logged operation.
    ///
    /// The log is replayed as it stood when the call began; the inverses
    /// appended by the drain are not part of the replay. The replay runs on
    /// a working copy, so afterwards the live canvas is the initial canvas
    /// and the containers are in the fully undone state.
    ///
    /// Returns the number of frames emitted.
    pub fn repeat_all(&mut self, sink: &mut dyn FrameSink) -> Result<usize> {
        let replay = self.log.clone();

        while self.can_undo() {
            self.undo()?;
        }

        info!(operations = replay.len(), "replaying history");
        let mut working = self.canvas.clone();
        sink.emit(&working.snapshot(), FrameId::Index(0))?;

        for (i, op) in replay.iter().enumerate() {
            working.apply(*op)?;
            sink.emit(&working.snapshot(), FrameId::Index(i + 1))?;
        }

        Ok(replay.len() + 1)
    }

    fn record_fresh(&mut self, op: Operation) {
        self.undo_history.push(op);
        self.log.push(op);
        if self.config.redo_policy == RedoPolicy::Clear {
            self.redo_history.clear();
        }
    }

    /// The live canvas.
    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    /// The policies this engine was built with.
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Operations in effect, oldest first; the last one is undone next.
    pub fn undo_history(&self) -> &[Operation] {
        &self.undo_history
    }

    /// Undone operations, oldest first; the last one is redone next.
    pub fn redo_history(&self) -> &[Operation] {
        &self.redo_history
    }

    /// Every operation applied to the live canvas, in order.
    pub fn log(&self) -> &[Operation] {
        &self.log
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    pub fn export(&self) -> HistoryExport {
        HistoryExport {
            undo: self.undo_history.clone(),
            redo: self.redo_history.clone(),
            log: self.log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Frame;
    use crate::render::MemorySink;
    use crate::types::{Colour, Sprite};

    fn canvas() -> PixelCanvas {
        let mut canvas = PixelCanvas::filled(8, 8, Colour::WHITE);
        canvas.stamp(&Sprite::builtin(1), 0, 0);
        canvas
    }

    fn engine(redo_policy: RedoPolicy, repeat_policy: RepeatPolicy) -> HistoryEngine {
        HistoryEngine::with_config(
            canvas(),
            HistoryConfig {
                redo_policy,
                repeat_policy,
            },
        )
    }

    fn expected(ops: &[Operation]) -> Frame {
        let mut c = canvas();
        for op in ops {
            c.apply(*op).unwrap();
        }
        c.snapshot()
    }

    #[test]
    fn test_apply_records_in_undo_and_log() {
        let mut engine = HistoryEngine::new(canvas());
        engine.shift_left(3).unwrap();
        engine.rotate_ccw().unwrap();

        let ops = [Operation::shift_left(3), Operation::rotate_ccw()];
        assert_eq!(engine.undo_history(), &ops);
        assert_eq!(engine.log(), &ops);
        assert!(engine.redo_history().is_empty());
        assert_eq!(engine.canvas().snapshot(), expected(&ops));
    }

    #[test]
    fn test_undo_logs_the_inverse() {
        let mut engine = HistoryEngine::new(canvas());
        engine.shift_down(2).unwrap();

        let undone = engine.undo().unwrap();

        assert_eq!(undone, Operation::shift_down(2));
        assert!(engine.undo_history().is_empty());
        assert_eq!(engine.redo_history(), &[Operation::shift_down(2)]);
        assert_eq!(
            engine.log(),
            &[Operation::shift_down(2), Operation::shift_up(2)]
        );
        assert_eq!(engine.canvas().snapshot(), canvas().snapshot());
    }

    #[test]
    fn test_undo_rotation_uses_opposite_rotation() {
        let mut engine = HistoryEngine::new(canvas());
        engine.rotate_ccw().unwrap();
        engine.undo().unwrap();

        assert_eq!(engine.log().last(), Some(&Operation::rotate_cw()));
        assert_eq!(engine.canvas().snapshot(), canvas().snapshot());
    }

    #[test]
    fn test_redo_replays_forward() {
        let mut engine = HistoryEngine::new(canvas());
        engine.shift_right(5).unwrap();
        engine.undo().unwrap();

        let redone = engine.redo().unwrap();

        assert_eq!(redone, Operation::shift_right(5));
        assert_eq!(engine.undo_history(), &[Operation::shift_right(5)]);
        assert!(engine.redo_history().is_empty());
        assert_eq!(engine.log().len(), 3);
        assert_eq!(
            engine.canvas().snapshot(),
            expected(&[Operation::shift_right(5)])
        );
    }

    #[test]
    fn test_empty_errors_leave_state_untouched() {
        let mut engine = HistoryEngine::new(canvas());
        let before = engine.canvas().snapshot();

        assert!(matches!(
            engine.undo(),
            Err(MoveError::EmptyHistory {
                history: HistoryKind::Undo
            })
        ));
        assert!(matches!(
            engine.redo(),
            Err(MoveError::EmptyHistory {
                history: HistoryKind::Redo
            })
        ));
        assert!(matches!(engine.repeat(), Err(MoveError::EmptyLog)));

        assert!(engine.log().is_empty());
        assert_eq!(engine.canvas().snapshot(), before);
    }

    #[test]
    fn test_invalid_argument_leaves_state_untouched() {
        let mut engine = HistoryEngine::new(canvas());
        engine.shift_up(1).unwrap();
        let before = engine.export();
        let snapshot = engine.canvas().snapshot();

        let err = engine.shift_left(9).unwrap_err();

        assert!(matches!(err, MoveError::InvalidArgument { limit: 8, .. }));
        assert_eq!(engine.export(), before);
        assert_eq!(engine.canvas().snapshot(), snapshot);
    }

    #[test]
    fn test_clear_policy_drops_redo_on_fresh_action() {
        let mut engine = engine(RedoPolicy::Clear, RepeatPolicy::LastLogged);
        engine.shift_left(1).unwrap();
        engine.undo().unwrap();
        assert!(engine.can_redo());

        engine.shift_up(1).unwrap();

        assert!(!engine.can_redo());
        assert!(engine.redo().is_err());
    }

    #[test]
    fn test_keep_policy_preserves_redo_on_fresh_action() {
        let mut engine = engine(RedoPolicy::Keep, RepeatPolicy::LastLogged);
        engine.shift_left(1).unwrap();
        engine.undo().unwrap();

        engine.shift_up(1).unwrap();
        assert_eq!(engine.redo_history(), &[Operation::shift_left(1)]);

        // The stale redo still applies on top of the newer state.
        engine.redo().unwrap();
        assert_eq!(
            engine.undo_history(),
            &[Operation::shift_up(1), Operation::shift_left(1)]
        );
        assert_eq!(
            engine.canvas().snapshot(),
            expected(&[Operation::shift_up(1), Operation::shift_left(1)])
        );
    }

    #[test]
    fn test_redo_does_not_clear_remaining_redos() {
        let mut engine = engine(RedoPolicy::Clear, RepeatPolicy::LastLogged);
        engine.shift_left(1).unwrap();
        engine.shift_left(2).unwrap();
        engine.undo().unwrap();
        engine.undo().unwrap();

        engine.redo().unwrap();

        assert_eq!(engine.redo_history(), &[Operation::shift_left(2)]);
    }

    #[test]
    fn test_repeat_last_logged_after_undo_repeats_inverse() {
        let mut engine = engine(RedoPolicy::Keep, RepeatPolicy::LastLogged);
        engine.shift_right(2).unwrap();
        engine.undo().unwrap();

        let repeated = engine.repeat().unwrap();

        assert_eq!(repeated, Operation::shift_left(2));
        assert_eq!(engine.undo_history(), &[Operation::shift_left(2)]);
        assert_eq!(
            engine.canvas().snapshot(),
            expected(&[Operation::shift_left(2)])
        );
    }

    #[test]
    fn test_repeat_last_applied_ignores_undo_inverses() {
        let mut engine = engine(RedoPolicy::Keep, RepeatPolicy::LastApplied);
        engine.shift_right(2).unwrap();
        engine.shift_down(1).unwrap();
        engine.undo().unwrap();

        let repeated = engine.repeat().unwrap();

        assert_eq!(repeated, Operation::shift_right(2));
        assert_eq!(
            engine.canvas().snapshot(),
            expected(&[Operation::shift_right(2), Operation::shift_right(2)])
        );
    }

    #[test]
    fn test_repeat_last_applied_needs_undo_history() {
        let mut engine = engine(RedoPolicy::Keep, RepeatPolicy::LastApplied);
        engine.shift_right(2).unwrap();
        engine.undo().unwrap();

        assert!(matches!(
            engine.repeat(),
            Err(MoveError::EmptyHistory {
                history: HistoryKind::Undo
            })
        ));
    }

    #[test]
    fn test_repeat_on_empty_log_is_empty_log_under_both_policies() {
        for repeat_policy in [RepeatPolicy::LastLogged, RepeatPolicy::LastApplied] {
            let mut engine = engine(RedoPolicy::Clear, repeat_policy);
            assert!(matches!(engine.repeat(), Err(MoveError::EmptyLog)));
            assert!(engine.log().is_empty());
        }
    }

    #[test]
    fn test_config_reports_policies() {
        let engine = engine(RedoPolicy::Keep, RepeatPolicy::LastApplied);
        let config = engine.config();

        assert_eq!(config.redo_policy, RedoPolicy::Keep);
        assert_eq!(config.repeat_policy, RepeatPolicy::LastApplied);
        assert_eq!(config.redo_policy.to_string(), "keep");
        assert_eq!(config.repeat_policy.to_string(), "last-applied");
    }

    #[test]
    fn test_repeat_clears_redo_under_clear_policy() {
        let mut engine = engine(RedoPolicy::Clear, RepeatPolicy::LastLogged);
        engine.shift_right(2).unwrap();
        engine.shift_right(1).unwrap();
        engine.undo().unwrap();

        engine.repeat().unwrap();

        assert!(!engine.can_redo());
    }

    #[test]
    fn test_undo_all_returns_to_initial() {
        let mut engine = HistoryEngine::new(canvas());
        let ops = [
            Operation::shift_left(3),
            Operation::rotate_ccw(),
            Operation::shift_down(8),
            Operation::rotate_cw(),
            Operation::shift_up(5),
        ];
        for op in ops {
            engine.apply(op).unwrap();
        }
        let after = engine.canvas().snapshot();

        for _ in 0..ops.len() {
            engine.undo().unwrap();
        }
        assert_eq!(engine.canvas().snapshot(), canvas().snapshot());

        for _ in 0..ops.len() {
            engine.redo().unwrap();
        }
        assert_eq!(engine.canvas().snapshot(), after);
    }

    #[test]
    fn test_repeat_all_emits_every_state() {
        let mut engine = HistoryEngine::new(canvas());
        engine.shift_left(3).unwrap();
        engine.rotate_ccw().unwrap();
        engine.undo().unwrap();
        let log = engine.log().to_vec();

        let mut sink = MemorySink::new();
        let frames = engine.repeat_all(&mut sink).unwrap();

        assert_eq!(frames, 4);
        assert_eq!(sink.frames().len(), 4);
        assert_eq!(sink.frames()[0].1, canvas().snapshot());
        for i in 1..=log.len() {
            assert_eq!(sink.frames()[i].0, FrameId::Index(i));
            assert_eq!(sink.frames()[i].1, expected(&log[..i]));
        }

        assert_eq!(engine.canvas().snapshot(), canvas().snapshot());
        assert!(engine.undo_history().is_empty());
        assert_eq!(engine.redo_history(), &[Operation::shift_left(3)]);
        assert_eq!(engine.log().len(), log.len() + 1);
    }

    #[test]
    fn test_repeat_all_on_fresh_engine() {
        let mut engine = HistoryEngine::new(canvas());
        let mut sink = MemorySink::new();

        assert_eq!(engine.repeat_all(&mut sink).unwrap(), 1);
        assert_eq!(sink.frames()[0].1, canvas().snapshot());
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_export_json() {
        let mut engine = HistoryEngine::new(canvas());
        engine.shift_up(1).unwrap();
        engine.undo().unwrap();

        let json = serde_json::to_value(engine.export()).unwrap();
        assert_eq!(json["undo"].as_array().unwrap().len(), 0);
        assert_eq!(json["redo"][0]["kind"], "shift-up");
        assert_eq!(json["log"][1]["kind"], "shift-down");
    }

    #[test]
    fn test_policy_deserialize() {
        let config: HistoryConfig =
            serde_yaml::from_str("redo_policy: keep\nrepeat_policy: last-applied").unwrap();
        assert_eq!(config.redo_policy, RedoPolicy::Keep);
        assert_eq!(config.repeat_policy, RepeatPolicy::LastApplied);
    }
}
