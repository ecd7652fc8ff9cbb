//! Evaluation state: clarity, content rotation, decay, freezing and the judgment record.
//!
//! [`eval_session::EvalSession`] owns everything; the other modules are the pieces it drives.

/// Bounded, quantized clarity scalar.
pub mod clarity;
/// The session context object.
pub mod eval_session;
/// Evaluator commands and their text syntax.
pub mod input;
/// Per-line state machine.
pub mod line;
/// Judgment log and ranked export.
pub mod recorder;
/// Random text-unit and word draws.
pub mod rotation;
/// Tick cadence and per-line decay clocks.
pub mod scheduler;
