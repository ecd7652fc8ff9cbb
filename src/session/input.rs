use std::str::FromStr;

use crate::foundation::error::LegibilityError;
use crate::session::line::LineId;

/// Which lines an input applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineTarget {
    /// Every line; the only choice in single-line sessions.
    All,
    /// One line.
    Line(LineId),
}

/// Discrete evaluator input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Make the sample clearer by one manual step.
    Decrease(LineTarget),
    /// Make the sample blurrier by one manual step.
    Increase(LineTarget),
    /// Lock in a judgment.
    Freeze(LineTarget),
    /// Undo a freeze where the freeze policy allows it.
    Unfreeze(LineTarget),
}

/// A line of evaluator input: an event or a session-level command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Forward to the session.
    Input(InputEvent),
    /// Clear records and restart every line.
    Reset,
    /// End the session.
    Quit,
}

impl FromStr for Command {
    type Err = LegibilityError;

    /// Parses `<verb> [line]`, where `line` is 1-based.
    ///
    /// Verbs: `-`/`left`/`d`, `+`/`right`/`i`, `f`/`space`/`freeze`, `u`/`unfreeze`,
    /// `r`/`reset`, `q`/`quit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| LegibilityError::validation("empty command"))?
            .to_ascii_lowercase();
        let target = match parts.next() {
            None => LineTarget::All,
            Some(n) => {
                let n: usize = n
                    .parse()
                    .map_err(|_| LegibilityError::validation(format!("bad line number '{n}'")))?;
                if n == 0 {
                    return Err(LegibilityError::validation("line numbers start at 1"));
                }
                LineTarget::Line(LineId(n - 1))
            }
        };
        if parts.next().is_some() {
            return Err(LegibilityError::validation(format!(
                "unexpected trailing input in '{s}'"
            )));
        }

        let cmd = match verb.as_str() {
            "-" | "left" | "d" => Self::Input(InputEvent::Decrease(target)),
            "+" | "right" | "i" => Self::Input(InputEvent::Increase(target)),
            "f" | "space" | "freeze" => Self::Input(InputEvent::Freeze(target)),
            "u" | "unfreeze" => Self::Input(InputEvent::Unfreeze(target)),
            "r" | "reset" => Self::Reset,
            "q" | "quit" => Self::Quit,
            other => {
                return Err(LegibilityError::validation(format!(
                    "unknown command '{other}'"
                )));
            }
        };
        Ok(cmd)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/input.rs"]
mod tests;
