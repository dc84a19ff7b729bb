//! Textual rendering of a machine configuration, used for tracing runs.

use serde::Serialize;
use std::fmt;

/// A borrowed snapshot of the tape, head position and current state name.
///
/// The `Display` form is `Tape: ['a', 'b'], Head Position: 1, Current State: q0`.
/// After an implicit reject the state is shown as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Configuration<'a> {
    pub tape: &'a [char],
    pub head_position: usize,
    pub state: Option<&'a str>,
}

impl fmt::Display for Configuration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tape: {:?}, Head Position: {}, Current State: {}",
            self.tape,
            self.head_position,
            self.state.unwrap_or("None")
        )
    }
}

impl Configuration<'_> {
    /// Renders the configuration as a single JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Renders the tape as a compact string with the head cell bracketed.
///
/// ```text
/// | a | b | a |
///   0   1   2
/// ```
///
/// head 1 renders as `a[b]a`; head 3 (one past the end) as `aba[_]` with the
/// given empty symbol.
pub fn render_tape(tape: &[char], head: usize, empty: char) -> String {
    let mut out = String::with_capacity(tape.len() + 2);
    for (i, &symbol) in tape.iter().enumerate() {
        if i == head {
            out.push('[');
            out.push(symbol);
            out.push(']');
        } else {
            out.push(symbol);
        }
    }
    if head >= tape.len() {
        out.push('[');
        out.push(empty);
        out.push(']');
    }
    out
}
