use std::fmt::Display;

use crate::error::{DeflateError, Result};

/// Lifecycle of an encoder: `Open -> Finished -> Closed`.
///
/// Closing an open stream passes through `Finished` first, so the final
/// block is always written before the sink is closed. Any sink error moves
/// the encoder to `Failed`, which is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    // accepting payload; blocks are emitted as the
    // buffer fills or on flush.
    Open,

    // the final block has been written, the sink
    // is still held open.
    Finished,

    // the sink has been closed.
    Closed,

    // the sink reported an error; what it holds is
    // unknown, so nothing more is written to it.
    Failed,
}

impl State {
    pub fn is_open(self) -> bool {
        self == State::Open
    }

    pub(crate) fn ensure_open(self, op: &'static str) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DeflateError::InvalidState { op, state: self })
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Open => write!(f, "open"),
            State::Finished => write!(f, "finished"),
            State::Closed => write!(f, "closed"),
            State::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(State::Open, true)]
    #[case(State::Finished, false)]
    #[case(State::Closed, false)]
    #[case(State::Failed, false)]
    fn test_ensure_open(#[case] state: State, #[case] ok: bool) {
        assert_eq!(state.ensure_open("finish").is_ok(), ok);
    }

    #[rstest]
    fn test_rejection_carries_state() {
        match State::Closed.ensure_open("flush") {
            Err(DeflateError::InvalidState { op, state }) => {
                assert_eq!(op, "flush");
                assert_eq!(state, State::Closed);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
