use crate::config::{ACCOUNT_ID_LEN, DIGITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailure {
    /// The role can't read the target even without a session policy
    BaselineUnreachable,
    /// Every position was tried but some of them had no matching digit
    Incomplete,
}

/// Where the digit search is at. Every position gets exactly one turn, so this always finishes
/// after at most `1 + ACCOUNT_ID_LEN * DIGITS.len()` probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing checked yet, the next probe is the unconstrained one
    Idle,
    /// `digit` is an index into [`DIGITS`]
    Probing { position: usize, digit: usize },
    Confirmed { position: usize },
    Done,
    Failed(SearchFailure),
}

impl SearchState {
    /// `accessible` is the result of the probe made in this state (ignored if no probe is made).
    /// `found_len` is how many digits have been confirmed, including one confirmed by this probe.
    pub fn next(self, accessible: bool, found_len: usize) -> Self {
        match self {
            Self::Idle => {
                if accessible {
                    Self::Probing {
                        position: 0,
                        digit: 0,
                    }
                } else {
                    Self::Failed(SearchFailure::BaselineUnreachable)
                }
            }
            Self::Probing { position, digit } => {
                if accessible {
                    Self::Confirmed { position }
                } else if digit + 1 < DIGITS.len() {
                    Self::Probing {
                        position,
                        digit: digit + 1,
                    }
                } else {
                    Self::after_position(position, found_len)
                }
            }
            Self::Confirmed { position } => Self::after_position(position, found_len),
            Self::Done | Self::Failed(_) => self,
        }
    }

    fn after_position(position: usize, found_len: usize) -> Self {
        if position + 1 < ACCOUNT_ID_LEN {
            Self::Probing {
                position: position + 1,
                digit: 0,
            }
        } else if found_len == ACCOUNT_ID_LEN {
            Self::Done
        } else {
            Self::Failed(SearchFailure::Incomplete)
        }
    }
}
