use thiserror::Error;
use tracing::{info, warn};

use crate::{
    access_oracle::Oracle,
    account_id::AccountId,
    config::{ACCOUNT_ID_LEN, DIGITS},
    resource_account_policy::ResourceAccountPolicy,
    search_state::{SearchFailure, SearchState},
};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("the role cannot access the target, even without a session policy")]
    BaselineUnreachable,
    #[error("something went wrong, only found {found:?} out of {} digits", ACCOUNT_ID_LEN)]
    Incomplete { found: String },
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

/// Reported while searching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProgress<'a> {
    /// The role can read the target without a session policy, so the digit search starts
    BaselineConfirmed,
    /// The digits confirmed so far, including a newly found one
    Found(&'a str),
}

/// Finds the account id one digit at a time, asking the oracle if the account id starts with
/// `{found}{digit}` for every digit in ascending order. The first digit that works is kept,
/// even if more than one would work.
///
/// Nothing is reported if the baseline check fails.
pub async fn discover_account_id(
    oracle: &mut impl Oracle,
    mut on_progress: impl FnMut(SearchProgress<'_>) -> anyhow::Result<()>,
) -> Result<AccountId, SearchError> {
    let mut found = String::with_capacity(ACCOUNT_ID_LEN);
    let mut state = SearchState::Idle;
    loop {
        let accessible = match state {
            SearchState::Idle => {
                let accessible = oracle
                    .can_access(&ResourceAccountPolicy::Unconstrained)
                    .await?;
                if accessible {
                    info!("Role can access the target without a session policy");
                    on_progress(SearchProgress::BaselineConfirmed)?;
                }
                accessible
            }
            SearchState::Probing { position, digit } => {
                let candidate = format!("{found}{}", DIGITS[digit]);
                let accessible = oracle
                    .can_access(&ResourceAccountPolicy::Prefix(candidate.clone()))
                    .await?;
                if accessible {
                    found = candidate;
                    on_progress(SearchProgress::Found(&found))?;
                } else if digit + 1 == DIGITS.len() {
                    warn!(position, found = %found, "No digit matched");
                }
                accessible
            }
            SearchState::Confirmed { .. } => true,
            SearchState::Done => {
                info!(account_id = %found, "Search finished");
                break Ok(found.parse::<AccountId>()?);
            }
            SearchState::Failed(SearchFailure::BaselineUnreachable) => {
                break Err(SearchError::BaselineUnreachable)
            }
            SearchState::Failed(SearchFailure::Incomplete) => {
                break Err(SearchError::Incomplete { found })
            }
        };
        state = state.next(accessible, found.len());
    }
}
