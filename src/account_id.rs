use std::{fmt::Display, str::FromStr};

use anyhow::anyhow;

use crate::config::ACCOUNT_ID_LEN;

/// A 12 digit AWS account id. Kept as a string because leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId(String);

impl FromStr for AccountId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ACCOUNT_ID_LEN {
            Err(anyhow!(
                "Account id {s:?} has {} characters, expected {ACCOUNT_ID_LEN}",
                s.len()
            ))?;
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            Err(anyhow!("Account id {s:?} is not all digits"))?;
        }
        Ok(Self(s.to_owned()))
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
