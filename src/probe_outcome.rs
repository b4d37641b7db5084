/// The answer to "can this session read this?", as seen at the boundary with S3.
/// Access denied is an expected answer, not an error.
#[derive(Debug)]
pub enum ProbeOutcome {
    Accessible,
    Denied,
    /// Anything else (bucket doesn't exist, throttling, network problems, ...)
    Failed(anyhow::Error),
}

impl ProbeOutcome {
    /// `Ok(true)` if accessible, `Ok(false)` if denied
    pub fn into_result(self) -> anyhow::Result<bool> {
        match self {
            Self::Accessible => Ok(true),
            Self::Denied => Ok(false),
            Self::Failed(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::ProbeOutcome;

    #[test]
    fn into_result() {
        assert!(ProbeOutcome::Accessible.into_result().unwrap());
        assert!(!ProbeOutcome::Denied.into_result().unwrap());
        assert!(ProbeOutcome::Failed(anyhow!("throttled"))
            .into_result()
            .is_err());
    }
}
