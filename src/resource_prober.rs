use crate::probe_outcome::ProbeOutcome;

/// The cheapest possible "can I read this?" checks against S3
pub trait ResourceProber {
    type Session;

    async fn head_object(&self, session: &Self::Session, bucket: &str, key: &str)
        -> ProbeOutcome;

    async fn head_bucket(&self, session: &Self::Session, bucket: &str) -> ProbeOutcome;
}
