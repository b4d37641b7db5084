use tracing::debug;

use crate::{
    probe_outcome::ProbeOutcome, resource_account_policy::ResourceAccountPolicy,
    resource_prober::ResourceProber, role_assumer::RoleAssumer, s3_path::S3Path,
};

/// Answers yes or no. Errors mean the answer can't be trusted, not that the answer is no.
pub trait Oracle {
    async fn can_access(&mut self, policy: &ResourceAccountPolicy) -> anyhow::Result<bool>;
}

/// Checks if the role can still read the target after being restricted by a session policy.
pub struct AccessOracle<A, P> {
    pub role_assumer: A,
    pub resource_prober: P,
    pub role_arn: String,
    pub path: S3Path,
}

impl<A, P> Oracle for AccessOracle<A, P>
where
    A: RoleAssumer,
    P: ResourceProber<Session = A::Session>,
{
    async fn can_access(&mut self, policy: &ResourceAccountPolicy) -> anyhow::Result<bool> {
        let session = self
            .role_assumer
            .assume_role(&self.role_arn, policy.to_policy_document().as_deref())
            .await?;
        if let Some(key) = &self.path.key {
            match self
                .resource_prober
                .head_object(&session, &self.path.bucket, key)
                .await
            {
                ProbeOutcome::Accessible => return Ok(true),
                // The policy might still allow ListBucket
                ProbeOutcome::Denied => {
                    debug!("Object denied, falling back to bucket");
                }
                ProbeOutcome::Failed(error) => return Err(error),
            }
        }
        self.resource_prober
            .head_bucket(&session, &self.path.bucket)
            .await
            .into_result()
    }
}
