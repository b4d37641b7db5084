use std::time::SystemTime;

use anyhow::{anyhow, Context};
use aws_config::SdkConfig;
use aws_sdk_s3::config::Credentials;
use tracing::debug;

use crate::role_assumer::RoleAssumer;

/// Assumes roles with STS and gives back an S3 client that uses the temporary credentials.
pub struct StsRoleAssumer {
    sdk_config: SdkConfig,
    sts_client: aws_sdk_sts::Client,
    session_name: String,
}

impl StsRoleAssumer {
    pub fn new(sdk_config: SdkConfig, session_name: String) -> Self {
        Self {
            sts_client: aws_sdk_sts::Client::new(&sdk_config),
            sdk_config,
            session_name,
        }
    }
}

impl RoleAssumer for StsRoleAssumer {
    type Session = aws_sdk_s3::Client;

    async fn assume_role(
        &self,
        role_arn: &str,
        policy: Option<&str>,
    ) -> anyhow::Result<Self::Session> {
        debug!(role_arn, ?policy, "Assuming role");
        let output = self
            .sts_client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(&self.session_name)
            .set_policy(policy.map(ToOwned::to_owned))
            .send()
            .await
            .with_context(|| format!("Failed to assume role {role_arn}"))?;
        let credentials = output
            .credentials()
            .ok_or(anyhow!("No credentials in AssumeRole response for {role_arn}"))?;
        let credentials = Credentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            Some(credentials.session_token().to_owned()),
            SystemTime::try_from(*credentials.expiration()).ok(),
            "AssumeRole",
        );
        Ok(aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::config::Builder::from(&self.sdk_config)
                .credentials_provider(credentials)
                .build(),
        ))
    }
}
