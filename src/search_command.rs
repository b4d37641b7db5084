use std::io::Write;

use anyhow::anyhow;
use aws_config::{BehaviorVersion, Region};
use clap::Parser;

use crate::{
    access_oracle::AccessOracle,
    account_id::AccountId,
    config::DEFAULT_ROLE_SESSION_NAME,
    discover_account_id::{discover_account_id, SearchError, SearchProgress},
    resource_prober::ResourceProber,
    role_assumer::RoleAssumer,
    s3_path::S3Path,
    s3_resource_prober::S3ResourceProber,
    sts_role_assumer::StsRoleAssumer,
};

#[derive(Parser)]
pub struct SearchCommand {
    /// ARN of the role to assume. This role should have s3:GetObject and/or s3:ListBucket permissions on the target.
    role_arn: String,
    /// The bucket, or an object in the bucket, to test with. Examples: `s3://bucket/key`, `bucket/key`, `bucket`.
    path: S3Path,
    /// Profile to use for the credentials that assume the role
    #[arg(short, long)]
    profile: Option<String>,
    /// Region to use for STS and S3. Defaults to the region from the profile or environment.
    #[arg(short, long)]
    region: Option<String>,
    /// Role session name used every time the role is assumed
    #[arg(long, default_value = DEFAULT_ROLE_SESSION_NAME)]
    session_name: String,
}

pub async fn search_command(
    SearchCommand {
        role_arn,
        path,
        profile,
        region,
        session_name,
    }: SearchCommand,
) -> anyhow::Result<()> {
    let sdk_config = {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        loader.load().await
    };
    search(
        StsRoleAssumer::new(sdk_config, session_name),
        S3ResourceProber::default(),
        role_arn,
        path,
        &mut std::io::stdout(),
    )
    .await?;
    Ok(())
}

/// Prints progress and the account id to `output`
pub async fn search<A, P>(
    role_assumer: A,
    resource_prober: P,
    role_arn: String,
    path: S3Path,
    output: &mut impl Write,
) -> anyhow::Result<AccountId>
where
    A: RoleAssumer,
    P: ResourceProber<Session = A::Session>,
{
    let mut oracle = AccessOracle {
        role_assumer,
        resource_prober,
        role_arn,
        path,
    };
    let account_id = discover_account_id(&mut oracle, |progress| {
        match progress {
            SearchProgress::BaselineConfirmed => {
                writeln!(output, "Starting search (this can take a while)")?
            }
            SearchProgress::Found(prefix) => writeln!(output, "Found: {prefix}")?,
        }
        output.flush()?;
        Ok(())
    })
    .await
    .map_err(|error| match error {
        SearchError::BaselineUnreachable => {
            anyhow!("{} cannot access {}", oracle.role_arn, oracle.path)
        }
        error => error.into(),
    })?;
    writeln!(output, "{account_id}")?;
    Ok(account_id)
}
