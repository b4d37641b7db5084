/// Gets a new session by assuming a role, optionally scoped down by a session policy.
pub trait RoleAssumer {
    /// Whatever is needed to make requests as the assumed role
    type Session;

    async fn assume_role(
        &self,
        role_arn: &str,
        policy: Option<&str>,
    ) -> anyhow::Result<Self::Session>;
}
