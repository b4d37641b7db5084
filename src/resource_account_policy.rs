use serde_json::json;

use crate::config::{POLICY_VERSION, RESOURCE_ACCOUNT_CONDITION_KEY};

/// A session policy passed along when assuming the role. The effective permissions of the
/// session are the intersection of the role's permissions and this policy, so a read only
/// succeeds if the bucket owner's account id matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAccountPolicy {
    /// No session policy. Used to check that the role can read the target at all.
    Unconstrained,
    /// Only allows S3 actions on resources owned by an account whose id starts with these digits.
    Prefix(String),
}

impl ResourceAccountPolicy {
    /// The JSON session policy document, or `None` for [`ResourceAccountPolicy::Unconstrained`].
    pub fn to_policy_document(&self) -> Option<String> {
        match self {
            Self::Unconstrained => None,
            Self::Prefix(prefix) => Some(
                json!({
                    "Version": POLICY_VERSION,
                    "Statement": [
                        {
                            "Sid": "AllowResourceAccount",
                            "Effect": "Allow",
                            "Action": "s3:*",
                            "Resource": "*",
                            "Condition": {
                                "StringLike": {
                                    RESOURCE_ACCOUNT_CONDITION_KEY: [format!("{prefix}*")]
                                }
                            }
                        }
                    ]
                })
                .to_string(),
            ),
        }
    }
}
