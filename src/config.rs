// Changing these changes which accounts this program can find
/// AWS account ids are always exactly this many decimal digits.
pub const ACCOUNT_ID_LEN: usize = 12;
/// Candidate digits for each position, tried in this order.
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

pub const DEFAULT_ROLE_SESSION_NAME: &str = "s3-account-search";

pub const POLICY_VERSION: &str = "2012-10-17";
/// Condition key S3 fills in with the account id that owns the bucket being accessed.
/// See https://docs.aws.amazon.com/AmazonS3/latest/userguide/list_amazons3.html#amazons3-policy-keys
pub const RESOURCE_ACCOUNT_CONDITION_KEY: &str = "s3:ResourceAccount";
