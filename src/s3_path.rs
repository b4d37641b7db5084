use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// A bucket, and optionally an object inside of it, that the role being searched with can read.
/// Parsed from `s3://bucket/key`, `bucket/key`, or just `bucket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Path {
    pub bucket: String,
    /// Never `Some("")`. `bucket/` is treated the same as `bucket`.
    pub key: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum S3PathParseError {
    #[error("no bucket name was given")]
    Empty,
    #[error("the bucket name in {0:?} is empty")]
    EmptyBucket(String),
}

impl FromStr for S3Path {
    type Err = S3PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only strip a scheme if it comes before the first `/`, so keys can contain `://`
        let path = match s.split_once("://") {
            Some((scheme, rest)) if !scheme.contains('/') => rest,
            _ => s,
        };
        if path.is_empty() {
            return Err(S3PathParseError::Empty);
        }
        let (bucket, key) = match path.split_once('/') {
            Some((bucket, key)) => (bucket, Some(key).filter(|key| !key.is_empty())),
            None => (path, None),
        };
        if bucket.is_empty() {
            return Err(S3PathParseError::EmptyBucket(s.to_owned()));
        }
        Ok(Self {
            bucket: bucket.to_owned(),
            key: key.map(ToOwned::to_owned),
        })
    }
}

impl Display for S3Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.key {
            Some(key) => write!(f, "s3://{}/{}", self.bucket, key),
            None => write!(f, "s3://{}", self.bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{S3Path, S3PathParseError};

    fn parse(s: &str) -> Result<(String, Option<String>), S3PathParseError> {
        s.parse::<S3Path>().map(|path| (path.bucket, path.key))
    }

    #[test]
    fn scheme_with_nested_key() {
        assert_eq!(
            parse("s3://bucket/a/b"),
            Ok(("bucket".into(), Some("a/b".into())))
        );
    }

    #[test]
    fn bare_bucket() {
        assert_eq!(parse("bucket"), Ok(("bucket".into(), None)));
        assert_eq!(parse("s3://bucket"), Ok(("bucket".into(), None)));
    }

    #[test]
    fn bare_bucket_and_key() {
        assert_eq!(
            parse("bucket/object.txt"),
            Ok(("bucket".into(), Some("object.txt".into())))
        );
    }

    #[test]
    fn trailing_slash_has_no_key() {
        assert_eq!(parse("s3://bucket/"), Ok(("bucket".into(), None)));
    }

    #[test]
    fn scheme_like_text_inside_key_is_kept() {
        assert_eq!(
            parse("bucket/http://example.com"),
            Ok(("bucket".into(), Some("http://example.com".into())))
        );
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(parse(""), Err(S3PathParseError::Empty));
        assert_eq!(parse("s3://"), Err(S3PathParseError::Empty));
    }

    #[test]
    fn empty_bucket_fails() {
        assert_eq!(
            parse("/key"),
            Err(S3PathParseError::EmptyBucket("/key".into()))
        );
    }

    #[test]
    fn display() {
        assert_eq!("bucket/a/b".parse::<S3Path>().unwrap().to_string(), "s3://bucket/a/b");
        assert_eq!("bucket".parse::<S3Path>().unwrap().to_string(), "s3://bucket");
    }
}
