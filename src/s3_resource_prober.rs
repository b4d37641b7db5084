use std::{cell::RefCell, error::Error, fmt::Display};

use aws_config::Region;
use aws_sdk_s3::{
    config::http::HttpResponse,
    error::{ProvideErrorMetadata, SdkError},
};
use tracing::debug;

use crate::{probe_outcome::ProbeOutcome, resource_prober::ResourceProber};

/// Uses `HeadObject` and `HeadBucket`, which don't download anything.
/// Follows S3's region redirects and remembers the bucket's region for the following probes.
#[derive(Default)]
pub struct S3ResourceProber {
    bucket_region: RefCell<Option<Region>>,
}

impl S3ResourceProber {
    /// The session's client, moved to the bucket's region once it's known
    fn regional_client(&self, s3_client: &aws_sdk_s3::Client) -> aws_sdk_s3::Client {
        match &*self.bucket_region.borrow() {
            Some(region) => aws_sdk_s3::Client::from_conf(
                s3_client.config().to_builder().region(region.clone()).build(),
            ),
            None => s3_client.clone(),
        }
    }

    /// Returns `true` if the probe should be sent again in the bucket's region
    fn follow_redirect<T, E>(&self, result: &Result<T, SdkError<E, HttpResponse>>) -> bool {
        match redirect_region(result) {
            Some(region) => {
                debug!(region = %region, "Bucket is in another region");
                *self.bucket_region.borrow_mut() = Some(Region::new(region));
                true
            }
            None => false,
        }
    }
}

impl ResourceProber for S3ResourceProber {
    type Session = aws_sdk_s3::Client;

    async fn head_object(
        &self,
        s3_client: &aws_sdk_s3::Client,
        bucket: &str,
        key: &str,
    ) -> ProbeOutcome {
        let mut result = self
            .regional_client(s3_client)
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await;
        if self.follow_redirect(&result) {
            result = self
                .regional_client(s3_client)
                .head_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await;
        }
        probe_outcome(result, format_args!("HeadObject s3://{bucket}/{key}"))
    }

    async fn head_bucket(&self, s3_client: &aws_sdk_s3::Client, bucket: &str) -> ProbeOutcome {
        let mut result = self
            .regional_client(s3_client)
            .head_bucket()
            .bucket(bucket)
            .send()
            .await;
        if self.follow_redirect(&result) {
            result = self
                .regional_client(s3_client)
                .head_bucket()
                .bucket(bucket)
                .send()
                .await;
        }
        probe_outcome(result, format_args!("HeadBucket s3://{bucket}"))
    }
}

/// S3 answers requests sent to the wrong region with a redirect (or a 400 for some regions)
/// that names the bucket's region in a header. 403s can carry the header too, but those are
/// real answers.
pub fn redirect_region<T, E>(result: &Result<T, SdkError<E, HttpResponse>>) -> Option<String> {
    match result {
        Err(SdkError::ServiceError(service_error))
            if matches!(service_error.raw().status().as_u16(), 301 | 307 | 400) =>
        {
            service_error
                .raw()
                .headers()
                .get("x-amz-bucket-region")
                .map(ToOwned::to_owned)
        }
        _ => None,
    }
}

fn probe_outcome<T, E>(
    result: Result<T, SdkError<E, HttpResponse>>,
    operation: impl Display,
) -> ProbeOutcome
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
{
    match result {
        Ok(_) => {
            debug!("{operation}: accessible");
            ProbeOutcome::Accessible
        }
        Err(error) => {
            if is_access_denied(&error) {
                debug!("{operation}: denied");
                ProbeOutcome::Denied
            } else {
                ProbeOutcome::Failed(
                    anyhow::Error::from(error).context(format!("{operation} failed")),
                )
            }
        }
    }
}

/// HEAD responses have no body, so the error code is usually missing and the status is what matters.
pub fn is_access_denied<E: ProvideErrorMetadata>(error: &SdkError<E, HttpResponse>) -> bool {
    match error {
        SdkError::ServiceError(service_error) => {
            service_error.raw().status().as_u16() == 403
                || matches!(
                    service_error.err().code(),
                    Some("403" | "AccessDenied" | "Forbidden")
                )
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::{
        config::http::HttpResponse,
        error::{ErrorMetadata, SdkError},
        operation::head_bucket::HeadBucketError,
    };
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;

    use aws_config::Region;

    use super::{is_access_denied, probe_outcome, redirect_region, S3ResourceProber};
    use crate::probe_outcome::ProbeOutcome;

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn error_with_response(
        code: Option<&str>,
        response: HttpResponse,
    ) -> SdkError<HeadBucketError, HttpResponse> {
        let mut metadata = ErrorMetadata::builder();
        if let Some(code) = code {
            metadata = metadata.code(code);
        }
        SdkError::service_error(HeadBucketError::generic(metadata.build()), response)
    }

    fn service_error(status: u16, code: Option<&str>) -> SdkError<HeadBucketError, HttpResponse> {
        error_with_response(code, response(status))
    }

    fn with_region_header(status: u16) -> SdkError<HeadBucketError, HttpResponse> {
        let mut response = response(status);
        response
            .headers_mut()
            .insert("x-amz-bucket-region", "eu-west-1");
        error_with_response(None, response)
    }

    #[test]
    fn moved_permanently_gives_bucket_region() {
        let result = Err::<(), _>(with_region_header(301));
        assert_eq!(redirect_region(&result), Some("eu-west-1".into()));
        assert!(!is_access_denied(&with_region_header(301)));
    }

    #[test]
    fn forbidden_with_region_is_not_a_redirect() {
        assert_eq!(redirect_region(&Err::<(), _>(with_region_header(403))), None);
    }

    #[test]
    fn redirect_without_header_is_not_followed() {
        assert_eq!(redirect_region(&Err::<(), _>(service_error(301, None))), None);
        assert_eq!(
            redirect_region(&Ok::<_, SdkError<HeadBucketError, HttpResponse>>(())),
            None
        );
    }

    #[tokio::test]
    async fn redirect_moves_client_to_bucket_region() {
        let s3_client = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version_latest()
                .region(Region::new("us-east-1"))
                .build(),
        );
        let prober = S3ResourceProber::default();
        assert_eq!(
            prober.regional_client(&s3_client).config().region(),
            Some(&Region::new("us-east-1"))
        );
        assert!(prober.follow_redirect(&Err::<(), _>(with_region_header(301))));
        assert_eq!(
            prober.regional_client(&s3_client).config().region(),
            Some(&Region::new("eu-west-1"))
        );
        assert!(!prober.follow_redirect(&Err::<(), _>(service_error(403, None))));
    }

    #[test]
    fn forbidden_status_is_denied() {
        assert!(is_access_denied(&service_error(403, None)));
    }

    #[test]
    fn access_denied_code_is_denied() {
        assert!(is_access_denied(&service_error(400, Some("AccessDenied"))));
    }

    #[test]
    fn not_found_is_not_denied() {
        assert!(!is_access_denied(&service_error(404, Some("NotFound"))));
    }

    #[test]
    fn timeout_is_not_denied() {
        let error = SdkError::<HeadBucketError, HttpResponse>::timeout_error("timed out");
        assert!(!is_access_denied(&error));
    }

    #[test]
    fn outcomes() {
        assert!(matches!(
            probe_outcome(Ok::<_, SdkError<HeadBucketError, HttpResponse>>(()), "test"),
            ProbeOutcome::Accessible
        ));
        assert!(matches!(
            probe_outcome(Err::<(), _>(service_error(403, None)), "test"),
            ProbeOutcome::Denied
        ));
        assert!(matches!(
            probe_outcome(Err::<(), _>(service_error(500, Some("InternalError"))), "test"),
            ProbeOutcome::Failed(_)
        ));
    }
}
