//! S3-compatible blob store.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream as S3Body;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CompletedMultipartUpload, CompletedPart, CreateBucketConfiguration,
};
use bytes::BytesMut;
use futures::StreamExt;
use tracing::{debug, info, warn};

use filefort_core::config::storage::S3StorageConfig;
use filefort_core::error::AppError;
use filefort_core::result::AppResult;
use filefort_core::traits::storage::{BlobStore, ByteStream, stream_error};

/// Minimum size of every multipart part except the last.
const PART_SIZE: usize = 5 * 1024 * 1024;

fn sdk_err<E: std::error::Error>(action: &'static str) -> impl Fn(E) -> AppError {
    move |e| AppError::storage(format!("S3 {action} failed: {}", DisplayErrorContext(&e)))
}

/// Blob store backed by an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    region: String,
}

impl S3BlobStore {
    /// Build a client from configuration.
    ///
    /// Static keys are used when both are set; otherwise the default
    /// AWS credential chain applies.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = %config.endpoint,
            "Initializing S3 blob store"
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }
        if !config.access_key.is_empty() && !config.secret_key.is_empty() {
            builder = builder.credentials_provider(Credentials::new(
                &config.access_key,
                &config.secret_key,
                None,
                None,
                "static",
            ));
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        })
    }

    /// Create the bucket unless it already exists.
    pub async fn ensure_bucket(&self) -> AppResult<()> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        let mut request = self.client.create_bucket().bucket(&self.bucket);
        // us-east-1 rejects an explicit location constraint.
        if self.region != "us-east-1" {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }
        request.send().await.map_err(sdk_err("create_bucket"))?;
        info!(bucket = %self.bucket, "Created S3 bucket");
        Ok(())
    }

    async fn put_small(&self, key: &str, body: BytesMut) -> AppResult<u64> {
        let size = body.len() as u64;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(S3Body::from(body.freeze()))
            .send()
            .await
            .map_err(sdk_err("put_object"))?;
        Ok(size)
    }

    async fn upload_part(
        &self,
        key: &str,
        upload_id: &str,
        part_number: i32,
        body: BytesMut,
    ) -> AppResult<CompletedPart> {
        let output = self
            .client
            .upload_part()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .part_number(part_number)
            .body(S3Body::from(body.freeze()))
            .send()
            .await
            .map_err(sdk_err("upload_part"))?;

        Ok(CompletedPart::builder()
            .set_e_tag(output.e_tag().map(str::to_string))
            .part_number(part_number)
            .build())
    }

    /// Stream the remainder of `stream` as multipart parts, starting from `first`.
    async fn put_multipart(
        &self,
        key: &str,
        first: BytesMut,
        stream: &mut ByteStream<'_>,
    ) -> AppResult<u64> {
        let created = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(sdk_err("create_multipart_upload"))?;
        let upload_id = created
            .upload_id()
            .ok_or_else(|| AppError::storage("S3 returned no multipart upload id"))?
            .to_string();

        let result = self.upload_parts(key, &upload_id, first, stream).await;

        match result {
            Ok((parts, size)) => {
                self.client
                    .complete_multipart_upload()
                    .bucket(&self.bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .multipart_upload(
                        CompletedMultipartUpload::builder()
                            .set_parts(Some(parts))
                            .build(),
                    )
                    .send()
                    .await
                    .map_err(sdk_err("complete_multipart_upload"))?;
                Ok(size)
            }
            Err(e) => {
                if let Err(abort) = self
                    .client
                    .abort_multipart_upload()
                    .bucket(&self.bucket)
                    .key(key)
                    .upload_id(&upload_id)
                    .send()
                    .await
                {
                    warn!(key, error = %DisplayErrorContext(&abort), "Failed to abort multipart upload");
                }
                Err(e)
            }
        }
    }

    async fn upload_parts(
        &self,
        key: &str,
        upload_id: &str,
        mut buf: BytesMut,
        stream: &mut ByteStream<'_>,
    ) -> AppResult<(Vec<CompletedPart>, u64)> {
        let mut parts = Vec::new();
        let mut total = 0u64;
        let mut part_number = 1;

        loop {
            while buf.len() < PART_SIZE {
                match stream.next().await {
                    Some(chunk) => buf.extend_from_slice(&chunk.map_err(stream_error)?),
                    None => break,
                }
            }
            if buf.len() < PART_SIZE {
                break;
            }
            let body = buf.split_to(PART_SIZE);
            total += body.len() as u64;
            parts.push(self.upload_part(key, upload_id, part_number, body).await?);
            debug!(key, part_number, "Uploaded part");
            part_number += 1;
        }

        if !buf.is_empty() {
            total += buf.len() as u64;
            parts.push(self.upload_part(key, upload_id, part_number, buf).await?);
        }
        Ok((parts, total))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok())
    }

    async fn put_stream(&self, key: &str, mut stream: ByteStream<'_>) -> AppResult<u64> {
        // Objects smaller than one part go up in a single request.
        let mut first = BytesMut::new();
        while first.len() < PART_SIZE {
            match stream.next().await {
                Some(chunk) => first.extend_from_slice(&chunk.map_err(stream_error)?),
                None => return self.put_small(key, first).await,
            }
        }
        self.put_multipart(key, first, &mut stream).await
    }

    async fn presigned_url(&self, key: &str, ttl: Duration) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| AppError::storage(format!("Invalid presign expiry: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(sdk_err("presign get_object"))?;

        Ok(request.uri().to_string())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(sdk_err("delete_object"))?;
        debug!(key, "Deleted object");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|s| s.is_not_found()) => Ok(false),
            Err(e) => Err(sdk_err("head_object")(e)),
        }
    }
}
