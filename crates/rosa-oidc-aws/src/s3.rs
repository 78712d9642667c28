//! S3 object store for the public discovery artifacts.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ObjectCannedAcl, ObjectOwnership, Tag,
    Tagging,
};
use rosa_oidc_core::ports::{NewBucket, ObjectStore, PublicObject};
use rosa_oidc_core::tags::Tags;
use rosa_oidc_core::{Error, Result};
use tracing::{debug, info};

/// Region where S3 rejects an explicit location constraint.
const DEFAULT_REGION: &str = "us-east-1";

pub struct S3ObjectStore {
    client: S3Client,
}

impl S3ObjectStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

fn storage_error(context: &str, err: impl std::error::Error) -> Error {
    Error::Storage(format!("{}: {}", context, DisplayErrorContext(err)))
}

/// `None` for us-east-1, which only accepts an empty configuration.
pub fn bucket_configuration(region: &str) -> Option<CreateBucketConfiguration> {
    if region == DEFAULT_REGION {
        return None;
    }
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

pub fn tag_set(tags: &Tags) -> Result<Vec<Tag>> {
    tags.iter()
        .map(|(key, value)| {
            Tag::builder()
                .key(key)
                .value(value)
                .build()
                .map_err(|e| storage_error("invalid tag", e))
        })
        .collect()
}

/// URL-encoded form accepted by `PutObject`'s tagging header.
pub fn object_tagging(tags: &Tags) -> String {
    tags.iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn create_bucket(&self, bucket: NewBucket<'_>) -> Result<()> {
        debug!(bucket = %bucket.name, region = %bucket.region, "Creating S3 bucket");
        self.client
            .create_bucket()
            .bucket(bucket.name)
            .set_create_bucket_configuration(bucket_configuration(bucket.region))
            .object_ownership(ObjectOwnership::from(bucket.object_ownership))
            .send()
            .await
            .map_err(|e| storage_error("create bucket", e))?;

        info!(bucket = %bucket.name, "Created S3 bucket");
        Ok(())
    }

    async fn delete_public_access_block(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_public_access_block()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| storage_error("delete public access block", e))?;
        Ok(())
    }

    async fn put_bucket_tagging(&self, bucket: &str, tags: &Tags) -> Result<()> {
        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set(tags)?))
            .build()
            .map_err(|e| storage_error("invalid tagging", e))?;

        self.client
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| storage_error("tag bucket", e))?;
        Ok(())
    }

    async fn put_public_read_object(&self, object: PublicObject<'_>) -> Result<()> {
        debug!(bucket = %object.bucket, key = %object.key, bytes = object.body.len(), "Uploading object");
        self.client
            .put_object()
            .bucket(object.bucket)
            .key(object.key)
            .body(ByteStream::from(object.body.to_vec()))
            .content_type(object.content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .tagging(object_tagging(object.tags))
            .send()
            .await
            .map_err(|e| storage_error("put object", e))?;
        Ok(())
    }
}
