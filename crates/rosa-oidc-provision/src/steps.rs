//! The shared description of the unmanaged provisioning steps.
//!
//! The automatic flow applies these steps through the ports; the manual flow
//! renders the very same steps as AWS CLI commands. Both paths read from
//! [`plan`], so a user running the printed commands ends up with the same
//! resources, keys and tags as the automatic path creates.

use crate::bundle::ProvisioningBundle;
use crate::command::{ACL_PUBLIC_READ, AwsCliCommand, bucket_tag_set, object_tagging, shell_quote};
use crate::naming::DEFAULT_REGION;
use rosa_oidc_auth::oidc::{DISCOVERY_DOCUMENT_KEY, JWKS_KEY};
use rosa_oidc_core::Result;
use rosa_oidc_core::ports::{NewBucket, NewSecret, ObjectStore, PublicObject, SecretStore};
use rosa_oidc_core::tags::{self, Tags};
use std::path::Path;
use tracing::debug;

/// Content type of both published documents.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Lets the bucket owner apply the public-read ACLs on uploaded objects.
pub const OBJECT_OWNERSHIP: &str = "BucketOwnerPreferred";

/// One provisioning step against object or secret storage.
#[derive(Debug, Clone)]
pub enum ProvisioningStep<'a> {
    CreateBucket {
        bucket: &'a str,
        region: &'a str,
        object_ownership: &'static str,
    },
    AllowPublicAccess {
        bucket: &'a str,
    },
    TagBucket {
        bucket: &'a str,
        tags: Tags,
    },
    PutObject {
        document: &'static str,
        bucket: &'a str,
        key: &'static str,
        body: &'a [u8],
        local_file: String,
        tags: Tags,
    },
    CreateSecret {
        bucket: &'a str,
        name: &'a str,
        value: &'a str,
        region: &'a str,
        local_file: &'a str,
        tags: Tags,
    },
}

/// Result of applying a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutput {
    Done,
    SecretArn(String),
}

/// The ordered steps publishing `bundle`.
pub fn plan(bundle: &ProvisioningBundle) -> Vec<ProvisioningStep<'_>> {
    let bucket = bundle.bucket_name();
    vec![
        ProvisioningStep::CreateBucket {
            bucket,
            region: bundle.region(),
            object_ownership: OBJECT_OWNERSHIP,
        },
        ProvisioningStep::AllowPublicAccess { bucket },
        ProvisioningStep::TagBucket {
            bucket,
            tags: tags::managed(),
        },
        ProvisioningStep::PutObject {
            document: "discovery document",
            bucket,
            key: DISCOVERY_DOCUMENT_KEY,
            body: bundle.discovery_document().as_bytes(),
            local_file: bundle.discovery_document_filename(),
            tags: tags::managed(),
        },
        ProvisioningStep::PutObject {
            document: "JWKS",
            bucket,
            key: JWKS_KEY,
            body: bundle.jwks(),
            local_file: bundle.jwks_filename(),
            tags: tags::managed(),
        },
        ProvisioningStep::CreateSecret {
            bucket,
            name: bundle.private_key_secret_name(),
            value: bundle.private_key(),
            region: bundle.region(),
            local_file: bundle.private_key_filename(),
            tags: tags::managed(),
        },
    ]
}

impl ProvisioningStep<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ProvisioningStep::CreateBucket { .. } => "create-bucket",
            ProvisioningStep::AllowPublicAccess { .. } => "delete-public-access-block",
            ProvisioningStep::TagBucket { .. } => "put-bucket-tagging",
            ProvisioningStep::PutObject { .. } => "put-object",
            ProvisioningStep::CreateSecret { .. } => "create-secret",
        }
    }

    /// What the step does, phrased for "There was a problem ..." messages.
    pub fn operation(&self) -> String {
        match self {
            ProvisioningStep::CreateBucket { bucket, .. } => {
                format!("creating S3 bucket '{}'", bucket)
            }
            ProvisioningStep::AllowPublicAccess { bucket } => {
                format!("allowing public access to S3 bucket '{}'", bucket)
            }
            ProvisioningStep::TagBucket { bucket, .. } => {
                format!("tagging S3 bucket '{}'", bucket)
            }
            ProvisioningStep::PutObject {
                document, bucket, ..
            } => format!("populating {} to S3 bucket '{}'", document, bucket),
            ProvisioningStep::CreateSecret { .. } => {
                "saving private key to secrets manager".to_string()
            }
        }
    }

    /// Perform the step against the real backends.
    pub async fn apply(
        &self,
        object_store: &dyn ObjectStore,
        secret_store: &dyn SecretStore,
    ) -> Result<StepOutput> {
        debug!(step = self.name(), "Applying provisioning step");
        match self {
            ProvisioningStep::CreateBucket {
                bucket,
                region,
                object_ownership,
            } => {
                object_store
                    .create_bucket(NewBucket {
                        name: bucket,
                        region,
                        object_ownership,
                    })
                    .await?;
                Ok(StepOutput::Done)
            }
            ProvisioningStep::AllowPublicAccess { bucket } => {
                object_store.delete_public_access_block(bucket).await?;
                Ok(StepOutput::Done)
            }
            ProvisioningStep::TagBucket { bucket, tags } => {
                object_store.put_bucket_tagging(bucket, tags).await?;
                Ok(StepOutput::Done)
            }
            ProvisioningStep::PutObject {
                bucket,
                key,
                body,
                tags,
                ..
            } => {
                object_store
                    .put_public_read_object(PublicObject {
                        bucket,
                        key,
                        body,
                        content_type: JSON_CONTENT_TYPE,
                        tags,
                    })
                    .await?;
                Ok(StepOutput::Done)
            }
            ProvisioningStep::CreateSecret {
                bucket,
                name,
                value,
                region,
                tags,
                ..
            } => {
                let description = secret_description(bucket);
                let arn = secret_store
                    .create_secret(NewSecret {
                        name,
                        value,
                        description: &description,
                        region,
                        tags,
                    })
                    .await?;
                Ok(StepOutput::SecretArn(arn))
            }
        }
    }

    /// The AWS CLI commands equivalent to [`apply`](Self::apply), followed by
    /// removal of any local file the command consumed. Local files are named
    /// relative to `output_dir`, where the manual flow saved them.
    pub fn to_cli_commands(&self, output_dir: &Path) -> Vec<String> {
        match self {
            ProvisioningStep::CreateBucket {
                bucket,
                region,
                object_ownership,
            } => {
                let location = if *region == DEFAULT_REGION {
                    String::new()
                } else {
                    format!("LocationConstraint={}", region)
                };
                vec![
                    AwsCliCommand::s3api("create-bucket")
                        .param("bucket", *bucket)
                        .param("create-bucket-configuration", location)
                        .param("region", *region)
                        .param("object-ownership", *object_ownership)
                        .build(),
                ]
            }
            ProvisioningStep::AllowPublicAccess { bucket } => vec![
                AwsCliCommand::s3api("delete-public-access-block")
                    .param("bucket", *bucket)
                    .build(),
            ],
            ProvisioningStep::TagBucket { bucket, tags } => vec![
                AwsCliCommand::s3api("put-bucket-tagging")
                    .param("bucket", *bucket)
                    .param("tagging", bucket_tag_set(tags))
                    .build(),
            ],
            ProvisioningStep::PutObject {
                bucket,
                key,
                local_file,
                tags,
                ..
            } => {
                let path = local_path(output_dir, local_file);
                vec![
                    AwsCliCommand::s3api("put-object")
                        .param("acl", ACL_PUBLIC_READ)
                        .param("body", shell_quote(&path))
                        .param("bucket", *bucket)
                        .param("key", *key)
                        .param("content-type", JSON_CONTENT_TYPE)
                        .param("tagging", object_tagging(tags))
                        .build(),
                    format!("rm {}", shell_quote(&path)),
                ]
            }
            ProvisioningStep::CreateSecret {
                bucket,
                name,
                region,
                local_file,
                tags,
                ..
            } => {
                let path = local_path(output_dir, local_file);
                vec![
                    AwsCliCommand::secrets_manager("create-secret")
                        .param("name", *name)
                        .param("secret-string", shell_quote(&format!("file://{}", path)))
                        .param("description", format!("\"{}\"", secret_description(bucket)))
                        .param("region", *region)
                        .tags(tags)
                        .build(),
                    format!("rm {}", shell_quote(&path)),
                ]
            }
        }
    }
}

fn local_path(output_dir: &Path, file: &str) -> String {
    output_dir.join(file).display().to_string()
}

fn secret_description(bucket: &str) -> String {
    format!("Secret for {}", bucket)
}
