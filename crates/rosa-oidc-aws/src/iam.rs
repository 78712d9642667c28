//! IAM role lookup for installer role validation.

use async_trait::async_trait;
use aws_sdk_iam::Client as IamClient;
use aws_sdk_iam::error::DisplayErrorContext;
use rosa_oidc_core::ports::RoleLookup;
use rosa_oidc_core::{Error, Result};
use tracing::debug;

pub struct IamRoleLookup {
    client: IamClient,
}

impl IamRoleLookup {
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleLookup for IamRoleLookup {
    async fn role_exists(&self, role_name: &str) -> Result<bool> {
        match self.client.get_role().role_name(role_name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_no_such_entity_exception())
                {
                    debug!(role = %role_name, "Role not found");
                    return Ok(false);
                }
                Err(Error::Iam(DisplayErrorContext(err).to_string()))
            }
        }
    }
}
