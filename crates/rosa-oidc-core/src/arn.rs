//! Minimal ARN checks for user-supplied role ARNs.

use crate::{Error, Result};

/// The parts of an ARN this tool cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account_id: &'a str,
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Split `arn:partition:service:region:account-id:resource`.
    pub fn parse(input: &'a str) -> Result<Self> {
        let mut sections = input.splitn(6, ':');
        let prefix = sections.next().unwrap_or_default();
        if prefix != "arn" {
            return Err(Error::InvalidArn(format!(
                "Invalid ARN: arn: invalid prefix in '{}'",
                input
            )));
        }

        let parts: Vec<&str> = sections.collect();
        if parts.len() != 5 {
            return Err(Error::InvalidArn(format!(
                "Invalid ARN: arn: not enough sections in '{}'",
                input
            )));
        }

        Ok(Self {
            partition: parts[0],
            service: parts[1],
            region: parts[2],
            account_id: parts[3],
            resource: parts[4],
        })
    }

    /// The last path segment of the resource, e.g. the role name of
    /// `role/path/ManagedOpenShift-Installer-Role`.
    pub fn resource_id(&self) -> Option<&'a str> {
        let index = self.resource.rfind('/')?;
        let id = &self.resource[index + 1..];
        (!id.is_empty()).then_some(id)
    }
}

/// Validate an IAM role ARN and return the role name it points to.
pub fn role_name_from_arn(input: &str) -> Result<&str> {
    let arn = Arn::parse(input)?;
    if arn.service != "iam" || !arn.resource.starts_with("role/") {
        return Err(Error::InvalidArn(format!(
            "'{}' is not an IAM role ARN",
            input
        )));
    }
    arn.resource_id().ok_or_else(|| {
        Error::InvalidArn(format!("can't find resource-id in ARN '{}'", input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_arn() {
        let arn = Arn::parse("arn:aws:iam::123456789012:role/ManagedOpenShift-Installer-Role")
            .unwrap();
        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "iam");
        assert_eq!(arn.region, "");
        assert_eq!(arn.account_id, "123456789012");
        assert_eq!(arn.resource_id(), Some("ManagedOpenShift-Installer-Role"));
    }

    #[test]
    fn test_role_name_with_path() {
        let name = role_name_from_arn("arn:aws:iam::123456789012:role/team/a/Installer").unwrap();
        assert_eq!(name, "Installer");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Arn::parse("not-an-arn").is_err());
        assert!(Arn::parse("arn:aws:iam::123").is_err());
        assert!(role_name_from_arn("arn:aws:s3:::bucket/key").is_err());
        assert!(role_name_from_arn("arn:aws:iam::123456789012:role/").is_err());
    }
}
