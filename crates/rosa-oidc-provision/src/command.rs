//! AWS CLI command rendering for the manual flow.

use rosa_oidc_core::tags::Tags;

/// ACL granting anonymous read access.
pub const ACL_PUBLIC_READ: &str = "public-read";

/// Builder for a single `aws <service> <command>` invocation.
#[derive(Debug, Clone)]
pub struct AwsCliCommand {
    service: &'static str,
    command: &'static str,
    params: Vec<(&'static str, String)>,
    tags: Option<Tags>,
}

impl AwsCliCommand {
    pub fn s3api(command: &'static str) -> Self {
        Self::new("s3api", command)
    }

    pub fn secrets_manager(command: &'static str) -> Self {
        Self::new("secretsmanager", command)
    }

    fn new(service: &'static str, command: &'static str) -> Self {
        Self {
            service,
            command,
            params: vec![],
            tags: None,
        }
    }

    /// Add `--name value`. Empty values are left out.
    pub fn param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.params.push((name, value));
        }
        self
    }

    /// Add `--tags Key=k,Value=v ...`.
    pub fn tags(mut self, tags: &Tags) -> Self {
        self.tags = Some(tags.clone());
        self
    }

    pub fn build(&self) -> String {
        let mut out = format!("aws {} {}", self.service, self.command);
        for (name, value) in &self.params {
            out.push_str(&format!(" \\\n\t--{} {}", name, value));
        }
        if let Some(tags) = &self.tags {
            let rendered: Vec<String> = tags
                .iter()
                .map(|(k, v)| format!("Key={},Value={}", k, v))
                .collect();
            out.push_str(&format!(" \\\n\t--tags {}", rendered.join(" ")));
        }
        out
    }
}

/// Quote `value` for a POSIX shell unless it is made only of safe characters.
pub fn shell_quote(value: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "-_./:=@+,".contains(c);
    if !value.is_empty() && value.chars().all(safe) {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// `'TagSet=[{Key=k,Value=v},...]'`, as `put-bucket-tagging` expects.
pub fn bucket_tag_set(tags: &Tags) -> String {
    let rendered: Vec<String> = tags
        .iter()
        .map(|(k, v)| format!("{{Key={},Value={}}}", k, v))
        .collect();
    format!("'TagSet=[{}]'", rendered.join(","))
}

/// `'k=v&k2=v2'`, as `put-object --tagging` expects.
pub fn object_tagging(tags: &Tags) -> String {
    let rendered: Vec<String> = tags.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("'{}'", rendered.join("&"))
}

/// Join commands into one copy-pastable block.
pub fn join_commands(commands: &[String]) -> String {
    commands.join("\n\n")
}
