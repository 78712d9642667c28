//! Resource tags applied to everything this tool creates.

use std::collections::BTreeMap;

/// Tag key marking a resource as created by this tool.
pub const RED_HAT_MANAGED: &str = "red-hat-managed";

/// Value paired with [`RED_HAT_MANAGED`].
pub const TRUE: &str = "true";

/// Ordered tag set, so rendered commands are stable.
pub type Tags = BTreeMap<String, String>;

/// The fixed tag set stamped on buckets, objects and secrets.
pub fn managed() -> Tags {
    let mut tags = Tags::new();
    tags.insert(RED_HAT_MANAGED.to_string(), TRUE.to_string());
    tags
}
