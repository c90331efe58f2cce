//! Output datamodel consumed by the downstream provisioning workflow

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One network definition in the provisioning schema.
///
/// `fields` carries every source column that is not renamed by the mapping
/// (`vlan_id`, `vrf`, `dhcp`, `ipam_use`, ...) flattened into the entry
/// under its original key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEntry {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    /// Renamed from the source `vlan_name` column
    pub name: String,
    /// Prefix length taken from the source `IPv4` column
    pub ipv4_cidr: String,
    /// Prefix length taken from the source `IPv6` column
    pub ipv6_cidr: String,
    pub ipam_zone: String,
    /// 1-based position within the owning site's row group
    pub id: u32,
}

/// All networks belonging to one site identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub adhoc_ipam: Vec<NetworkEntry>,
    pub ipam_environment: String,
    pub site_id: String,
}
