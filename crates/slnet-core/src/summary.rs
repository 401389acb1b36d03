// ── Per-datacenter network summary ──
//
// Folds VLAN records (fetched with the standard VLAN mask) into counters
// keyed by datacenter name. Only datacenters that own at least one VLAN
// appear in the result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Object counts for one datacenter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterSummary {
    pub hardware_count: u64,
    pub networking_count: u64,
    pub primary_ip_count: u64,
    pub subnet_count: u64,
    pub virtual_guest_count: u64,
    pub vlan_count: u64,
}

/// The slice of a VLAN record the summary reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VlanRecord {
    primary_router: PrimaryRouter,
    #[serde(default)]
    hardware: Vec<Value>,
    #[serde(default)]
    network_components: Vec<Value>,
    #[serde(default)]
    subnets: Vec<Value>,
    #[serde(default)]
    virtual_guests: Vec<Value>,
    #[serde(default)]
    total_primary_ip_address_count: u64,
}

#[derive(Debug, Deserialize)]
struct PrimaryRouter {
    datacenter: Datacenter,
}

#[derive(Debug, Deserialize)]
struct Datacenter {
    name: String,
}

impl DatacenterSummary {
    fn add(&mut self, vlan: &VlanRecord) {
        self.vlan_count += 1;
        self.hardware_count += len_u64(&vlan.hardware);
        self.networking_count += len_u64(&vlan.network_components);
        self.primary_ip_count += vlan.total_primary_ip_address_count;
        self.subnet_count += len_u64(&vlan.subnets);
        self.virtual_guest_count += len_u64(&vlan.virtual_guests);
    }
}

fn len_u64(items: &[Value]) -> u64 {
    u64::try_from(items.len()).unwrap_or(u64::MAX)
}

/// Group a VLAN listing by `primaryRouter.datacenter.name`.
pub fn summarize(vlans: Value) -> Result<BTreeMap<String, DatacenterSummary>, CoreError> {
    let records: Vec<VlanRecord> = match vlans {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)?,
    };

    let mut datacenters: BTreeMap<String, DatacenterSummary> = BTreeMap::new();
    for vlan in &records {
        datacenters
            .entry(vlan.primary_router.datacenter.name.clone())
            .or_default()
            .add(vlan);
    }
    Ok(datacenters)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn vlan(dc: &str, hardware: usize) -> Value {
        json!({
            "primaryRouter": { "id": 1, "datacenter": { "name": dc } },
            "hardware": vec![json!({}); hardware],
            "networkComponents": [{}],
            "subnets": [{}, {}],
            "virtualGuests": [],
            "totalPrimaryIpAddressCount": 3
        })
    }

    #[test]
    fn groups_and_sums_by_datacenter() {
        let result = summarize(json!([vlan("dal05", 2), vlan("dal05", 3), vlan("sjc01", 1)])).unwrap();

        assert_eq!(result.len(), 2);
        let dal = result["dal05"];
        assert_eq!(dal.hardware_count, 5);
        assert_eq!(dal.vlan_count, 2);
        assert_eq!(dal.networking_count, 2);
        assert_eq!(dal.subnet_count, 4);
        assert_eq!(dal.primary_ip_count, 6);
        assert_eq!(dal.virtual_guest_count, 0);

        let sjc = result["sjc01"];
        assert_eq!(sjc.hardware_count, 1);
        assert_eq!(sjc.vlan_count, 1);
    }

    #[test]
    fn empty_listing_is_empty_summary() {
        assert!(summarize(json!([])).unwrap().is_empty());
        assert!(summarize(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn missing_collections_count_as_zero() {
        let result = summarize(json!([{ "primaryRouter": { "datacenter": { "name": "ams01" } } }])).unwrap();
        assert_eq!(
            result["ams01"],
            DatacenterSummary {
                vlan_count: 1,
                ..DatacenterSummary::default()
            }
        );
    }

    #[test]
    fn vlan_without_datacenter_is_a_decode_error() {
        let err = summarize(json!([{ "primaryRouter": { "id": 9 } }])).unwrap_err();
        assert!(matches!(err, CoreError::Decode { .. }));
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(DatacenterSummary::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "hardwareCount": 0,
                "networkingCount": 0,
                "primaryIpCount": 0,
                "subnetCount": 0,
                "virtualGuestCount": 0,
                "vlanCount": 0
            })
        );
    }
}
