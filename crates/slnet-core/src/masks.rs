// ── Standard object masks ──
//
// The relational properties the manager hydrates by default. Callers that
// pass their own mask get exactly that mask; these lists are never merged
// into it.

use slnet_api::ObjectMask;

const SUBNET_FIELDS: &[&str] = &["hardware", "datacenter", "ipAddressCount", "virtualGuests"];

const VLAN_FIELDS: &[&str] = &[
    "firewallInterfaces",
    "hardware",
    "networkComponents",
    "primaryRouter[id, fullyQualifiedDomainName, datacenter]",
    "subnets",
    "totalPrimaryIpAddressCount",
    "virtualGuests",
];

const IP_LOOKUP_FIELDS: &[&str] = &["hardware", "virtualGuest"];

/// Default mask for subnet fetches and listings.
pub fn subnet_mask() -> ObjectMask {
    ObjectMask::fields(SUBNET_FIELDS.iter().copied())
}

/// Mask used for every VLAN fetch and listing.
pub fn vlan_mask() -> ObjectMask {
    ObjectMask::fields(VLAN_FIELDS.iter().copied())
}

/// Ownership details for an IP address lookup.
pub fn ip_lookup_mask() -> ObjectMask {
    ObjectMask::fields(IP_LOOKUP_FIELDS.iter().copied())
}

/// Catalog items with their category, used to pick subnet prices.
pub(crate) fn catalog_item_mask() -> ObjectMask {
    ObjectMask::fields(["itemCategory"])
}

/// Just enough of a subnet to find its billing item.
pub(crate) fn billing_item_mask() -> ObjectMask {
    ObjectMask::raw("mask[id, billingItem.id]")
}

/// Identifier-resolution lookups only need the id.
pub(crate) fn id_only_mask() -> ObjectMask {
    ObjectMask::raw("id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subnet_mask_renders_standard_fields() {
        assert_eq!(
            subnet_mask().to_string(),
            "mask[hardware,datacenter,ipAddressCount,virtualGuests]"
        );
    }

    #[test]
    fn vlan_mask_renders_standard_fields() {
        assert_eq!(
            vlan_mask().to_string(),
            "mask[firewallInterfaces,hardware,networkComponents,\
             primaryRouter[id, fullyQualifiedDomainName, datacenter],\
             subnets,totalPrimaryIpAddressCount,virtualGuests]"
        );
    }

    #[test]
    fn ip_lookup_mask_renders() {
        assert_eq!(ip_lookup_mask().to_string(), "mask[hardware,virtualGuest]");
    }
}
