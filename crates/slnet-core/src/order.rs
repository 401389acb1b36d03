// ── Subnet ordering ──
//
// Ordering a subnet is a catalog lookup followed by an order call. The
// subnet kind and IP version pick a catalog category (and, for IPv6, a
// description fragment); the first catalog item in that category with the
// requested capacity supplies the price id for the order container.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::CoreError;

/// Package that carries the subnet catalog items.
pub const SUBNET_PACKAGE_ID: i64 = 0;

/// Container type the order service needs to route a subnet order.
pub const SUBNET_ORDER_CONTAINER: &str = "SoftLayer_Container_Product_Order_Network_Subnet";

/// What kind of subnet to order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SubnetKind {
    /// Portable global IP, routable to any server on the account.
    Global,
    /// Public secondary addresses bound to a VLAN.
    Public,
    /// Private secondary addresses bound to a VLAN.
    #[default]
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum IpVersion {
    #[default]
    #[strum(serialize = "4")]
    V4,
    #[strum(serialize = "6")]
    V6,
}

impl IpVersion {
    pub fn number(self) -> u8 {
        match self {
            Self::V4 => 4,
            Self::V6 => 6,
        }
    }
}

impl TryFrom<u8> for IpVersion {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(CoreError::ValidationFailed {
                message: format!("IP version must be 4 or 6, got {other}"),
            }),
        }
    }
}

/// Whether an order is validated only or actually placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    /// `Product_Order::placeOrder` -- billable.
    Place,
    /// `Product_Order::verifyOrder` -- dry run.
    Verify,
}

impl OrderMode {
    pub fn method(self) -> &'static str {
        match self {
            Self::Place => "placeOrder",
            Self::Verify => "verifyOrder",
        }
    }
}

// ── Category selection ──────────────────────────────────────────────

/// Catalog criteria for one (kind, version) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySelection {
    pub category_code: &'static str,
    /// Global subnets are always ordered with quantity 0.
    pub zero_quantity: bool,
    /// Substring the item description must contain, if any.
    pub description: Option<&'static str>,
}

impl CategorySelection {
    pub fn for_subnet(kind: SubnetKind, version: IpVersion) -> Self {
        let (category_code, description) = match (version, kind) {
            (IpVersion::V4, SubnetKind::Global) => ("global_ipv4", None),
            (IpVersion::V4, SubnetKind::Public) => ("sov_sec_ip_addresses_pub", None),
            (IpVersion::V4, SubnetKind::Private) => ("sov_sec_ip_addresses_priv", None),
            (IpVersion::V6, SubnetKind::Global) => ("global_ipv6", Some("Global")),
            (IpVersion::V6, SubnetKind::Public) => ("static_ipv6_addresses", Some("Portable")),
            // No description narrows private v6 items; any capacity match is taken.
            (IpVersion::V6, SubnetKind::Private) => ("static_ipv6_addresses", None),
        };
        Self {
            category_code,
            zero_quantity: kind == SubnetKind::Global,
            description,
        }
    }

    fn matches(&self, item: &CatalogItem, capacity: &str) -> bool {
        item.category_code() == Some(self.category_code)
            && item.capacity_str().as_deref() == Some(capacity)
            && self
                .description
                .is_none_or(|fragment| item.description.contains(fragment))
    }
}

// ── Catalog items ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default)]
    pub item_category: Option<ItemCategory>,
    /// Sent as a decimal string by the catalog, occasionally as a number.
    #[serde(default)]
    pub capacity: Option<Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prices: Vec<ItemPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCategory {
    #[serde(default)]
    pub category_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPrice {
    #[serde(default)]
    pub id: Option<i64>,
}

impl CatalogItem {
    pub fn category_code(&self) -> Option<&str> {
        self.item_category.as_ref()?.category_code.as_deref()
    }

    pub fn capacity_str(&self) -> Option<String> {
        match self.capacity.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.as_u64().map_or_else(|| n.to_string(), |v| v.to_string())),
            _ => None,
        }
    }

    fn first_price_id(&self) -> Option<i64> {
        self.prices.first()?.id
    }
}

/// Price id of the first item matching `selection` at `quantity`.
///
/// Items that match but carry no price are skipped.
pub fn select_price(items: &[CatalogItem], selection: &CategorySelection, quantity: u32) -> Option<i64> {
    let capacity = quantity.to_string();
    items
        .iter()
        .filter(|item| selection.matches(item, &capacity))
        .find_map(CatalogItem::first_price_id)
}

// ── Order request / payload ─────────────────────────────────────────

/// Parameters for [`add_subnet`](crate::NetworkManager::add_subnet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSubnetRequest {
    pub kind: SubnetKind,
    /// Number of addresses. Required unless the kind is global.
    pub quantity: Option<u32>,
    /// VLAN to route the subnet to. Required unless the kind is global.
    pub vlan_id: Option<i64>,
    pub version: IpVersion,
    /// Verify the order instead of placing it.
    pub test_order: bool,
}

impl AddSubnetRequest {
    pub fn new(kind: SubnetKind) -> Self {
        Self {
            kind,
            quantity: None,
            vlan_id: None,
            version: IpVersion::V4,
            test_order: false,
        }
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn vlan_id(mut self, vlan_id: i64) -> Self {
        self.vlan_id = Some(vlan_id);
        self
    }

    pub fn version(mut self, version: IpVersion) -> Self {
        self.version = version;
        self
    }

    pub fn test_order(mut self, test_order: bool) -> Self {
        self.test_order = test_order;
        self
    }

    pub fn mode(&self) -> OrderMode {
        if self.test_order {
            OrderMode::Verify
        } else {
            OrderMode::Place
        }
    }

    pub fn selection(&self) -> CategorySelection {
        CategorySelection::for_subnet(self.kind, self.version)
    }

    /// Quantity to look up in the catalog (0 for global subnets).
    pub fn effective_quantity(&self) -> Result<u32, CoreError> {
        if self.selection().zero_quantity {
            return Ok(0);
        }
        self.quantity.ok_or_else(|| CoreError::ValidationFailed {
            message: format!("quantity is required for {} subnets", self.kind),
        })
    }

    /// Endpoint VLAN for the order; global subnets have none.
    pub fn endpoint_vlan(&self) -> Result<Option<i64>, CoreError> {
        if self.kind == SubnetKind::Global {
            return Ok(None);
        }
        self.vlan_id
            .map(Some)
            .ok_or_else(|| CoreError::ValidationFailed {
                message: format!("vlan_id is required for {} subnets", self.kind),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRef {
    pub id: i64,
}

/// Order container submitted to `Product_Order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetOrder {
    pub complex_type: &'static str,
    pub package_id: i64,
    pub prices: Vec<PriceRef>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point_vlan_id: Option<i64>,
}

impl SubnetOrder {
    pub fn new(price_id: i64, end_point_vlan_id: Option<i64>) -> Self {
        Self {
            complex_type: SUBNET_ORDER_CONTAINER,
            package_id: SUBNET_PACKAGE_ID,
            prices: vec![PriceRef { id: price_id }],
            quantity: 1,
            end_point_vlan_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn items(raw: Value) -> Vec<CatalogItem> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn category_table() {
        let cases = [
            (SubnetKind::Global, IpVersion::V4, "global_ipv4", true, None),
            (SubnetKind::Public, IpVersion::V4, "sov_sec_ip_addresses_pub", false, None),
            (SubnetKind::Private, IpVersion::V4, "sov_sec_ip_addresses_priv", false, None),
            (SubnetKind::Global, IpVersion::V6, "global_ipv6", true, Some("Global")),
            (SubnetKind::Public, IpVersion::V6, "static_ipv6_addresses", false, Some("Portable")),
            (SubnetKind::Private, IpVersion::V6, "static_ipv6_addresses", false, None),
        ];
        for (kind, version, code, zero, desc) in cases {
            let sel = CategorySelection::for_subnet(kind, version);
            assert_eq!(sel.category_code, code, "{kind} v{version}");
            assert_eq!(sel.zero_quantity, zero, "{kind} v{version}");
            assert_eq!(sel.description, desc, "{kind} v{version}");
        }
    }

    #[test]
    fn subnet_kind_parses_case_insensitively() {
        assert_eq!("GLOBAL".parse::<SubnetKind>().unwrap(), SubnetKind::Global);
        assert_eq!("private".parse::<SubnetKind>().unwrap(), SubnetKind::Private);
        assert!("portable".parse::<SubnetKind>().is_err());
    }

    #[test]
    fn select_price_takes_first_capacity_match() {
        let catalog = items(json!([
            { "itemCategory": { "categoryCode": "sov_sec_ip_addresses_pub" }, "capacity": "8", "prices": [{ "id": 10 }] },
            { "itemCategory": { "categoryCode": "sov_sec_ip_addresses_pub" }, "capacity": "4", "prices": [{ "id": 11 }, { "id": 99 }] },
            { "itemCategory": { "categoryCode": "sov_sec_ip_addresses_pub" }, "capacity": "4", "prices": [{ "id": 12 }] },
        ]));
        let sel = CategorySelection::for_subnet(SubnetKind::Public, IpVersion::V4);
        assert_eq!(select_price(&catalog, &sel, 4), Some(11));
    }

    #[test]
    fn select_price_requires_description_for_v6_public() {
        let catalog = items(json!([
            { "itemCategory": { "categoryCode": "static_ipv6_addresses" }, "capacity": "64", "description": "/64 Block Static Public IP Addresses", "prices": [{ "id": 20 }] },
            { "itemCategory": { "categoryCode": "static_ipv6_addresses" }, "capacity": "64", "description": "/64 Block Portable Public IPv6 Addresses", "prices": [{ "id": 21 }] },
        ]));
        let public = CategorySelection::for_subnet(SubnetKind::Public, IpVersion::V6);
        assert_eq!(select_price(&catalog, &public, 64), Some(21));

        let private = CategorySelection::for_subnet(SubnetKind::Private, IpVersion::V6);
        assert_eq!(select_price(&catalog, &private, 64), Some(20));
    }

    #[test]
    fn select_price_accepts_numeric_capacity_and_skips_priceless_items() {
        let catalog = items(json!([
            { "itemCategory": { "categoryCode": "global_ipv4" }, "capacity": 0, "prices": [] },
            { "itemCategory": { "categoryCode": "global_ipv4" }, "capacity": 0, "prices": [{ "id": 30 }] },
        ]));
        let sel = CategorySelection::for_subnet(SubnetKind::Global, IpVersion::V4);
        assert_eq!(select_price(&catalog, &sel, 0), Some(30));
    }

    #[test]
    fn select_price_none_without_match() {
        let catalog = items(json!([
            { "itemCategory": { "categoryCode": "sov_sec_ip_addresses_priv" }, "capacity": "16", "prices": [{ "id": 40 }] },
            { "capacity": "4", "prices": [{ "id": 41 }] },
        ]));
        let sel = CategorySelection::for_subnet(SubnetKind::Private, IpVersion::V4);
        assert_eq!(select_price(&catalog, &sel, 4), None);
    }

    #[test]
    fn global_requests_ignore_quantity_and_vlan() {
        let req = AddSubnetRequest::new(SubnetKind::Global).quantity(8).vlan_id(5);
        assert_eq!(req.effective_quantity().unwrap(), 0);
        assert_eq!(req.endpoint_vlan().unwrap(), None);
    }

    #[test]
    fn non_global_requests_need_quantity_and_vlan() {
        let req = AddSubnetRequest::new(SubnetKind::Public);
        assert!(matches!(
            req.effective_quantity(),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            req.endpoint_vlan(),
            Err(CoreError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn order_payload_shape() {
        let order = SubnetOrder::new(11, Some(5555));
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "complexType": "SoftLayer_Container_Product_Order_Network_Subnet",
                "packageId": 0,
                "prices": [{ "id": 11 }],
                "quantity": 1,
                "endPointVlanId": 5555
            })
        );

        let global = serde_json::to_value(SubnetOrder::new(30, None)).unwrap();
        assert!(global.get("endPointVlanId").is_none());
    }

    #[test]
    fn ip_version_from_number() {
        assert_eq!(IpVersion::try_from(6).unwrap(), IpVersion::V6);
        assert!(IpVersion::try_from(5).is_err());
    }
}
