// ── Listing criteria ──
//
// Each entity has a fixed set of filterable paths. Criteria are layered on
// top of whatever filter the caller supplied: sibling keys survive, and a
// criterion wins only on its own leaf.

use slnet_api::{ObjectFilter, query_filter};

use crate::order::IpVersion;

/// Filterable VLAN paths under `Account::getNetworkVlans`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanFilter {
    VlanNumber,
    DatacenterName,
}

impl VlanFilter {
    pub fn path(self) -> &'static [&'static str] {
        match self {
            Self::VlanNumber => &["networkVlans", "vlanNumber"],
            Self::DatacenterName => &["networkVlans", "primaryRouter", "datacenter", "name"],
        }
    }
}

/// Filterable subnet paths under `Account::getSubnets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetFilter {
    NetworkIdentifier,
    DatacenterName,
    Version,
}

impl SubnetFilter {
    pub fn path(self) -> &'static [&'static str] {
        match self {
            Self::NetworkIdentifier => &["subnets", "networkIdentifier"],
            Self::DatacenterName => &["subnets", "datacenter", "name"],
            Self::Version => &["subnets", "version"],
        }
    }
}

/// Criteria for [`list_vlans`](crate::NetworkManager::list_vlans).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanQuery {
    /// Datacenter short name, e.g. `dal05`. Wildcards (`dal*`) are passed through.
    pub datacenter: Option<String>,
    pub vlan_number: Option<u32>,
}

impl VlanQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    pub fn vlan_number(mut self, vlan_number: u32) -> Self {
        self.vlan_number = Some(vlan_number);
        self
    }

    pub(crate) fn apply(&self, filter: &mut ObjectFilter) {
        if let Some(number) = self.vlan_number {
            filter.set(VlanFilter::VlanNumber.path(), query_filter(number));
        }
        if let Some(ref datacenter) = self.datacenter {
            filter.set(
                VlanFilter::DatacenterName.path(),
                query_filter(datacenter.as_str()),
            );
        }
    }
}

/// Criteria for [`list_subnets`](crate::NetworkManager::list_subnets).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubnetQuery {
    /// Network identifier, e.g. `10.0.0.0`.
    pub identifier: Option<String>,
    pub datacenter: Option<String>,
    pub version: Option<IpVersion>,
}

impl SubnetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    pub fn version(mut self, version: IpVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub(crate) fn apply(&self, filter: &mut ObjectFilter) {
        if let Some(ref identifier) = self.identifier {
            filter.set(
                SubnetFilter::NetworkIdentifier.path(),
                query_filter(identifier.as_str()),
            );
        }
        if let Some(ref datacenter) = self.datacenter {
            filter.set(
                SubnetFilter::DatacenterName.path(),
                query_filter(datacenter.as_str()),
            );
        }
        if let Some(version) = self.version {
            filter.set(SubnetFilter::Version.path(), query_filter(version.number()));
        }
    }
}
