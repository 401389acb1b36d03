// ── Network manager ──
//
// Facade over the Account, Network_Vlan and Network_Subnet services (plus
// the catalog, ordering, billing and IP-address services for the
// operations that need them). Each method shapes a mask/filter/payload and
// makes one call; `add_subnet`, `cancel_subnet` and identifier resolution
// make two. Responses come back as the provider decoded them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use slnet_api::{CallOptions, Service, ServiceHandle, ServiceProvider};

use crate::error::CoreError;
use crate::identifier::{SubnetRef, SubnetResolver};
use crate::masks;
use crate::order::{AddSubnetRequest, CatalogItem, SUBNET_PACKAGE_ID, SubnetOrder, select_price};
use crate::query::{SubnetQuery, VlanQuery};
use crate::summary::{DatacenterSummary, summarize};

/// Manage VLANs, subnets and IP addresses on an account.
pub struct NetworkManager<C> {
    client: Arc<C>,
    account: ServiceHandle<C>,
    vlan: ServiceHandle<C>,
    subnet: ServiceHandle<C>,
    subnet_resolvers: Vec<SubnetResolver>,
}

impl<C: ServiceProvider> NetworkManager<C> {
    /// Wrap an already-authenticated service provider.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            account: ServiceHandle::new(Arc::clone(&client), Service::Account),
            vlan: ServiceHandle::new(Arc::clone(&client), Service::NetworkVlan),
            subnet: ServiceHandle::new(Arc::clone(&client), Service::NetworkSubnet),
            subnet_resolvers: vec![SubnetResolver::NetworkIdentifier],
            client,
        }
    }

    /// The provider this manager sends calls through.
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }

    fn service(&self, service: Service) -> ServiceHandle<C> {
        ServiceHandle::new(Arc::clone(&self.client), service)
    }

    // ── Ordering ─────────────────────────────────────────────────────

    /// Order (or verify an order for) a new subnet.
    ///
    /// Returns `Ok(None)` when the catalog has no item for the requested
    /// kind, version and quantity; no order call is made in that case.
    /// Unless `test_order` is set this places a billable order.
    pub async fn add_subnet(&self, request: &AddSubnetRequest) -> Result<Option<Value>, CoreError> {
        let selection = request.selection();
        let quantity = request.effective_quantity()?;
        let end_point_vlan_id = request.endpoint_vlan()?;

        let items = self
            .service(Service::ProductPackage)
            .call("getItems")
            .id(SUBNET_PACKAGE_ID)
            .mask(masks::catalog_item_mask())
            .send()
            .await?;
        let items: Vec<CatalogItem> = match items {
            Value::Null => Vec::new(),
            other => serde_json::from_value(other)?,
        };

        let Some(price_id) = select_price(&items, &selection, quantity) else {
            debug!(
                category = selection.category_code,
                quantity, "no catalog price for subnet"
            );
            return Ok(None);
        };

        let order = SubnetOrder::new(price_id, end_point_vlan_id);
        let mode = request.mode();
        debug!(price_id, method = mode.method(), "submitting subnet order");

        let resp = self
            .service(Service::ProductOrder)
            .call(mode.method())
            .arg(serde_json::to_value(&order)?)
            .send()
            .await?;
        Ok(Some(resp))
    }

    /// Cancel a subnet through its billing item.
    pub async fn cancel_subnet(&self, id: impl Into<SubnetRef>) -> Result<Value, CoreError> {
        let subnet = self
            .get_subnet(id, CallOptions::new().with_mask(masks::billing_item_mask()))
            .await?;
        let billing_id = subnet
            .pointer("/billingItem/id")
            .and_then(Value::as_i64)
            .ok_or(CoreError::MissingField {
                field: "billingItem.id",
            })?;

        debug!(billing_id, "cancelling subnet billing item");
        let resp = self
            .service(Service::BillingItem)
            .call("cancelService")
            .id(billing_id)
            .send()
            .await?;
        Ok(resp)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    /// Ownership information for an IPv4 or IPv6 address.
    pub async fn ip_lookup(&self, ip: &str) -> Result<Value, CoreError> {
        let resp = self
            .service(Service::NetworkSubnetIpAddress)
            .call("getByIpAddress")
            .arg(json!(ip))
            .mask(masks::ip_lookup_mask())
            .send()
            .await?;
        Ok(resp)
    }

    /// A single VLAN, with the standard VLAN mask.
    pub async fn get_vlan(&self, id: i64) -> Result<Value, CoreError> {
        let resp = self
            .vlan
            .call("getObject")
            .id(id)
            .mask(masks::vlan_mask())
            .send()
            .await?;
        Ok(resp)
    }

    /// A single subnet by id or network identifier.
    ///
    /// Uses the standard subnet mask unless `options` carries one.
    pub async fn get_subnet(
        &self,
        id: impl Into<SubnetRef>,
        mut options: CallOptions,
    ) -> Result<Value, CoreError> {
        if options.mask.is_none() {
            options.mask = Some(masks::subnet_mask());
        }
        let id = self.resolve_subnet_id(&id.into()).await?;

        let resp = self
            .subnet
            .call("getObject")
            .options(options)
            .id(id)
            .send()
            .await?;
        Ok(resp)
    }

    // ── Listings ─────────────────────────────────────────────────────

    /// VLANs on the account, optionally narrowed by datacenter and number.
    ///
    /// Uses the standard VLAN mask unless `options` carries one; criteria
    /// are merged into any filter already present in `options`.
    pub async fn list_vlans(&self, query: &VlanQuery, mut options: CallOptions) -> Result<Value, CoreError> {
        let mut filter = options.filter.take().unwrap_or_default();
        query.apply(&mut filter);
        options.filter = Some(filter);
        self.get_vlans(options).await
    }

    /// Subnets on the account, optionally narrowed by identifier,
    /// datacenter and IP version.
    pub async fn list_subnets(
        &self,
        query: &SubnetQuery,
        mut options: CallOptions,
    ) -> Result<Value, CoreError> {
        if options.mask.is_none() {
            options.mask = Some(masks::subnet_mask());
        }
        let mut filter = options.filter.take().unwrap_or_default();
        query.apply(&mut filter);
        options.filter = Some(filter);

        let resp = self.account.call("getSubnets").options(options).send().await?;
        Ok(resp)
    }

    /// Object counts for every datacenter that has VLANs on the account.
    pub async fn summary_by_datacenter(&self) -> Result<BTreeMap<String, DatacenterSummary>, CoreError> {
        let vlans = self.get_vlans(CallOptions::new()).await?;
        summarize(vlans)
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn get_vlans(&self, mut options: CallOptions) -> Result<Value, CoreError> {
        if options.mask.is_none() {
            options.mask = Some(masks::vlan_mask());
        }
        let resp = self
            .account
            .call("getNetworkVlans")
            .options(options)
            .send()
            .await?;
        Ok(resp)
    }

    async fn resolve_subnet_id(&self, subnet: &SubnetRef) -> Result<i64, CoreError> {
        let identifier = match subnet {
            SubnetRef::Id(id) => return Ok(*id),
            SubnetRef::Identifier(identifier) => identifier,
        };

        for resolver in &self.subnet_resolvers {
            let ids = self.resolve_with(*resolver, identifier).await?;
            if let Some(&id) = ids.first() {
                debug!(identifier = %identifier, id, "resolved subnet identifier");
                return Ok(id);
            }
        }

        Err(CoreError::NotFound {
            entity_type: "subnet",
            identifier: identifier.clone(),
        })
    }

    async fn resolve_with(&self, resolver: SubnetResolver, identifier: &str) -> Result<Vec<i64>, CoreError> {
        match resolver {
            SubnetResolver::NetworkIdentifier => {
                let results = self
                    .list_subnets(
                        &SubnetQuery::new().identifier(identifier),
                        CallOptions::new().with_mask(masks::id_only_mask()),
                    )
                    .await?;
                Ok(results
                    .as_array()
                    .map(|subnets| {
                        subnets
                            .iter()
                            .filter_map(|s| s.get("id").and_then(Value::as_i64))
                            .collect()
                    })
                    .unwrap_or_default())
            }
        }
    }
}

impl<C> Clone for NetworkManager<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            account: self.account.clone(),
            vlan: self.vlan.clone(),
            subnet: self.subnet.clone(),
            subnet_resolvers: self.subnet_resolvers.clone(),
        }
    }
}
