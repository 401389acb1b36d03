// Service calls and the provider seam
//
// Every remote operation is addressed as `{service}::{method}` on an
// optional object id, with positional arguments plus the response-level
// options (mask, filter, pagination). `ServiceProvider` is the only thing
// a transport has to implement; everything above it speaks `ServiceCall`.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::Error;
use crate::filter::ObjectFilter;
use crate::mask::ObjectMask;

/// Remote services used by the network tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum Service {
    #[strum(serialize = "SoftLayer_Account")]
    Account,
    #[strum(serialize = "SoftLayer_Network_Vlan")]
    NetworkVlan,
    #[strum(serialize = "SoftLayer_Network_Subnet")]
    NetworkSubnet,
    #[strum(serialize = "SoftLayer_Network_Subnet_IpAddress")]
    NetworkSubnetIpAddress,
    #[strum(serialize = "SoftLayer_Product_Package")]
    ProductPackage,
    #[strum(serialize = "SoftLayer_Product_Order")]
    ProductOrder,
    #[strum(serialize = "SoftLayer_Billing_Item")]
    BillingItem,
}

impl Service {
    /// Full service name as used on the wire (`SoftLayer_Network_Vlan`).
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Response-level arguments accepted by every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOptions {
    pub mask: Option<ObjectMask>,
    pub filter: Option<ObjectFilter>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mask(mut self, mask: impl Into<ObjectMask>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    pub fn with_filter(mut self, filter: ObjectFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// A fully-described remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    pub service: Service,
    pub method: String,
    /// Object id the method is invoked on (the init parameter).
    pub id: Option<i64>,
    /// Positional method arguments.
    pub args: Vec<Value>,
    pub options: CallOptions,
}

impl ServiceCall {
    pub fn new(service: Service, method: impl Into<String>) -> Self {
        Self {
            service,
            method: method.into(),
            id: None,
            args: Vec::new(),
            options: CallOptions::default(),
        }
    }
}

/// Anything that can execute a [`ServiceCall`] and hand back decoded JSON.
///
/// Authentication, serialization and transport errors are the provider's
/// business; callers see a `Value` or an [`Error`].
pub trait ServiceProvider: Send + Sync {
    fn call(&self, call: ServiceCall) -> impl Future<Output = Result<Value, Error>> + Send;
}

// ── Named service proxy ─────────────────────────────────────────────

/// A provider bound to one service name.
#[derive(Debug)]
pub struct ServiceHandle<C> {
    client: Arc<C>,
    service: Service,
}

impl<C> Clone for ServiceHandle<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            service: self.service,
        }
    }
}

impl<C: ServiceProvider> ServiceHandle<C> {
    pub fn new(client: Arc<C>, service: Service) -> Self {
        Self { client, service }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    /// Start building a call to `method` on this service.
    pub fn call(&self, method: impl Into<String>) -> CallBuilder<'_, C> {
        CallBuilder {
            client: &self.client,
            call: ServiceCall::new(self.service, method),
        }
    }
}

/// Builder returned by [`ServiceHandle::call`].
#[must_use = "a call does nothing until `send` is awaited"]
pub struct CallBuilder<'a, C> {
    client: &'a C,
    call: ServiceCall,
}

impl<C: ServiceProvider> CallBuilder<'_, C> {
    pub fn id(mut self, id: i64) -> Self {
        self.call.id = Some(id);
        self
    }

    pub fn arg(mut self, arg: Value) -> Self {
        self.call.args.push(arg);
        self
    }

    /// Replace all response-level options at once.
    pub fn options(mut self, options: CallOptions) -> Self {
        self.call.options = options;
        self
    }

    pub fn mask(mut self, mask: impl Into<ObjectMask>) -> Self {
        self.call.options.mask = Some(mask.into());
        self
    }

    pub fn filter(mut self, filter: ObjectFilter) -> Self {
        self.call.options.filter = Some(filter);
        self
    }

    /// The call as it would be sent.
    pub fn build(self) -> ServiceCall {
        self.call
    }

    pub async fn send(self) -> Result<Value, Error> {
        self.client.call(self.call).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Noop;

    impl ServiceProvider for Noop {
        async fn call(&self, _call: ServiceCall) -> Result<Value, Error> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn service_names_carry_the_wire_prefix() {
        assert_eq!(Service::NetworkVlan.name(), "SoftLayer_Network_Vlan");
        assert_eq!(Service::Account.to_string(), "SoftLayer_Account");
        assert_eq!(
            "SoftLayer_Billing_Item".parse::<Service>().unwrap(),
            Service::BillingItem
        );
    }

    #[test]
    fn builder_accumulates_call_parts() {
        let handle = ServiceHandle::new(Arc::new(Noop), Service::NetworkSubnet);
        let call = handle
            .call("getObject")
            .options(CallOptions::new().with_limit(10))
            .id(42)
            .mask("id")
            .build();

        assert_eq!(call.service, Service::NetworkSubnet);
        assert_eq!(call.method, "getObject");
        assert_eq!(call.id, Some(42));
        assert!(call.args.is_empty());
        assert_eq!(call.options.mask, Some(ObjectMask::raw("id")));
        assert_eq!(call.options.limit, Some(10));
    }
}
