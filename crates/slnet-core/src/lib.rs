// slnet-core: network manager facade over the SoftLayer service API.

pub mod error;
pub mod identifier;
pub mod manager;
pub mod masks;
pub mod order;
pub mod query;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use identifier::{SubnetRef, SubnetResolver};
pub use manager::NetworkManager;
pub use order::{
    AddSubnetRequest, CatalogItem, CategorySelection, IpVersion, OrderMode, SubnetKind,
    SubnetOrder,
};
pub use query::{SubnetFilter, SubnetQuery, VlanFilter, VlanQuery};
pub use summary::DatacenterSummary;

// The call vocabulary callers need alongside the manager.
pub use slnet_api::{CallOptions, ObjectFilter, ObjectMask, Service, ServiceCall, ServiceProvider};
