// slnet-api: service-call vocabulary and REST transport for the SoftLayer API

pub mod error;
pub mod filter;
pub mod mask;
pub mod rest;
pub mod service;
pub mod transport;

pub use error::Error;
pub use filter::{InvalidFilter, ObjectFilter, Query, query_filter};
pub use mask::ObjectMask;
pub use rest::{DEFAULT_ENDPOINT, RestClient, RestConfig};
pub use service::{CallBuilder, CallOptions, Service, ServiceCall, ServiceHandle, ServiceProvider};
pub use transport::{TlsMode, TransportConfig};
