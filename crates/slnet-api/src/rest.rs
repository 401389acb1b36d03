// REST transport
//
// Maps a `ServiceCall` onto the JSON REST endpoint:
//
//   {endpoint}/{service}[/{id}]/{method}.json?objectMask=..&objectFilter=..&resultLimit=o,l
//
// Calls with positional arguments are POSTed as `{"parameters": [...]}`;
// everything else is a GET. Faults come back as `{"error", "code"}` bodies.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::service::{ServiceCall, ServiceProvider};
use crate::transport::TransportConfig;

/// Public REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.softlayer.com/rest/v3.1/";

/// Fault body returned by the REST endpoint on failure.
#[derive(Debug, Deserialize)]
struct ApiFault {
    error: String,
    #[serde(default)]
    code: Option<String>,
}

/// Everything needed to build a [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub endpoint: Url,
    pub username: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
}

/// HTTP client for the REST endpoint, authenticating with username + API key.
pub struct RestClient {
    http: reqwest::Client,
    endpoint: Url,
    username: String,
    api_key: SecretString,
    timeout: Duration,
}

impl RestClient {
    pub fn new(config: RestConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        let client = Self::with_client(
            http,
            config.endpoint,
            config.username,
            config.api_key,
        );
        Ok(Self {
            timeout: config.transport.timeout,
            ..client
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// Timeouts are reported against the default transport timeout.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: Url,
        username: String,
        api_key: SecretString,
    ) -> Self {
        Self {
            http,
            endpoint,
            username,
            api_key,
            timeout: TransportConfig::default().timeout,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Build the request URL, including mask/filter/pagination query params.
    pub(crate) fn call_url(&self, call: &ServiceCall) -> Result<Url, Error> {
        let mut path = format!(
            "{}/{}",
            self.endpoint.as_str().trim_end_matches('/'),
            call.service
        );
        if let Some(id) = call.id {
            path.push_str(&format!("/{id}"));
        }
        path.push_str(&format!("/{}.json", call.method));

        let mut url = Url::parse(&path)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(ref mask) = call.options.mask {
                query.append_pair("objectMask", &mask.to_string());
            }
            if let Some(ref filter) = call.options.filter {
                let encoded = serde_json::to_string(filter).map_err(|e| {
                    Error::Deserialization {
                        message: format!("failed to encode object filter: {e}"),
                        body: String::new(),
                    }
                })?;
                query.append_pair("objectFilter", &encoded);
            }
            if let Some(limit) = call.options.limit {
                let offset = call.options.offset.unwrap_or(0);
                query.append_pair("resultLimit", &format!("{offset},{limit}"));
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    fn send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn parse_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;
        trace!(status = status.as_u16(), body = %body, "response body");

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }

        let fault = serde_json::from_str::<ApiFault>(&body).ok();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: fault.map_or_else(|| "invalid username or API key".into(), |f| f.error),
            });
        }

        Err(match fault {
            Some(fault) => Error::Api {
                message: fault.error,
                code: fault.code,
                status: status.as_u16(),
            },
            None => Error::Api {
                message: if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
                code: None,
                status: status.as_u16(),
            },
        })
    }
}

impl ServiceProvider for RestClient {
    async fn call(&self, call: ServiceCall) -> Result<Value, Error> {
        let url = self.call_url(&call)?;
        debug!(
            service = %call.service,
            method = %call.method,
            id = ?call.id,
            "calling service"
        );

        let request = if call.args.is_empty() {
            self.http.get(url)
        } else {
            self.http
                .post(url)
                .json(&json!({ "parameters": call.args }))
        };

        let resp = request
            .basic_auth(&self.username, Some(self.api_key.expose_secret()))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        Self::parse_response(resp).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::filter::{ObjectFilter, query_filter};
    use crate::mask::ObjectMask;
    use crate::service::{CallOptions, Service};

    fn client() -> RestClient {
        RestClient::with_client(
            reqwest::Client::new(),
            Url::parse(DEFAULT_ENDPOINT).unwrap(),
            "user".into(),
            SecretString::from("key".to_owned()),
        )
    }

    #[test]
    fn url_without_options_has_no_query() {
        let mut call = ServiceCall::new(Service::NetworkVlan, "getObject");
        call.id = Some(1234);
        let url = client().call_url(&call).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.softlayer.com/rest/v3.1/SoftLayer_Network_Vlan/1234/getObject.json"
        );
    }

    #[test]
    fn url_encodes_mask_filter_and_limit() {
        let mut call = ServiceCall::new(Service::Account, "getSubnets");
        call.options = CallOptions::new()
            .with_mask(ObjectMask::fields(["id"]))
            .with_filter(ObjectFilter::new().with(&["subnets", "version"], query_filter(4_u8)))
            .with_limit(25)
            .with_offset(50);
        let url = client().call_url(&call).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("objectMask".to_owned(), "mask[id]".to_owned()),
                (
                    "objectFilter".to_owned(),
                    r#"{"subnets":{"version":{"operation":4}}}"#.to_owned()
                ),
                ("resultLimit".to_owned(), "50,25".to_owned()),
            ]
        );
    }
}
