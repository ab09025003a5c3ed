/// Network adapters for the catalog REST API
mod authentication_client;
mod caching_license_adapter;
mod reqwest_transport;

pub use authentication_client::{AccessToken, AuthenticationClient};
pub use caching_license_adapter::CachingLicenseAdapter;
pub use reqwest_transport::ReqwestTransport;

use crate::config::ClientConfig;
use crate::shared::Result;

/// Client builder shared by the transport and the authentication client
///
/// Applies the user agent, the per-request timeout and the proxy.
fn http_client_builder(config: &ClientConfig) -> Result<reqwest::ClientBuilder> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("sw360-adapter/{}", version);
    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(user_agent);

    if let Some(proxy_url) = config.proxy.url() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }

    Ok(builder)
}
