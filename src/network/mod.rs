pub mod http_client;
pub mod types;

pub use http_client::{build_client, create_http_fetch_fn, send_request};
pub use types::{HttpMethod, NetworkConfig, NetworkError};
