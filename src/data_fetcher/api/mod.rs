pub mod fetch_utils;
pub mod http_client;
pub mod transport;
pub mod urls;

pub use fetch_utils::{Fetcher, HttpFetcher, parse_payload};
pub use http_client::create_http_client;
pub use transport::RetryingTransport;
pub use urls::*;
