//! HTTP transport for the Puter driver-call endpoint.

mod http;

pub use http::{
    DriverCall, HttpTransport, TransportError, CLIENT_ORIGIN, CLIENT_REFERER, CLIENT_USER_AGENT,
    DRIVER_CALL_PATH,
};
