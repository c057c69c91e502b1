pub mod config_store;
pub mod http_transport;

pub use config_store::TomlConfigStore;
pub use http_transport::ReqwestTransport;
