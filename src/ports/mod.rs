pub mod config;
pub mod transport;

pub use config::ConfigStore;
pub use transport::Transport;
