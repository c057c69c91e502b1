pub mod controller;
pub mod params;

pub use controller::AppController;
pub use params::IdentifyParams;
