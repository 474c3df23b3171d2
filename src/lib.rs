pub mod config;
pub mod db;
pub mod error;
pub mod seed;

pub use config::Config;
pub use error::ShopError;
