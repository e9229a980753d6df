mod api;
mod config;
mod error;

mod data_objects;

pub use api::WooApi;
pub use config::WooConfig;
pub use data_objects::{WooCategory, WooImage, WooLineItem, WooOrder, WooProduct};
pub use error::WooApiError;
