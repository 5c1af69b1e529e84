//! Environment records and the secret store model

mod model;
mod secrets;

pub use model::{Environment, EnvironmentConfig};
pub use secrets::SecretsStore;
