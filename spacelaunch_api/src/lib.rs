mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Client, DEFAULT_ENDPOINT};
pub use self::errors::Error;
pub use self::query::{LaunchListQuery, Query, RequestBody};
