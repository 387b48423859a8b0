mod api;

pub use api::{ApodClient, MISSING_API_KEY};
