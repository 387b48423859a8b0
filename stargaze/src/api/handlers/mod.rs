pub mod explain;
pub(crate) mod health;
pub mod images;

pub use health::health_check;
