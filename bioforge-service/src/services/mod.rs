pub mod metrics;
pub mod providers;
pub mod relay;

pub use relay::Relay;
