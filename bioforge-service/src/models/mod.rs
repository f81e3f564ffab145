//! Domain models for the relay.

pub mod mode;
pub mod model;
pub mod request;

pub use mode::Mode;
pub use model::{ModelAlias, ModelMap};
pub use request::{
    EvidenceRequest, EvidenceResponse, GenerateResponse, GenerationRequest, HealthResponse,
};
