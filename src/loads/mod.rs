//! Load categories, user loads and their mapping onto the analysis model

mod aggregate;
mod category;
mod fire_proofing;
mod mapper;
mod user_load;

pub use aggregate::{CategoryLoads, LoadAggregate, LoadMaps};
pub use category::{AggregationRule, LoadCategory};
pub use fire_proofing::{fire_proofing, FireProofedElement, FireProofingLoads};
pub use mapper::LoadMapper;
pub use user_load::{
    BlanketLoad, FireProofingBand, LoadShape, LoadsConfig, UserLoad, WindParameters,
};
