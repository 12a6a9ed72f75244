//! JurisAI Vector Store
//!
//! Named vector collections with exact nearest-neighbor search

mod collection;
mod distance;
mod store;
mod types;

pub use collection::Collection;
pub use distance::DistanceMetric;
pub use store::VectorStore;
pub use types::{CollectionData, Metadata, SearchHit, VectorRecord};
