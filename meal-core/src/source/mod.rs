pub mod factory;
pub mod mock;
pub mod recommender;

pub use factory::{DEFAULT_BACKEND, SourceConfig, SourceFactory, SourceRegistry};
pub use mock::{MockRecommendationSource, MockSourceFactory};
pub use recommender::{RecommendationRequest, RecommendationSource, SourceError};
