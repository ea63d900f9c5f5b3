pub mod derivation_service;
pub mod query_service;
pub mod recommendation_service;
pub mod youtube_service;
