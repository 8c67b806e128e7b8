pub mod analysis_service;
pub mod analysis_task;
pub mod insight_service;
pub mod metrics_service;
pub mod portfolio_service;
pub mod recommendation_service;
