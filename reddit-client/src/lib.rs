pub mod api;
pub mod metrics;
pub mod source;

pub use api::{
    RedditListing, RedditListingChild, RedditListingData, RedditPostData, RedditSearchClient,
};
pub use metrics::{ApiMetrics, MetricsCollector, RequestMetrics};
pub use source::RedditPostSource;
