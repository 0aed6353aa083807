pub mod filter;
pub mod rating;
pub mod recommend;

pub use filter::{filter_movies, FilterCriteria};
pub use rating::normalize_rating;
pub use recommend::{pick_one, recommend, Recommendation, RecommendationRule};
