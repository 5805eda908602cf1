pub mod behavioral;
pub mod word_cloud;

pub use behavioral::{demographic_breakdown, score, DemographicBreakdown, MotivationScore};
pub use word_cloud::{weight, WeightedTerm};
