pub mod analyzer;
pub mod tables;
pub mod trending;
pub mod types;

pub use analyzer::{analyze, PersonaAnalysis, TrendingKeywordsAnalysis};
pub use trending::{find_sample, trending_keywords, SamplePersona, SAMPLE_PERSONAS};
pub use types::{AgeBracket, PersonaProfile};
