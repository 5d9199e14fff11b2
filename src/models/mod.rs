pub mod analysis;
pub mod gazette;
pub mod municipality;
pub mod ranking;

pub use analysis::{
    AnalysisData, AnalysisMeta, AnalysisResponse, DataOutputFile, DataOutputListing,
    SaveSearchResponse,
};
pub use gazette::{Gazette, GazetteSearchResponse, SearchFilters};
pub use municipality::{Category, Municipality, MUNICIPALITIES};
pub use ranking::{
    CategoryValue, InvestmentRank, MunicipalitySummary, PublicationRank, RankingResponse, Rankings,
    StateRankingRequest,
};
