//! Request and response DTOs

mod request;
mod response;

pub use request::{
    AnalyzeBody, AutocompleteParams, CacheClearParams, ConsultBody, HistoryParams,
    LocationHistoryParams, SearchParams,
};
pub use response::{ClearResponse, HealthResponse, SearchResponse};
