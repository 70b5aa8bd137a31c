mod analyze;
mod cache;
mod consult;
mod health;
mod history;
mod search;

pub use analyze::handle_analyze;
pub use cache::{cache_stats, clear_cache};
pub use consult::handle_consult;
pub use health::health_check;
pub use history::{clear_history, get_history, get_history_stats, get_location_history};
pub use search::{handle_autocomplete, handle_search};
