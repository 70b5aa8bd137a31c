//! Port definitions the scoring pipeline consumes

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Point, RawFeature};

/// Port for fetching raw point-of-interest data around a center point.
///
/// The only operation in the pipeline that blocks on external I/O.
/// Implementations should bound the request with a timeout and surface
/// failures as `ScoutError::UpstreamUnavailable`; the pipeline never
/// substitutes an empty snapshot for a failed fetch. Dropping the returned
/// future must cancel any in-flight request without side effects.
#[async_trait]
pub trait GeoDataSource: Send + Sync {
    /// Fetch all features relevant to an analysis near `center`.
    ///
    /// Implementations may over-fetch (e.g. by bounding box); the pipeline
    /// re-filters by geodesic distance, so returned features outside
    /// `radius_m` are harmless.
    async fn fetch_features(&self, center: Point, radius_m: f64) -> Result<Vec<RawFeature>>;
}

#[async_trait]
impl<T: GeoDataSource + ?Sized> GeoDataSource for std::sync::Arc<T> {
    async fn fetch_features(&self, center: Point, radius_m: f64) -> Result<Vec<RawFeature>> {
        (**self).fetch_features(center, radius_m).await
    }
}
