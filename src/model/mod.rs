mod geo;
mod visit;

pub use geo::GeoInfo;
pub use visit::{ClientMetadata, LogRow, VisitRecord, UNKNOWN};
