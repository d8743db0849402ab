mod geo_service;
mod visit_store;

pub use geo_service::GeoService;
pub use visit_store::VisitStore;
