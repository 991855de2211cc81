pub mod design_service;
pub mod seo_service;
pub mod taxonomy_service;

pub use design_service::DesignService;
pub use seo_service::SeoService;
pub use taxonomy_service::TaxonomyService;
