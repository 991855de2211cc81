pub mod cursor;
pub mod editor;

pub use cursor::{RefreshPlan, TaxonomyCursor, TaxonomyItem, TaxonomyLevel};
pub use editor::TaxonomyEditor;
