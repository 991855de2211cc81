pub mod client;
pub mod controller;
pub mod decode;
pub mod types;

pub use client::{HttpSeoWorkflow, SeoRequest, SeoWorkflow};
pub use controller::SeoController;
pub use decode::{decode_keyword_results, decode_write_output};
pub use types::{DesignBrief, GeneratedCopy, KeywordInsight, KeywordStatus};
