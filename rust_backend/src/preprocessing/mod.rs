pub mod pipeline;
pub mod validator;

pub use pipeline::{preprocess_sales, PipelineOutcome, SalesPipeline};
pub use validator::{SalesValidator, ValidationFinding, ValidationReport, ValidationStats};
