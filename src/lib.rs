#![forbid(unsafe_code)]

pub mod batch;
pub mod encode;
pub mod error;
pub mod logo;
pub mod model;
pub mod naming;
pub mod payload;
pub mod pipeline;
pub mod raster;
pub mod validate;

pub use batch::{Batch, BatchOutcome, BatchRecord, MAX_BATCH_RECORDS, TEMPLATE_CSV, package_zip};
pub use error::{QrForgeError, QrForgeResult};
pub use model::{
    Contact, ContentRecord, ErrorCorrection, LogoOptions, OutputFormat, QrArtifact, StyleOptions,
};
pub use naming::file_name;
pub use pipeline::generate;
pub use validate::{FieldError, FieldErrorKind, validate_contact};
