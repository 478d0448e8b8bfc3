//! Filemeta Common Library
//!
//! Shared types, path classification, and logging for the filemeta workspace.
//!
//! # Overview
//!
//! - **Classification**: Derive sample name, sample id, assay type and
//!   received date from a sequencing file path
//! - **Types**: `SampleFileRecord` and `SampleType`
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use filemeta_common::classify::classify;
//! use filemeta_common::types::SampleType;
//!
//! let record = classify("/runs/scrna/GEX_S1_L001_R1_2024-05-01.fastq.gz");
//! assert_eq!(record.sample_name, "GEX_S1_L001");
//! assert_eq!(record.sample_type, SampleType::ScRna);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod classify;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{FilemetaError, Result};
pub use types::{SampleFileRecord, SampleType};
