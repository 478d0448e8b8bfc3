//! Common types used across filemeta

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FilemetaError;

/// Assay / library classification inferred from path conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleType {
    #[serde(rename = "amplicon")]
    Amplicon,
    #[serde(rename = "bulkTCR")]
    BulkTcr,
    #[serde(rename = "NanoporeWGS")]
    NanoporeWgs,
    #[serde(rename = "scRNA+VDJ")]
    ScRnaVdj,
    #[serde(rename = "scRNA")]
    ScRna,
    #[serde(rename = "ATAC")]
    Atac,
    #[serde(rename = "WGS")]
    Wgs,
}

impl SampleType {
    /// Label written to the report
    pub fn as_str(self) -> &'static str {
        match self {
            SampleType::Amplicon => "amplicon",
            SampleType::BulkTcr => "bulkTCR",
            SampleType::NanoporeWgs => "NanoporeWGS",
            SampleType::ScRnaVdj => "scRNA+VDJ",
            SampleType::ScRna => "scRNA",
            SampleType::Atac => "ATAC",
            SampleType::Wgs => "WGS",
        }
    }
}

impl std::fmt::Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SampleType {
    type Err = FilemetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amplicon" => Ok(SampleType::Amplicon),
            "bulkTCR" => Ok(SampleType::BulkTcr),
            "NanoporeWGS" => Ok(SampleType::NanoporeWgs),
            "scRNA+VDJ" => Ok(SampleType::ScRnaVdj),
            "scRNA" => Ok(SampleType::ScRna),
            "ATAC" => Ok(SampleType::Atac),
            "WGS" => Ok(SampleType::Wgs),
            other => Err(FilemetaError::UnknownSampleType(other.to_string())),
        }
    }
}

/// Metadata derived from a single sequencing file path
///
/// Records only live for one batch run; `fpath` is not guaranteed unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleFileRecord {
    pub sample_name: String,
    pub sample_id: String,
    pub sample_type: SampleType,
    /// First ISO date found in the path; `None` when absent or invalid
    #[serde(rename = "recieved")]
    pub received: Option<NaiveDate>,
    pub fpath: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_type_labels_round_trip() {
        let all = [
            SampleType::Amplicon,
            SampleType::BulkTcr,
            SampleType::NanoporeWgs,
            SampleType::ScRnaVdj,
            SampleType::ScRna,
            SampleType::Atac,
            SampleType::Wgs,
        ];
        for ty in all {
            assert_eq!(ty.to_string().parse::<SampleType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_sample_type_from_str_is_case_sensitive() {
        assert!("wgs".parse::<SampleType>().is_err());
        assert!("scrna".parse::<SampleType>().is_err());
    }
}
