//! Dispatch Service - printing and exporting a loading challan
//!
//! Printing projects the session once and then produces two files from that
//! projection: the PDF challan and its CSV copy. Each output is written
//! independently; a failure in one is reported in the [`PrintReport`] and
//! does not stop the other.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use challan_domain::model::{CompanyProfile, LoadingSession};
use challan_domain::service::{export_draft, project, ChallanTotals};
use challan_infra::csv_writer::write_csv_file;
use challan_infra::pdf_renderer::render_pdf;
use challan_infra::xlsx_writer::write_xlsx;
use challan_types::{ExportFormat, RenderError, Result};

/// Result of writing one output file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum OutputOutcome {
    Written(PathBuf),
    Failed(String),
}

impl OutputOutcome {
    fn from_result(path: PathBuf, result: std::result::Result<(), RenderError>) -> Self {
        match result {
            Ok(()) => OutputOutcome::Written(path),
            Err(e) => OutputOutcome::Failed(e.to_string()),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, OutputOutcome::Written(_))
    }
}

/// What a print run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintReport {
    pub challan_no: String,
    pub totals: ChallanTotals,
    pub pdf: OutputOutcome,
    pub csv: OutputOutcome,
}

impl PrintReport {
    pub fn all_written(&self) -> bool {
        self.pdf.is_written() && self.csv.is_written()
    }
}

/// Turns loading sessions into challan files for one company
pub struct DispatchService {
    profile: CompanyProfile,
}

impl DispatchService {
    pub fn new(profile: CompanyProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    /// Print the challan: PDF plus CSV copy in `out_dir`.
    ///
    /// Returns `Error::Validation` when the challan or vehicle number is
    /// blank; nothing is written in that case.
    pub fn print(&self, session: &LoadingSession, out_dir: &Path) -> Result<PrintReport> {
        let challan = project(session, &self.profile)?;
        fs::create_dir_all(out_dir)?;

        let pdf_path = out_dir.join(&challan.print.file_name);
        let pdf = OutputOutcome::from_result(pdf_path.clone(), render_pdf(&challan.print, &pdf_path));
        log_outcome("pdf", &pdf);

        let csv_path = out_dir.join(&challan.export.file_name);
        let csv = OutputOutcome::from_result(
            csv_path.clone(),
            write_csv_file(&challan.export, &csv_path),
        );
        log_outcome("csv", &csv);

        Ok(PrintReport {
            challan_no: session.header.challan_no.trim().to_string(),
            totals: challan.totals,
            pdf,
            csv,
        })
    }

    /// Export the flat table without requiring a complete header
    pub fn export(
        &self,
        session: &LoadingSession,
        out_dir: &Path,
        format: ExportFormat,
    ) -> Result<PathBuf> {
        let table = export_draft(session, &self.profile);
        fs::create_dir_all(out_dir)?;

        let path = out_dir
            .join(&table.file_name)
            .with_extension(format.extension());
        match format {
            ExportFormat::Csv => write_csv_file(&table, &path)?,
            ExportFormat::Xlsx => write_xlsx(&table, &path)?,
        }
        info!(path = %path.display(), %format, "challan exported");
        Ok(path)
    }
}

fn log_outcome(output: &str, outcome: &OutputOutcome) {
    match outcome {
        OutputOutcome::Written(path) => info!(output, path = %path.display(), "challan output written"),
        OutputOutcome::Failed(reason) => warn!(output, %reason, "challan output failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging;
    use challan_domain::model::{ItemField, ItemKind};
    use challan_types::{Error, RequiredField, ValidationError};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn service() -> DispatchService {
        DispatchService::new(CompanyProfile {
            name: "MUMUKSH IMPEX LLP".to_string(),
            address: "Ranala Shivar, Nandurbar".to_string(),
        })
    }

    fn session() -> LoadingSession {
        let mut s = LoadingSession::new("", NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
        s.header.challan_no = "CH-001".to_string();
        s.header.vehicle_no = "MH-18-BC-4412".to_string();
        s.update_item(ItemKind::Regular, 0, ItemField::Product, "Freshkins");
        s.update_item(ItemKind::Regular, 0, ItemField::TotalCtn, "100");
        s.update_item(ItemKind::Regular, 0, ItemField::AvgWeightKg, "12");
        s
    }

    #[test]
    fn test_print_writes_both_outputs() {
        logging::init_test();
        let dir = tempdir().unwrap();
        let report = service().print(&session(), dir.path()).unwrap();

        assert!(report.all_written());
        assert_eq!(report.challan_no, "CH-001");
        assert_eq!(report.pdf, OutputOutcome::Written(dir.path().join("CHALLAN_CH-001.pdf")));
        assert_eq!(report.csv, OutputOutcome::Written(dir.path().join("CHALLAN_CH-001.csv")));
        assert!(dir.path().join("CHALLAN_CH-001.pdf").exists());
    }

    #[test]
    fn test_print_failure_in_one_output_keeps_the_other() {
        let dir = tempdir().unwrap();
        // a directory where the PDF should go makes that write fail
        fs::create_dir(dir.path().join("CHALLAN_CH-001.pdf")).unwrap();

        let report = service().print(&session(), dir.path()).unwrap();
        assert!(matches!(report.pdf, OutputOutcome::Failed(_)));
        assert!(report.csv.is_written());
        assert!(!report.all_written());
    }

    #[test]
    fn test_print_blocked_without_required_fields() {
        let dir = tempdir().unwrap();
        let mut s = session();
        s.header.vehicle_no = "  ".to_string();

        let err = service().print(&s, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingRequiredField(ref f)) if f == &[RequiredField::VehicleNo]
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_draft_without_challan_no() {
        let dir = tempdir().unwrap();
        let mut s = session();
        s.header.challan_no.clear();

        let path = service().export(&s, dir.path(), ExportFormat::Csv).unwrap();
        assert_eq!(path, dir.path().join("CHALLAN_export.csv"));
        assert!(path.exists());
    }

    #[test]
    fn test_export_xlsx() {
        let dir = tempdir().unwrap();
        let path = service()
            .export(&session(), &dir.path().join("out"), ExportFormat::Xlsx)
            .unwrap();
        assert_eq!(path, dir.path().join("out").join("CHALLAN_CH-001.xlsx"));
        assert!(path.exists());
    }
}
