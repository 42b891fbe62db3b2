use crate::error::ReadinessError;
use serde::Deserialize;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadinessConfig {
    pub catalog: Option<CatalogConfig>,
    pub report: Option<ReportConfig>,
    pub telemetry: Option<TelemetryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub format: Option<String>,
    pub export_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: Option<String>,
}

impl ReadinessConfig {
    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.path.as_deref())
    }

    pub fn report_format(&self) -> Option<&str> {
        self.report
            .as_ref()
            .and_then(|report| report.format.as_deref())
    }

    pub fn export_dir(&self) -> Option<&str> {
        self.report
            .as_ref()
            .and_then(|report| report.export_dir.as_deref())
    }

    pub fn log_level(&self) -> &str {
        self.telemetry
            .as_ref()
            .and_then(|telemetry| telemetry.log_level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn validate(&self) -> Result<(), ReadinessError> {
        if let Some(format) = self.report_format() {
            if !matches!(format, "json" | "md") {
                return Err(ReadinessError::ConfigParse(format!(
                    "unsupported report.format: {format} (expected json or md)"
                )));
            }
        }

        if let Some(path) = self.catalog_path() {
            if path.trim().is_empty() {
                return Err(ReadinessError::ConfigParse(
                    "catalog.path cannot be empty".to_string(),
                ));
            }
        }

        if let Some(dir) = self.export_dir() {
            if dir.trim().is_empty() {
                return Err(ReadinessError::ConfigParse(
                    "report.export_dir cannot be empty".to_string(),
                ));
            }
        }

        if self.log_level().trim().is_empty() {
            return Err(ReadinessError::ConfigParse(
                "telemetry.log_level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
