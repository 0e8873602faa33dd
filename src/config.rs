//! Built-in run settings for urlfix
//!
//! The scan root, file extensions, import rule and replacement table are
//! compiled into the binary as a TOML document and parsed once at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::replacements::{ReplacementEntry, ReplacementTable};
use crate::rewriter::ImportRule;

pub const DEFAULT_SETTINGS: &str = r#"# urlfix settings

[scan]
# Directory tree to rewrite, relative to the working directory
root = "frontend/aegis/src"

# A file is processed when its name ends with one of these
extensions = [".js", ".jsx"]

[import]
# Rewritten content containing this token gets the import line
marker = "API_ENDPOINTS"
line = "import { API_ENDPOINTS } from '../../config/api.config';"

# Either of these in the content means the import is already there
recognized = [
    "from '../../config/api.config'",
    "from '../config/api.config'",
]

[logging]
enabled = true
filter = "urlfix=info"

# Student endpoints
[[replacements]]
from = "http://localhost:8000/api/v1/student/profile"
to = "API_ENDPOINTS.STUDENT.PROFILE"

[[replacements]]
from = "http://localhost:8000/api/v1/student/explore-classes"
to = "API_ENDPOINTS.STUDENT.EXPLORE_CLASSES"

[[replacements]]
from = "http://localhost:8000/api/v1/student/enroll-class"
to = "API_ENDPOINTS.STUDENT.ENROLL_CLASS"

[[replacements]]
from = "'http://localhost:8000/api/v1/student/class/${classId}'"
to = "API_ENDPOINTS.STUDENT.CLASS(classId)"

[[replacements]]
from = "'http://localhost:8000/api/v1/student/class/${selectedClass}/note'"
to = "API_ENDPOINTS.STUDENT.CLASS_NOTE(selectedClass)"

[[replacements]]
from = "http://localhost:8000/api/v1/student/get-domains"
to = "API_ENDPOINTS.STUDENT.GET_DOMAINS"

[[replacements]]
from = "http://localhost:8000/api/v1/problem/student/problems"
to = "API_ENDPOINTS.PROBLEM.STUDENT_PROBLEMS"

[[replacements]]
from = "http://localhost:8000/api/v1/problem/create"
to = "API_ENDPOINTS.PROBLEM.CREATE"

# Faculty endpoints
[[replacements]]
from = "http://localhost:8000/api/v1/faculty/my-classes"
to = "API_ENDPOINTS.FACULTY.MY_CLASSES"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/class/${classId}'"
to = "API_ENDPOINTS.FACULTY.CLASS(classId)"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/class/${selectedClass}/lecture'"
to = "API_ENDPOINTS.FACULTY.LECTURE(selectedClass)"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/class/${selectedClass}/attendance'"
to = "API_ENDPOINTS.FACULTY.ATTENDANCE(selectedClass)"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/class/${selectedClass}/grade'"
to = "API_ENDPOINTS.FACULTY.GRADE(selectedClass)"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/class/${selectedClass}/note'"
to = "API_ENDPOINTS.FACULTY.NOTE(selectedClass)"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/class/${selectedClass}/discussion'"
to = "API_ENDPOINTS.FACULTY.DISCUSSION(selectedClass)"

[[replacements]]
from = "'http://localhost:8000/api/v1/faculty/discussion/${discussionId}/reply'"
to = "API_ENDPOINTS.FACULTY.REPLY(discussionId)"

# Admin endpoints
[[replacements]]
from = "http://localhost:8000/api/v1/admin/get-faculties"
to = "API_ENDPOINTS.ADMIN.GET_FACULTIES"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/get-students"
to = "API_ENDPOINTS.ADMIN.GET_STUDENTS"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/get-authorities"
to = "API_ENDPOINTS.ADMIN.GET_AUTHORITIES"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/get-classes"
to = "API_ENDPOINTS.ADMIN.GET_CLASSES"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/create-student"
to = "API_ENDPOINTS.ADMIN.CREATE_STUDENT"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/bulk-create-students"
to = "API_ENDPOINTS.ADMIN.BULK_CREATE_STUDENTS"

[[replacements]]
from = "'http://localhost:8000/api/v1/admin/delete-student/${id}'"
to = "API_ENDPOINTS.ADMIN.DELETE_STUDENT(id)"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/create-faculty"
to = "API_ENDPOINTS.ADMIN.CREATE_FACULTY"

[[replacements]]
from = "'http://localhost:8000/api/v1/admin/delete-faculty/${id}'"
to = "API_ENDPOINTS.ADMIN.DELETE_FACULTY(id)"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/create-class"
to = "API_ENDPOINTS.ADMIN.CREATE_CLASS"

[[replacements]]
from = "'http://localhost:8000/api/v1/admin/delete-class/${id}'"
to = "API_ENDPOINTS.ADMIN.DELETE_CLASS(id)"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/get-domains"
to = "API_ENDPOINTS.ADMIN.GET_DOMAINS"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/create-domain"
to = "API_ENDPOINTS.ADMIN.CREATE_DOMAIN"

[[replacements]]
from = "http://localhost:8000/api/v1/admin/create-authority"
to = "API_ENDPOINTS.ADMIN.CREATE_AUTHORITY"

[[replacements]]
from = "'http://localhost:8000/api/v1/admin/delete-authority/${id}'"
to = "API_ENDPOINTS.ADMIN.DELETE_AUTHORITY(id)"

# Authority endpoints
[[replacements]]
from = "http://localhost:8000/api/v1/authority/complaints"
to = "API_ENDPOINTS.AUTHORITY.COMPLAINTS"

[[replacements]]
from = "http://localhost:8000/api/v1/authority/colleagues"
to = "API_ENDPOINTS.AUTHORITY.COLLEAGUES"

[[replacements]]
from = "'http://localhost:8000/api/v1/authority/complaints/${id}/accept'"
to = "API_ENDPOINTS.AUTHORITY.ACCEPT_COMPLAINT(id)"

[[replacements]]
from = "'http://localhost:8000/api/v1/authority/complaints/${selectedProblem._id}/status'"
to = "API_ENDPOINTS.AUTHORITY.UPDATE_STATUS(selectedProblem._id)"

[[replacements]]
from = "'http://localhost:8000/api/v1/authority/complaints/${selectedProblem._id}/transfer'"
to = "API_ENDPOINTS.AUTHORITY.TRANSFER_COMPLAINT(selectedProblem._id)"

[[replacements]]
from = "http://localhost:8000/api/v1/authority/stats"
to = "API_ENDPOINTS.AUTHORITY.STATS"

# Problem endpoints
[[replacements]]
from = "http://localhost:8000/api/v1/problem/all"
to = "API_ENDPOINTS.PROBLEM.ALL"

[[replacements]]
from = "'http://localhost:8000/api/v1/problem/update/${id}'"
to = "API_ENDPOINTS.PROBLEM.UPDATE(id)"
"#;

/// urlfix settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub scan: ScanSettings,

    pub import: ImportSettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    #[serde(default)]
    pub replacements: Vec<ReplacementEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    pub root: PathBuf,

    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSettings {
    pub marker: String,

    /// Import statement, written without the trailing newline
    pub line: String,

    #[serde(default)]
    pub recognized: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Write a run log to ~/.urlfix/urlfix.log
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// tracing-subscriber filter directive
    #[serde(default = "default_logging_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            filter: default_logging_filter(),
        }
    }
}

fn default_logging_enabled() -> bool { true }
fn default_logging_filter() -> String { "urlfix=info".to_string() }

impl Settings {
    pub fn import_rule(&self) -> ImportRule {
        ImportRule::new(
            self.import.marker.clone(),
            self.import.line.clone(),
            self.import.recognized.clone(),
        )
    }

    pub fn replacement_table(&self) -> Result<ReplacementTable> {
        ReplacementTable::from_entries(self.replacements.clone())
            .context("Invalid replacement table in settings")
    }
}

/// Parse a settings document
pub fn parse_settings(source: &str) -> Result<Settings> {
    toml::from_str(source).context("Failed to parse settings")
}

/// Load the built-in settings and validate them
pub fn load_settings() -> Result<Settings> {
    let settings = parse_settings(DEFAULT_SETTINGS)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Validate settings values
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.scan.extensions.is_empty() {
        anyhow::bail!("Invalid scan.extensions: at least one extension is required");
    }

    if let Some(ext) = settings.scan.extensions.iter().find(|e| e.is_empty()) {
        anyhow::bail!("Invalid scan.extensions: empty extension {:?}", ext);
    }

    if settings.import.marker.is_empty() {
        anyhow::bail!("Invalid import.marker: must not be empty");
    }

    if !settings.import.line.contains(&settings.import.marker) {
        anyhow::bail!(
            "Invalid import.line: {:?} does not mention marker {:?}",
            settings.import.line,
            settings.import.marker
        );
    }

    if settings.logging.enabled {
        EnvFilter::try_new(&settings.logging.filter).with_context(|| {
            format!("Invalid logging.filter: {:?}", settings.logging.filter)
        })?;
    }

    settings.replacement_table()?;

    Ok(())
}
