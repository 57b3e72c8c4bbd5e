use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;
use crate::report::ReportDetail;
use crate::services::Criteria;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub current_classes_dir: PathBuf,
    pub potential_classes_dir: PathBuf,
    pub results_path: PathBuf,
    pub blackout_file: Option<PathBuf>,
    pub criteria: Criteria,
    pub bind_addr: SocketAddr,
    pub report_detail: ReportDetail,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(addr) => addr.parse().map_err(|_| {
                AppError::Config(format!("BIND_ADDR is not a socket address: {}", addr))
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let online_required = get("REQUIRE_ONLINE")
            .map(|v| parse_bool("REQUIRE_ONLINE", &v))
            .transpose()?;

        let report_detail = match get("DETAILED_REPORT") {
            Some(v) if parse_bool("DETAILED_REPORT", &v)? => ReportDetail::Full,
            _ => ReportDetail::Summary,
        };

        Ok(Self {
            current_classes_dir: get("CURRENT_CLASSES_DIR")
                .unwrap_or_else(|| "current_classes".to_string())
                .into(),
            potential_classes_dir: get("POTENTIAL_CLASSES_DIR")
                .unwrap_or_else(|| "potential_classes".to_string())
                .into(),
            results_path: get("RESULTS_PATH")
                .unwrap_or_else(|| "master_course_results.json".to_string())
                .into(),
            blackout_file: get("BLACKOUT_FILE").map(PathBuf::from),
            criteria: Criteria {
                subject: get("TARGET_SUBJECT"),
                ge: get("TARGET_GE"),
                online_required,
            },
            bind_addr,
            report_detail,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!("{} is not a boolean: {}", key, value))),
    }
}
