use anyhow::Result;
use serde::{Deserialize, Serialize};
use shortlist_core::{RankedCandidate, RankerOptions};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankReport {
    pub created_at: String,
    pub k: i64,
    pub total_candidates: usize,
    pub options: RankerOptions,
    pub results: Vec<RankedCandidate>,
}

impl RankReport {
    pub fn new(k: i64, total_candidates: usize, options: RankerOptions, results: Vec<RankedCandidate>) -> Self {
        let created_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Self { created_at, k, total_candidates, options, results }
    }
}

pub fn save_report(path: &Path, report: &RankReport) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let mut f = File::create(path)?;
    let json = serde_json::to_string_pretty(report)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_report(path: &Path) -> Result<RankReport> {
    let mut f = File::open(path)?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let report: RankReport = serde_json::from_str(&buf)?;
    Ok(report)
}

/// One header line describing when and how a report was produced.
pub fn format_summary(report: &RankReport) -> String {
    format!(
        "# {}  k={}  returned {} of {} candidates\n",
        report.created_at,
        report.k,
        report.results.len(),
        report.total_candidates
    )
}

/// Render the shortlist as aligned `rank  score  id` lines.
pub fn format_table(results: &[RankedCandidate]) -> String {
    let mut out = String::new();
    for (i, hit) in results.iter().enumerate() {
        out.push_str(&format!("{:>4}  {:.4}  {}\n", i + 1, hit.score, hit.id));
    }
    out
}
