use crate::bounds::BoundsResult;
use crate::data::Data;
use crate::param::Param;
use crate::table::ConcordanceTable;
use serde::{Deserialize, Serialize};
use std::process::Command;

/// Complete record of one bound computation: input data, tabulation,
/// result and provenance. Serialisable so a run can be archived and
/// reloaded later.
#[derive(Serialize, Deserialize, Clone)]
pub struct Analysis {
    /// Analysis ID, i.e. save-file stem and timestamp
    pub id: String,
    /// Timestamp of the analysis
    pub timestamp: String,
    /// Refbounds version and git hash used
    pub refbounds_version: String,
    /// Parameters used
    pub parameters: Param,
    /// Paired outcome data the table was built from
    pub data: Data,
    /// Concordance table of the tested method against the reference
    pub table: ConcordanceTable,
    /// Bounds on the true performance of the tested method
    pub bounds: BoundsResult,
    /// Execution time in seconds
    pub execution_time: f64,
}

impl Analysis {
    /// Saves the analysis to pretty-printed JSON.
    pub fn save_json<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads an analysis previously saved with `save_json`.
    pub fn load_json<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Analysis, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let analysis: Analysis = serde_json::from_str(&content)?;
        Ok(analysis)
    }

    /// Generates a formatted string displaying the analysis results.
    ///
    /// # Arguments
    ///
    /// * `colorful` - Use ANSI colors in the output
    ///
    /// # Returns
    ///
    /// String containing the formatted results.
    pub fn display_results(&self, colorful: bool) -> String {
        let (title, value, reset) = if colorful {
            ("\x1b[1;93m", "\x1b[2;97m", "\x1b[0m")
        } else {
            ("", "", "")
        };

        let mut output = String::new();
        output.push_str(&format!(
            "{}Concordance table ({} samples){}\n{}\n\n",
            title,
            self.table.total(),
            reset,
            self.table
        ));
        output.push_str(&format!(
            "{}Reference method: sensitivity {:.3}, specificity {:.3}{}\n\n",
            value, self.parameters.reference.alpha, self.parameters.reference.beta, reset
        ));

        if self.bounds.is_available() {
            output.push_str(&format!(
                "{}Bounds on the true performance of the tested method{}\n",
                title, reset
            ));
            output.push_str(&format!(
                "sensitivity  {}\nspecificity  {}\nPPV          {}\nNPV          {}\n",
                format_bound(self.bounds.min_sensitivity, self.bounds.max_sensitivity),
                format_bound(self.bounds.min_specificity, self.bounds.max_specificity),
                format_bound(self.bounds.min_ppv, self.bounds.max_ppv),
                format_bound(self.bounds.min_npv, self.bounds.max_npv),
            ));
        } else {
            output.push_str(&format!(
                "{}Bounds not available: the prevalence implied by the reference parameters is outside (0,1){}\n",
                title, reset
            ));
        }

        output
    }
}

fn format_bound(low: f64, high: f64) -> String {
    match (low.is_nan(), high.is_nan()) {
        (false, false) => format!("[{:.3}, {:.3}]", low, high),
        (true, false) => format!("[NA, {:.3}]", high),
        (false, true) => format!("[{:.3}, NA]", low),
        (true, true) => "NA".to_string(),
    }
}

/// Crate version tagged with the short git hash of the working tree, or
/// "unknown" when git is not available.
pub fn version_stamp() -> String {
    let git_hash = Command::new("git")
        .args(&["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().chars().take(7).collect::<String>())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    format!("{}#{}", env!("CARGO_PKG_VERSION"), git_hash)
}
