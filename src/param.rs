use log::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

// Field definitions and associated default values

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Param {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub reference: Reference,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct General {
    #[serde(default = "log_base_default")]
    pub log_base: String,
    #[serde(default = "log_suffix_default")]
    pub log_suffix: String,
    #[serde(default = "log_level_default")]
    pub log_level: String,
    #[serde(default = "true_default")]
    pub display_colorful: bool,
    #[serde(default = "empty_string")]
    pub save_analysis: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Data {
    #[serde(default = "empty_string")]
    pub path: String,
    #[serde(default = "class_names_default")]
    pub classes: Vec<String>,
    #[serde(default = "false_default")]
    pub inverse_classes: bool,
}

/// Sensitivity (`alpha`) and specificity (`beta`) of the reference method
/// against the unobserved gold standard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reference {
    #[serde(default = "alpha_default")]
    pub alpha: f64,
    #[serde(default = "beta_default")]
    pub beta: f64,
}

impl Default for General {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Default for Data {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Default for Reference {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap()
    }
}

impl Default for Param {
    fn default() -> Self {
        Param {
            general: General::default(),
            data: Data::default(),
            reference: Reference::default(),
        }
    }
}

pub fn get(param_file: String) -> Result<Param, Box<dyn Error>> {
    let param_file_reader = File::open(param_file)?;
    let param_reader = BufReader::new(param_file_reader);

    let mut config: Param = serde_yaml::from_reader(param_reader)?;

    validate(&mut config)?;

    Ok(config)
}

/// Checks the parameter combination before a run. The bound formulas
/// themselves accept any finite reference values; the checks here only
/// guard the outer surface against settings that cannot produce a usable
/// analysis.
pub fn validate(param: &mut Param) -> Result<(), String> {
    if !(param.reference.alpha > 0.0 && param.reference.alpha < 1.0) {
        return Err(format!(
            "Invalid reference alpha={:.3}. Must be in range (0, 1).",
            param.reference.alpha
        ));
    }

    if !(param.reference.beta > 0.0 && param.reference.beta < 1.0) {
        return Err(format!(
            "Invalid reference beta={:.3}. Must be in range (0, 1).",
            param.reference.beta
        ));
    }

    if (param.reference.alpha + param.reference.beta - 1.0).abs() < 1e-12 {
        return Err(format!(
            "Reference alpha={:.3} and beta={:.3} sum to 1: the implied prevalence is undefined.",
            param.reference.alpha, param.reference.beta
        ));
    }

    if param.reference.alpha + param.reference.beta < 1.0 {
        warn!(
            "Reference alpha + beta < 1: the reference method is assumed worse than chance. \
            The implied prevalence will be infeasible for most tables."
        );
    }

    if !param.data.classes.is_empty() && param.data.classes.len() != 2 {
        return Err(format!(
            "Exactly two class names are expected, got {}.",
            param.data.classes.len()
        ));
    }

    Ok(())
}

// Default value definitions

fn empty_string() -> String {
    "".to_string()
}
fn log_base_default() -> String {
    "".to_string()
}
fn log_suffix_default() -> String {
    "log".to_string()
}
fn log_level_default() -> String {
    "info".to_string()
}
fn false_default() -> bool {
    false
}
fn true_default() -> bool {
    true
}
fn class_names_default() -> Vec<String> {
    Vec::new()
}
fn alpha_default() -> f64 {
    0.9
}
fn beta_default() -> f64 {
    0.95
}

// unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let param = Param::default();
        assert_eq!(param.general.log_level, "info");
        assert_eq!(param.general.log_suffix, "log");
        assert!(param.general.display_colorful);
        assert_eq!(param.data.path, "");
        assert!(!param.data.inverse_classes);
        assert_eq!(param.reference.alpha, 0.9);
        assert_eq!(param.reference.beta, 0.95);
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = "reference:\n  alpha: 0.8\ndata:\n  path: cohort.tsv\n";
        let param: Param = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(param.reference.alpha, 0.8);
        assert_eq!(param.reference.beta, 0.95, "unset fields keep their default");
        assert_eq!(param.data.path, "cohort.tsv");
    }

    #[test]
    fn test_validate_rejects_out_of_range_alpha() {
        let mut param = Param::default();
        param.reference.alpha = 1.2;
        let result = validate(&mut param);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("alpha"));
    }

    #[test]
    fn test_validate_rejects_alpha_beta_summing_to_one() {
        let mut param = Param::default();
        param.reference.alpha = 0.4;
        param.reference.beta = 0.6;
        assert!(validate(&mut param).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_class_count() {
        let mut param = Param::default();
        param.data.classes = vec!["negative".to_string()];
        assert!(validate(&mut param).is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let mut param = Param::default();
        assert!(validate(&mut param).is_ok());
    }
}
