//! Rendering of work records
//!
//! YAML is block style with fields in declaration order and non-ASCII text
//! kept literal. JSON is pretty-printed.

use crate::domain::WorkRecord;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render `records` as a complete document ending in a newline
pub fn render(records: &[WorkRecord], format: OutputFormat) -> Result<String, OutputError> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(records)?),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(records)?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Identifiers;

    fn sample() -> WorkRecord {
        let mut identifiers = Identifiers::new();
        identifiers.insert("doi".to_string(), "10.1/a".to_string());
        WorkRecord::new(
            "Paper A",
            "2020",
            identifiers,
            vec!["Jane Doe".to_string(), "Zoë Müller".to_string()],
        )
    }

    #[test]
    fn test_yaml_field_order() {
        let yaml = render(&[sample()], OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        let record = parsed[0].as_mapping().unwrap();
        let keys: Vec<&str> = record.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["name", "publication_year", "identifiers", "authors", "url"]
        );
        assert_eq!(parsed[0]["publication_year"].as_str(), Some("2020"));
        assert_eq!(parsed[0]["url"].as_str(), Some("https://doi.org/10.1/a"));
    }

    #[test]
    fn test_yaml_block_style_and_unicode() {
        let yaml = render(&[sample()], OutputFormat::Yaml).unwrap();
        assert!(yaml.starts_with("- name: Paper A\n"));
        assert!(!yaml.contains('{'));
        assert!(yaml.lines().any(|l| l.trim_start() == "- Jane Doe"));
        assert!(yaml.contains("Zoë Müller"));
    }

    #[test]
    fn test_yaml_missing_url_is_null() {
        let record = WorkRecord::new("No Title", "No Year", Identifiers::new(), vec![]);
        let yaml = render(&[record], OutputFormat::Yaml).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert!(parsed[0]["url"].is_null());
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render(&[], OutputFormat::Yaml).unwrap().trim(), "[]");
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]\n");
    }

    #[test]
    fn test_json_round_trip() {
        let json = render(&[sample()], OutputFormat::Json).unwrap();
        let parsed: Vec<WorkRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![sample()]);
    }
}
