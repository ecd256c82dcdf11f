//! Roster loading and the driver identity record.
//!
//! The roster is a `drivers.json` array probed across the base data
//! directories in priority order. Records are tolerant of the field drift the
//! site's datasets accumulated: `name` as an alias for `full_name`, car
//! numbers stored as either JSON numbers or strings, and blank strings
//! standing in for absent fields.

use crate::slug::slugify;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File name of the roster source inside each base data directory.
pub const ROSTER_FILE: &str = "drivers.json";

/// One driver identity as enumerated by the roster source.
///
/// All fields beyond the display name are optional; the locator decides which
/// of them can key a statistics file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Driver {
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "number_token")]
    pub number: Option<String>,
}

impl Driver {
    /// The slug the driver's statistics file should be named after: the
    /// explicit roster slug when present, else the normalized display name.
    /// Empty when the record carries neither.
    pub fn canonical_slug(&self) -> String {
        match non_blank(self.slug.as_deref()) {
            Some(explicit) => explicit.to_string(),
            None => slugify(self.full_name.as_deref().unwrap_or_default()),
        }
    }

    /// Normalized display name, independent of any explicit slug. Used for the
    /// slug-variant retry when the two disagree.
    pub fn name_slug(&self) -> String {
        slugify(self.full_name.as_deref().unwrap_or_default())
    }

    /// True when the roster record carries its own slug field.
    pub fn has_explicit_slug(&self) -> bool {
        non_blank(self.slug.as_deref()).is_some()
    }

    /// Car number as a filename token, if present.
    pub fn number_token(&self) -> Option<&str> {
        non_blank(self.number.as_deref())
    }

    /// Three-letter code lowered for filename use, if present.
    pub fn code_token(&self) -> Option<String> {
        non_blank(self.code.as_deref()).map(str::to_lowercase)
    }

    /// Label used in console trail lines; falls back through the identity
    /// fields so even a degenerate record prints something traceable.
    pub fn label(&self) -> String {
        let slug = self.canonical_slug();
        if !slug.is_empty() {
            return slug;
        }
        if let Some(code) = self.code_token() {
            return code;
        }
        self.number_token().unwrap_or("<unnamed>").to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Accept a car number stored as a JSON number or a string.
fn number_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "driver number must be a number or string, got {other}"
        ))),
    }
}

/// Load the roster by probing `drivers.json` under each base directory in
/// order. A missing file is a normal miss; anything else that prevents the
/// roster from loading is fatal to the run.
pub fn load_roster(bases: &[PathBuf]) -> Result<(Vec<Driver>, PathBuf)> {
    for base in bases {
        let path = base.join(ROSTER_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(err).with_context(|| format!("reading roster {}", path.display()));
            }
        };
        let drivers: Vec<Driver> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing roster {}", path.display()))?;
        return Ok((drivers, path));
    }

    bail!(
        "no {} found under any base directory ({})",
        ROSTER_FILE,
        join_paths(bases)
    );
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(raw: &str) -> Driver {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn name_is_an_alias_for_full_name() {
        let d = parse(r#"{"name":"Charles Leclerc"}"#);
        assert_eq!(d.full_name.as_deref(), Some("Charles Leclerc"));
        assert_eq!(d.canonical_slug(), "charles-leclerc");
    }

    #[test]
    fn number_accepts_json_number_or_string() {
        assert_eq!(parse(r#"{"number":16}"#).number_token(), Some("16"));
        assert_eq!(parse(r#"{"number":" 44 "}"#).number_token(), Some("44"));
        assert_eq!(parse(r#"{"number":null}"#).number_token(), None);
        assert_eq!(parse(r#"{"number":"  "}"#).number_token(), None);
    }

    #[test]
    fn explicit_slug_wins_over_name_and_is_used_verbatim() {
        let d = parse(r#"{"full_name":"Guanyu Zhou","slug":"zhou-guanyu"}"#);
        assert!(d.has_explicit_slug());
        assert_eq!(d.canonical_slug(), "zhou-guanyu");
        assert_eq!(d.name_slug(), "guanyu-zhou");
    }

    #[test]
    fn blank_fields_count_as_absent() {
        let d = parse(r#"{"full_name":"Esteban Ocon","slug":"  ","code":""}"#);
        assert!(!d.has_explicit_slug());
        assert_eq!(d.canonical_slug(), "esteban-ocon");
        assert_eq!(d.code_token(), None);
    }

    #[test]
    fn code_token_is_lowercased() {
        let d = parse(r#"{"code":"VER"}"#);
        assert_eq!(d.code_token().as_deref(), Some("ver"));
    }

    #[test]
    fn roster_probe_prefers_earlier_base() {
        let tmp = TempDir::new().unwrap();
        let primary = tmp.path().join("public/data");
        let secondary = tmp.path().join("data");
        fs::create_dir_all(&primary).unwrap();
        fs::create_dir_all(&secondary).unwrap();
        fs::write(primary.join(ROSTER_FILE), r#"[{"name":"A"}]"#).unwrap();
        fs::write(
            secondary.join(ROSTER_FILE),
            r#"[{"name":"B"},{"name":"C"}]"#,
        )
        .unwrap();

        let (drivers, path) = load_roster(&[primary.clone(), secondary]).unwrap();
        assert_eq!(drivers.len(), 1);
        assert_eq!(path, primary.join(ROSTER_FILE));
    }

    #[test]
    fn roster_missing_everywhere_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_roster(&[tmp.path().join("public/data"), tmp.path().join("data")])
            .unwrap_err();
        assert!(err.to_string().contains(ROSTER_FILE));
    }

    #[test]
    fn roster_parse_failure_is_an_error_not_a_miss() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(ROSTER_FILE), "not json").unwrap();
        let err = load_roster(&[tmp.path().to_path_buf()]).unwrap_err();
        assert!(format!("{err:#}").contains("parsing roster"));
    }
}
