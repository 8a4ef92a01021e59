use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::item::EMPTY_LABEL_PLACEHOLDER;
use crate::view::RevealFlags;

/// Configuration knobs for a [`TreeModel`](crate::TreeModel).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    /// Label rendered for nodes whose label is empty.
    pub empty_label: String,
    /// Flags forwarded with every reveal request.
    pub reveal: RevealFlags,
    /// Per-subscriber queue bound (`None` means unbounded).
    pub event_capacity: Option<usize>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            empty_label: String::from(EMPTY_LABEL_PLACEHOLDER),
            reveal: RevealFlags::default(),
            event_capacity: None,
        }
    }
}

impl TreeOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read and parse a JSON options file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("loading tree options from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Reject option combinations a model cannot honor.
    ///
    /// A zero `event_capacity` would make every notification
    /// undeliverable.
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == Some(0) {
            return Err(Error::InvalidOptions(String::from(
                "event_capacity must be greater than zero",
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_renderer_contract() {
        let options = TreeOptions::default();
        assert_eq!(options.empty_label, "<treeview empty>");
        assert_eq!(options.reveal, RevealFlags::EXPAND);
        assert_eq!(options.event_capacity, None);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let options = TreeOptions::from_json_str("{}").expect("parse");
        assert_eq!(options, TreeOptions::default());
    }

    #[test]
    fn partial_json_overrides_selected_fields() {
        let options = TreeOptions::from_json_str(
            r#"{ "reveal": "EXPAND | FOCUS", "event_capacity": 16 }"#,
        )
        .expect("parse");

        assert_eq!(options.empty_label, EMPTY_LABEL_PLACEHOLDER);
        assert_eq!(options.reveal, RevealFlags::EXPAND | RevealFlags::FOCUS);
        assert_eq!(options.event_capacity, Some(16));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = TreeOptions::from_json_str(r#"{ "event_capacity": 0 }"#)
            .expect_err("zero capacity");
        assert!(matches!(err, Error::InvalidOptions(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err =
            TreeOptions::from_json_str("{ not json").expect_err("malformed");
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn options_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "empty_label": "(no name)" }}"#).expect("write");

        let options = TreeOptions::from_path(file.path()).expect("load");
        assert_eq!(options.empty_label, "(no name)");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = TreeOptions::from_path(dir.path().join("absent.json"))
            .expect_err("missing");
        assert!(matches!(err, Error::Io(_)));
    }
}
