//! List-wide configuration.
//!
//! Everything here is plain data, so a list's look and behavior can be kept
//! in a TOML file:
//!
//! ```toml
//! animates_changes = false
//! layout_family = "grid"
//!
//! [appearance]
//! show_separators = true
//!
//! [auto_scroll_action]
//! kind = "scroll_to_last_on_insert"
//! animated = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use listable_diff::EditScript;
use listable_layout::{Appearance, Behavior, Insets, LayoutDescription};
use listable_types::{Content, IndexPath};

use crate::error::{ListError, ListResult};

/// Which built-in layout family a list starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutFamily {
    #[default]
    List,
    Grid,
}

impl LayoutFamily {
    /// The family's description with default appearance.
    pub fn description(self) -> LayoutDescription {
        match self {
            LayoutFamily::List => LayoutDescription::table(|_| {}),
            LayoutFamily::Grid => LayoutDescription::grid(|_| {}),
        }
    }
}

/// Scrolling performed after content changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AutoScrollAction {
    #[default]
    None,
    /// Scroll to the last presented item whenever items are inserted.
    ScrollToLastOnInsert { animated: bool },
    /// Keep the last presented item visible after every change.
    PinToLast { animated: bool },
}

impl AutoScrollAction {
    /// The item to scroll to after `script` produced `presented`.
    pub fn target(&self, script: &EditScript, presented: &Content) -> Option<IndexPath> {
        let wants_scroll = match self {
            AutoScrollAction::None => false,
            AutoScrollAction::ScrollToLastOnInsert { .. } => !script.items.inserted.is_empty(),
            AutoScrollAction::PinToLast { .. } => !script.is_empty(),
        };
        if !wants_scroll {
            return None;
        }
        presented
            .sections
            .iter()
            .enumerate()
            .rev()
            .find(|(_, section)| !section.is_empty())
            .map(|(s, section)| IndexPath::new(s, section.len() - 1))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub animates_changes: bool,
    pub appearance: Appearance,
    pub behavior: Behavior,
    pub scroll_insets: Insets,
    pub auto_scroll_action: AutoScrollAction,
    pub accessibility_identifier: Option<String>,
    pub debugging_identifier: Option<String>,
    pub layout_family: LayoutFamily,
    /// Present at most this many items, at least one. `None` presents
    /// everything.
    pub presentation_slice_size: Option<usize>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            animates_changes: true,
            appearance: Appearance::default(),
            behavior: Behavior::default(),
            scroll_insets: Insets::default(),
            auto_scroll_action: AutoScrollAction::None,
            accessibility_identifier: None,
            debugging_identifier: None,
            layout_family: LayoutFamily::List,
            presentation_slice_size: None,
        }
    }
}

impl ListConfig {
    pub fn from_toml_str(source: &str) -> ListResult<Self> {
        toml::from_str(source).map_err(|e| ListError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> ListResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> ListResult<String> {
        toml::to_string(self).map_err(|e| ListError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listable_diff::diff;
    use listable_layout::{LayoutType, SelectionMode, TableLayout};
    use listable_types::{Identifier, ItemContent, Section};
    use std::io::Write;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(u32);

    impl ItemContent for Row {
        fn identifier(&self) -> Identifier<Self> {
            Identifier::new(self.0)
        }
    }

    #[test]
    fn default_config() {
        let c = ListConfig::default();
        assert!(c.animates_changes);
        assert_eq!(c.layout_family, LayoutFamily::List);
        assert_eq!(c.auto_scroll_action, AutoScrollAction::None);
        assert!(c.presentation_slice_size.is_none());
        assert_eq!(
            c.layout_family.description().layout_type(),
            LayoutType::of::<TableLayout>()
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ListConfig::from_toml_str(
            r#"
            animates_changes = false
            layout_family = "grid"
            debugging_identifier = "contacts"

            [behavior]
            selection_mode = "multiple"

            [auto_scroll_action]
            kind = "scroll_to_last_on_insert"
            animated = true
            "#,
        )
        .unwrap();

        assert!(!c.animates_changes);
        assert_eq!(c.layout_family, LayoutFamily::Grid);
        assert_eq!(c.debugging_identifier.as_deref(), Some("contacts"));
        assert_eq!(c.behavior.selection_mode, SelectionMode::Multiple);
        assert_eq!(
            c.auto_scroll_action,
            AutoScrollAction::ScrollToLastOnInsert { animated: true }
        );
        assert_eq!(c.appearance, Appearance::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ListConfig::from_toml_str("layout_family = \"carousel\"").unwrap_err();
        assert!(matches!(err, ListError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "presentation_slice_size = 50").unwrap();
        writeln!(file, "[scroll_insets]\ntop = 12.0").unwrap();

        let c = ListConfig::load(file.path()).unwrap();
        assert_eq!(c.presentation_slice_size, Some(50));
        assert_eq!(c.scroll_insets.top, 12.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ListConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ListError::Io(_)));
    }

    #[test]
    fn toml_output_reloads() {
        let config = ListConfig {
            accessibility_identifier: Some("list".into()),
            auto_scroll_action: AutoScrollAction::PinToLast { animated: false },
            ..ListConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ListConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn scroll_target_follows_action() {
        let old = Content::new().with(Section::new("a").with_content(Row(1)));
        let new = old
            .clone()
            .with(Section::new("b").with_content(Row(2)).with_content(Row(3)))
            .with(Section::new("empty"));
        let inserted = diff(&old, &new).unwrap();
        let unchanged = diff(&new, &new).unwrap();

        let on_insert = AutoScrollAction::ScrollToLastOnInsert { animated: true };
        assert_eq!(on_insert.target(&inserted, &new), Some(IndexPath::new(1, 1)));
        assert_eq!(on_insert.target(&unchanged, &new), None);
        assert_eq!(AutoScrollAction::None.target(&inserted, &new), None);

        let pin = AutoScrollAction::PinToLast { animated: false };
        assert_eq!(pin.target(&inserted, &new), Some(IndexPath::new(1, 1)));
    }
}
