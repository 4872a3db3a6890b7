//! List-wide appearance and behavior settings.
//!
//! These are plain values shared by every layout family. All of them
//! deserialize with defaults for missing fields so they can be loaded from
//! partial configuration files.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Edge insets, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// How the list looks, independent of layout family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub background_color: Color,
    pub direction: LayoutDirection,
    pub show_separators: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            direction: LayoutDirection::Vertical,
            show_separators: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardDismissMode {
    None,
    #[default]
    OnDrag,
    Interactive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    None,
    #[default]
    Single,
    Multiple,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderflowAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// What happens when the content is shorter than the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Underflow {
    pub always_bounce: bool,
    pub alignment: UnderflowAlignment,
}

impl Default for Underflow {
    fn default() -> Self {
        Self {
            always_bounce: true,
            alignment: UnderflowAlignment::Top,
        }
    }
}

/// How the list reacts to input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Behavior {
    pub keyboard_dismiss_mode: KeyboardDismissMode,
    pub selection_mode: SelectionMode,
    pub underflow: Underflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_appearance() {
        let a = Appearance::default();
        assert_eq!(a.background_color, Color::WHITE);
        assert_eq!(a.direction, LayoutDirection::Vertical);
        assert!(!a.show_separators);
    }

    #[test]
    fn partial_behavior_deserializes_with_defaults() {
        let behavior: Behavior =
            serde_json::from_str(r#"{"selection_mode": "multiple"}"#).unwrap();
        assert_eq!(behavior.selection_mode, SelectionMode::Multiple);
        assert_eq!(behavior.keyboard_dismiss_mode, KeyboardDismissMode::OnDrag);
        assert!(behavior.underflow.always_bounce);
    }

    #[test]
    fn uniform_insets() {
        let insets = Insets::uniform(8.0);
        assert_eq!(insets.top, 8.0);
        assert_eq!(insets.right, 8.0);
    }
}
