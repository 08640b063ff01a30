//! UI element types for accessibility-based automation.
//!
//! This module defines the data structures representing UI elements from the
//! accessibility hierarchy. These types are shared by all driver backends and
//! are independent of any specific backend implementation.

use serde::{Deserialize, Serialize};

/// A UI element from the accessibility hierarchy.
///
/// Contains the accessibility information reported by an automation backend.
/// Elements form a tree structure via the `children` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIElement {
    /// The unique accessibility identifier for this element (AXUniqueId).
    #[serde(rename = "AXUniqueId", default)]
    pub identifier: Option<String>,

    /// The accessibility label (AXLabel), typically the user-visible text.
    #[serde(rename = "AXLabel", default)]
    pub label: Option<String>,

    /// The current value of the element (AXValue), e.g. text field contents.
    #[serde(rename = "AXValue", default)]
    pub value: Option<String>,

    /// The type of UI element (e.g. "Button", "StaticText", "Cell").
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,

    /// The element's frame (position and size) in screen coordinates.
    #[serde(default)]
    pub frame: Option<ElementFrame>,

    /// Child elements nested within this element.
    #[serde(default)]
    pub children: Vec<UIElement>,

    /// Whether the element can currently receive a tap. `None` when the
    /// backend does not report hittability.
    #[serde(default)]
    pub hittable: Option<bool>,
}

impl UIElement {
    /// Returns the user-visible text of this element: the value if present,
    /// otherwise the label.
    ///
    /// For static texts and table cells the backend reports the displayed
    /// string as the label; text fields carry it in the value instead.
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().or(self.label.as_deref())
    }

    /// Returns true if the element is visible enough to interact with.
    ///
    /// An element that exists in the tree but is reported as not hittable
    /// (behind another view, mid-animation) is not considered visible.
    pub fn is_visible(&self) -> bool {
        self.hittable != Some(false)
    }
}

/// The frame (position and dimensions) of a UI element.
///
/// Coordinates are in screen points, origin at the top-left corner of the
/// screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementFrame {
    /// The x-coordinate of the element's top-left corner.
    pub x: f64,
    /// The y-coordinate of the element's top-left corner.
    pub y: f64,
    /// The width of the element in points.
    pub width: f64,
    /// The height of the element in points.
    pub height: f64,
}

impl ElementFrame {
    /// The center point of the frame, rounded to whole screen points.
    pub fn center(&self) -> (i32, i32) {
        (
            (self.x + self.width / 2.0) as i32,
            (self.y + self.height / 2.0) as i32,
        )
    }
}
