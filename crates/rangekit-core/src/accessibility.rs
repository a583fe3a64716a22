//! Accessibility nodes for screen readers and assistive technology.
//!
//! Widgets describe their focusable parts as [`AccessibleNode`]s. The node
//! maps onto ARIA attributes through [`AccessibleNode::aria_attributes`],
//! which web backends write into the generated markup.

use crate::geometry::{Axis, Rect};
use crate::widget::AccessibleRole;
use std::collections::BTreeMap;

/// Unique identifier for an accessible node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccessibleNodeId(pub u64);

impl AccessibleNodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// An accessible element.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessibleNode {
    /// Unique identifier.
    pub id: AccessibleNodeId,
    /// Accessible name (label).
    pub name: Option<String>,
    /// Accessible role.
    pub role: AccessibleRole,
    /// Bounding rectangle.
    pub bounds: Rect,
    /// Whether the element is focusable.
    pub focusable: bool,
    /// Whether the element is currently focused.
    pub focused: bool,
    /// Whether the element is enabled.
    pub enabled: bool,
    /// Current value (for sliders).
    pub value_now: Option<f64>,
    /// Minimum value (for sliders).
    pub value_min: Option<f64>,
    /// Maximum value (for sliders).
    pub value_max: Option<f64>,
    /// Human-readable value.
    pub value_text: Option<String>,
    /// Orientation, for controls that have one.
    pub orientation: Option<Axis>,
    /// Tab index (-1 = not focusable, 0 = natural order).
    pub tab_index: i32,
    /// Extra attributes, emitted verbatim.
    pub properties: BTreeMap<String, String>,
}

impl AccessibleNode {
    /// Create a new accessible node.
    #[must_use]
    pub fn new(id: AccessibleNodeId, role: AccessibleRole, bounds: Rect) -> Self {
        Self {
            id,
            name: None,
            role,
            bounds,
            focusable: false,
            focused: false,
            enabled: true,
            value_now: None,
            value_min: None,
            value_max: None,
            value_text: None,
            orientation: None,
            tab_index: -1,
            properties: BTreeMap::new(),
        }
    }

    /// Create a new slider node.
    #[must_use]
    pub fn slider(id: AccessibleNodeId, value: f64, min: f64, max: f64, bounds: Rect) -> Self {
        let mut node = Self::new(id, AccessibleRole::Slider, bounds);
        node.value_now = Some(value);
        node.value_min = Some(min);
        node.value_max = Some(max);
        node.focusable = true;
        node.tab_index = 0;
        node
    }

    /// Set the node's name.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the human-readable value.
    #[must_use]
    pub fn with_value_text(mut self, text: impl Into<String>) -> Self {
        self.value_text = Some(text.into());
        self
    }

    /// Set the orientation.
    #[must_use]
    pub const fn with_orientation(mut self, axis: Axis) -> Self {
        self.orientation = Some(axis);
        self
    }

    /// Mark the node focused or not.
    #[must_use]
    pub const fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Enable or disable the node. Disabled nodes leave the tab order.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        if !enabled {
            self.focusable = false;
            self.tab_index = -1;
        }
        self
    }

    /// Set a custom property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    /// ARIA attributes in a stable order.
    #[must_use]
    pub fn aria_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![("role".to_string(), self.role.aria_name().to_string())];
        attrs.push(("tabindex".to_string(), self.tab_index.to_string()));
        if let Some(name) = &self.name {
            attrs.push(("aria-label".to_string(), name.clone()));
        }
        if let Some(now) = self.value_now {
            attrs.push(("aria-valuenow".to_string(), format_number(now)));
        }
        if let Some(min) = self.value_min {
            attrs.push(("aria-valuemin".to_string(), format_number(min)));
        }
        if let Some(max) = self.value_max {
            attrs.push(("aria-valuemax".to_string(), format_number(max)));
        }
        if let Some(text) = &self.value_text {
            attrs.push(("aria-valuetext".to_string(), text.clone()));
        }
        if let Some(axis) = self.orientation {
            attrs.push(("aria-orientation".to_string(), axis.as_str().to_string()));
        }
        attrs.push(("aria-disabled".to_string(), (!self.enabled).to_string()));
        attrs.extend(self.properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        attrs
    }
}

/// Format a number the way the DOM stringifies it (`2`, not `2.0`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
        attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_slider_node_defaults() {
        let node = AccessibleNode::slider(AccessibleNodeId::new(1), 2.0, 0.0, 10.0, Rect::default());
        assert_eq!(node.role, AccessibleRole::Slider);
        assert!(node.focusable);
        assert_eq!(node.tab_index, 0);
        assert_eq!(node.value_now, Some(2.0));
    }

    #[test]
    fn test_slider_aria_attributes() {
        let node = AccessibleNode::slider(AccessibleNodeId::new(1), 2.0, 0.0, 10.0, Rect::default())
            .with_name("Volume")
            .with_value_text("2 dB")
            .with_orientation(Axis::Vertical);
        let attrs = node.aria_attributes();
        assert_eq!(attrs[0], ("role".to_string(), "slider".to_string()));
        assert_eq!(attr(&attrs, "aria-valuenow"), Some("2"));
        assert_eq!(attr(&attrs, "aria-valuemin"), Some("0"));
        assert_eq!(attr(&attrs, "aria-valuemax"), Some("10"));
        assert_eq!(attr(&attrs, "aria-label"), Some("Volume"));
        assert_eq!(attr(&attrs, "aria-valuetext"), Some("2 dB"));
        assert_eq!(attr(&attrs, "aria-orientation"), Some("vertical"));
        assert_eq!(attr(&attrs, "aria-disabled"), Some("false"));
    }

    #[test]
    fn test_disabled_node_leaves_tab_order() {
        let node = AccessibleNode::slider(AccessibleNodeId::new(3), 0.0, 0.0, 1.0, Rect::default())
            .with_enabled(false);
        assert!(!node.focusable);
        assert_eq!(node.tab_index, -1);
        assert_eq!(attr(&node.aria_attributes(), "aria-disabled"), Some("true"));
    }

    #[test]
    fn test_custom_properties_are_emitted() {
        let node = AccessibleNode::new(AccessibleNodeId::new(0), AccessibleRole::Group, Rect::default())
            .with_property("data-index", "1");
        assert_eq!(attr(&node.aria_attributes(), "data-index"), Some("1"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.25), "0.25");
    }
}
