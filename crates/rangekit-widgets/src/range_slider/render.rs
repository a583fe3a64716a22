//! Thumb rendering hook.

use super::values::SliderValue;
use rangekit_core::{Canvas, Color, Rect};

/// Presentation of one thumb, computed by the slider.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbProps {
    /// Thumb index
    pub index: usize,
    /// Space-separated class list
    pub class_name: String,
    /// Where the thumb is painted
    pub bounds: Rect,
    /// Fill color
    pub color: Color,
    /// Focused or being dragged
    pub active: bool,
    /// Tab order (`-1` when disabled)
    pub tab_index: i32,
    /// Accessible label
    pub aria_label: Option<String>,
    /// Accessible value text
    pub aria_valuetext: Option<String>,
}

impl ThumbProps {
    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    /// Whether every class in a `.a.b` selector is present.
    #[must_use]
    pub fn matches_selector(&self, selector: &str) -> bool {
        let mut classes = selector
            .trim()
            .split('.')
            .filter(|c| !c.is_empty())
            .peekable();
        classes.peek().is_some() && classes.all(|c| self.has_class(c))
    }
}

/// Slider state handed to the render hook.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbState {
    /// Whole slider value
    pub value: SliderValue,
    /// Thumb index
    pub index: usize,
    /// This thumb's value
    pub value_now: f64,
}

/// Paints a thumb. Called once per thumb per paint pass.
///
/// Closures with the same signature implement this trait.
pub trait ThumbRenderer: Send + Sync {
    /// Paint one thumb.
    fn render(&self, props: &ThumbProps, state: &ThumbState, canvas: &mut dyn Canvas);
}

impl<F> ThumbRenderer for F
where
    F: Fn(&ThumbProps, &ThumbState, &mut dyn Canvas) + Send + Sync,
{
    fn render(&self, props: &ThumbProps, state: &ThumbState, canvas: &mut dyn Canvas) {
        self(props, state, canvas);
    }
}

/// Square thumb filled with the configured color.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThumbRenderer;

impl ThumbRenderer for DefaultThumbRenderer {
    fn render(&self, props: &ThumbProps, _state: &ThumbState, canvas: &mut dyn Canvas) {
        canvas.fill_rect(props.bounds, props.color);
    }
}

/// `"{base} {base}-{index}"`
pub(crate) fn indexed_class(base: &str, index: usize) -> String {
    format!("{base} {base}-{index}")
}
