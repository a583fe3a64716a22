//! Range slider widget: one or more ordered thumbs on a track.
//!
//! Thumbs move by keyboard while focused and by pointer drag. Every
//! interaction runs inside an [`InteractionSession`] that holds the document
//! listeners it needs and reports:
//!
//! - `on_before_change` once, before the first effective change
//! - `on_change` for every effective change
//! - `on_after_change` once when the session ends, if anything changed
//!
//! Moves that leave the values unchanged fire nothing.

mod config;
mod keyboard;
mod render;
mod session;
mod values;

pub use config::{ConfigError, Marks, SliderConfig};
pub use keyboard::KeyAction;
pub use render::{DefaultThumbRenderer, ThumbProps, ThumbRenderer, ThumbState};
pub use session::{InteractionSession, SessionKind};
pub use values::{clamp_against_neighbors, NeighborOptions, SliderValue, ValueBounds, ValueSet};

use rangekit_core::{
    format_number, AccessibleNode, AccessibleNodeId, AccessibleRole, Axis, Brick, BrickAssertion,
    BrickBudget, BrickVerification, Canvas, Color, Constraints, Event, Key, LayoutResult,
    ListenerKind, ListenerRegistry, MouseButton, Point, PointerId, Rect, Size, TypeId, Widget,
};
use render::indexed_class;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use tracing::{trace, warn};

/// Message emitted when a thumb value changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSliderChanged {
    /// Slider value after the change
    pub value: SliderValue,
    /// Thumb that moved
    pub index: usize,
}

/// Message emitted when a session that changed the value ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSliderCommitted {
    /// Final slider value
    pub value: SliderValue,
    /// Thumb that was moved
    pub index: usize,
}

/// Message emitted for a handled key that left the value unchanged.
///
/// Any message returned from a key-down means the key was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyConsumed {
    /// The key
    pub key: Key,
}

type ValueCallback = Box<dyn FnMut(&SliderValue, usize) + Send + Sync>;

#[derive(Default)]
struct Callbacks {
    before_change: Option<ValueCallback>,
    change: Option<ValueCallback>,
    after_change: Option<ValueCallback>,
}

const VALUES_VALID: &str = "thumb-values-valid";
const MIN_THUMB_CONTRAST: f32 = 1.5;

/// Slider with one or more ordered thumbs.
pub struct RangeSlider {
    config: SliderConfig,
    values: ValueSet,
    /// Last controlled value passed in
    controlled: Option<SliderValue>,
    document: ListenerRegistry,
    session: Option<InteractionSession>,
    focused: Option<usize>,
    bounds: Rect,
    assertions: Vec<BrickAssertion>,
    callbacks: Callbacks,
    renderer: Box<dyn ThumbRenderer>,
}

impl RangeSlider {
    /// Create a slider from a configuration.
    pub fn new(config: SliderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = config.initial_value().clone();
        let (values, adjusted) =
            ValueSet::normalized(&initial, &config.bounds(), config.min_distance);
        if adjusted {
            warn!(value = ?initial, normalized = ?values.as_slice(), "initial value clamped to slider bounds");
        }

        let mut assertions = vec![
            BrickAssertion::Invariant(VALUES_VALID),
            BrickAssertion::element_present(format!(".{}-0", config.thumb_class_name)),
            BrickAssertion::MinContrast(MIN_THUMB_CONTRAST),
        ];
        if !config.disabled {
            assertions.push(BrickAssertion::Focusable);
        }

        Ok(Self {
            controlled: config.value.clone(),
            config,
            values,
            document: ListenerRegistry::new(),
            session: None,
            focused: None,
            bounds: Rect::default(),
            assertions,
            callbacks: Callbacks::default(),
            renderer: Box::new(DefaultThumbRenderer),
        })
    }

    /// Create a slider from a YAML manifest.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        SliderConfig::from_yaml(source).and_then(Self::new)
    }

    /// Register session listeners on a shared document.
    #[must_use]
    pub fn with_document(mut self, document: ListenerRegistry) -> Self {
        self.session = None;
        self.document = document;
        self
    }

    /// Called with the old value before the first change of a session.
    #[must_use]
    pub fn on_before_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SliderValue, usize) + Send + Sync + 'static,
    {
        self.callbacks.before_change = Some(Box::new(f));
        self
    }

    /// Called with the new value after every effective change.
    #[must_use]
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SliderValue, usize) + Send + Sync + 'static,
    {
        self.callbacks.change = Some(Box::new(f));
        self
    }

    /// Called with the final value when a session that changed it ends.
    #[must_use]
    pub fn on_after_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&SliderValue, usize) + Send + Sync + 'static,
    {
        self.callbacks.after_change = Some(Box::new(f));
        self
    }

    /// Replace the thumb renderer.
    #[must_use]
    pub fn render_thumb(mut self, renderer: impl ThumbRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> SliderValue {
        self.values.to_slider_value()
    }

    /// Current values, one per thumb.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// Number of thumbs.
    #[must_use]
    pub fn thumb_count(&self) -> usize {
        self.values.len()
    }

    /// Thumb holding keyboard focus.
    #[must_use]
    pub const fn focused_thumb(&self) -> Option<usize> {
        self.focused
    }

    /// Thumb being dragged, or else the focused one.
    #[must_use]
    pub fn active_thumb(&self) -> Option<usize> {
        self.session
            .as_ref()
            .map(InteractionSession::index)
            .or(self.focused)
    }

    /// Open session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&InteractionSession> {
        self.session.as_ref()
    }

    /// Document the slider registers its listeners on.
    #[must_use]
    pub const fn document(&self) -> &ListenerRegistry {
        &self.document
    }

    /// Give keyboard focus to a thumb and start listening for keys.
    ///
    /// Returns false for a disabled slider or an unknown thumb.
    pub fn focus_thumb(&mut self, index: usize) -> bool {
        if self.config.disabled || index >= self.values.len() {
            return false;
        }
        if self.focused != Some(index) {
            let _ = self.blur();
            self.focused = Some(index);
        }
        if self.session.is_none() {
            self.session = Some(InteractionSession::open(
                &self.document,
                SessionKind::Keyboard,
                index,
            ));
        }
        true
    }

    /// Drop focus, ending any open session.
    pub fn blur(&mut self) -> Option<RangeSliderCommitted> {
        self.focused = None;
        self.end_session()
    }

    /// Release everything without firing callbacks.
    pub fn unmount(&mut self) {
        self.session = None;
        self.focused = None;
    }

    /// Sync a controlled value.
    ///
    /// Ignored when equal to the last value passed in. Out-of-range values
    /// are clamped and aligned.
    pub fn set_value(&mut self, value: impl Into<SliderValue>) {
        let value = value.into();
        if self.controlled.as_ref() == Some(&value) {
            return;
        }
        if value.is_empty() || value.as_slice().iter().any(|v| !v.is_finite()) {
            warn!(?value, "ignoring controlled value without finite thumbs");
            return;
        }
        if let Err(err) = self.config.check_fits(value.len()) {
            warn!(%err, "ignoring controlled value");
            return;
        }

        let (values, adjusted) =
            ValueSet::normalized(&value, &self.config.bounds(), self.config.min_distance);
        if adjusted {
            warn!(?value, normalized = ?values.as_slice(), "controlled value clamped to slider bounds");
        }
        let count = values.len();
        self.values = values;
        self.controlled = Some(value);

        self.focused = self.focused.map(|i| i.min(count - 1));
        if self.session.as_ref().is_some_and(|s| s.index() >= count) {
            self.session = None;
        }
    }

    fn thumb_color(&self) -> Color {
        if self.config.disabled {
            Color::GRAY
        } else {
            self.config.thumb_color
        }
    }

    /// Presentation of a thumb.
    #[must_use]
    pub fn thumb_props(&self, index: usize) -> Option<ThumbProps> {
        let value = self.values.get(index)?;
        let active = self.active_thumb() == Some(index);
        let mut class_name = indexed_class(&self.config.thumb_class_name, index);
        if active {
            class_name.push(' ');
            class_name.push_str(&self.config.thumb_active_class_name);
        }
        Some(ThumbProps {
            index,
            class_name,
            bounds: self.thumb_rect(index),
            color: self.thumb_color(),
            active,
            tab_index: if self.config.disabled { -1 } else { 0 },
            aria_label: self.config.aria_label.get(index).cloned(),
            aria_valuetext: self.config.value_text(value, index),
        })
    }

    /// First thumb whose classes match a `.class` selector.
    #[must_use]
    pub fn thumb_by_class(&self, selector: &str) -> Option<ThumbProps> {
        (0..self.values.len())
            .filter_map(|i| self.thumb_props(i))
            .find(|props| props.matches_selector(selector))
    }

    /// One slider node per thumb.
    #[must_use]
    pub fn accessible_nodes(&self) -> Vec<AccessibleNode> {
        self.values
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let mut node = AccessibleNode::slider(
                    AccessibleNodeId::new(i as u64),
                    *value,
                    self.config.min,
                    self.config.max,
                    self.thumb_rect(i),
                )
                .with_orientation(self.config.orientation)
                .with_focused(self.focused == Some(i))
                .with_enabled(!self.config.disabled);
                if let Some(label) = self.config.aria_label.get(i) {
                    node = node.with_name(label);
                }
                if let Some(text) = self.config.value_text(*value, i) {
                    node = node.with_value_text(text);
                }
                node
            })
            .collect()
    }

    // === Geometry ===

    fn axis(&self) -> Axis {
        self.config.orientation
    }

    /// Region thumb centers travel along.
    fn track_rect(&self) -> Rect {
        self.bounds
            .inset_along(self.axis(), self.config.thumb_size / 2.0)
    }

    /// Value under a point.
    fn value_at(&self, position: Point) -> f64 {
        let axis = self.axis();
        let track = self.track_rect();
        let extent = track.extent(axis);
        if extent <= 0.0 {
            return self.config.min;
        }
        let mut ratio = f64::from((position.along(axis) - track.start(axis)) / extent);
        if self.config.invert {
            ratio = 1.0 - ratio;
        }
        self.config.bounds().at_ratio(ratio)
    }

    /// Coordinate of a value along the track axis.
    fn position_of(&self, value: f64) -> f32 {
        let axis = self.axis();
        let track = self.track_rect();
        let mut ratio = self.config.bounds().ratio(value);
        if self.config.invert {
            ratio = 1.0 - ratio;
        }
        track
            .extent(axis)
            .mul_add(ratio as f32, track.start(axis))
    }

    fn point_on_track(&self, value: f64) -> Point {
        let along = self.position_of(value);
        let cross = self.bounds.center().along(self.axis().cross());
        match self.axis() {
            Axis::Horizontal => Point::new(along, cross),
            Axis::Vertical => Point::new(cross, along),
        }
    }

    fn thumb_rect(&self, index: usize) -> Rect {
        let value = self.values.get(index).unwrap_or(self.config.min);
        let size = self.config.thumb_size;
        Rect::centered_at(self.point_on_track(value), Size::new(size, size))
    }

    /// Track segments, `n + 1` for `n` thumbs, with whether each is selected.
    fn track_segments(&self) -> Vec<(Rect, bool)> {
        let n = self.values.len();
        let mut stops = Vec::with_capacity(n + 2);
        stops.push(self.position_of(self.config.min));
        stops.extend(self.values.as_slice().iter().map(|v| self.position_of(*v)));
        stops.push(self.position_of(self.config.max));

        let axis = self.axis();
        let thickness = self.config.track_thickness;
        let cross = self.bounds.center().along(axis.cross()) - thickness / 2.0;
        stops
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let (lo, hi) = if pair[0] <= pair[1] {
                    (pair[0], pair[1])
                } else {
                    (pair[1], pair[0])
                };
                let rect = match axis {
                    Axis::Horizontal => Rect::new(lo, cross, hi - lo, thickness),
                    Axis::Vertical => Rect::new(cross, lo, thickness, hi - lo),
                };
                let selected = if n == 1 { i == 0 } else { i > 0 && i < n };
                (rect, selected)
            })
            .collect()
    }

    /// Thumb a press at `position` grabs, and whether it landed on it.
    fn pick_thumb(&self, position: Point, pressed: f64) -> (usize, bool) {
        let closest = self.values.closest(pressed);
        if self.thumb_rect(closest).contains_point(&position) {
            return (closest, true);
        }
        let hit = (0..self.values.len())
            .rev()
            .find(|i| self.thumb_rect(*i).contains_point(&position));
        hit.map_or((closest, false), |i| (i, true))
    }

    // === Interaction ===

    fn listening(&self, kind: ListenerKind) -> bool {
        self.session.as_ref().is_some_and(|s| s.listens(kind))
    }

    fn tracks_pointer(&self, pointer: PointerId) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.tracks_pointer(pointer))
    }

    /// Move thumb `index` toward `candidate`, firing callbacks on change.
    fn apply(&mut self, index: usize, candidate: f64) -> Option<RangeSliderChanged> {
        let aligned = self.config.bounds().trim_align(candidate);
        let next = clamp_against_neighbors(
            index,
            aligned,
            self.values.as_slice(),
            &self.config.neighbor_options(),
        );
        if next.as_slice() == self.values.as_slice() {
            return None;
        }

        let first = self.session.as_mut()?.mark_changed();
        if first {
            let previous = self.values.to_slider_value();
            if let Some(callback) = self.callbacks.before_change.as_mut() {
                callback(&previous, index);
            }
        }

        self.values.replace(next);
        let value = self.values.to_slider_value();
        trace!(index, ?value, "slider value changed");
        if let Some(callback) = self.callbacks.change.as_mut() {
            callback(&value, index);
        }
        Some(RangeSliderChanged { value, index })
    }

    /// Close the open session, firing `on_after_change` if it changed anything.
    fn end_session(&mut self) -> Option<RangeSliderCommitted> {
        let session = self.session.take()?;
        if !session.has_changed() {
            return None;
        }
        let index = session.index();
        drop(session);

        let value = self.values.to_slider_value();
        if let Some(callback) = self.callbacks.after_change.as_mut() {
            callback(&value, index);
        }
        Some(RangeSliderCommitted { value, index })
    }

    fn key_down(&mut self, key: Key) -> Option<Box<dyn Any + Send>> {
        let index = self.focused?;
        let action = KeyAction::resolve(key, self.config.invert, self.config.page_multiplier)?;

        if !self.listening(ListenerKind::KeyDown) {
            // keyup closed the last session; the thumb is still focused
            let _ = self.end_session();
            self.session = Some(InteractionSession::open(
                &self.document,
                SessionKind::Keyboard,
                index,
            ));
        }

        let current = self.values.get(index)?;
        let candidate = action.target(current, &self.config.bounds());
        match self.apply(index, candidate) {
            Some(changed) => Some(boxed(changed)),
            None => Some(boxed(KeyConsumed { key })),
        }
    }

    fn press(&mut self, position: Point, kind: SessionKind) -> Option<RangeSliderChanged> {
        if self.values.is_empty() || !self.bounds.contains_point(&position) {
            return None;
        }
        let pressed = self.value_at(position);
        let (index, on_thumb) = self.pick_thumb(position, pressed);
        let current = self.values.get(index)?;

        let _ = self.end_session();
        self.focused = Some(index);

        let jump = !on_thumb && !self.config.snap_drag_disabled;
        let offset = if jump { 0.0 } else { current - pressed };
        self.session = Some(
            InteractionSession::open(&self.document, kind, index).with_grab_offset(offset),
        );
        if jump {
            self.apply(index, pressed)
        } else {
            None
        }
    }

    fn drag_to(&mut self, position: Point) -> Option<RangeSliderChanged> {
        let session = self.session.as_ref()?;
        let (index, offset) = (session.index(), session.grab_offset());
        let candidate = self.value_at(position) + offset;
        self.apply(index, candidate)
    }

    fn root_class(&self) -> String {
        let mut class = format!("{} {}", self.config.class_name, self.axis().as_str());
        if self.config.invert {
            class.push_str(" invert");
        }
        if self.config.disabled {
            class.push_str(" disabled");
        }
        class
    }
}

fn boxed<T: Any + Send>(message: T) -> Box<dyn Any + Send> {
    Box::new(message)
}

fn escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSlider")
            .field("values", &self.values.as_slice())
            .field("focused", &self.focused)
            .field("session", &self.session)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Brick for RangeSlider {
    fn brick_name(&self) -> &'static str {
        "RangeSlider"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &self.assertions
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::FRAME
    }

    fn verify(&self) -> BrickVerification {
        BrickVerification::run(&self.assertions, |assertion| match assertion {
            BrickAssertion::Invariant(VALUES_VALID) => self
                .values
                .check(&self.config.bounds(), self.config.min_distance),
            BrickAssertion::MinContrast(min) => {
                let ratio = self.thumb_color().contrast_ratio(&self.config.track_color);
                if ratio >= *min {
                    Ok(())
                } else {
                    Err(format!("thumb contrast {ratio:.2} is below {min}"))
                }
            }
            BrickAssertion::Focusable if self.config.disabled => {
                Err("disabled slider is not focusable".into())
            }
            BrickAssertion::ElementPresent(selector) => self
                .thumb_by_class(selector)
                .map(|_| ())
                .ok_or_else(|| format!("no thumb matches {selector}")),
            _ => Ok(()),
        })
    }

    fn to_html(&self) -> String {
        let mut html = format!(r#"<div class="{}""#, escape_attr(&self.root_class()));
        if let Some(id) = &self.config.test_id {
            html.push_str(&format!(r#" data-testid="{}""#, escape_attr(id)));
        }
        html.push('>');

        if self.config.with_tracks {
            for i in 0..self.track_segments().len() {
                html.push_str(&format!(
                    r#"<div class="{}"></div>"#,
                    escape_attr(&indexed_class(&self.config.track_class_name, i))
                ));
            }
        }

        for (props, node) in (0..self.values.len())
            .filter_map(|i| self.thumb_props(i))
            .zip(self.accessible_nodes())
        {
            html.push_str(&format!(r#"<div class="{}""#, escape_attr(&props.class_name)));
            for (key, value) in node.aria_attributes() {
                html.push_str(&format!(r#" {key}="{}""#, escape_attr(&value)));
            }
            html.push_str("></div>");
        }

        for mark in self.config.mark_values() {
            html.push_str(&format!(
                r#"<span class="{}">{}</span>"#,
                escape_attr(&self.config.mark_class_name),
                format_number(mark)
            ));
        }

        html.push_str("</div>");
        html
    }

    fn to_css(&self) -> String {
        let c = &self.config;
        let size = c.thumb_size;
        let (length, cross) = match c.orientation {
            Axis::Horizontal => ("width", "height"),
            Axis::Vertical => ("height", "width"),
        };
        format!(
            ".{root} {{ position: relative; {length}: 100%; {cross}: {size}px; }}\n\
             .{track} {{ position: absolute; {cross}: {thickness}px; background: {track_color}; }}\n\
             .{thumb} {{ position: absolute; width: {size}px; height: {size}px; background: {thumb_color}; }}\n\
             .{thumb}.{active} {{ outline: 2px solid {active_color}; }}\n\
             .{mark} {{ position: absolute; }}",
            root = c.class_name,
            track = c.track_class_name,
            thumb = c.thumb_class_name,
            active = c.thumb_active_class_name,
            mark = c.mark_class_name,
            thickness = c.track_thickness,
            track_color = c.track_color.to_hex(),
            thumb_color = c.thumb_color.to_hex(),
            active_color = c.active_color.to_hex(),
        )
    }
}

impl Widget for RangeSlider {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let cross = self.config.thumb_size.max(self.config.track_thickness);
        constraints.constrain(Size::from_axis(self.axis(), 200.0, cross))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.config.with_tracks {
            for (rect, selected) in self.track_segments() {
                let color = if selected {
                    self.config.active_color
                } else {
                    self.config.track_color
                };
                canvas.fill_rect(rect, color);
            }
        }

        for mark in self.config.mark_values() {
            canvas.fill_circle(
                self.point_on_track(mark),
                self.config.track_thickness / 2.0,
                self.config.thumb_color,
            );
        }

        let value = self.values.to_slider_value();
        for (index, value_now) in self.values.as_slice().iter().enumerate() {
            let Some(props) = self.thumb_props(index) else {
                continue;
            };
            let state = ThumbState {
                value: value.clone(),
                index,
                value_now: *value_now,
            };
            self.renderer.render(&props, &state, canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.config.disabled {
            return None;
        }

        match event {
            Event::FocusIn => {
                self.focus_thumb(self.focused.unwrap_or(0));
                None
            }
            Event::FocusOut => self.blur().map(boxed),
            Event::KeyDown { key } => self.key_down(*key),
            Event::KeyUp { .. } if self.listening(ListenerKind::KeyUp) => {
                self.end_session().map(boxed)
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.press(*position, SessionKind::Mouse).map(boxed),
            Event::MouseMove { position } if self.listening(ListenerKind::MouseMove) => {
                self.drag_to(*position).map(boxed)
            }
            Event::MouseUp {
                button: MouseButton::Left,
                ..
            } if self.listening(ListenerKind::MouseUp) => self.end_session().map(boxed),
            Event::PointerDown {
                pointer_id,
                position,
                is_primary: true,
                ..
            } => self
                .press(*position, SessionKind::Pointer(*pointer_id))
                .map(boxed),
            Event::PointerMove {
                pointer_id,
                position,
            } if self.tracks_pointer(*pointer_id) => self.drag_to(*position).map(boxed),
            Event::PointerUp { pointer_id, .. } | Event::PointerCancel { pointer_id }
                if self.tracks_pointer(*pointer_id) =>
            {
                self.end_session().map(boxed)
            }
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        !self.config.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.config.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.config.aria_label.first().map(String::as_str)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn test_id(&self) -> Option<&str> {
        self.config.test_id.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
