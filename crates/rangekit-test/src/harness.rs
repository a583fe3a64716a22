//! Test harness for rangekit widgets.

use rangekit_core::{
    Constraints, Event, Key, MouseButton, Point, PointerId, PointerType, RecordingCanvas, Rect,
    Widget,
};
use std::any::Any;
use std::collections::VecDeque;

/// Drives a widget with simulated input and records what it emits.
pub struct Harness<W: Widget> {
    /// Widget being tested
    root: W,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Messages returned by the widget, in order
    messages: Vec<Box<dyn Any + Send>>,
    /// Current viewport size
    viewport: Rect,
}

impl<W: Widget> Harness<W> {
    /// Create a harness and lay the widget out at its preferred size.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            event_queue: VecDeque::new(),
            messages: Vec::new(),
            viewport: Rect::new(0.0, 0.0, 1280.0, 720.0),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size and lay out again.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// Lay the widget out at explicit bounds.
    pub fn layout(&mut self, bounds: Rect) -> &mut Self {
        self.root.layout(bounds);
        self
    }

    /// The widget.
    pub const fn widget(&self) -> &W {
        &self.root
    }

    /// The widget, mutably.
    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.root
    }

    // === Event Simulation ===

    /// Deliver one event.
    pub fn dispatch(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    /// Give the widget focus.
    pub fn focus(&mut self) -> &mut Self {
        self.dispatch(Event::FocusIn)
    }

    /// Take focus away.
    pub fn blur(&mut self) -> &mut Self {
        self.dispatch(Event::FocusOut)
    }

    /// Press a key without releasing it.
    pub fn key_down(&mut self, key: Key) -> &mut Self {
        self.dispatch(Event::KeyDown { key })
    }

    /// Release a key.
    pub fn key_up(&mut self, key: Key) -> &mut Self {
        self.dispatch(Event::KeyUp { key })
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Press and hold the left mouse button.
    pub fn mouse_down(&mut self, position: Point) -> &mut Self {
        self.dispatch(Event::MouseDown {
            position,
            button: MouseButton::Left,
        })
    }

    /// Move the mouse.
    pub fn mouse_move(&mut self, position: Point) -> &mut Self {
        self.dispatch(Event::MouseMove { position })
    }

    /// Release the left mouse button.
    pub fn mouse_up(&mut self, position: Point) -> &mut Self {
        self.dispatch(Event::MouseUp {
            position,
            button: MouseButton::Left,
        })
    }

    /// Simulate a click at a position.
    pub fn click(&mut self, position: Point) -> &mut Self {
        self.event_queue.push_back(Event::MouseMove { position });
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Simulate a mouse drag through `path`.
    pub fn drag(&mut self, from: Point, path: &[Point]) -> &mut Self {
        self.event_queue.push_back(Event::MouseDown {
            position: from,
            button: MouseButton::Left,
        });
        for position in path {
            self.event_queue
                .push_back(Event::MouseMove { position: *position });
        }
        self.event_queue.push_back(Event::MouseUp {
            position: path.last().copied().unwrap_or(from),
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Put a primary touch pointer down.
    pub fn pointer_down(&mut self, pointer: u32, position: Point) -> &mut Self {
        self.dispatch(Event::PointerDown {
            pointer_id: PointerId::new(pointer),
            pointer_type: PointerType::Touch,
            position,
            is_primary: true,
        })
    }

    /// Move a pointer.
    pub fn pointer_move(&mut self, pointer: u32, position: Point) -> &mut Self {
        self.dispatch(Event::PointerMove {
            pointer_id: PointerId::new(pointer),
            position,
        })
    }

    /// Lift a pointer.
    pub fn pointer_up(&mut self, pointer: u32, position: Point) -> &mut Self {
        self.dispatch(Event::PointerUp {
            pointer_id: PointerId::new(pointer),
            position,
        })
    }

    /// Cancel a pointer.
    pub fn pointer_cancel(&mut self, pointer: u32) -> &mut Self {
        self.dispatch(Event::PointerCancel {
            pointer_id: PointerId::new(pointer),
        })
    }

    // === Rendering ===

    /// Paint the widget into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    /// Generated HTML.
    #[must_use]
    pub fn html(&self) -> String {
        self.root.to_html()
    }

    // === Messages ===

    /// Messages of type `T` emitted so far.
    #[must_use]
    pub fn messages<T: Any + Clone>(&self) -> Vec<T> {
        self.messages
            .iter()
            .filter_map(|m| m.downcast_ref::<T>())
            .cloned()
            .collect()
    }

    /// Number of messages of any type emitted so far.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Forget recorded messages.
    pub fn clear_messages(&mut self) -> &mut Self {
        self.messages.clear();
        self
    }

    // === Assertions ===

    /// Assert that the generated HTML contains a fragment.
    ///
    /// # Panics
    ///
    /// Panics if the fragment is missing.
    pub fn assert_html_contains(&self, fragment: &str) -> &Self {
        let html = self.html();
        assert!(
            html.contains(fragment),
            "Expected HTML to contain '{fragment}' but got '{html}'"
        );
        self
    }

    /// Assert that every brick assertion passes.
    ///
    /// # Panics
    ///
    /// Panics listing the failed assertions.
    pub fn assert_verified(&self) -> &Self {
        let verification = self.root.verify();
        assert!(
            verification.is_valid(),
            "Expected {} to verify but these failed: {:?}",
            self.root.brick_name(),
            verification.failed
        );
        self
    }

    /// Assert the number of emitted messages of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_message_count<T: Any + Clone>(&self, expected: usize) -> &Self {
        let actual = self.messages::<T>().len();
        assert_eq!(
            actual,
            expected,
            "Expected {expected} messages of type {} but found {actual}",
            std::any::type_name::<T>()
        );
        self
    }

    // === Internal ===

    fn relayout(&mut self) {
        let size = self
            .root
            .measure(Constraints::loose(self.viewport.size()));
        self.root.layout(Rect::new(0.0, 0.0, size.width, size.height));
    }

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                self.messages.push(message);
            }
        }
    }
}
