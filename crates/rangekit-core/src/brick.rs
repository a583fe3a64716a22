//! Self-checks a widget runs before it is painted.
//!
//! A [`Brick`] lists [`BrickAssertion`]s about its own state. Hosts call
//! [`Brick::verify`] and skip painting when any of them fails. The same trait
//! renders the widget as static HTML/CSS.

use std::time::Duration;

/// A property the widget promises to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum BrickAssertion {
    /// Named widget invariant, checked by the widget itself
    Invariant(&'static str),
    /// Some element in the generated HTML matches this class selector
    ElementPresent(String),
    /// At least one part can take keyboard focus
    Focusable,
    /// Foreground parts reach this WCAG contrast ratio against the background
    MinContrast(f32),
}

impl BrickAssertion {
    /// Shorthand for [`BrickAssertion::ElementPresent`].
    #[must_use]
    pub fn element_present(selector: impl Into<String>) -> Self {
        Self::ElementPresent(selector.into())
    }
}

/// Frame time a brick may spend, in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickBudget {
    /// Whole measure/layout/paint pass
    pub total_ms: u32,
}

impl BrickBudget {
    /// One 60 Hz frame.
    pub const FRAME: Self = Self::uniform(16);

    /// `total_ms` split evenly over measure, layout and paint.
    #[must_use]
    pub const fn uniform(total_ms: u32) -> Self {
        Self { total_ms }
    }

    /// Share of the budget for a single phase.
    #[must_use]
    pub const fn phase_ms(&self) -> u32 {
        self.total_ms / 3
    }

    /// The whole budget as a [`Duration`].
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.total_ms as u64)
    }
}

impl Default for BrickBudget {
    fn default() -> Self {
        Self::FRAME
    }
}

/// Outcome of [`Brick::verify`].
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// Assertions that held
    pub passed: Vec<BrickAssertion>,
    /// Assertions that did not, each with a reason
    pub failed: Vec<(BrickAssertion, String)>,
}

impl BrickVerification {
    /// Sort `assertions` into passed and failed using `check`.
    pub fn run<F>(assertions: &[BrickAssertion], mut check: F) -> Self
    where
        F: FnMut(&BrickAssertion) -> Result<(), String>,
    {
        assertions
            .iter()
            .fold(Self::default(), |mut verification, assertion| {
                match check(assertion) {
                    Ok(()) => verification.passed.push(assertion.clone()),
                    Err(reason) => verification.failed.push((assertion.clone(), reason)),
                }
                verification
            })
    }

    /// `true` when nothing failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A verifiable widget that can also be rendered to markup.
pub trait Brick: Send + Sync {
    /// Stable type name used in reports
    fn brick_name(&self) -> &'static str;

    /// Everything [`Brick::verify`] checks
    fn assertions(&self) -> &[BrickAssertion];

    /// Time allowance per frame
    fn budget(&self) -> BrickBudget;

    /// Check [`Brick::assertions`] against current state.
    fn verify(&self) -> BrickVerification;

    /// Static HTML for the current state. Same state, same string.
    fn to_html(&self) -> String;

    /// CSS scoped to the class names used by [`Brick::to_html`].
    fn to_css(&self) -> String;

    /// Shorthand for `verify().is_valid()`.
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}
