//! Host environment abstractions.
//!
//! The animation core never touches a DOM directly. Implement these traits to
//! plug it into a browser page (see the `web` feature), a headless renderer or
//! a test harness.
//!
//! No `Send` bounds: everything runs on a single cooperative thread, as in a
//! browser event loop.

use crate::Error;

/// Attribute marking elements that [`initialize_all`](crate::initialize_all)
/// should animate.
pub const MARKER_ATTRIBUTE: &str = "data-animate-background-image";

/// A target element carrying configuration attributes and a background image.
pub trait Element {
    /// Read a raw attribute value. `None` when the attribute is absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set the CSS `background-image` property to `value` verbatim.
    fn set_background_image(&self, value: &str) -> Result<(), Error>;
}

/// A document that can enumerate elements carrying [`MARKER_ATTRIBUTE`].
pub trait Document {
    type Element: Element;

    /// All marked elements, in document order.
    fn marked_elements(&self) -> Result<Vec<Self::Element>, Error>;
}

/// A task queued on a [`Scheduler`].
pub type Task = Box<dyn FnOnce()>;

/// One-shot delayed callbacks, like `setTimeout`.
///
/// The animation loop reschedules itself after every tick, so a fixed-period
/// timer is not required.
pub trait Scheduler {
    /// Run `task` once, after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<(), Error>;
}

/// CSS value applied to the element for a frame URL.
///
/// The URL is inserted as-is, without quoting.
#[inline]
pub fn background_image_value(url: &str) -> String {
    format!("url({})", url)
}
