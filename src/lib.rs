//! # animate-background-image
//!
//! Flipbook animation of an element's background image from a sequence of
//! preloaded still frames.
//!
//! This crate provides platform-agnostic logic for:
//! - Resolving configuration from an options object and element attributes
//! - Deriving frame URLs from a `${frame}` template
//! - Preloading frame images and polling their completion
//! - Advancing the visible frame on a self-rescheduling timer, only once the
//!   next frame has loaded
//!
//! The host (a browser page, a test harness) is reached through the
//! [`Element`], [`Document`], [`ImageLoader`] and [`Scheduler`] traits.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for `Options` and `Configuration`
//! - `toml` - Load `Options` from TOML
//! - `web` - Browser/WASM host with `animateBackgroundImage` and `initializeAll` exports
//!
//! ## Example
//!
//! ```rust,ignore
//! use animate_background_image::{create, Options};
//! use animate_background_image::web::{HtmlImageLoader, TimeoutScheduler};
//!
//! // <div data-animate-background-image-base-url="https://cdn/f-${frame}.jpg"
//! //      data-animate-background-image-frames="24"></div>
//! let options = Options::new().speed(80);
//! if let Some(anim) = create(element, Some(&options), &HtmlImageLoader, TimeoutScheduler) {
//!     let stop = anim.stop_handle();
//!     // later: stop.stop();
//! }
//! ```

mod animation;
pub mod config;
mod error;
mod host;
mod instance;
mod loader;
mod template;

#[cfg(test)]
mod testing;

#[cfg(feature = "web")]
pub mod web;

pub use animation::{AnimationState, FrameAnimator, Tick};
pub use config::{Configuration, Field, Options, Resolution, Source};
pub use error::Error;
pub use host::{background_image_value, Document, Element, Scheduler, Task, MARKER_ATTRIBUTE};
pub use instance::{create, initialize_all, AnimateBackgroundImage, StopHandle};
pub use loader::{preload_frames, ImageLoader, LoadState};
pub use template::{FrameUrlTemplate, PLACEHOLDER};
