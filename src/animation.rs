//! Frame animator: preloaded frames and the advance-when-loaded step.

use crate::host::{background_image_value, Element};
use crate::loader::{preload_frames, ImageLoader, LoadState};

/// Lifecycle of an animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// Frame URLs known, nothing requested yet
    Idle,
    /// Frame requests issued, loop not started
    Preloading,
    /// Loop is ticking
    Running,
    /// Stopped through a stop handle; ticks are ignored
    Stopped,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The given frame became visible
    Advanced(usize),
    /// The next frame was not ready; the visible frame is unchanged
    Held,
    /// The animator is not running
    Inactive,
}

/// Platform-agnostic animator for a background-image frame sequence.
///
/// This animator owns the frame URLs and image handles but does not handle
/// timing directly. The caller is responsible for calling `tick()` every
/// `interval_ms()` milliseconds; [`create`](crate::create) does that through
/// a [`Scheduler`](crate::Scheduler).
///
/// ## Example
///
/// ```rust
/// use animate_background_image::{AnimationState, FrameAnimator, LoadState, Tick};
/// # use animate_background_image::{Element, Error};
/// # struct Loaded;
/// # impl LoadState for Loaded { fn is_complete(&self) -> bool { true } }
/// # struct Div;
/// # impl Element for Div {
/// #     fn attribute(&self, _: &str) -> Option<String> { None }
/// #     fn set_background_image(&self, _: &str) -> Result<(), Error> { Ok(()) }
/// # }
///
/// let urls = vec!["a.png".to_string(), "b.png".to_string()];
/// let mut animator = FrameAnimator::with_frames(urls, vec![Some(Loaded), Some(Loaded)], 200);
/// animator.start();
/// assert_eq!(animator.state(), AnimationState::Running);
///
/// assert_eq!(animator.tick(&Div), Tick::Advanced(1));
/// assert_eq!(animator.tick(&Div), Tick::Advanced(0));
/// ```
#[derive(Debug)]
pub struct FrameAnimator<H> {
    /// URL for each frame
    frame_urls: Vec<String>,
    /// Image handle for each frame, empty slots for failed requests
    frames: Vec<Option<H>>,
    /// Currently displayed frame
    visible_frame: usize,
    /// Delay between ticks in ms
    speed: u32,
    state: AnimationState,
}

impl<H: LoadState> FrameAnimator<H> {
    /// Create an idle animator for the given frame URLs.
    pub fn new(frame_urls: Vec<String>, speed: u32) -> Self {
        Self {
            frame_urls,
            frames: Vec::new(),
            visible_frame: 0,
            speed,
            state: AnimationState::Idle,
        }
    }

    /// Create an animator from already-requested frames.
    ///
    /// `frames` is padded with empty slots or truncated to match `frame_urls`.
    pub fn with_frames(frame_urls: Vec<String>, mut frames: Vec<Option<H>>, speed: u32) -> Self {
        frames.resize_with(frame_urls.len(), || None);
        Self {
            frame_urls,
            frames,
            visible_frame: 0,
            speed,
            state: AnimationState::Preloading,
        }
    }

    /// Issue a load request for every frame.
    ///
    /// Only acts on an idle animator; returns immediately without waiting
    /// for any image.
    pub fn preload<L>(&mut self, loader: &L)
    where
        L: ImageLoader<Handle = H> + ?Sized,
    {
        if self.state != AnimationState::Idle {
            return;
        }
        self.frames = preload_frames(loader, &self.frame_urls);
        self.state = AnimationState::Preloading;
    }

    /// Enter the running state. Has no effect unless preloading.
    pub fn start(&mut self) {
        if self.state == AnimationState::Preloading {
            self.state = AnimationState::Running;
        }
    }

    /// Stop for good. Later ticks do nothing.
    pub fn stop(&mut self) {
        self.state = AnimationState::Stopped;
    }

    /// Get the current state.
    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Check if the loop is running.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// Get the visible frame index.
    #[inline]
    pub fn visible_frame(&self) -> usize {
        self.visible_frame
    }

    /// Get the number of frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_urls.len()
    }

    /// Get the frame URLs.
    #[inline]
    pub fn frame_urls(&self) -> &[String] {
        &self.frame_urls
    }

    /// Get the image handle for a frame, if it exists.
    pub fn frame(&self, index: usize) -> Option<&H> {
        self.frames.get(index).and_then(|f| f.as_ref())
    }

    /// Get the interval in milliseconds between ticks.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.speed
    }

    /// Index the next tick will try to show, wrapping at the end.
    pub fn next_frame_index(&self) -> usize {
        let count = self.frame_count();
        if count == 0 {
            0
        } else {
            (self.visible_frame + 1) % count
        }
    }

    /// Run one loop step against `target`.
    ///
    /// Advances to the next frame only if its image exists and reports
    /// complete; otherwise holds the current frame. A frame that never
    /// completes holds the loop there for as long as it runs.
    pub fn tick<E: Element + ?Sized>(&mut self, target: &E) -> Tick {
        if self.state != AnimationState::Running || self.frame_urls.is_empty() {
            return Tick::Inactive;
        }

        let next = self.next_frame_index();
        let ready = self.frame(next).is_some_and(|f| f.is_complete());
        if !ready {
            log::trace!("frame {next} not loaded, holding frame {}", self.visible_frame);
            return Tick::Held;
        }

        if let Err(e) = target.set_background_image(&background_image_value(&self.frame_urls[next])) {
            log::error!("{e}");
        }
        self.visible_frame = next;
        Tick::Advanced(next)
    }
}
