//! Animation instances and the self-rescheduling loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::animation::{AnimationState, FrameAnimator};
use crate::config::{self, Configuration, Options};
use crate::host::{Document, Element, Scheduler};
use crate::loader::{ImageLoader, LoadState};
use crate::template::FrameUrlTemplate;

/// Stops a running animation.
///
/// Dropping the handle does nothing; the animation keeps running until
/// [`stop`](StopHandle::stop) is called or the host goes away. The default
/// handle is detached and stops nothing.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    /// Stop the loop. The pending tick becomes a no-op and nothing more is
    /// scheduled; the last frame stays visible.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    /// Check if `stop` was called.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// A running background-image animation bound to one element.
pub struct AnimateBackgroundImage<E, H> {
    element: E,
    config: Configuration,
    animator: Rc<RefCell<FrameAnimator<H>>>,
    stop: StopHandle,
}

impl<E: Element, H: LoadState> AnimateBackgroundImage<E, H> {
    /// Get the target element.
    #[inline]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Get the effective configuration.
    #[inline]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Get the frame URLs, in frame order.
    pub fn frame_urls(&self) -> Vec<String> {
        self.animator.borrow().frame_urls().to_vec()
    }

    /// Get the visible frame index.
    pub fn visible_frame(&self) -> usize {
        self.animator.borrow().visible_frame()
    }

    /// Get the current loop state.
    pub fn state(&self) -> AnimationState {
        if self.stop.is_stopped() {
            AnimationState::Stopped
        } else {
            self.animator.borrow().state()
        }
    }

    /// Get a handle that can stop this animation later.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stop the animation.
    pub fn stop(&self) {
        self.stop.stop();
        self.animator.borrow_mut().stop();
    }
}

impl<E, H> std::fmt::Debug for AnimateBackgroundImage<E, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimateBackgroundImage")
            .field("config", &self.config)
            .field("stopped", &self.stop.is_stopped())
            .finish_non_exhaustive()
    }
}

/// Animate `element` with configuration from `options` and its attributes.
///
/// Returns `None` when the configuration is invalid; nothing is requested or
/// scheduled in that case. Otherwise every frame is requested from `loader`,
/// the first tick runs before this function returns, and later ticks run
/// through `scheduler` every `speed` milliseconds.
///
/// Frame URLs always come from the element's base-URL attribute, even when
/// `options` supplies a base URL.
pub fn create<E, L, S>(
    element: E,
    options: Option<&Options>,
    loader: &L,
    scheduler: S,
) -> Option<AnimateBackgroundImage<E, L::Handle>>
where
    E: Element + Clone + 'static,
    L: ImageLoader + ?Sized,
    L::Handle: 'static,
    S: Scheduler + Clone + 'static,
{
    let resolution = config::resolve(&element, options);
    if !resolution.config.is_valid() {
        log::debug!("not animating element, missing {:?}", resolution.missing());
        return None;
    }
    let config = resolution.config;

    let frames_count = config.frames_count.unwrap_or_default();
    let frame_urls = FrameUrlTemplate::from_element(&element).urls(frames_count);

    let mut animator: FrameAnimator<L::Handle> = FrameAnimator::new(frame_urls, config.speed);
    animator.preload(loader);
    animator.start();
    log::debug!("animating {} frames every {}ms", frames_count, config.speed);

    let animator = Rc::new(RefCell::new(animator));
    let stop = StopHandle::default();
    run(element.clone(), animator.clone(), scheduler, stop.clone());

    Some(AnimateBackgroundImage {
        element,
        config,
        animator,
        stop,
    })
}

/// Animate every element of `document` carrying the marker attribute.
///
/// Elements with an invalid configuration are skipped. The same `options`
/// apply to every element.
pub fn initialize_all<D, L, S>(
    document: &D,
    options: Option<&Options>,
    loader: &L,
    scheduler: S,
) -> Vec<AnimateBackgroundImage<D::Element, L::Handle>>
where
    D: Document + ?Sized,
    D::Element: Clone + 'static,
    L: ImageLoader + ?Sized,
    L::Handle: 'static,
    S: Scheduler + Clone + 'static,
{
    let elements = match document.marked_elements() {
        Ok(elements) => elements,
        Err(e) => {
            log::error!("{e}");
            return Vec::new();
        }
    };
    elements
        .into_iter()
        .filter_map(|element| create(element, options, loader, scheduler.clone()))
        .collect()
}

/// One loop step, then reschedule after `speed` whatever the outcome.
fn run<E, H, S>(element: E, animator: Rc<RefCell<FrameAnimator<H>>>, scheduler: S, stop: StopHandle)
where
    E: Element + 'static,
    H: LoadState + 'static,
    S: Scheduler + Clone + 'static,
{
    if stop.is_stopped() {
        animator.borrow_mut().stop();
        return;
    }

    let delay = {
        let mut animator = animator.borrow_mut();
        animator.tick(&element);
        animator.interval_ms()
    };

    let next = scheduler.clone();
    let task = Box::new(move || run(element, animator, next, stop));
    if let Err(e) = scheduler.schedule(delay, task) {
        log::error!("{e}");
    }
}
