//! In-memory host implementations for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::{Document, Element, Scheduler, Task, MARKER_ATTRIBUTE};
use crate::loader::{ImageLoader, LoadState};
use crate::Error;

/// Element with a fixed attribute map. Clones share the background image.
#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    attributes: HashMap<String, String>,
    background: Rc<RefCell<Option<String>>>,
    writes: Rc<Cell<usize>>,
    reject_styles: bool,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn marked(self) -> Self {
        self.with_attribute(MARKER_ATTRIBUTE, "")
    }

    pub fn rejecting_styles(mut self) -> Self {
        self.reject_styles = true;
        self
    }

    pub fn background_image(&self) -> Option<String> {
        self.background.borrow().clone()
    }

    pub fn style_writes(&self) -> usize {
        self.writes.get()
    }
}

impl Element for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn set_background_image(&self, value: &str) -> Result<(), Error> {
        if self.reject_styles {
            return Err(Error::Style("read-only".into()));
        }
        *self.background.borrow_mut() = Some(value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Image whose completion is flipped by the test.
#[derive(Clone, Debug)]
pub struct FakeImage(Rc<Cell<bool>>);

impl LoadState for FakeImage {
    fn is_complete(&self) -> bool {
        self.0.get()
    }
}

/// Loader recording every request. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct FakeLoader {
    requests: Rc<RefCell<Vec<(String, Rc<Cell<bool>>)>>>,
    rejected: Vec<String>,
    instant: bool,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, url: &str) -> Self {
        self.rejected.push(url.to_string());
        self
    }

    /// Hand out handles that are already complete.
    pub fn loaded_on_request(mut self) -> Self {
        self.instant = true;
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn complete(&self, url: &str) {
        for (requested, flag) in self.requests.borrow().iter() {
            if requested == url {
                flag.set(true);
            }
        }
    }

    pub fn complete_all(&self) {
        for (_, flag) in self.requests.borrow().iter() {
            flag.set(true);
        }
    }
}

impl ImageLoader for FakeLoader {
    type Handle = FakeImage;

    fn request(&self, url: &str) -> Result<FakeImage, Error> {
        if self.rejected.iter().any(|r| r == url) {
            return Err(Error::Image {
                url: url.to_string(),
                reason: "rejected".into(),
            });
        }
        let flag = Rc::new(Cell::new(self.instant));
        self.requests.borrow_mut().push((url.to_string(), flag.clone()));
        Ok(FakeImage(flag))
    }
}

/// Document holding a list of elements; only marked ones are returned.
#[derive(Clone, Debug, Default)]
pub struct FakeDocument {
    pub elements: Vec<FakeElement>,
}

impl Document for FakeDocument {
    type Element = FakeElement;

    fn marked_elements(&self) -> Result<Vec<FakeElement>, Error> {
        Ok(self
            .elements
            .iter()
            .filter(|el| el.attribute(MARKER_ATTRIBUTE).is_some())
            .cloned()
            .collect())
    }
}

struct Pending {
    due: u64,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    queue: Vec<Pending>,
    delays: Vec<u32>,
}

/// Scheduler on a virtual clock, advanced explicitly by the test.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<Clock>>,
    reject: Rc<Cell<bool>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `schedule` call fail.
    pub fn reject_from_now(&self) {
        self.reject.set(true);
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Delays passed to `schedule`, in call order.
    pub fn delays(&self) -> Vec<u32> {
        self.clock.borrow().delays.clone()
    }

    /// Move the clock forward by `ms`, running due tasks in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let idx = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(i, _)| i);
                let task = idx.map(|i| {
                    let pending = clock.queue.remove(i);
                    clock.now = pending.due;
                    pending.task
                });
                task
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> Result<(), Error> {
        if self.reject.get() {
            return Err(Error::Schedule("rejected".into()));
        }
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + delay_ms as u64;
        let seq = clock.seq;
        clock.seq += 1;
        clock.delays.push(delay_ms);
        clock.queue.push(Pending { due, seq, task });
        Ok(())
    }
}
