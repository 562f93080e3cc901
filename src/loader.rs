//! Frame image preloading.
//!
//! Preloading is fire-and-forget: every frame request is issued up front and
//! the host fetches and decodes them on its own schedule. The animation loop
//! later polls each handle's completion flag.

use crate::Error;

/// A frame image whose loading is driven by the host.
pub trait LoadState {
    /// Whether the host has finished with this image.
    ///
    /// Like `HTMLImageElement.complete`, this does not distinguish a decoded
    /// image from a failed one.
    fn is_complete(&self) -> bool;
}

/// Creates image handles for frame URLs.
///
/// Implement this trait for your specific I/O mechanism (DOM images, an HTTP
/// client feeding a texture cache, etc.)
pub trait ImageLoader {
    type Handle: LoadState;

    /// Start loading `url` and return immediately with its handle.
    fn request(&self, url: &str) -> Result<Self::Handle, Error>;
}

/// Request every frame at once and return the handles in URL order.
///
/// A frame whose handle could not be created is kept as an empty slot so
/// indices stay aligned with `urls`; the loop never advances into it.
pub fn preload_frames<L: ImageLoader + ?Sized>(loader: &L, urls: &[String]) -> Vec<Option<L::Handle>> {
    urls.iter()
        .map(|url| match loader.request(url) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeLoader;

    #[test]
    fn test_preload_requests_every_frame() {
        let loader = FakeLoader::new();
        let urls: Vec<String> = vec!["a0".into(), "a1".into(), "a2".into()];

        let frames = preload_frames(&loader, &urls);
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.is_some()));
        assert_eq!(loader.requested(), urls);
        // Nothing is complete until the host says so
        assert!(frames.iter().flatten().all(|f| !f.is_complete()));

        loader.complete("a1");
        assert!(frames[1].as_ref().unwrap().is_complete());
        assert!(!frames[0].as_ref().unwrap().is_complete());
    }

    #[test]
    fn test_preload_keeps_failed_slots() {
        let loader = FakeLoader::new().rejecting("bad");
        let urls: Vec<String> = vec!["ok0".into(), "bad".into(), "ok2".into()];

        let frames = preload_frames(&loader, &urls);
        assert_eq!(frames.len(), 3);
        assert!(frames[0].is_some());
        assert!(frames[1].is_none());
        assert!(frames[2].is_some());
    }
}
