//! Frame URL templates.

use crate::config::BASE_URL_ATTRIBUTE;
use crate::host::Element;

/// Token replaced by the frame index in a URL template.
pub const PLACEHOLDER: &str = "${frame}";

/// A URL template split around its first [`PLACEHOLDER`].
///
/// A template without the token keeps the whole string as prefix, so every
/// frame URL becomes `template + index`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameUrlTemplate {
    /// Text before the placeholder
    pub prefix: String,
    /// Text after the placeholder (may contain further placeholders verbatim)
    pub suffix: String,
}

impl FrameUrlTemplate {
    /// Split a raw template at its first placeholder.
    pub fn parse(template: &str) -> Self {
        match template.split_once(PLACEHOLDER) {
            Some((prefix, suffix)) => Self {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            None => Self {
                prefix: template.to_string(),
                suffix: String::new(),
            },
        }
    }

    /// Read the template from the element's base-URL attribute.
    ///
    /// This always consults the attribute, even when the configured base URL
    /// came from options. A missing attribute yields an empty template, whose
    /// URLs are bare frame indices.
    pub fn from_element<E: Element + ?Sized>(element: &E) -> Self {
        element
            .attribute(BASE_URL_ATTRIBUTE)
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    /// URL of frame `index`.
    ///
    /// Empty prefix or suffix parts simply drop out, leaving the bare index
    /// when both are empty.
    pub fn url(&self, index: usize) -> String {
        format!("{}{}{}", self.prefix, index, self.suffix)
    }

    /// URLs of frames `0..frames_count`, in order.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use animate_background_image::FrameUrlTemplate;
    ///
    /// let template = FrameUrlTemplate::parse("http://cdn/x-${frame}.jpg");
    /// assert_eq!(
    ///     template.urls(3),
    ///     vec!["http://cdn/x-0.jpg", "http://cdn/x-1.jpg", "http://cdn/x-2.jpg"]
    /// );
    /// ```
    pub fn urls(&self, frames_count: usize) -> Vec<String> {
        (0..frames_count).map(|i| self.url(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    #[test]
    fn test_prefix_and_suffix() {
        let template = FrameUrlTemplate::parse("http://cdn/x-${frame}.jpg");
        assert_eq!(template.prefix, "http://cdn/x-");
        assert_eq!(template.suffix, ".jpg");
        assert_eq!(
            template.urls(3),
            vec!["http://cdn/x-0.jpg", "http://cdn/x-1.jpg", "http://cdn/x-2.jpg"]
        );
    }

    #[test]
    fn test_empty_prefix() {
        let template = FrameUrlTemplate::parse("${frame}.jpg");
        assert_eq!(template.urls(3), vec!["0.jpg", "1.jpg", "2.jpg"]);
    }

    #[test]
    fn test_empty_suffix() {
        let template = FrameUrlTemplate::parse("img-${frame}");
        assert_eq!(template.urls(3), vec!["img-0", "img-1", "img-2"]);
    }

    #[test]
    fn test_placeholder_only() {
        let template = FrameUrlTemplate::parse("${frame}");
        assert_eq!(template.urls(3), vec!["0", "1", "2"]);
    }

    #[test]
    fn test_missing_placeholder_appends_index() {
        let template = FrameUrlTemplate::parse("http://cdn/still.jpg");
        assert_eq!(
            template.urls(2),
            vec!["http://cdn/still.jpg0", "http://cdn/still.jpg1"]
        );
    }

    #[test]
    fn test_only_first_placeholder_replaced() {
        let template = FrameUrlTemplate::parse("a${frame}/b${frame}");
        assert_eq!(template.url(7), "a7/b${frame}");
    }

    #[test]
    fn test_zero_frames() {
        assert!(FrameUrlTemplate::parse("x-${frame}").urls(0).is_empty());
    }

    #[test]
    fn test_from_element() {
        let el = FakeElement::new().with_attribute(BASE_URL_ATTRIBUTE, "f-${frame}.png");
        assert_eq!(FrameUrlTemplate::from_element(&el).url(2), "f-2.png");

        let bare = FakeElement::new();
        assert_eq!(FrameUrlTemplate::from_element(&bare).urls(2), vec!["0", "1"]);
    }
}
