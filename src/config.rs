//! Configuration resolution from options and element attributes.

use crate::host::Element;

/// Attribute holding the delay between frame-advance attempts, in ms.
pub const SPEED_ATTRIBUTE: &str = "data-animate-background-image-speed";
/// Attribute holding the frame URL template.
pub const BASE_URL_ATTRIBUTE: &str = "data-animate-background-image-base-url";
/// Attribute holding the number of frames.
pub const FRAMES_ATTRIBUTE: &str = "data-animate-background-image-frames";

/// Speed used when neither options nor attributes provide one.
pub const DEFAULT_SPEED_MS: u32 = 200;

/// Programmatic configuration.
///
/// Every field is optional. Zero numbers and empty strings count as absent,
/// so the corresponding attribute is consulted instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Options {
    /// Milliseconds between frame-advance attempts
    pub speed: Option<u32>,
    /// Frame URL template containing `${frame}`
    pub base_url: Option<String>,
    /// Number of frames
    pub frames_count: Option<u32>,
}

impl Options {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the speed in milliseconds.
    pub fn speed(mut self, speed: u32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set the frame URL template.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the number of frames.
    pub fn frames_count(mut self, frames_count: u32) -> Self {
        self.frames_count = Some(frames_count);
        self
    }

    /// Parse options from a TOML document.
    ///
    /// ```toml
    /// speed = 120
    /// baseUrl = "https://cdn.example.com/clip-${frame}.jpg"
    /// framesCount = 24
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Effective configuration of one animation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Configuration {
    /// Milliseconds between frame-advance attempts
    pub speed: u32,
    /// Frame URL template, `None` when neither source provided one
    pub base_url: Option<String>,
    /// Number of frames, `None` when neither source provided one
    pub frames_count: Option<usize>,
}

impl Configuration {
    /// Check that speed, base URL and frame count are all set and non-zero.
    pub fn is_valid(&self) -> bool {
        self.speed > 0
            && self.base_url.as_deref().is_some_and(|url| !url.is_empty())
            && self.frames_count.is_some_and(|count| count > 0)
    }
}

/// A configuration field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Speed,
    BaseUrl,
    FramesCount,
}

/// Where a resolved field value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The options object
    Options,
    /// The element attribute
    Attribute,
    /// The built-in default
    Default,
    /// Neither source, and no default exists
    Missing,
}

/// Outcome of [`resolve`]: the merged configuration and where each field
/// came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub config: Configuration,
    pub speed: Source,
    pub base_url: Source,
    pub frames_count: Source,
}

impl Resolution {
    /// Source of a given field.
    pub fn source(&self, field: Field) -> Source {
        match field {
            Field::Speed => self.speed,
            Field::BaseUrl => self.base_url,
            Field::FramesCount => self.frames_count,
        }
    }

    /// Fields that fell back to a default value.
    pub fn defaulted(&self) -> Vec<Field> {
        self.fields_from(Source::Default)
    }

    /// Fields that no source provided.
    pub fn missing(&self) -> Vec<Field> {
        self.fields_from(Source::Missing)
    }

    fn fields_from(&self, source: Source) -> Vec<Field> {
        [Field::Speed, Field::BaseUrl, Field::FramesCount]
            .into_iter()
            .filter(|&field| self.source(field) == source)
            .collect()
    }
}

/// Merge options and element attributes into a [`Resolution`].
///
/// Per field, a truthy option value wins, then the attribute, then the
/// default (speed only). Numeric attributes are read like JavaScript
/// `parseInt`; values that do not parse to a positive integer are ignored.
///
/// ## Example
///
/// ```rust
/// use animate_background_image::{config, Options};
/// # use animate_background_image::{Element, Error};
/// # struct Div;
/// # impl Element for Div {
/// #     fn attribute(&self, name: &str) -> Option<String> {
/// #         (name == config::SPEED_ATTRIBUTE).then(|| "500".to_string())
/// #     }
/// #     fn set_background_image(&self, _: &str) -> Result<(), Error> { Ok(()) }
/// # }
///
/// let resolution = config::resolve(&Div, Some(&Options::new().speed(100)));
/// assert_eq!(resolution.config.speed, 100);
/// ```
pub fn resolve<E: Element + ?Sized>(element: &E, options: Option<&Options>) -> Resolution {
    let (speed, speed_source) = pick(
        options.and_then(|o| o.speed).filter(|&s| s > 0),
        || element.attribute(SPEED_ATTRIBUTE).and_then(|v| parse_positive(&v)),
    );
    let (speed, speed_source) = match speed {
        Some(speed) => (speed, speed_source),
        None => (DEFAULT_SPEED_MS, Source::Default),
    };

    let (base_url, base_url_source) = pick(
        options
            .and_then(|o| o.base_url.clone())
            .filter(|url| !url.is_empty()),
        || element.attribute(BASE_URL_ATTRIBUTE).filter(|url| !url.is_empty()),
    );

    let (frames_count, frames_count_source) = pick(
        options.and_then(|o| o.frames_count).filter(|&n| n > 0),
        || element.attribute(FRAMES_ATTRIBUTE).and_then(|v| parse_positive(&v)),
    );

    Resolution {
        config: Configuration {
            speed,
            base_url,
            frames_count: frames_count.map(|n| n as usize),
        },
        speed: speed_source,
        base_url: base_url_source,
        frames_count: frames_count_source,
    }
}

fn pick<T>(from_options: Option<T>, from_attribute: impl FnOnce() -> Option<T>) -> (Option<T>, Source) {
    if let Some(value) = from_options {
        return (Some(value), Source::Options);
    }
    match from_attribute() {
        Some(value) => (Some(value), Source::Attribute),
        None => (None, Source::Missing),
    }
}

/// Parse an integer the way JavaScript `parseInt` does with no radix.
///
/// Leading whitespace and an optional sign are accepted, `0x`/`0X` switches to
/// hexadecimal, and parsing stops at the first invalid character. Returns
/// `None` when no digits were found (JavaScript `NaN`). Magnitudes beyond
/// `i64` saturate.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        any = true;
        value = value.saturating_mul(radix as i64).saturating_add(digit as i64);
    }

    if !any {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// [`parse_int`] restricted to positive values that fit in a `u32`.
///
/// Values above `u32::MAX` saturate.
pub fn parse_positive(s: &str) -> Option<u32> {
    match parse_int(s)? {
        n if n > 0 => Some(u32::try_from(n).unwrap_or(u32::MAX)),
        _ => None,
    }
}
