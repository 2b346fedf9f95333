//! Carousel configuration and the integer paging view derived from it.
//!
//! ## Usage
//!
//! Build a [`CarouselConfig`] with its setters every time the host renders and
//! pass it by reference to the geometry, gesture and navigation functions.
use std::time::Duration;

use derive_setters::Setters;
use thiserror::Error;

const DEFAULT_SPEED: Duration = Duration::from_millis(600);
const DEFAULT_AUTOPLAY_SPEED: Duration = Duration::from_millis(3000);
const DEFAULT_EDGE_FRICTION: f32 = 0.35;
const DEFAULT_TOUCH_THRESHOLD: f32 = 5.0;

/// How the carousel moves between slides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Animation {
    /// Slides are translated along the track.
    #[default]
    Slide,
    /// Slides stay in place and cross-fade.
    Fade,
}

/// Errors raised while resolving a configuration into usable geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// `slides_to_show` must be at least one.
    #[error("slides_to_show must be at least 1")]
    ZeroSlidesToShow,
    /// `slides_to_scroll` must be at least one.
    #[error("slides_to_scroll must be at least 1")]
    ZeroSlidesToScroll,
    /// A slide count that does not fit signed index arithmetic.
    #[error("slide count {0} exceeds the supported index range")]
    TooManySlides(usize),
    /// The clone-padded track does not fit signed index arithmetic.
    #[error("{count} slides padded by {show} clones per side exceed the supported index range")]
    TrackOverflow {
        /// Configured slide count.
        count: usize,
        /// Configured slides to show.
        show: usize,
    },
    /// Edge friction is a damping factor and must stay in `0..=1`.
    #[error("edge_friction {0} is outside 0..=1")]
    InvalidEdgeFriction(f32),
    /// Touch threshold divides the list size and must be positive.
    #[error("touch_threshold {0} must be a positive finite number")]
    InvalidTouchThreshold(f32),
    /// A measured dimension has not been supplied by the host yet.
    #[error("missing measurement `{0}`")]
    MissingMeasurement(&'static str),
}

/// Configuration arguments for a carousel.
///
/// Measured dimensions (`slide_width`, `slide_height`, `list_width`,
/// `list_height`) stay `None` until the host has laid the carousel out; the
/// geometry functions fall back to neutral results while any is missing.
#[derive(Clone, Debug, PartialEq, Setters)]
pub struct CarouselConfig {
    /// Number of real (non-cloned) slides.
    pub slide_count: usize,
    /// Number of slides visible at once.
    pub slides_to_show: usize,
    /// Number of slides advanced per page.
    pub slides_to_scroll: usize,
    /// Keeps the active slide centered with partial neighbours.
    pub center_mode: bool,
    /// Wraps around by rendering cloned slides on both ends.
    pub infinite: bool,
    /// Lays slides out top to bottom.
    pub vertical: bool,
    /// Reads swipes along the vertical axis.
    pub vertical_swiping: bool,
    /// Slides have non-uniform widths; offsets come from measurement.
    pub variable_width: bool,
    /// Vertical track offsets follow the measured per-slide heights.
    pub adaptive_height: bool,
    /// Right-to-left index interpretation.
    pub rtl: bool,
    /// Enables touch swiping.
    pub swipe: bool,
    /// Enables mouse dragging.
    pub draggable: bool,
    /// A released swipe lands on the slide that crossed the viewport edge.
    pub swipe_to_slide: bool,
    /// Enables arrow-key navigation.
    pub accessibility: bool,
    /// Advances automatically on a timer.
    pub autoplay: bool,
    /// Pauses autoplay while the pointer hovers the carousel.
    pub pause_on_hover: bool,
    /// Slide or fade transitions.
    pub animation: Animation,
    /// Transition duration.
    pub speed: Duration,
    /// Interval between autoplay advances.
    pub autoplay_speed: Duration,
    /// Timing function used for transitions.
    #[setters(into)]
    pub css_ease: String,
    /// Damping applied to drags past a non-infinite boundary.
    pub edge_friction: f32,
    /// The list size divided by this value is the minimum committing swipe.
    pub touch_threshold: f32,
    /// Width of one slide in pixels.
    #[setters(strip_option)]
    pub slide_width: Option<f32>,
    /// Height of one slide in pixels.
    #[setters(strip_option)]
    pub slide_height: Option<f32>,
    /// Width of the visible list in pixels.
    #[setters(strip_option)]
    pub list_width: Option<f32>,
    /// Height of the visible list in pixels.
    #[setters(strip_option)]
    pub list_height: Option<f32>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_count: 0,
            slides_to_show: 1,
            slides_to_scroll: 1,
            center_mode: false,
            infinite: true,
            vertical: false,
            vertical_swiping: false,
            variable_width: false,
            adaptive_height: false,
            rtl: false,
            swipe: true,
            draggable: true,
            swipe_to_slide: false,
            accessibility: true,
            autoplay: false,
            pause_on_hover: true,
            animation: Animation::Slide,
            speed: DEFAULT_SPEED,
            autoplay_speed: DEFAULT_AUTOPLAY_SPEED,
            css_ease: "ease".to_string(),
            edge_friction: DEFAULT_EDGE_FRICTION,
            touch_threshold: DEFAULT_TOUCH_THRESHOLD,
            slide_width: None,
            slide_height: None,
            list_width: None,
            list_height: None,
        }
    }
}

impl CarouselConfig {
    /// Checks every invariant the core relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Paging::resolve(self)?;
        if !(0.0..=1.0).contains(&self.edge_friction) {
            return Err(ConfigError::InvalidEdgeFriction(self.edge_friction));
        }
        if !self.touch_threshold.is_finite() || self.touch_threshold <= 0.0 {
            return Err(ConfigError::InvalidTouchThreshold(self.touch_threshold));
        }
        Ok(())
    }

    /// Returns true when slides cross-fade instead of translating.
    pub fn is_fade(&self) -> bool {
        self.animation == Animation::Fade
    }

    pub(crate) fn require_slide_width(&self) -> Result<f32, ConfigError> {
        self.slide_width
            .ok_or(ConfigError::MissingMeasurement("slide_width"))
    }

    pub(crate) fn require_slide_height(&self) -> Result<f32, ConfigError> {
        self.slide_height
            .ok_or(ConfigError::MissingMeasurement("slide_height"))
    }

    pub(crate) fn require_list_width(&self) -> Result<f32, ConfigError> {
        self.list_width
            .ok_or(ConfigError::MissingMeasurement("list_width"))
    }

    pub(crate) fn require_list_height(&self) -> Result<f32, ConfigError> {
        self.list_height
            .ok_or(ConfigError::MissingMeasurement("list_height"))
    }
}

/// Signed view of the slide counts used by all index arithmetic.
///
/// Indices are signed because infinite mode addresses clones at negative
/// positions and past the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paging {
    /// Number of real slides.
    pub count: i32,
    /// Slides visible at once, at least one.
    pub show: i32,
    /// Slides per page, at least one.
    pub scroll: i32,
}

impl Paging {
    /// Resolves the paging counts, rejecting zero divisors and tracks whose
    /// clones would overflow the index range.
    pub fn resolve(config: &CarouselConfig) -> Result<Self, ConfigError> {
        if config.slides_to_show == 0 {
            return Err(ConfigError::ZeroSlidesToShow);
        }
        if config.slides_to_scroll == 0 {
            return Err(ConfigError::ZeroSlidesToScroll);
        }
        let count = i32::try_from(config.slide_count)
            .map_err(|_| ConfigError::TooManySlides(config.slide_count))?;
        let show = i32::try_from(config.slides_to_show)
            .map_err(|_| ConfigError::TooManySlides(config.slides_to_show))?;
        let scroll = i32::try_from(config.slides_to_scroll)
            .map_err(|_| ConfigError::TooManySlides(config.slides_to_scroll))?;
        show
            .checked_add(1)
            .and_then(|side| side.checked_mul(2))
            .and_then(|padding| padding.checked_add(count))
            .ok_or(ConfigError::TrackOverflow {
                count: config.slide_count,
                show: config.slides_to_show,
            })?;
        Ok(Self {
            count,
            show,
            scroll,
        })
    }

    /// Slides left over on the last page, zero when pages divide evenly.
    pub fn remainder(&self) -> i32 {
        self.count % self.scroll
    }

    /// Returns true when the last page is only partially filled.
    pub fn is_uneven(&self) -> bool {
        self.remainder() != 0
    }

    /// Number of pages, as shown by dot navigation.
    pub fn dot_count(&self) -> i32 {
        (self.count + self.scroll - 1) / self.scroll
    }

    /// Offset of the centered slide from the first visible one.
    pub fn center_offset(&self) -> i32 {
        self.show / 2
    }
}
