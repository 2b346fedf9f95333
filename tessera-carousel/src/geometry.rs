//! Track geometry: offsets, style bundles and slide classification.
//!
//! Every function here is pure. The host feeds the resulting offsets and
//! styles to whatever renderer draws the track.
use std::{fmt, time::Duration};

use glam::Vec2;
use tracing::debug;

use crate::{
    config::{CarouselConfig, ConfigError, Paging},
    measure::TrackMeasure,
    state::CarouselState,
};

/// Main axis of the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Slides are laid out left to right.
    Horizontal,
    /// Slides are laid out top to bottom.
    Vertical,
}

impl Axis {
    /// Axis along which the track is laid out.
    pub fn of_track(config: &CarouselConfig) -> Self {
        if config.vertical {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Axis along which swipes are read.
    pub fn of_swipe(config: &CarouselConfig) -> Self {
        if config.vertical_swiping {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Component of `v` along this axis.
    pub fn main(self, v: Vec2) -> f32 {
        match self {
            Self::Horizontal => v.x,
            Self::Vertical => v.y,
        }
    }

    /// Component of `v` across this axis.
    pub fn cross(self, v: Vec2) -> f32 {
        match self {
            Self::Horizontal => v.y,
            Self::Vertical => v.x,
        }
    }

    /// Size of the visible list along this axis.
    pub fn list_size(self, config: &CarouselConfig) -> Result<f32, ConfigError> {
        match self {
            Self::Horizontal => config.require_list_width(),
            Self::Vertical => config.require_list_height(),
        }
    }
}

/// Translation applied to the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackTransform {
    /// Axis of the translation.
    pub axis: Axis,
    /// Offset in pixels along `axis`.
    pub offset: f32,
}

impl TrackTransform {
    /// `translate3d(..)` form of the transform.
    pub fn translate3d(&self) -> String {
        match self.axis {
            Axis::Horizontal => format!("translate3d({}px, 0px, 0px)", self.offset),
            Axis::Vertical => format!("translate3d(0px, {}px, 0px)", self.offset),
        }
    }

    /// Single-axis `translateX`/`translateY` form for hosts without 3D
    /// transforms.
    pub fn translate(&self) -> String {
        match self.axis {
            Axis::Horizontal => format!("translateX({}px)", self.offset),
            Axis::Vertical => format!("translateY({}px)", self.offset),
        }
    }
}

/// Property animated by a [`Transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionProperty {
    /// The track translation.
    Transform,
    /// Slide opacity in fade mode.
    Opacity,
}

/// Timing description of an animated property.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Animated property.
    pub property: TransitionProperty,
    /// Duration of the transition.
    pub duration: Duration,
    /// Timing function identifier.
    pub easing: String,
}

impl Transition {
    fn new(property: TransitionProperty, config: &CarouselConfig) -> Self {
        Self {
            property,
            duration: config.speed,
            easing: config.css_ease.clone(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = match self.property {
            TransitionProperty::Transform => "transform",
            TransitionProperty::Opacity => "opacity",
        };
        write!(
            f,
            "{property} {}ms {}",
            self.duration.as_millis(),
            self.easing
        )
    }
}

/// Style bundle for the track element. The default value is the empty style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackStyle {
    /// Track opacity.
    pub opacity: Option<f32>,
    /// Track width for horizontal tracks.
    pub width: Option<f32>,
    /// Track height for vertical tracks.
    pub height: Option<f32>,
    /// Translation, absent in fade mode.
    pub transform: Option<TrackTransform>,
    /// Transition, present only while animating toward a new offset.
    pub transition: Option<Transition>,
}

impl TrackStyle {
    /// Returns true for the neutral style produced by incomplete measurements.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Offset carried by the transform, if any.
    pub fn offset(&self) -> Option<f32> {
        self.transform.map(|t| t.offset)
    }
}

/// Width of a single slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlideWidth {
    /// Fixed width in pixels.
    Px(f32),
    /// Full width of the list, used by vertical tracks.
    Full,
}

/// Style bundle for one slide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideStyle {
    /// Slide width; absent for variable-width slides.
    pub width: Option<SlideWidth>,
    /// Opacity in fade mode.
    pub opacity: Option<f32>,
    /// Horizontal pull-back in fade mode.
    pub left: Option<f32>,
    /// Vertical pull-back in fade mode.
    pub top: Option<f32>,
    /// Opacity transition in fade mode.
    pub transition: Option<Transition>,
}

/// Visual classification of one rendered slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlideClasses {
    /// The slide is inside the visible window.
    pub active: bool,
    /// The slide is the centered one (center mode only).
    pub center: bool,
    /// The slide is a wrap-around duplicate.
    pub cloned: bool,
}

/// Role of a rendered child of the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideKind {
    /// Clone placed before the first real slide.
    PreClone,
    /// Real slide.
    Original,
    /// Clone placed after the last real slide.
    PostClone,
}

/// One rendered child of the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackSlide {
    /// Logical index, negative or past the end for clones.
    pub data_index: i32,
    /// Index of the real slide whose content is rendered.
    pub source: usize,
    /// Role of the child.
    pub kind: SlideKind,
}

/// Computes the track offset that brings `slide_index` into view.
///
/// Fails when the configuration cannot be resolved or a required
/// measurement is missing.
pub fn try_track_offset(
    config: &CarouselConfig,
    state: &CarouselState,
    slide_index: i32,
    measure: Option<&dyn TrackMeasure>,
) -> Result<f32, ConfigError> {
    let paging = Paging::resolve(config)?;
    let slide_width = config.require_slide_width()?;
    let slide_height = config.require_slide_height()?;
    let list_width = config.require_list_width()?;

    if config.is_fade() {
        return Ok(0.0);
    }

    let Paging {
        count,
        show,
        scroll,
    } = paging;
    let mut slide_offset = 0.0;
    let mut vertical_offset = 0.0;

    if config.infinite {
        if count > show {
            slide_offset = -slide_width * show as f32;
            vertical_offset = -slide_height * show as f32;
        }
        if paging.is_uneven() {
            let probe = if config.rtl && slide_index >= count {
                count - slide_index
            } else {
                slide_index
            };
            if probe + scroll > count && count > show {
                let slides = if slide_index > count {
                    show - (slide_index - count)
                } else {
                    paging.remainder()
                };
                slide_offset = -(slides as f32) * slide_width;
                vertical_offset = -(slides as f32) * slide_height;
            }
        }
    } else if paging.is_uneven() && slide_index + scroll > count && count > show {
        slide_offset = (show - paging.remainder()) as f32 * slide_width;
    }

    if config.center_mode {
        let center = slide_width * paging.center_offset() as f32;
        if config.infinite {
            slide_offset += center;
        } else {
            slide_offset = center;
        }
    }

    let mut target = if config.vertical {
        let mut target = -(slide_index as f32) * slide_height + vertical_offset;
        if config.adaptive_height {
            let end = if config.infinite {
                slide_index + 1
            } else {
                slide_index
            };
            let end = usize::try_from(end)
                .unwrap_or(0)
                .min(state.slide_height_list.len());
            target = -state.slide_height_list[..end].iter().sum::<f32>();
        }
        target
    } else {
        -(slide_index as f32) * slide_width + slide_offset
    };

    if config.variable_width
        && let Some(measure) = measure
    {
        let position = if count <= show || !config.infinite {
            slide_index
        } else {
            slide_index + show
        };
        target = measure.child_at(position).map_or(0.0, |rect| -rect.left);

        if config.center_mode {
            let position = if config.infinite {
                slide_index + show + 1
            } else {
                slide_index
            };
            if let Some(rect) = measure.child_at(position) {
                target = -rect.left + (list_width - rect.width) / 2.0;
            }
        }
    }

    Ok(target)
}

/// Computes the track offset for `slide_index`, or `0.0` when the
/// configuration is incomplete.
pub fn track_offset(
    config: &CarouselConfig,
    state: &CarouselState,
    slide_index: i32,
    measure: Option<&dyn TrackMeasure>,
) -> f32 {
    try_track_offset(config, state, slide_index, measure).unwrap_or_else(|err| {
        debug!(%err, slide_index, "track offset unavailable, using neutral offset");
        0.0
    })
}

/// Style for a track resting at (or being dragged to) `offset`.
pub fn track_style(config: &CarouselConfig, offset: f32) -> TrackStyle {
    let (Some(slide_width), Some(slide_height)) = (config.slide_width, config.slide_height)
    else {
        return TrackStyle::default();
    };
    let Ok(paging) = Paging::resolve(config) else {
        return TrackStyle::default();
    };

    let axis = Axis::of_track(config);
    let padded = (paging.count + 2 * paging.show) as f32;
    let mut style = TrackStyle {
        opacity: Some(1.0),
        ..TrackStyle::default()
    };

    match axis {
        Axis::Horizontal => {
            let width = if config.center_mode && !config.variable_width {
                (paging.count + 2 * (paging.show + 1)) as f32 * slide_width
            } else {
                padded * slide_width
            };
            if width != 0.0 {
                style.width = Some(width);
            }
        }
        Axis::Vertical => {
            let height = padded * slide_height;
            if height != 0.0 {
                style.height = Some(height);
            }
        }
    }

    if !config.is_fade() {
        style.transform = Some(TrackTransform { axis, offset });
    }
    style
}

/// Style for a track animating toward `offset`.
pub fn track_animate_style(config: &CarouselConfig, offset: f32) -> TrackStyle {
    let mut style = track_style(config, offset);
    if !style.is_empty() {
        style.transition = Some(Transition::new(TransitionProperty::Transform, config));
    }
    style
}

/// Classifies the rendered slide carrying `data_index`.
pub fn slide_classes(config: &CarouselConfig, current_slide: i32, data_index: i32) -> SlideClasses {
    let Ok(paging) = Paging::resolve(config) else {
        return SlideClasses::default();
    };
    let index = if config.rtl {
        paging.count - 1 - data_index
    } else {
        data_index
    };

    let cloned = index < 0 || index >= paging.count;
    if config.center_mode {
        let center_offset = paging.center_offset();
        SlideClasses {
            active: index > current_slide - center_offset - 1
                && index <= current_slide + center_offset,
            center: paging.count != 0 && (index - current_slide) % paging.count == 0,
            cloned,
        }
    } else {
        SlideClasses {
            active: current_slide <= index && index < current_slide + paging.show,
            center: false,
            cloned,
        }
    }
}

/// Style of the rendered slide carrying `data_index`.
pub fn slide_style(config: &CarouselConfig, current_slide: i32, data_index: i32) -> SlideStyle {
    let (Some(slide_width), Some(slide_height)) = (config.slide_width, config.slide_height)
    else {
        return SlideStyle::default();
    };

    let mut style = SlideStyle::default();
    if !config.variable_width {
        style.width = Some(SlideWidth::Px(slide_width));
    }

    if config.is_fade() {
        style.opacity = Some(if current_slide == data_index { 1.0 } else { 0.0 });
        style.transition = Some(Transition::new(TransitionProperty::Opacity, config));
        if config.vertical {
            style.top = Some(-(data_index as f32) * slide_height);
        } else {
            style.left = Some(-(data_index as f32) * slide_width);
        }
    }

    if config.vertical {
        style.width = Some(SlideWidth::Full);
    }
    style
}

/// Lists the children of the track in render order, clones included.
pub fn track_slides(config: &CarouselConfig) -> Vec<TrackSlide> {
    let count = config.slide_count;
    let clones = if config.infinite && !config.is_fade() {
        let per_side = if config.variable_width {
            config.slides_to_show + 1
        } else {
            config.slides_to_show
        };
        per_side.min(count)
    } else {
        0
    };
    let to_index = |i: usize| i32::try_from(i).unwrap_or(i32::MAX);

    let mut slides = Vec::with_capacity(count + 2 * clones);
    slides.extend((count - clones..count).map(|source| TrackSlide {
        data_index: -to_index(count - source),
        source,
        kind: SlideKind::PreClone,
    }));
    slides.extend((0..count).map(|source| TrackSlide {
        data_index: to_index(source),
        source,
        kind: SlideKind::Original,
    }));
    slides.extend((0..clones).map(|source| TrackSlide {
        data_index: to_index(count + source),
        source,
        kind: SlideKind::PostClone,
    }));

    if config.rtl {
        slides.reverse();
    }
    slides
}
