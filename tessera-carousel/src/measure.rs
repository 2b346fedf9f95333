//! Measurement capability injected by the host.
//!
//! Variable-width layouts and swipe-to-slide need the rendered position of
//! each slide. The core never touches a render tree itself; the host hands it
//! a [`TrackMeasure`] describing the children of the track in track order
//! (clones included).
use crate::{config::CarouselConfig, geometry::track_slides};

/// Rendered bounds of one child of the track, relative to the track origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlideRect {
    /// Logical index of the slide; negative or `>= slide_count` for clones.
    pub data_index: i32,
    /// Offset of the left edge from the track origin.
    pub left: f32,
    /// Offset of the top edge from the track origin.
    pub top: f32,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
}

impl SlideRect {
    /// Midpoint of the slide along the horizontal axis.
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    /// Midpoint of the slide along the vertical axis.
    pub fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }
}

/// Read access to the rendered children of the track.
pub trait TrackMeasure {
    /// Number of rendered children.
    fn child_count(&self) -> usize;

    /// Bounds of the child at `position` in track order.
    fn child(&self, position: usize) -> Option<SlideRect>;

    /// Bounds of the child at a signed position; negative positions do not
    /// exist.
    fn child_at(&self, position: i32) -> Option<SlideRect> {
        usize::try_from(position).ok().and_then(|p| self.child(p))
    }
}

impl TrackMeasure for [SlideRect] {
    fn child_count(&self) -> usize {
        self.len()
    }

    fn child(&self, position: usize) -> Option<SlideRect> {
        self.get(position).copied()
    }
}

impl TrackMeasure for Vec<SlideRect> {
    fn child_count(&self) -> usize {
        self.len()
    }

    fn child(&self, position: usize) -> Option<SlideRect> {
        self.get(position).copied()
    }
}

/// Builds the measurement of a track whose slides all share the configured
/// slide size.
///
/// Returns an empty track while the slide size is unknown.
pub fn uniform_track(config: &CarouselConfig) -> Vec<SlideRect> {
    let (Some(width), Some(height)) = (config.slide_width, config.slide_height) else {
        return Vec::new();
    };
    track_slides(config)
        .into_iter()
        .enumerate()
        .map(|(position, slide)| {
            let step = position as f32;
            let (left, top) = if config.vertical {
                (0.0, step * height)
            } else {
                (step * width, 0.0)
            };
            SlideRect {
                data_index: slide.data_index,
                left,
                top,
                width,
                height,
            }
        })
        .collect()
}
