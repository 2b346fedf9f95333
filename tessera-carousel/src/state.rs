//! Mutable carousel state owned by the host.
use glam::Vec2;

use crate::{
    autoplay::Autoplay,
    config::CarouselConfig,
    geometry::{TrackStyle, track_offset, track_style},
    measure::TrackMeasure,
};

/// Pointer positions recorded during one drag gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSample {
    /// Position where the gesture started.
    pub start: Vec2,
    /// Most recent position.
    pub current: Vec2,
    /// Rounded distance travelled along the swipe axis; `None` until the
    /// pointer has moved.
    pub swipe_length: Option<f32>,
}

impl TouchSample {
    /// Starts a sample at `position`.
    pub fn new(position: Vec2) -> Self {
        Self {
            start: position,
            current: position,
            swipe_length: None,
        }
    }

    /// Movement from the start position to the current one.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }
}

/// State persisted across gestures and navigation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarouselState {
    /// Logical index of the current slide. May be negative or past the end
    /// while an infinite transition is in flight.
    pub current_slide: i32,
    /// A committed transition is running.
    pub animating: bool,
    /// A drag gesture is in progress.
    pub dragging: bool,
    /// Samples of the running drag gesture.
    pub touch: Option<TouchSample>,
    /// Live track offset while dragging.
    pub swipe_left: Option<f32>,
    /// The edge callback already fired for this gesture.
    pub edge_dragged: bool,
    /// The swipe-start callback already fired for this gesture.
    pub swiped: bool,
    /// Measured slide heights in track order, for adaptive height.
    pub slide_height_list: Vec<f32>,
    /// Style the host applies to the track.
    pub track_style: TrackStyle,
    /// Offset the track settles on once the running transition ends.
    pub rest_offset: Option<f32>,
    /// Autoplay timer.
    pub autoplay: Autoplay,
}

impl CarouselState {
    /// Creates the state resting on `initial_slide`.
    pub fn new(
        config: &CarouselConfig,
        initial_slide: i32,
        measure: Option<&dyn TrackMeasure>,
    ) -> Self {
        let mut state = Self {
            current_slide: initial_slide,
            ..Self::default()
        };
        state.settle(config, measure);
        state
    }

    /// Recomputes the resting track style for the current slide, dropping any
    /// transition.
    pub fn settle(&mut self, config: &CarouselConfig, measure: Option<&dyn TrackMeasure>) {
        let offset = track_offset(config, self, self.current_slide, measure);
        self.track_style = track_style(config, offset);
        self.rest_offset = None;
    }

    /// Clears every per-gesture field.
    pub(crate) fn reset_gesture(&mut self) {
        self.dragging = false;
        self.edge_dragged = false;
        self.swiped = false;
        self.swipe_left = None;
        self.touch = None;
    }
}
