//! Pointer and touch drag handling.
//!
//! A gesture moves through `Idle -> Dragging -> (Commit | SnapBack) -> Idle`.
//! [`swipe_start`] opens it, [`swipe_move`] drags the track along with the
//! pointer and [`swipe_end`] decides whether the release moves to another
//! slide.
use std::cmp::Ordering;

use glam::Vec2;
use tracing::{debug, trace};

use crate::{
    config::{CarouselConfig, Paging},
    controller::{Effect, Effects},
    geometry::{Axis, track_offset, track_style},
    measure::TrackMeasure,
    navigation::{check_navigable, navigable_indexes},
    state::{CarouselState, TouchSample},
};

const PREVENT_DEFAULT_MIN_LENGTH: f32 = 4.0;
const PRIMARY_AXIS_RATIO: f32 = 0.8;

/// Device a pointer sample came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerOrigin {
    /// Mouse or pen; subject to `draggable`.
    #[default]
    Mouse,
    /// Touch screen.
    Touch,
}

/// One pointer position report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Position in host pixels.
    pub position: Vec2,
    /// Device the sample came from.
    pub origin: PointerOrigin,
}

impl PointerSample {
    /// Mouse sample at `(x, y)`.
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            origin: PointerOrigin::Mouse,
        }
    }

    /// Touch sample at `(x, y)`.
    pub fn touch(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            origin: PointerOrigin::Touch,
        }
    }
}

/// Direction of a swipe, named after where the content moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Content moves left; advances.
    Left,
    /// Content moves right; goes back.
    Right,
    /// Vertical swiping, goes back.
    Up,
    /// Vertical swiping, advances.
    Down,
    /// Mostly vertical movement on a horizontal carousel.
    Vertical,
}

/// What releasing the pointer resolved to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwipeRelease {
    /// No gesture was running.
    Ignored {
        /// Whether the host should suppress the default release handling.
        prevent_default: bool,
    },
    /// The pointer never moved; nothing happens.
    Discarded,
    /// The swipe was too short; the track returns to the current slide.
    SnapBack,
    /// The swipe moves toward the candidate slide.
    Commit(i32),
}

/// Classifies the movement recorded in `touch` by its angle.
pub fn swipe_direction(config: &CarouselConfig, touch: &TouchSample) -> SwipeDirection {
    let distance = touch.start - touch.current;
    let mut angle = distance.y.atan2(distance.x).to_degrees().round();
    if angle < 0.0 {
        angle = 360.0 - angle.abs();
    }

    if (0.0..=45.0).contains(&angle) || (315.0..=360.0).contains(&angle) {
        return if config.rtl {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
    }
    if (135.0..=225.0).contains(&angle) {
        return if config.rtl {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        };
    }
    if config.vertical_swiping {
        return if (35.0..=135.0).contains(&angle) {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        };
    }
    SwipeDirection::Vertical
}

/// Opens a drag gesture. Returns true when the gesture started.
pub fn swipe_start(
    config: &CarouselConfig,
    state: &mut CarouselState,
    sample: PointerSample,
) -> bool {
    if !config.swipe {
        return false;
    }
    if !config.draggable && sample.origin == PointerOrigin::Mouse {
        return false;
    }
    if state.animating {
        trace!("drag ignored while a transition is running");
        return false;
    }
    state.dragging = true;
    state.touch = Some(TouchSample::new(sample.position));
    true
}

/// Follows the pointer while dragging.
///
/// Returns true when the host should suppress its default handling of the
/// move, which happens once the gesture clearly follows the swipe axis.
pub fn swipe_move(
    config: &CarouselConfig,
    state: &mut CarouselState,
    sample: PointerSample,
    measure: Option<&dyn TrackMeasure>,
    effects: &mut Effects,
) -> bool {
    if !state.dragging || state.animating {
        return false;
    }
    let Some(mut touch) = state.touch else {
        return false;
    };

    let current_left = track_offset(config, state, state.current_slide, measure);
    touch.current = sample.position;

    let axis = Axis::of_swipe(config);
    let delta = touch.delta();
    let swipe_length = axis.main(delta).abs().round();
    touch.swipe_length = Some(swipe_length);

    let position_offset = match axis {
        Axis::Horizontal => {
            let rtl = if config.rtl { -1.0 } else { 1.0 };
            let movement = if touch.current.x > touch.start.x {
                1.0
            } else {
                -1.0
            };
            rtl * movement
        }
        Axis::Vertical => {
            if touch.current.y > touch.start.y {
                1.0
            } else {
                -1.0
            }
        }
    };

    let direction = swipe_direction(config, &touch);
    let mut touch_swipe_length = swipe_length;

    if !config.infinite
        && let Ok(paging) = Paging::resolve(config)
    {
        let current = state.current_slide;
        let at_edge = (current == 0 && direction == SwipeDirection::Right)
            || (current + 1 >= paging.dot_count() && direction == SwipeDirection::Left);
        if at_edge {
            touch_swipe_length = swipe_length * config.edge_friction;
            if !state.edge_dragged {
                effects.push(Effect::Edge(direction));
                state.edge_dragged = true;
            }
        }
    }

    if !state.swiped {
        effects.push(Effect::SwipeStart(direction));
        state.swiped = true;
    }

    let swipe_left = current_left + touch_swipe_length * position_offset;
    state.swipe_left = Some(swipe_left);
    state.track_style = track_style(config, swipe_left);
    state.touch = Some(touch);

    let primary = axis.main(delta).abs();
    let cross = axis.cross(delta).abs();
    primary >= cross * PRIMARY_AXIS_RATIO && swipe_length > PREVENT_DEFAULT_MIN_LENGTH
}

/// Counts the slides a swipe-to-slide drag has moved past.
///
/// Looks for the first rendered slide whose midpoint lies beyond the live
/// track offset. Returns zero when the track is not measurable.
pub fn slides_traversed(
    config: &CarouselConfig,
    state: &CarouselState,
    measure: Option<&dyn TrackMeasure>,
) -> i32 {
    let Some(measure) = measure else {
        return 0;
    };
    let center_offset = if config.center_mode {
        match config.require_slide_width() {
            Ok(width) => width * (config.slides_to_show / 2) as f32,
            Err(err) => {
                debug!(%err, "center offset unavailable, counting from the track edge");
                0.0
            }
        }
    } else {
        0.0
    };
    let edge = -state.swipe_left.unwrap_or(0.0);

    let swiped = (0..measure.child_count())
        .filter_map(|position| measure.child(position))
        .find(|rect| {
            if config.vertical {
                rect.center_y() > edge
            } else {
                rect.center_x() - center_offset > edge
            }
        });

    // A swiped slide at index 0 counts the same as none at all.
    let index = swiped.map_or(0, |rect| rect.data_index);
    let traversed = if index != 0 {
        index
    } else {
        -state.current_slide
    };
    match traversed.saturating_abs() {
        0 => 1,
        n => n,
    }
}

/// Closes the gesture and decides where the carousel goes.
pub fn swipe_end(
    config: &CarouselConfig,
    state: &mut CarouselState,
    measure: Option<&dyn TrackMeasure>,
) -> SwipeRelease {
    if !state.dragging {
        return SwipeRelease::Ignored {
            prevent_default: config.swipe,
        };
    }

    let touch = state.touch;
    let direction = touch.map(|touch| swipe_direction(config, &touch));
    let min_swipe = Axis::of_swipe(config)
        .list_size(config)
        .map(|size| size / config.touch_threshold);
    let slide_count = if config.swipe_to_slide {
        Ok(slides_traversed(config, state, measure))
    } else {
        Paging::resolve(config).map(|paging| paging.scroll)
    };

    state.reset_gesture();

    let Some(swipe_length) = touch
        .and_then(|touch| touch.swipe_length)
        .filter(|length| *length != 0.0)
    else {
        return SwipeRelease::Discarded;
    };

    let min_swipe = match min_swipe {
        Ok(min_swipe) => min_swipe,
        Err(err) => {
            debug!(%err, "cannot measure swipe threshold, snapping back");
            return SwipeRelease::SnapBack;
        }
    };
    if swipe_length.partial_cmp(&min_swipe) != Some(Ordering::Greater) {
        return SwipeRelease::SnapBack;
    }

    let slide_count = match slide_count {
        Ok(slide_count) => slide_count,
        Err(err) => {
            debug!(%err, "cannot resolve swipe step, snapping back");
            return SwipeRelease::SnapBack;
        }
    };
    let current = state.current_slide;
    let candidate = match direction {
        Some(SwipeDirection::Left | SwipeDirection::Down) => current + slide_count,
        Some(SwipeDirection::Right | SwipeDirection::Up) => current - slide_count,
        Some(SwipeDirection::Vertical) | None => return SwipeRelease::SnapBack,
    };

    let target = if config.swipe_to_slide {
        check_navigable(candidate, &navigable_indexes(config))
    } else {
        candidate
    };
    SwipeRelease::Commit(target)
}
