//! Framework-agnostic carousel core for tessera-ui.
//!
//! The crate computes everything a carousel needs except drawing: where the
//! track sits, which slides are active or cloned, how a drag gesture evolves
//! and which slide a navigation request lands on. Hosts render the results
//! with whatever toolkit they use.
//!
//! # Usage
//!
//! ```
//! use tessera_carousel::{
//!     CarouselConfig, CarouselController, CarouselEvent, NavCommand, uniform_track,
//! };
//!
//! let config = CarouselConfig::default()
//!     .slide_count(5usize)
//!     .slide_width(320.0)
//!     .slide_height(180.0)
//!     .list_width(320.0)
//!     .list_height(180.0);
//! let track = uniform_track(&config);
//!
//! let mut carousel = CarouselController::new(config, 0)
//!     .on_change(|index| println!("now showing slide {index}"));
//!
//! carousel.dispatch(CarouselEvent::Command(NavCommand::Next), Some(&track));
//! // The host animates `state().track_style`, then reports completion.
//! carousel.dispatch(CarouselEvent::TransitionEnd, Some(&track));
//! assert_eq!(carousel.current_slide(), 1);
//! ```
//!
//! # Measurement
//!
//! Offsets for variable-width slides and swipe-to-slide come from the rendered
//! track. Hosts expose it through [`TrackMeasure`]; passing `None` falls back to
//! the uniform-width arithmetic.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod autoplay;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod gesture;
pub mod measure;
pub mod navigation;
pub mod state;

pub use crate::{
    autoplay::Autoplay,
    config::{Animation, CarouselConfig, ConfigError, Paging},
    controller::{
        CarouselController, CarouselEvent, Dispatched, Effect, Effects, Reduction, reduce,
    },
    geometry::{
        Axis, SlideClasses, SlideKind, SlideStyle, SlideWidth, TrackSlide, TrackStyle,
        TrackTransform, Transition, TransitionProperty, slide_classes, slide_style,
        track_animate_style, track_offset, track_slides, track_style, try_track_offset,
    },
    gesture::{
        PointerOrigin, PointerSample, SwipeDirection, SwipeRelease, slides_traversed,
        swipe_direction, swipe_end, swipe_move, swipe_start,
    },
    measure::{SlideRect, TrackMeasure, uniform_track},
    navigation::{
        Commit, Key, KeyTarget, NavCommand, can_go_next, change_slide, check_navigable,
        key_command, navigable_indexes, slide_handler,
    },
    state::{CarouselState, TouchSample},
};
