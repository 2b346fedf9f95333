//! Event reducer and the stateful controller built on it.
//!
//! ## Usage
//!
//! Hosts that keep their own state call [`reduce`] and fire the returned
//! [`Effect`]s themselves. Hosts that prefer callbacks wrap everything in a
//! [`CarouselController`].
use std::{sync::Arc, time::Instant};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    config::CarouselConfig,
    geometry::{track_animate_style, track_offset, track_style},
    gesture::{PointerSample, SwipeDirection, SwipeRelease, swipe_end, swipe_move, swipe_start},
    measure::TrackMeasure,
    navigation::{Key, KeyTarget, NavCommand, change_slide, key_command, slide_handler},
    state::CarouselState,
};

/// Observable side effect of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// A transition from `from` to `to` has been committed.
    BeforeChange {
        /// Slide the carousel is leaving.
        from: i32,
        /// Slide the carousel will rest on.
        to: i32,
    },
    /// The carousel settled on a new slide.
    Change(i32),
    /// A non-infinite boundary was dragged past.
    Edge(SwipeDirection),
    /// A drag gesture started moving.
    SwipeStart(SwipeDirection),
}

/// Effects produced by one event.
pub type Effects = SmallVec<[Effect; 4]>;

/// Input events understood by the carousel.
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    /// Arrow, dot or slide-click navigation.
    Command(NavCommand),
    /// A key press and the element that held focus.
    Key(Key, KeyTarget),
    /// Pointer or finger pressed.
    PointerDown(PointerSample),
    /// Pointer or finger moved.
    PointerMove(PointerSample),
    /// Pointer or finger released.
    PointerUp,
    /// The host finished animating the last committed transition.
    TransitionEnd,
    /// Pointer entered the carousel.
    PointerEnter,
    /// Pointer left the carousel.
    PointerLeave(Instant),
    /// Clock tick driving autoplay.
    Tick(Instant),
    /// Slide heights were measured, in track order.
    SlideHeightsMeasured(Vec<f32>),
}

/// Result of reducing one event.
#[derive(Clone, Debug, PartialEq)]
pub struct Reduction {
    /// State after the event.
    pub state: CarouselState,
    /// Effects to fire, in order.
    pub effects: Effects,
    /// Whether the host should suppress its default handling of the event.
    pub prevent_default: bool,
}

/// Applies `event` to `state` and returns the new state with its effects.
pub fn reduce(
    config: &CarouselConfig,
    state: &CarouselState,
    event: CarouselEvent,
    measure: Option<&dyn TrackMeasure>,
) -> Reduction {
    let mut next = state.clone();
    let mut effects = Effects::new();

    let prevent_default = match event {
        CarouselEvent::Command(command) => {
            navigate(config, &mut next, command, measure, &mut effects);
            false
        }
        CarouselEvent::Key(key, target) => {
            if let Some(command) = key_command(config, key, target) {
                navigate(config, &mut next, command, measure, &mut effects);
            }
            false
        }
        CarouselEvent::PointerDown(sample) => {
            swipe_start(config, &mut next, sample);
            false
        }
        CarouselEvent::PointerMove(sample) => {
            swipe_move(config, &mut next, sample, measure, &mut effects)
        }
        CarouselEvent::PointerUp => match swipe_end(config, &mut next, measure) {
            SwipeRelease::Ignored { prevent_default } => prevent_default,
            SwipeRelease::Discarded => false,
            SwipeRelease::SnapBack => {
                snap_back(config, &mut next, measure);
                false
            }
            SwipeRelease::Commit(target) => {
                commit(config, &mut next, target, measure, &mut effects);
                true
            }
        },
        CarouselEvent::TransitionEnd => {
            finish_transition(config, &mut next, measure, &mut effects);
            false
        }
        CarouselEvent::PointerEnter => {
            if config.autoplay && config.pause_on_hover {
                next.autoplay.pause();
            }
            false
        }
        CarouselEvent::PointerLeave(now) => {
            if config.autoplay && config.pause_on_hover {
                next.autoplay.resume(now, config.autoplay_speed);
            }
            false
        }
        CarouselEvent::Tick(now) => {
            if config.autoplay
                && next.autoplay.poll(now, config.autoplay_speed)
                && !next.dragging
            {
                navigate(config, &mut next, NavCommand::Next, measure, &mut effects);
            }
            false
        }
        CarouselEvent::SlideHeightsMeasured(heights) => {
            next.slide_height_list = heights;
            if !next.animating && !next.dragging {
                next.settle(config, measure);
            }
            false
        }
    };

    Reduction {
        state: next,
        effects,
        prevent_default,
    }
}

fn navigate(
    config: &CarouselConfig,
    state: &mut CarouselState,
    command: NavCommand,
    measure: Option<&dyn TrackMeasure>,
    effects: &mut Effects,
) {
    if let Some(target) = change_slide(config, state, command) {
        commit(config, state, target, measure, effects);
    }
}

fn commit(
    config: &CarouselConfig,
    state: &mut CarouselState,
    target: i32,
    measure: Option<&dyn TrackMeasure>,
    effects: &mut Effects,
) {
    if state.animating {
        trace!(target, "slide change ignored while a transition is running");
        return;
    }
    let Some(commit) = slide_handler(config, state, target, measure) else {
        trace!(target, "target slide unreachable");
        snap_back(config, state, measure);
        return;
    };

    if commit.final_slide == state.current_slide {
        state.track_style = track_animate_style(config, commit.rest_offset);
        state.rest_offset = None;
        return;
    }

    let from = state.current_slide;
    let to = commit.final_slide;
    debug!(from, to, target = commit.target_slide, "committing slide change");
    effects.push(Effect::BeforeChange { from, to });
    state.current_slide = to;

    if config.speed.is_zero() {
        state.track_style = track_style(config, commit.rest_offset);
        state.rest_offset = None;
        effects.push(Effect::Change(to));
    } else {
        state.animating = true;
        state.track_style = track_animate_style(config, commit.target_offset);
        state.rest_offset = Some(commit.rest_offset);
    }
}

fn snap_back(
    config: &CarouselConfig,
    state: &mut CarouselState,
    measure: Option<&dyn TrackMeasure>,
) {
    let offset = track_offset(config, state, state.current_slide, measure);
    state.track_style = track_animate_style(config, offset);
}

fn finish_transition(
    config: &CarouselConfig,
    state: &mut CarouselState,
    measure: Option<&dyn TrackMeasure>,
    effects: &mut Effects,
) {
    if !state.animating {
        return;
    }
    state.animating = false;
    let rest = state
        .rest_offset
        .take()
        .unwrap_or_else(|| track_offset(config, state, state.current_slide, measure));
    state.track_style = track_style(config, rest);
    effects.push(Effect::Change(state.current_slide));
}

type IndexCallback = Arc<dyn Fn(i32) + Send + Sync>;
type DirectionCallback = Arc<dyn Fn(SwipeDirection) + Send + Sync>;

/// Effects and default-handling decision of one dispatched event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dispatched {
    /// Effects fired, in order.
    pub effects: Effects,
    /// Whether the host should suppress its default handling of the event.
    pub prevent_default: bool,
}

/// Owns a configuration and state and routes effects to callbacks.
#[derive(Clone)]
pub struct CarouselController {
    config: CarouselConfig,
    state: CarouselState,
    on_before_change: Option<Arc<dyn Fn(i32, i32) + Send + Sync>>,
    on_change: Option<IndexCallback>,
    on_edge: Option<DirectionCallback>,
    on_swipe_start: Option<DirectionCallback>,
}

impl CarouselController {
    /// Creates a controller resting on `initial_slide`.
    pub fn new(config: CarouselConfig, initial_slide: i32) -> Self {
        if let Err(err) = config.validate() {
            warn!(%err, "carousel configured with invalid values");
        }
        let state = CarouselState::new(&config, initial_slide, None);
        Self {
            config,
            state,
            on_before_change: None,
            on_change: None,
            on_edge: None,
            on_swipe_start: None,
        }
    }

    /// Sets the handler called with `(from, to)` when a change is committed.
    pub fn on_before_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(i32, i32) + Send + Sync + 'static,
    {
        self.on_before_change = Some(Arc::new(handler));
        self
    }

    /// Sets the handler called once the carousel settles on a new slide.
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Sets the handler called when a drag pushes past a boundary.
    pub fn on_edge<F>(mut self, handler: F) -> Self
    where
        F: Fn(SwipeDirection) + Send + Sync + 'static,
    {
        self.on_edge = Some(Arc::new(handler));
        self
    }

    /// Sets the handler called when a drag starts moving.
    pub fn on_swipe_start<F>(mut self, handler: F) -> Self
    where
        F: Fn(SwipeDirection) + Send + Sync + 'static,
    {
        self.on_swipe_start = Some(Arc::new(handler));
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Index of the current slide.
    pub fn current_slide(&self) -> i32 {
        self.state.current_slide
    }

    /// Replaces the configuration, re-settling the track when idle.
    pub fn set_config(&mut self, config: CarouselConfig, measure: Option<&dyn TrackMeasure>) {
        if let Err(err) = config.validate() {
            warn!(%err, "carousel reconfigured with invalid values");
        }
        self.config = config;
        if !self.state.animating && !self.state.dragging {
            self.state.settle(&self.config, measure);
        }
    }

    /// Applies `event`, fires the registered callbacks and reports what
    /// happened.
    pub fn dispatch(
        &mut self,
        event: CarouselEvent,
        measure: Option<&dyn TrackMeasure>,
    ) -> Dispatched {
        let Reduction {
            state,
            effects,
            prevent_default,
        } = reduce(&self.config, &self.state, event, measure);
        self.state = state;

        for effect in &effects {
            trace!(?effect, "carousel effect");
            match *effect {
                Effect::BeforeChange { from, to } => {
                    if let Some(handler) = &self.on_before_change {
                        handler(from, to);
                    }
                }
                Effect::Change(index) => {
                    if let Some(handler) = &self.on_change {
                        handler(index);
                    }
                }
                Effect::Edge(direction) => {
                    if let Some(handler) = &self.on_edge {
                        handler(direction);
                    }
                }
                Effect::SwipeStart(direction) => {
                    if let Some(handler) = &self.on_swipe_start {
                        handler(direction);
                    }
                }
            }
        }

        Dispatched {
            effects,
            prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicI32, AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geometry::TrackStyle;

    fn config() -> CarouselConfig {
        CarouselConfig::default()
            .slide_count(5usize)
            .slide_width(100.0)
            .slide_height(80.0)
            .list_width(100.0)
            .list_height(80.0)
    }

    fn step(
        config: &CarouselConfig,
        state: &CarouselState,
        event: CarouselEvent,
    ) -> Reduction {
        reduce(config, state, event, None)
    }

    #[test]
    fn next_commits_then_settles_on_transition_end() {
        let config = config();
        let state = CarouselState::new(&config, 0, None);

        let moved = step(&config, &state, CarouselEvent::Command(NavCommand::Next));
        assert_eq!(
            moved.effects.as_slice(),
            &[Effect::BeforeChange { from: 0, to: 1 }]
        );
        assert!(moved.state.animating);
        assert_eq!(moved.state.current_slide, 1);
        assert_eq!(moved.state.track_style.offset(), Some(-200.0));
        assert!(moved.state.track_style.transition.is_some());

        let settled = step(&config, &moved.state, CarouselEvent::TransitionEnd);
        assert_eq!(settled.effects.as_slice(), &[Effect::Change(1)]);
        assert!(!settled.state.animating);
        assert_eq!(settled.state.track_style.transition, None);

        let again = step(&config, &settled.state, CarouselEvent::TransitionEnd);
        assert!(again.effects.is_empty());
    }

    #[test]
    fn wrap_around_animates_to_clone_and_rests_on_real_slide() {
        let config = config();
        let state = CarouselState::new(&config, 0, None);

        let moved = step(&config, &state, CarouselEvent::Command(NavCommand::Previous));
        assert_eq!(moved.state.current_slide, 4);
        assert_eq!(moved.state.track_style.offset(), Some(0.0));
        assert_eq!(moved.state.rest_offset, Some(-500.0));

        let settled = step(&config, &moved.state, CarouselEvent::TransitionEnd);
        assert_eq!(settled.state.track_style.offset(), Some(-500.0));
    }

    #[test]
    fn commands_are_suppressed_while_animating() {
        let config = config();
        let state = CarouselState::new(&config, 0, None);
        let moved = step(&config, &state, CarouselEvent::Command(NavCommand::Next));

        let blocked = step(&config, &moved.state, CarouselEvent::Command(NavCommand::Next));
        assert!(blocked.effects.is_empty());
        assert_eq!(blocked.state, moved.state);

        let drag = step(
            &config,
            &moved.state,
            CarouselEvent::PointerDown(PointerSample::touch(0.0, 0.0)),
        );
        assert!(!drag.state.dragging);
    }

    #[test]
    fn release_during_transition_does_not_commit_again() {
        let config = config();
        let mut state = CarouselState::new(&config, 0, None);
        let mut effects = Effects::new();
        for event in [
            CarouselEvent::PointerDown(PointerSample::touch(90.0, 0.0)),
            CarouselEvent::PointerMove(PointerSample::touch(10.0, 0.0)),
            CarouselEvent::Command(NavCommand::Next),
            CarouselEvent::PointerUp,
            CarouselEvent::TransitionEnd,
        ] {
            let reduction = step(&config, &state, event);
            effects.extend(reduction.effects);
            state = reduction.state;
        }

        assert_eq!(
            effects.as_slice(),
            &[
                Effect::SwipeStart(SwipeDirection::Left),
                Effect::BeforeChange { from: 0, to: 1 },
                Effect::Change(1),
            ]
        );
        assert_eq!(state.current_slide, 1);
        assert!(!state.dragging);
        assert_eq!(state.track_style.offset(), Some(-200.0));
    }

    #[test]
    fn swipe_past_last_page_springs_back() {
        let config = config().infinite(false).edge_friction(0.5);
        let state = CarouselState::new(&config, 4, None);
        let down = step(
            &config,
            &state,
            CarouselEvent::PointerDown(PointerSample::touch(90.0, 0.0)),
        );
        let moved = step(
            &config,
            &down.state,
            CarouselEvent::PointerMove(PointerSample::touch(30.0, 0.0)),
        );
        assert_eq!(moved.state.track_style.offset(), Some(-430.0));

        let released = step(&config, &moved.state, CarouselEvent::PointerUp);
        assert!(released.effects.is_empty());
        assert_eq!(released.state.current_slide, 4);
        assert_eq!(released.state.track_style.offset(), Some(-400.0));
        assert!(released.state.track_style.transition.is_some());
    }

    #[test]
    fn zero_speed_changes_immediately() {
        let config = config().speed(Duration::ZERO);
        let state = CarouselState::new(&config, 0, None);
        let moved = step(&config, &state, CarouselEvent::Command(NavCommand::Index(3)));
        assert_eq!(
            moved.effects.as_slice(),
            &[Effect::BeforeChange { from: 0, to: 3 }, Effect::Change(3)]
        );
        assert!(!moved.state.animating);
    }

    #[test]
    fn same_index_is_silent() {
        let config = config();
        let state = CarouselState::new(&config, 2, None);
        let same = step(&config, &state, CarouselEvent::Command(NavCommand::Index(2)));
        assert!(same.effects.is_empty());
        assert_eq!(same.state, state);
    }

    #[test]
    fn finite_clamp_onto_current_slide_is_silent() {
        let config = config().infinite(false);
        let state = CarouselState::new(&config, 4, None);
        let clamped = step(&config, &state, CarouselEvent::Command(NavCommand::Next));
        assert!(clamped.effects.is_empty());
        assert_eq!(clamped.state.current_slide, 4);
        assert!(!clamped.state.animating);
    }

    #[test]
    fn arrow_keys_navigate() {
        let config = config().rtl(true);
        let state = CarouselState::new(&config, 2, None);
        let moved = step(
            &config,
            &state,
            CarouselEvent::Key(Key::ArrowLeft, KeyTarget::Track),
        );
        assert_eq!(moved.state.current_slide, 3);

        let typing = step(
            &config,
            &state,
            CarouselEvent::Key(Key::ArrowLeft, KeyTarget::FormField),
        );
        assert_eq!(typing.state.current_slide, 2);
    }

    #[test]
    fn swipe_commit_prevents_default_and_snap_back_animates() {
        let config = config();
        let state = CarouselState::new(&config, 1, None);

        let down = step(
            &config,
            &state,
            CarouselEvent::PointerDown(PointerSample::touch(90.0, 10.0)),
        );
        let moved = step(
            &config,
            &down.state,
            CarouselEvent::PointerMove(PointerSample::touch(60.0, 10.0)),
        );
        assert!(moved.prevent_default);
        assert_eq!(
            moved.effects.as_slice(),
            &[Effect::SwipeStart(SwipeDirection::Left)]
        );

        let released = step(&config, &moved.state, CarouselEvent::PointerUp);
        assert!(released.prevent_default);
        assert_eq!(released.state.current_slide, 2);
        assert!(released.state.animating);

        let short = step(
            &config,
            &down.state,
            CarouselEvent::PointerMove(PointerSample::touch(75.0, 10.0)),
        );
        let snapped = step(&config, &short.state, CarouselEvent::PointerUp);
        assert!(!snapped.prevent_default);
        assert_eq!(snapped.state.current_slide, 1);
        assert_eq!(snapped.state.track_style.offset(), Some(-200.0));
        assert!(snapped.state.track_style.transition.is_some());
        assert!(snapped.effects.is_empty());
    }

    #[test]
    fn release_without_drag_reports_swipe_setting() {
        let config = config();
        let state = CarouselState::default();
        assert!(step(&config, &state, CarouselEvent::PointerUp).prevent_default);
        assert!(!step(&config.swipe(false), &state, CarouselEvent::PointerUp).prevent_default);
    }

    #[test]
    fn autoplay_advances_and_pauses_on_hover() {
        let config = config().autoplay(true).speed(Duration::ZERO);
        let interval = config.autoplay_speed;
        let start = Instant::now();
        let state = CarouselState::new(&config, 0, None);

        let scheduled = step(&config, &state, CarouselEvent::Tick(start));
        assert!(scheduled.effects.is_empty());

        let advanced = step(&config, &scheduled.state, CarouselEvent::Tick(start + interval));
        assert_eq!(advanced.state.current_slide, 1);

        let hovered = step(&config, &advanced.state, CarouselEvent::PointerEnter);
        let idle = step(
            &config,
            &hovered.state,
            CarouselEvent::Tick(start + interval * 4),
        );
        assert_eq!(idle.state.current_slide, 1);

        let left = step(
            &config,
            &idle.state,
            CarouselEvent::PointerLeave(start + interval * 4),
        );
        let resumed = step(&config, &left.state, CarouselEvent::Tick(start + interval * 5));
        assert_eq!(resumed.state.current_slide, 2);
    }

    #[test]
    fn autoplay_disabled_ignores_ticks() {
        let config = config();
        let state = CarouselState::new(&config, 0, None);
        let ticked = step(&config, &state, CarouselEvent::Tick(Instant::now()));
        assert_eq!(ticked.state, state);
    }

    #[test]
    fn measured_heights_resettle_vertical_track() {
        let config = config()
            .vertical(true)
            .adaptive_height(true)
            .infinite(false);
        let state = CarouselState::new(&config, 2, None);
        let measured = step(
            &config,
            &state,
            CarouselEvent::SlideHeightsMeasured(vec![30.0, 50.0, 70.0]),
        );
        assert_eq!(measured.state.track_style.offset(), Some(-80.0));
    }

    #[test]
    fn missing_measurements_degrade_to_empty_style() {
        let config = CarouselConfig::default().slide_count(3usize);
        let state = CarouselState::new(&config, 0, None);
        assert_eq!(state.track_style, TrackStyle::default());

        let moved = step(&config, &state, CarouselEvent::Command(NavCommand::Next));
        assert_eq!(moved.state.current_slide, 1);
        assert!(moved.state.track_style.is_empty());
    }

    #[test]
    fn controller_fires_callbacks() {
        let changed = Arc::new(AtomicI32::new(-1));
        let swipes = Arc::new(AtomicUsize::new(0));
        let changed_in = Arc::clone(&changed);
        let swipes_in = Arc::clone(&swipes);

        let mut controller = CarouselController::new(config(), 0)
            .on_change(move |index| changed_in.store(index, Ordering::SeqCst))
            .on_swipe_start(move |_| {
                swipes_in.fetch_add(1, Ordering::SeqCst);
            });

        controller.dispatch(CarouselEvent::Command(NavCommand::Next), None);
        assert_eq!(changed.load(Ordering::SeqCst), -1);
        controller.dispatch(CarouselEvent::TransitionEnd, None);
        assert_eq!(changed.load(Ordering::SeqCst), 1);
        assert_eq!(controller.current_slide(), 1);

        controller.dispatch(
            CarouselEvent::PointerDown(PointerSample::mouse(50.0, 0.0)),
            None,
        );
        controller.dispatch(
            CarouselEvent::PointerMove(PointerSample::mouse(20.0, 0.0)),
            None,
        );
        controller.dispatch(
            CarouselEvent::PointerMove(PointerSample::mouse(10.0, 0.0)),
            None,
        );
        assert_eq!(swipes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn set_config_resettles_track() {
        let mut controller = CarouselController::new(config(), 1);
        assert_eq!(controller.state().track_style.offset(), Some(-200.0));
        controller.set_config(config().slide_width(50.0), None);
        assert_eq!(controller.state().track_style.offset(), Some(-100.0));
        assert_eq!(controller.config().slide_width, Some(50.0));
    }
}
