//! Scripted carousel session that logs every state change.
//!
//! Run with `RUST_LOG=debug` to also see the core's own decisions.
use std::time::{Duration, Instant};

use glam::Vec2;
use tessera_carousel::{
    CarouselConfig, CarouselController, CarouselEvent, Key, KeyTarget, NavCommand,
    PointerSample, TrackMeasure, track_slides, uniform_track,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SLIDE_WIDTH: f32 = 320.0;
const SLIDE_HEIGHT: f32 = 180.0;

fn config() -> CarouselConfig {
    CarouselConfig::default()
        .slide_count(5usize)
        .slides_to_show(1usize)
        .slide_width(SLIDE_WIDTH)
        .slide_height(SLIDE_HEIGHT)
        .list_width(SLIDE_WIDTH)
        .list_height(SLIDE_HEIGHT)
        .autoplay(true)
        .autoplay_speed(Duration::from_millis(2000))
}

fn controller() -> CarouselController {
    CarouselController::new(config(), 0)
        .on_before_change(|from, to| info!(from, to, "leaving slide"))
        .on_change(|index| info!(index, "showing slide"))
        .on_edge(|direction| info!(?direction, "dragged past edge"))
        .on_swipe_start(|direction| info!(?direction, "swipe started"))
}

fn settle(carousel: &mut CarouselController, measure: Option<&dyn TrackMeasure>) {
    if carousel.state().animating {
        let style = &carousel.state().track_style;
        info!(
            transform = ?style.transform.map(|t| t.translate3d()),
            transition = ?style.transition.as_ref().map(ToString::to_string),
            "animating track"
        );
        carousel.dispatch(CarouselEvent::TransitionEnd, measure);
    }
}

fn drag(
    carousel: &mut CarouselController,
    from: Vec2,
    to: Vec2,
    measure: Option<&dyn TrackMeasure>,
) {
    carousel.dispatch(
        CarouselEvent::PointerDown(PointerSample::touch(from.x, from.y)),
        measure,
    );
    let steps = 4;
    for step in 1..=steps {
        let point = from.lerp(to, step as f32 / steps as f32);
        let outcome = carousel.dispatch(
            CarouselEvent::PointerMove(PointerSample::touch(point.x, point.y)),
            measure,
        );
        info!(
            offset = ?carousel.state().swipe_left,
            prevent_default = outcome.prevent_default,
            "dragging"
        );
    }
    carousel.dispatch(CarouselEvent::PointerUp, measure);
}

/// Plays a short session against the carousel core.
pub fn run() {
    let config = config();
    if let Err(err) = config.validate() {
        warn!(%err, "demo configuration rejected");
        return;
    }
    let track = uniform_track(&config);
    let measure: Option<&dyn TrackMeasure> = Some(&track);
    info!(children = track_slides(&config).len(), "track laid out");

    let mut carousel = controller();

    carousel.dispatch(CarouselEvent::Command(NavCommand::Next), measure);
    settle(&mut carousel, measure);

    carousel.dispatch(CarouselEvent::Command(NavCommand::Dot(4)), measure);
    settle(&mut carousel, measure);

    carousel.dispatch(
        CarouselEvent::Key(Key::ArrowRight, KeyTarget::Track),
        measure,
    );
    settle(&mut carousel, measure);

    drag(
        &mut carousel,
        Vec2::new(40.0, 90.0),
        Vec2::new(280.0, 95.0),
        measure,
    );
    settle(&mut carousel, measure);

    let start = Instant::now();
    let interval = carousel.config().autoplay_speed;
    for tick in 0..3 {
        carousel.dispatch(CarouselEvent::Tick(start + interval * tick), measure);
        settle(&mut carousel, measure);
    }

    info!(slide = carousel.current_slide(), "session finished");
}

/// Initializes logging and runs the demo session.
pub fn desktop_main() {
    init_tracing();
    run();
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
