//! Discrete navigation: arrows, dots, direct indices and the keyboard.
//!
//! [`change_slide`] turns a command into a candidate index and
//! [`slide_handler`] resolves that candidate into the slide the carousel
//! animates to and the slide it finally rests on.
use tracing::warn;

use crate::{
    config::{CarouselConfig, Paging},
    geometry::track_offset,
    measure::TrackMeasure,
    state::CarouselState,
};

/// A navigation request coming from arrows, dots or slide clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    /// Go back one page.
    Previous,
    /// Go forward one page.
    Next,
    /// Jump to the page of a navigation dot.
    Dot(usize),
    /// Jump to a slide index.
    Index(i32),
    /// A rendered slide was clicked; jump to the page it stands for.
    Child(i32),
}

/// Keys the carousel reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Any other key.
    Other,
}

/// Element holding focus when a key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyTarget {
    /// The carousel or another non-editable element.
    #[default]
    Track,
    /// A text input, textarea or select; arrows belong to it.
    FormField,
}

/// Resolution of a candidate index into animation and resting positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Commit {
    /// Index the track animates toward; may address a clone.
    pub target_slide: i32,
    /// Index the carousel rests on once the transition ends.
    pub final_slide: i32,
    /// Track offset of `target_slide`.
    pub target_offset: f32,
    /// Track offset of `final_slide`.
    pub rest_offset: f32,
}

fn paging(config: &CarouselConfig) -> Option<Paging> {
    Paging::resolve(config)
        .inspect_err(|err| warn!(%err, "ignoring navigation on invalid configuration"))
        .ok()
}

/// Computes the candidate index for `command`, or `None` when the command
/// targets the slide that is already current.
pub fn change_slide(
    config: &CarouselConfig,
    state: &CarouselState,
    command: NavCommand,
) -> Option<i32> {
    let Paging {
        count,
        show,
        scroll,
    } = paging(config)?;
    let current = state.current_slide;
    let uneven = count % scroll != 0;
    let index_offset = if uneven { 0 } else { (count - current) % scroll };

    let target = match command {
        NavCommand::Previous => {
            let step = if index_offset == 0 {
                scroll
            } else {
                show - index_offset
            };
            return Some(current - step);
        }
        NavCommand::Next => {
            let step = if index_offset == 0 {
                scroll
            } else {
                index_offset
            };
            return Some(current + step);
        }
        NavCommand::Dot(page) => i32::try_from(page)
            .unwrap_or(i32::MAX)
            .saturating_mul(scroll),
        NavCommand::Child(page) => page.saturating_mul(scroll),
        NavCommand::Index(index) => index,
    };

    (target != current).then_some(target)
}

/// Ordered landing points for swipe-to-slide.
pub fn navigable_indexes(config: &CarouselConfig) -> Vec<i32> {
    let Some(Paging {
        count,
        show,
        scroll,
    }) = paging(config)
    else {
        return Vec::new();
    };

    let (mut break_point, mut counter, max) = if config.infinite {
        (-show, -show, count.saturating_mul(2))
    } else {
        (0, 0, count)
    };
    let stride = if scroll <= show { scroll } else { show };

    let mut indexes = Vec::new();
    while break_point < max {
        indexes.push(break_point);
        break_point = counter.saturating_add(scroll);
        counter = counter.saturating_add(stride);
    }
    indexes
}

/// Clamps `index` down to the closest landing point at or below it.
///
/// Indices past the last landing point clamp to it; indices below the first
/// one fall back to zero.
pub fn check_navigable(index: i32, navigables: &[i32]) -> i32 {
    let Some(&last) = navigables.last() else {
        return index;
    };
    if index > last {
        return last;
    }
    let mut previous = 0;
    for &navigable in navigables {
        if index < navigable {
            return previous;
        }
        previous = navigable;
    }
    index
}

/// Maps an arrow key to a command when keyboard navigation applies.
pub fn key_command(config: &CarouselConfig, key: Key, target: KeyTarget) -> Option<NavCommand> {
    if !config.accessibility || target == KeyTarget::FormField {
        return None;
    }
    match (key, config.rtl) {
        (Key::ArrowLeft, false) | (Key::ArrowRight, true) => Some(NavCommand::Previous),
        (Key::ArrowRight, false) | (Key::ArrowLeft, true) => Some(NavCommand::Next),
        (Key::Other, _) => None,
    }
}

/// Returns true while a carousel without wrap-around still has slides past
/// the visible window.
pub fn can_go_next(config: &CarouselConfig, current_slide: i32) -> bool {
    if config.infinite {
        return true;
    }
    let Some(Paging { count, show, .. }) = paging(config) else {
        return false;
    };
    if config.center_mode {
        current_slide < count - 1
    } else {
        count > show && current_slide < count - show
    }
}

/// Resolves a candidate index into where the track animates and where it
/// rests.
///
/// Returns `None` when the candidate cannot be reached at all: fade mode
/// without wrap-around, an empty carousel, or moving forward from the last
/// page without wrap-around.
pub fn slide_handler(
    config: &CarouselConfig,
    state: &CarouselState,
    target: i32,
    measure: Option<&dyn TrackMeasure>,
) -> Option<Commit> {
    let paging = paging(config)?;
    let count = paging.count;
    if count == 0 {
        return None;
    }

    if config.is_fade() {
        if !config.infinite && !(0..count).contains(&target) {
            return None;
        }
        let final_slide = target.rem_euclid(count);
        return Some(Commit {
            target_slide: final_slide,
            final_slide,
            target_offset: 0.0,
            rest_offset: 0.0,
        });
    }

    if !config.infinite
        && target > state.current_slide
        && !can_go_next(config, state.current_slide)
    {
        return None;
    }

    let last_page = (count - paging.show).max(0);
    let mut final_slide = if target < 0 {
        if !config.infinite {
            0
        } else if paging.is_uneven() {
            count - paging.remainder()
        } else {
            count + target
        }
    } else if target >= count {
        if config.infinite {
            if paging.is_uneven() {
                0
            } else {
                target - count
            }
        } else if config.center_mode {
            count - 1
        } else {
            last_page
        }
    } else {
        target
    };
    // Without wrap-around the window never scrolls past the last full page.
    if !config.infinite
        && !config.center_mode
        && target.saturating_add(paging.show) >= count
    {
        final_slide = last_page;
    }

    let rest_offset = track_offset(config, state, final_slide, measure);
    let target_offset = if config.infinite {
        track_offset(config, state, target, measure)
    } else {
        rest_offset
    };

    Some(Commit {
        target_slide: target,
        final_slide,
        target_offset,
        rest_offset,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(count: usize, show: usize, scroll: usize) -> CarouselConfig {
        CarouselConfig::default()
            .slide_count(count)
            .slides_to_show(show)
            .slides_to_scroll(scroll)
            .slide_width(100.0)
            .slide_height(100.0)
            .list_width(100.0 * show as f32)
    }

    fn at(slide: i32) -> CarouselState {
        CarouselState {
            current_slide: slide,
            ..CarouselState::default()
        }
    }

    #[test]
    fn previous_and_next_step_by_page() {
        let config = config(6, 2, 2);
        assert_eq!(change_slide(&config, &at(2), NavCommand::Next), Some(4));
        assert_eq!(change_slide(&config, &at(2), NavCommand::Previous), Some(0));
    }

    #[test]
    fn misaligned_index_realigns_on_even_pages() {
        // (6 - 1) % 2 == 1: next steps by one, previous by show - 1.
        let config = config(6, 3, 2);
        assert_eq!(change_slide(&config, &at(1), NavCommand::Next), Some(2));
        assert_eq!(change_slide(&config, &at(1), NavCommand::Previous), Some(-1));
    }

    #[test]
    fn uneven_collection_steps_by_full_page() {
        let config = config(10, 3, 3).infinite(false);
        assert_eq!(change_slide(&config, &at(6), NavCommand::Next), Some(9));

        // 9 + 3 runs past the end: the window rests on the last full page.
        let commit = slide_handler(&config, &at(6), 9, None).unwrap();
        assert_eq!(commit.final_slide, 7);
        assert_eq!(commit.target_offset, commit.rest_offset);

        assert_eq!(change_slide(&config, &at(9), NavCommand::Next), Some(12));
        assert_eq!(slide_handler(&config, &at(9), 12, None), None);
        assert_eq!(slide_handler(&config, &at(7), 10, None), None);
    }

    #[test]
    fn finite_next_stops_at_last_full_page() {
        let config = config(5, 3, 1).infinite(false);
        let mut state = at(0);
        let mut rests = Vec::new();
        while let Some(target) = change_slide(&config, &state, NavCommand::Next) {
            let Some(commit) = slide_handler(&config, &state, target, None) else {
                break;
            };
            rests.push((commit.final_slide, commit.rest_offset));
            state.current_slide = commit.final_slide;
        }
        assert_eq!(rests, vec![(1, -100.0), (2, -200.0)]);
        assert!(!can_go_next(&config, 2));
    }

    #[test]
    fn fewer_slides_than_window_never_advance() {
        let config = config(2, 3, 1).infinite(false);
        assert!(!can_go_next(&config, 0));
        assert_eq!(slide_handler(&config, &at(1), 2, None), None);
        assert_eq!(slide_handler(&config, &at(0), 1, None), None);

        let back = slide_handler(&config, &at(1), 0, None).unwrap();
        assert_eq!(back.final_slide, 0);
    }

    #[test]
    fn center_mode_without_wrap_reaches_last_slide() {
        let config = config(6, 3, 1).center_mode(true).infinite(false);
        assert!(can_go_next(&config, 4));
        assert!(!can_go_next(&config, 5));
        assert_eq!(slide_handler(&config, &at(4), 5, None).map(|c| c.final_slide), Some(5));
        assert_eq!(slide_handler(&config, &at(5), 6, None), None);
        assert!(can_go_next(&config.infinite(true), 5));
    }

    #[test]
    fn previous_from_first_slide_wraps_to_last_clone() {
        let config = config(6, 1, 1);
        let target = change_slide(&config, &at(0), NavCommand::Previous);
        assert_eq!(target, Some(-1));

        let commit = slide_handler(&config, &at(0), -1, None).unwrap();
        assert_eq!(commit.final_slide, 5);
        assert_eq!(commit.target_offset, 0.0);
        assert_eq!(commit.rest_offset, -600.0);
    }

    #[test]
    fn next_cycles_back_when_pages_divide_evenly() {
        for (count, show, scroll) in [(6, 2, 2), (8, 1, 1), (9, 3, 3), (12, 2, 4)] {
            let config = config(count, show, scroll);
            let mut state = at(0);
            for _ in 0..count / scroll {
                let target = change_slide(&config, &state, NavCommand::Next).unwrap();
                let commit = slide_handler(&config, &state, target, None).unwrap();
                state.current_slide = commit.final_slide;
            }
            assert_eq!(state.current_slide, 0, "{count}/{show}/{scroll}");
        }
    }

    #[test]
    fn previous_then_next_returns_to_start() {
        let config = config(8, 2, 2);
        for start in [2, 4, 6] {
            let back = change_slide(&config, &at(start), NavCommand::Previous).unwrap();
            let forth = change_slide(&config, &at(back), NavCommand::Next).unwrap();
            assert_eq!(forth, start);
        }
    }

    #[test]
    fn direct_commands_skip_current_slide() {
        let config = config(9, 3, 3);
        assert_eq!(change_slide(&config, &at(3), NavCommand::Dot(1)), None);
        assert_eq!(change_slide(&config, &at(3), NavCommand::Dot(2)), Some(6));
        assert_eq!(change_slide(&config, &at(3), NavCommand::Index(3)), None);
        assert_eq!(change_slide(&config, &at(3), NavCommand::Child(1)), None);
        assert_eq!(change_slide(&config, &at(3), NavCommand::Child(2)), Some(6));
        assert_eq!(change_slide(&config, &at(3), NavCommand::Index(5)), Some(5));
    }

    #[test]
    fn invalid_configuration_is_a_no_op() {
        let config = config(6, 1, 1).slides_to_scroll(0usize);
        assert_eq!(change_slide(&config, &at(0), NavCommand::Next), None);
        assert!(navigable_indexes(&config).is_empty());
        assert_eq!(slide_handler(&config, &at(0), 1, None), None);
    }

    #[test]
    fn navigable_indexes_finite_and_infinite() {
        let finite = config(7, 2, 2).infinite(false);
        assert_eq!(navigable_indexes(&finite), vec![0, 2, 4, 6]);

        let infinite = config(4, 2, 2);
        assert_eq!(navigable_indexes(&infinite), vec![-2, 0, 2, 4, 6]);
    }

    #[test]
    fn navigable_stride_is_capped_by_slides_to_show() {
        // scroll > show: entries step by show after the first jump by scroll.
        let config = config(6, 1, 2).infinite(false);
        assert_eq!(navigable_indexes(&config), vec![0, 2, 3, 4, 5]);
    }

    #[test]
    fn check_navigable_clamps_down() {
        let navigables = [-2, 0, 2, 4, 6];
        assert_eq!(check_navigable(3, &navigables), 2);
        assert_eq!(check_navigable(4, &navigables), 4);
        assert_eq!(check_navigable(9, &navigables), 6);
        assert_eq!(check_navigable(-5, &navigables), 0);
        assert_eq!(check_navigable(5, &[]), 5);
    }

    #[test]
    fn arrow_keys_respect_rtl_and_focus() {
        let config = config(4, 1, 1);
        assert_eq!(
            key_command(&config, Key::ArrowLeft, KeyTarget::Track),
            Some(NavCommand::Previous)
        );
        assert_eq!(
            key_command(&config.clone().rtl(true), Key::ArrowLeft, KeyTarget::Track),
            Some(NavCommand::Next)
        );
        assert_eq!(
            key_command(&config, Key::ArrowRight, KeyTarget::FormField),
            None
        );
        assert_eq!(key_command(&config, Key::Other, KeyTarget::Track), None);
        assert_eq!(
            key_command(
                &config.accessibility(false),
                Key::ArrowRight,
                KeyTarget::Track
            ),
            None
        );
    }

    #[test]
    fn slide_handler_rest_positions() {
        let finite = config(10, 3, 3).infinite(false);
        assert_eq!(slide_handler(&finite, &at(0), -3, None).map(|c| c.final_slide), Some(0));

        let uneven = config(10, 3, 3);
        let commit = slide_handler(&uneven, &at(0), -3, None).unwrap();
        assert_eq!(commit.final_slide, 9);
        assert_eq!(commit.target_slide, -3);
        assert_eq!(slide_handler(&uneven, &at(9), 12, None).map(|c| c.final_slide), Some(0));

        let even = config(9, 3, 3);
        assert_eq!(slide_handler(&even, &at(6), 9, None).map(|c| c.final_slide), Some(0));
        assert_eq!(slide_handler(&even, &at(0), -3, None).map(|c| c.final_slide), Some(6));
    }

    #[test]
    fn fade_wraps_or_refuses() {
        let fade = config(4, 1, 1).animation(crate::config::Animation::Fade);
        let commit = slide_handler(&fade, &at(0), -1, None).unwrap();
        assert_eq!(commit.final_slide, 3);
        assert_eq!(commit.target_offset, 0.0);

        let finite = fade.infinite(false);
        assert_eq!(slide_handler(&finite, &at(0), -1, None), None);
        assert_eq!(slide_handler(&finite, &at(0), 2, None).map(|c| c.final_slide), Some(2));
    }
}
