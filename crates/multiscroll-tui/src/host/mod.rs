//! Headless list toolkit used by the demo and the scenario runner
//!
//! - `list` - [`SimList`], a viewport over items of known sizes
//! - `sim` - [`SimHost`], the toolkit: owns lists, queues and dispatches
//!   notifications, implements [`ListHost`](multiscroll_core::ListHost)

pub mod list;
pub mod sim;

pub use list::SimList;
pub use sim::{HostEvent, HostStats, ListId, SimHost};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use multiscroll_core::sync::{
        Anchor, CellSizer, Listener, MultiScroller, Orientation, ScrollState, TouchAction,
    };
    use multiscroll_core::{EasingType, FlingConfig};

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    struct Fixture {
        host: SimHost,
        scroller: MultiScroller<ListId>,
        ids: Vec<ListId>,
    }

    impl Fixture {
        fn uniform(count: usize) -> Self {
            let fling = FlingConfig {
                duration_ms: 320,
                easing: EasingType::Linear,
                ..Default::default()
            };
            let mut host = SimHost::new(Orientation::Horizontal, fling);
            let ids = (0..count)
                .map(|_| host.push(SimList::uniform(40, 50, 200)))
                .collect();
            let scroller = MultiScroller::new(Orientation::Horizontal, CellSizer::fixed(50));
            Self {
                host,
                scroller,
                ids,
            }
        }

        fn pump(&mut self) {
            self.host.layout_pending();
            self.host.dispatch(&mut self.scroller);
        }

        fn join_all(&mut self) {
            for id in self.ids.clone() {
                self.scroller.add(&mut self.host, id);
            }
            self.pump();
        }

        fn offset(&self, id: ListId) -> i64 {
            self.host.list(id).map(SimList::offset).unwrap_or(-1)
        }

        fn settle(&mut self) {
            while self.host.is_flinging() {
                self.host.tick(FRAME);
                self.pump();
            }
        }
    }

    #[test]
    fn test_drag_moves_group_pixel_for_pixel() {
        let mut fixture = Fixture::uniform(3);
        fixture.join_all();
        let [a, b, c] = [fixture.ids[0], fixture.ids[1], fixture.ids[2]];

        fixture.host.drag(a, 120);
        fixture.pump();

        assert_eq!(fixture.offset(a), 120);
        assert_eq!(fixture.offset(b), 120);
        assert_eq!(fixture.offset(c), 120);
        assert_eq!(fixture.scroller.displacement(), 120);
        assert_eq!(fixture.scroller.active_driver(), Some(a));
        // One broadcast per follower, echoes dropped
        assert_eq!(fixture.host.stats().scroll_by_calls, 2);
    }

    #[test]
    fn test_echoes_do_not_feed_back_after_release() {
        let mut fixture = Fixture::uniform(2);
        fixture.join_all();
        let [a, b] = [fixture.ids[0], fixture.ids[1]];

        fixture.host.drag(a, 30);
        fixture.host.drag(a, 30);
        fixture.host.release(a, 0.0);
        fixture.pump();

        assert_eq!(fixture.scroller.active_driver(), None);
        assert_eq!(fixture.offset(a), 60);
        assert_eq!(fixture.offset(b), 60);
        assert_eq!(fixture.scroller.displacement(), 60);
        assert_eq!(fixture.host.stats().scroll_by_calls, 2);
    }

    #[test]
    fn test_fling_keeps_followers_in_step() {
        let mut fixture = Fixture::uniform(3);
        fixture.join_all();
        let a = fixture.ids[0];

        fixture.host.drag(a, 10);
        fixture.host.release(a, 1000.0);
        fixture.pump();
        assert_eq!(fixture.host.list(a).map(SimList::state), Some(ScrollState::Settling));

        while fixture.host.is_flinging() {
            fixture.host.tick(FRAME);
            fixture.pump();
            for id in &fixture.ids {
                assert_eq!(fixture.offset(*id), fixture.offset(a));
            }
        }

        assert_eq!(fixture.offset(a), 170);
        assert_eq!(fixture.scroller.displacement(), 170);
        assert_eq!(fixture.scroller.active_driver(), None);
    }

    #[test]
    fn test_late_joiner_is_aligned_without_scrolling_the_group() {
        let mut fixture = Fixture::uniform(3);
        fixture.join_all();
        fixture.host.drag(fixture.ids[0], 120);
        fixture.host.release(fixture.ids[0], 0.0);
        fixture.pump();
        let broadcasts = fixture.host.stats().scroll_by_calls;

        let late = fixture.host.push(SimList::uniform(40, 50, 200));
        fixture.scroller.add(&mut fixture.host, late);
        fixture.pump();

        assert!(fixture.scroller.is_included(late));
        assert_eq!(fixture.offset(late), 120);
        assert_eq!(
            fixture.host.list(late).map(SimList::anchor),
            Some(Anchor {
                position: 2,
                offset: 20
            })
        );
        assert_eq!(fixture.host.stats().scroll_by_calls, broadcasts);
        assert_eq!(fixture.scroller.displacement(), 120);
    }

    #[test]
    fn test_touch_takes_over_mid_fling() {
        let mut fixture = Fixture::uniform(2);
        fixture.join_all();
        let [a, b] = [fixture.ids[0], fixture.ids[1]];

        fixture.host.drag(a, 10);
        fixture.host.release(a, 2000.0);
        fixture.pump();
        fixture.host.tick(FRAME);
        fixture.pump();
        assert!(fixture.host.is_flinging());

        fixture.host.touch(b, TouchAction::Down);
        fixture.pump();

        assert!(!fixture.host.is_flinging());
        assert_eq!(fixture.host.stats().stop_calls, 1);
        assert_eq!(fixture.scroller.active_driver(), None);

        let before = fixture.offset(a);
        fixture.host.drag(b, -25);
        fixture.pump();
        assert_eq!(fixture.scroller.active_driver(), Some(b));
        assert_eq!(fixture.offset(a), before - 25);
        assert_eq!(fixture.offset(b), before - 25);
    }

    #[test]
    fn test_detach_and_reattach() {
        let mut fixture = Fixture::uniform(2);
        fixture.join_all();
        let [a, b] = [fixture.ids[0], fixture.ids[1]];

        fixture.host.detach(b);
        fixture.pump();
        assert!(!fixture.scroller.is_included(b));

        fixture.host.drag(a, 75);
        fixture.host.release(a, 0.0);
        fixture.pump();
        assert_eq!(fixture.offset(b), 0);

        fixture.host.attach(b);
        fixture.pump();
        assert!(fixture.scroller.is_included(b));
        assert_eq!(fixture.offset(b), 75);
    }

    #[test]
    fn test_clear_mid_fling_stops_relaying() {
        let mut fixture = Fixture::uniform(2);
        fixture.join_all();
        let [a, b] = [fixture.ids[0], fixture.ids[1]];

        fixture.host.drag(a, 10);
        fixture.host.release(a, 1000.0);
        fixture.pump();

        fixture.scroller.clear(&mut fixture.host);
        assert!(!fixture.host.has_listener(a, Listener::Scroll));
        let followed = fixture.offset(b);

        fixture.settle();

        assert_eq!(fixture.offset(b), followed);
        assert!(fixture.offset(a) > followed);
        assert_eq!(fixture.scroller.displacement(), 10);
    }

    #[test]
    fn test_dynamic_sizes_align_late_joiner() {
        let sizes = vec![30, 70, 40, 55, 20, 65, 35, 50, 45, 60];
        let mut host = SimHost::new(Orientation::Horizontal, FlingConfig::default());
        let a = host.push(SimList::new(sizes.clone(), 100));
        let mut scroller = MultiScroller::with_orientation(Orientation::Horizontal);
        scroller.add(&mut host, a);
        host.layout_pending();
        host.dispatch(&mut scroller);

        // Two steps so every item passed on the way gets rendered and measured
        host.drag(a, 80);
        host.drag(a, 70);
        host.release(a, 0.0);
        host.dispatch(&mut scroller);

        let late = host.push(SimList::new(sizes, 100));
        scroller.add(&mut host, late);
        host.layout_pending();
        host.dispatch(&mut scroller);

        assert_eq!(host.list(late).map(SimList::offset), Some(150));
        assert_eq!(
            scroller.anchor(),
            Ok(Anchor {
                position: 3,
                offset: 10
            })
        );
    }
}
