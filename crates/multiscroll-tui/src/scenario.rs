//! Scripted runs against the simulated host.
//!
//! A scenario declares a set of lists and a sequence of steps. After every
//! step the host runs one frame: pending layouts, then notification delivery.
//!
//! ```toml
//! name = "late joiner"
//!
//! [sync]
//! orientation = "horizontal"
//! cell_sizer = { kind = "fixed", size = 50 }
//!
//! [[list]]
//! items = 40
//! item_size = 50
//! viewport = 200
//!
//! [[step]]
//! op = "add"
//! list = 0
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use multiscroll_core::sync::{Anchor, MultiScroller, ScrollState, TouchAction};
use multiscroll_core::{Error, FlingConfig, Result, SyncConfig};

use crate::host::{HostStats, ListId, SimHost, SimList};

/// Upper bound on frames a `settle` step may run
const MAX_SETTLE_FRAMES: u32 = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub fling: FlingConfig,
    /// Frame length used by `tick` and `settle`
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default, rename = "list")]
    pub lists: Vec<ListSpec>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One list, either with explicit item sizes or `items` of `item_size`
#[derive(Debug, Clone, Deserialize)]
pub struct ListSpec {
    #[serde(default)]
    pub sizes: Vec<u32>,
    #[serde(default)]
    pub items: usize,
    #[serde(default)]
    pub item_size: u32,
    pub viewport: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Add one list to the group
    Add { list: usize },
    /// Add every declared list in order
    AddAll,
    /// Force a layout pass on one list, or on all of them
    Layout {
        #[serde(default)]
        list: Option<usize>,
    },
    Drag { list: usize, delta: i32 },
    /// Let go, optionally with a fling velocity in px/s
    Release {
        list: usize,
        #[serde(default)]
        velocity: f64,
    },
    Tick {
        #[serde(default = "default_frames")]
        frames: u32,
    },
    /// Tick until no list is flinging
    Settle,
    Touch {
        list: usize,
        #[serde(default = "default_touch")]
        action: TouchAction,
    },
    Detach { list: usize },
    Attach { list: usize },
    Resize { list: usize, viewport: u32 },
    Clear,
}

fn default_frame_ms() -> u64 {
    16
}

fn default_frames() -> u32 {
    1
}

fn default_touch() -> TouchAction {
    TouchAction::Down
}

impl ListSpec {
    fn build(&self) -> Result<SimList> {
        if !self.sizes.is_empty() {
            return Ok(SimList::new(self.sizes.clone(), self.viewport));
        }
        if self.items > 0 && self.item_size > 0 {
            return Ok(SimList::uniform(self.items, self.item_size, self.viewport));
        }
        Err(Error::Scenario(
            "list needs `sizes` or both `items` and `item_size`".to_string(),
        ))
    }
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Scenario(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

/// Final state of one list
#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub id: ListId,
    pub included: bool,
    pub attached: bool,
    pub state: ScrollState,
    pub offset: i64,
    pub anchor: Anchor,
    /// Shows the group displacement, clamped to the list's scroll range
    pub in_sync: bool,
}

/// Final state of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub name: Option<String>,
    pub displacement: i64,
    pub active_driver: Option<ListId>,
    /// Unset when the group's anchor cannot be resolved
    pub anchor: Option<Anchor>,
    pub lists: Vec<ListReport>,
    pub stats: HostStats,
}

impl Report {
    fn capture(name: Option<String>, host: &SimHost, scroller: &MultiScroller<ListId>) -> Self {
        let displacement = scroller.displacement();
        let lists = host
            .ids()
            .filter_map(|id| host.list(id).map(|list| (id, list)))
            .map(|(id, list)| ListReport {
                id,
                included: scroller.is_included(id),
                attached: list.is_attached(),
                state: list.state(),
                offset: list.offset(),
                anchor: list.anchor(),
                in_sync: list.offset() == displacement.clamp(0, list.max_offset()),
            })
            .collect();

        Self {
            name,
            displacement,
            active_driver: scroller.active_driver(),
            anchor: scroller.anchor().ok(),
            lists,
            stats: host.stats(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every included list shows the group displacement
    pub fn in_sync(&self) -> bool {
        self.lists
            .iter()
            .filter(|list| list.included)
            .all(|list| list.in_sync)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "scenario:     {}", name)?;
        }
        writeln!(f, "displacement: {}", self.displacement)?;
        match self.active_driver {
            Some(id) => writeln!(f, "driver:       {}", id)?,
            None => writeln!(f, "driver:       -")?,
        }
        match self.anchor {
            Some(anchor) => writeln!(f, "anchor:       item {} +{}px", anchor.position, anchor.offset)?,
            None => writeln!(f, "anchor:       unresolved")?,
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<6}{:<10}{:<10}{:<10}{:>8}  {:<12}{}",
            "list", "included", "attached", "state", "offset", "anchor", "sync"
        )?;
        for list in &self.lists {
            writeln!(
                f,
                "{:<6}{:<10}{:<10}{:<10}{:>8}  {:<12}{}",
                list.id.to_string(),
                yes_no(list.included),
                yes_no(list.attached),
                format!("{:?}", list.state).to_lowercase(),
                list.offset,
                format!("{}+{}", list.anchor.position, list.anchor.offset),
                if !list.included {
                    "-"
                } else if list.in_sync {
                    "ok"
                } else {
                    "DRIFT"
                }
            )?;
        }
        writeln!(f)?;
        write!(
            f,
            "scroll_by: {}  stop: {}  align: {}  delivered: {}  unobserved: {}",
            self.stats.scroll_by_calls,
            self.stats.stop_calls,
            self.stats.alignments,
            self.stats.delivered,
            self.stats.unobserved
        )
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

struct Runner<'a> {
    scenario: &'a Scenario,
    host: SimHost,
    scroller: MultiScroller<ListId>,
    ids: Vec<ListId>,
}

impl<'a> Runner<'a> {
    fn new(scenario: &'a Scenario) -> Result<Self> {
        let mut host = SimHost::new(scenario.sync.orientation, scenario.fling.clone());
        let ids = scenario
            .lists
            .iter()
            .map(|spec| spec.build().map(|list| host.push(list)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scenario,
            host,
            scroller: MultiScroller::from_config(&scenario.sync),
            ids,
        })
    }

    fn id(&self, index: usize, list: usize) -> Result<ListId> {
        self.ids.get(list).copied().ok_or_else(|| {
            Error::Scenario(format!(
                "step {}: list {} not declared ({} lists)",
                index + 1,
                list,
                self.ids.len()
            ))
        })
    }

    fn frame(&mut self) {
        self.host.layout_pending();
        self.host.dispatch(&mut self.scroller);
    }

    fn step(&mut self, index: usize, step: &Step) -> Result<()> {
        tracing::debug!(step = index + 1, ?step, "Running scenario step");
        match step {
            Step::Add { list } => {
                let id = self.id(index, *list)?;
                self.scroller.add(&mut self.host, id);
            }
            Step::AddAll => {
                for id in self.ids.clone() {
                    self.scroller.add(&mut self.host, id);
                }
            }
            Step::Layout { list } => {
                let targets = match list {
                    Some(list) => vec![self.id(index, *list)?],
                    None => self.ids.clone(),
                };
                for id in targets {
                    self.host.layout(id);
                }
            }
            Step::Drag { list, delta } => {
                let id = self.id(index, *list)?;
                self.host.drag(id, *delta);
            }
            Step::Release { list, velocity } => {
                let id = self.id(index, *list)?;
                self.host.release(id, *velocity);
            }
            Step::Tick { frames } => {
                let frame = self.scenario.frame();
                for _ in 0..*frames {
                    self.host.tick(frame);
                    self.frame();
                }
            }
            Step::Settle => {
                let frame = self.scenario.frame();
                let mut frames = 0;
                while self.host.is_flinging() {
                    if frames == MAX_SETTLE_FRAMES {
                        return Err(Error::Scenario(format!(
                            "step {}: still flinging after {} frames",
                            index + 1,
                            frames
                        )));
                    }
                    self.host.tick(frame);
                    self.frame();
                    frames += 1;
                }
            }
            Step::Touch { list, action } => {
                let id = self.id(index, *list)?;
                self.host.touch(id, *action);
            }
            Step::Detach { list } => {
                let id = self.id(index, *list)?;
                self.host.detach(id);
            }
            Step::Attach { list } => {
                let id = self.id(index, *list)?;
                self.host.attach(id);
            }
            Step::Resize { list, viewport } => {
                let id = self.id(index, *list)?;
                self.host.set_viewport(id, *viewport);
            }
            Step::Clear => self.scroller.clear(&mut self.host),
        }

        self.frame();
        Ok(())
    }
}

/// Replay `scenario` and report where every list ended up
pub fn run(scenario: &Scenario) -> Result<Report> {
    let mut runner = Runner::new(scenario)?;
    for (index, step) in scenario.steps.iter().enumerate() {
        runner.step(index, step)?;
    }

    let report = Report::capture(scenario.name.clone(), &runner.host, &runner.scroller);
    tracing::info!(
        displacement = report.displacement,
        in_sync = report.in_sync(),
        "Scenario finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LATE_JOINER: &str = r#"
name = "late joiner"

[sync]
cell_sizer = { kind = "fixed", size = 50 }

[fling]
duration_ms = 320
easing = "linear"

[[list]]
items = 40
item_size = 50
viewport = 200

[[list]]
items = 40
item_size = 50
viewport = 200

[[list]]
sizes = [50, 50, 50, 50, 50, 50, 50, 50]
viewport = 100

[[step]]
op = "add"
list = 0

[[step]]
op = "add"
list = 1

[[step]]
op = "drag"
list = 0
delta = 100

[[step]]
op = "release"
list = 0
velocity = 125.0

[[step]]
op = "settle"

[[step]]
op = "add"
list = 2
"#;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_toml(LATE_JOINER).unwrap();
        assert_eq!(scenario.name.as_deref(), Some("late joiner"));
        assert_eq!(scenario.lists.len(), 3);
        assert_eq!(scenario.steps[0], Step::Add { list: 0 });
        assert_eq!(
            scenario.steps[3],
            Step::Release {
                list: 0,
                velocity: 125.0
            }
        );
        assert_eq!(scenario.steps[4], Step::Settle);
    }

    #[test]
    fn test_late_joiner_report() {
        let scenario = Scenario::from_toml(LATE_JOINER).unwrap();
        let report = run(&scenario).unwrap();

        // 100 dragged + 125 * 0.32 / 2 flung
        assert_eq!(report.displacement, 120);
        assert_eq!(report.active_driver, None);
        assert_eq!(
            report.anchor,
            Some(Anchor {
                position: 2,
                offset: 20
            })
        );
        assert!(report.in_sync());
        assert_eq!(report.lists[2].offset, 120);
        assert!(report.lists.iter().all(|list| list.included));
        // One broadcast for the drag, one per fling frame
        assert_eq!(report.stats.scroll_by_calls, 21);

        let text = report.to_string();
        assert!(text.contains("displacement: 120"));
        assert!(text.contains("item 2 +20px"));
        assert!(!text.contains("DRIFT"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"displacement\": 120"));
    }

    #[test]
    fn test_touch_and_clear_steps() {
        let scenario = Scenario::from_toml(
            r#"
[sync]
cell_sizer = { kind = "fixed", size = 50 }

[[list]]
items = 40
item_size = 50
viewport = 200

[[list]]
items = 40
item_size = 50
viewport = 200

[[step]]
op = "add_all"

[[step]]
op = "drag"
list = 0
delta = 10

[[step]]
op = "release"
list = 0
velocity = 2000.0

[[step]]
op = "tick"
frames = 2

[[step]]
op = "touch"
list = 1

[[step]]
op = "clear"

[[step]]
op = "drag"
list = 1
delta = 30
"#,
        )
        .unwrap();
        let report = run(&scenario).unwrap();

        assert_eq!(report.stats.stop_calls, 1);
        assert!(report.lists.iter().all(|list| !list.included));
        assert_eq!(report.lists[0].state, ScrollState::Idle);
        assert_eq!(report.lists[1].offset, report.lists[0].offset + 30);
    }

    #[test]
    fn test_demo_scenarios_stay_in_sync() {
        for demo in [
            include_str!("../../../demos/late_joiner.toml"),
            include_str!("../../../demos/touch_takeover.toml"),
        ] {
            let scenario = Scenario::from_toml(demo).unwrap();
            let report = run(&scenario).unwrap();
            assert!(report.in_sync(), "{}", report);
            assert!(report.lists.iter().all(|list| list.included), "{}", report);
        }
    }

    #[test]
    fn test_unknown_list_is_an_error() {
        let scenario = Scenario::from_toml(
            r#"
[[list]]
items = 4
item_size = 10
viewport = 20

[[step]]
op = "drag"
list = 3
delta = 5
"#,
        )
        .unwrap();

        let err = run(&scenario).unwrap_err();
        assert!(err.to_string().contains("list 3 not declared"));
    }

    #[test]
    fn test_list_without_sizes_is_an_error() {
        let scenario = Scenario::from_toml(
            r#"
[[list]]
viewport = 20
"#,
        )
        .unwrap();
        assert!(matches!(run(&scenario), Err(Error::Scenario(_))));
    }

    #[test]
    fn test_unknown_op_fails_to_parse() {
        let result = Scenario::from_toml(
            r#"
[[step]]
op = "teleport"
"#,
        );
        assert!(matches!(result, Err(Error::Scenario(_))));
    }
}
