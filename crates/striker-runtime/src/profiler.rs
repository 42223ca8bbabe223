//! [`CycleProfiler`] – per-stage timing over a window of cycles.
//!
//! Stage times are [`record`][CycleProfiler::record]ed during a cycle and
//! folded into running sums by [`next_frame`][CycleProfiler::next_frame]
//! at the end of it.  [`profile_frames`][CycleProfiler::profile_frames]
//! only arms the profiler; measurement starts at the next frame boundary,
//! so arming mid-cycle never produces a partial first frame.
//!
//! When the requested number of frames is in, profiling switches itself
//! off and the summary is logged at `info` level.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use striker_runtime::profiler::{CycleProfiler, Stage};
//!
//! let mut p = CycleProfiler::new();
//! p.profile_frames(Some(2));
//! assert!(p.next_frame()); // boundary: profiling starts
//!
//! p.record(Stage::Cycle, Duration::from_micros(400));
//! assert!(p.next_frame());
//! p.record(Stage::Cycle, Duration::from_micros(600));
//! assert!(!p.next_frame()); // second frame done, summary logged
//!
//! assert_eq!(p.frames_profiled(), 2);
//! ```

use std::time::Duration;

use tracing::info;

// ─────────────────────────────────────────────────────────────────────────────
// Stages
// ─────────────────────────────────────────────────────────────────────────────

/// Timed section of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The whole cycle.  Parent of every other stage.
    Cycle,
    Refresh,
    Correct,
    Snapshot,
    Broadcast,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Cycle,
        Stage::Refresh,
        Stage::Correct,
        Stage::Snapshot,
        Stage::Broadcast,
    ];

    pub fn parent(self) -> Option<Stage> {
        match self {
            Stage::Cycle => None,
            _ => Some(Stage::Cycle),
        }
    }

    /// Distance from the root of the stage tree.
    pub fn depth(self) -> usize {
        let mut depth = 0;
        let mut stage = self;
        while let Some(parent) = stage.parent() {
            depth += 1;
            stage = parent;
        }
        depth
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Cycle => "cycle",
            Stage::Refresh => "refresh",
            Stage::Correct => "correct",
            Stage::Snapshot => "snapshot",
            Stage::Broadcast => "broadcast",
        }
    }
}

/// One line of the profiling summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSummary {
    pub stage: Stage,
    pub depth: usize,
    pub total: Duration,
    pub average: Duration,
    /// Share of the parent stage's total, in percent.  100 for the root and
    /// for stages whose parent recorded nothing; 0 when the stage itself
    /// recorded nothing.
    pub percent_of_parent: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// CycleProfiler
// ─────────────────────────────────────────────────────────────────────────────

const STAGES: usize = Stage::ALL.len();

#[derive(Debug, Clone, Default)]
pub struct CycleProfiler {
    profiling: bool,
    start_next_frame: bool,
    /// `None` profiles until told otherwise.
    frame_limit: Option<u32>,
    frames: u32,
    current: [Duration; STAGES],
    totals: [Duration; STAGES],
}

impl CycleProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm profiling for `frames` cycles (`None` = forever), starting at the
    /// next frame boundary.  `Some(0)` disarms.
    pub fn profile_frames(&mut self, frames: Option<u32>) {
        if frames == Some(0) {
            self.profiling = false;
            self.start_next_frame = false;
            return;
        }
        self.frame_limit = frames;
        self.start_next_frame = true;
    }

    /// Add `elapsed` to `stage` for the current frame.
    pub fn record(&mut self, stage: Stage, elapsed: Duration) {
        self.current[stage.index()] += elapsed;
    }

    /// Close the current frame.  Returns whether profiling is active for
    /// the frame that starts now.
    pub fn next_frame(&mut self) -> bool {
        if self.start_next_frame {
            self.start_next_frame = false;
            self.profiling = true;
            self.frames = 0;
            self.totals = [Duration::ZERO; STAGES];
            self.current = [Duration::ZERO; STAGES];
            return true;
        }

        if !self.profiling {
            self.current = [Duration::ZERO; STAGES];
            return false;
        }

        for (total, current) in self.totals.iter_mut().zip(self.current.iter_mut()) {
            *total += std::mem::take(current);
        }
        self.frames += 1;

        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            self.profiling = false;
            self.log_summary();
            return false;
        }
        true
    }

    pub fn is_profiling(&self) -> bool {
        self.profiling
    }

    /// Frames folded into the current (or last) window.
    pub fn frames_profiled(&self) -> u32 {
        self.frames
    }

    pub fn total(&self, stage: Stage) -> Duration {
        self.totals[stage.index()]
    }

    pub fn summary(&self) -> Vec<StageSummary> {
        Stage::ALL
            .into_iter()
            .map(|stage| {
                let total = self.total(stage);
                let parent_total = self.total(stage.parent().unwrap_or(stage));
                let percent_of_parent = if total.is_zero() {
                    0.0
                } else if parent_total.is_zero() {
                    100.0
                } else {
                    total.as_secs_f64() / parent_total.as_secs_f64() * 100.0
                };
                let average = if self.frames == 0 {
                    Duration::ZERO
                } else {
                    total / self.frames
                };
                StageSummary {
                    stage,
                    depth: stage.depth(),
                    total,
                    average,
                    percent_of_parent,
                }
            })
            .collect()
    }

    fn log_summary(&self) {
        info!(frames = self.frames, "profiler summary");
        for line in self.summary() {
            info!(
                stage = line.stage.name(),
                depth = line.depth,
                total_us = line.total.as_micros() as u64,
                avg_us = line.average.as_micros() as u64,
                percent = (line.percent_of_parent * 100.0).round() / 100.0,
                "profiled stage"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us(n: u64) -> Duration {
        Duration::from_micros(n)
    }

    #[test]
    fn idle_profiler_discards_records() {
        let mut p = CycleProfiler::new();
        p.record(Stage::Refresh, us(100));
        assert!(!p.next_frame());
        assert_eq!(p.total(Stage::Refresh), Duration::ZERO);
    }

    #[test]
    fn arming_mid_frame_ignores_that_frame() {
        let mut p = CycleProfiler::new();
        p.record(Stage::Cycle, us(999));
        p.profile_frames(Some(1));
        assert!(p.next_frame());
        assert!(p.is_profiling());

        p.record(Stage::Cycle, us(10));
        assert!(!p.next_frame());
        assert_eq!(p.total(Stage::Cycle), us(10));
    }

    #[test]
    fn stops_after_requested_frames() {
        let mut p = CycleProfiler::new();
        p.profile_frames(Some(3));
        p.next_frame();
        let active: Vec<bool> = (0..5)
            .map(|_| {
                p.record(Stage::Cycle, us(1));
                p.next_frame()
            })
            .collect();
        assert_eq!(active, vec![true, true, false, false, false]);
        assert_eq!(p.frames_profiled(), 3);
        assert_eq!(p.total(Stage::Cycle), us(3));
    }

    #[test]
    fn unlimited_profiling_keeps_going() {
        let mut p = CycleProfiler::new();
        p.profile_frames(None);
        p.next_frame();
        for _ in 0..100 {
            p.record(Stage::Correct, us(2));
            assert!(p.next_frame());
        }
        assert_eq!(p.total(Stage::Correct), us(200));
    }

    #[test]
    fn zero_frames_disarms() {
        let mut p = CycleProfiler::new();
        p.profile_frames(None);
        p.next_frame();
        p.profile_frames(Some(0));
        assert!(!p.is_profiling());
        assert!(!p.next_frame());
    }

    #[test]
    fn summary_percentages_and_averages() {
        let mut p = CycleProfiler::new();
        p.profile_frames(Some(2));
        p.next_frame();
        for _ in 0..2 {
            p.record(Stage::Cycle, us(100));
            p.record(Stage::Refresh, us(25));
            p.record(Stage::Correct, us(50));
            p.next_frame();
        }

        let summary = p.summary();
        let get = |s: Stage| summary.iter().find(|l| l.stage == s).copied().unwrap();

        let cycle = get(Stage::Cycle);
        assert_eq!(cycle.depth, 0);
        assert_eq!(cycle.total, us(200));
        assert_eq!(cycle.average, us(100));
        assert!((cycle.percent_of_parent - 100.0).abs() < 1e-9);

        let refresh = get(Stage::Refresh);
        assert_eq!(refresh.depth, 1);
        assert!((refresh.percent_of_parent - 25.0).abs() < 1e-9);
        assert!((get(Stage::Correct).percent_of_parent - 50.0).abs() < 1e-9);
        assert_eq!(get(Stage::Broadcast).percent_of_parent, 0.0);
    }

    #[test]
    fn child_of_empty_parent_is_full_share() {
        let mut p = CycleProfiler::new();
        p.profile_frames(Some(1));
        p.next_frame();
        p.record(Stage::Snapshot, us(5));
        p.next_frame();
        let snap = p
            .summary()
            .into_iter()
            .find(|l| l.stage == Stage::Snapshot)
            .unwrap();
        assert_eq!(snap.percent_of_parent, 100.0);
    }
}
