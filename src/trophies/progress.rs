//! Point total to unlocked borders and rocket position.

use super::book::TrophyBook;
use super::types::{clamp_points, Milestone, ProgressDescriptor};

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

impl TrophyBook {
    /// Keys of every tier whose threshold is at or below `points`, in unlock order.
    pub fn unlocked_tiers(&self, points: i64) -> Vec<&str> {
        let points = clamp_points(points);
        let unlocked = self.tiers().partition_point(|t| t.min_points <= points);
        self.tiers()[..unlocked]
            .iter()
            .map(|t| &*t.key)
            .collect()
    }

    /// Locate `points` on the milestone path.
    ///
    /// The segment runs from the last milestone reached (0 if none) to the
    /// next one. Past the final milestone the segment degenerates to
    /// `[last, last + 1]`.
    pub fn compute_progress(&self, points: i64) -> ProgressDescriptor {
        let points = clamp_points(points);
        let milestones = self.milestones();

        let reached = milestones.partition_point(|m| m.points <= points);
        let segment_start = match reached {
            0 => 0,
            n => milestones[n - 1].points,
        };
        let segment_end = milestones
            .get(reached)
            .map_or(segment_start.saturating_add(1), |m| m.points);

        let span = segment_end.saturating_sub(segment_start).max(1);
        let segment_progress = clamp01((points - segment_start) as f64 / span as f64);
        let absolute = clamp01(points as f64 / self.max_points() as f64);

        ProgressDescriptor {
            segment_start,
            segment_end,
            segment_progress,
            absolute,
        }
    }

    /// The next milestone strictly above `points`, if any remain.
    pub fn next_milestone(&self, points: i64) -> Option<&Milestone> {
        let points = clamp_points(points);
        let reached = self.milestones().partition_point(|m| m.points <= points);
        self.milestones().get(reached)
    }
}
