//! Raw per-cycle detections as handed over by the vision system.
//!
//! Nothing in here is team-relative: goal posts are named by the color of
//! the goal they belong to.  A non-positive `distance` means "not seen this
//! frame".

use serde::{Deserialize, Serialize};
use striker_types::VisionId;

/// One landmark detection (goal post or backstop).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Detection {
    /// Range to the landmark (cm).  `<= 0` when not seen.
    pub distance: f32,
    /// Bearing to the landmark (degrees).
    pub bearing: f32,
    /// Blob width in image pixels.
    pub width: f32,
    /// Blob height in image pixels.
    pub height: f32,
}

impl Detection {
    pub const NOT_SEEN: Detection = Detection {
        distance: 0.0,
        bearing: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Convenience constructor for a seen landmark with unknown blob size.
    pub fn at(distance: f32, bearing: f32) -> Self {
        Self {
            distance,
            bearing,
            ..Self::NOT_SEEN
        }
    }

    pub fn is_seen(&self) -> bool {
        self.distance > 0.0
    }
}

/// Ball detection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BallDetection {
    pub distance: f32,
    pub bearing: f32,
    pub seen: bool,
}

impl BallDetection {
    pub const NOT_SEEN: BallDetection = BallDetection {
        distance: 0.0,
        bearing: 0.0,
        seen: false,
    };

    pub fn at(distance: f32, bearing: f32) -> Self {
        Self {
            distance,
            bearing,
            seen: true,
        }
    }
}

/// A field-line intersection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisionCorner {
    pub distance: f32,
    pub bearing: f32,
    /// Robot-relative position on the ground plane (cm).
    pub x: f32,
    pub y: f32,
}

/// A field-line segment in robot-relative ground coordinates (cm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisionLine {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

/// Corner and line buffers from the line detector.
///
/// The buffers may hold stale entries past the reported counts; only the
/// first `num_corners` / `num_lines` entries are valid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldLines {
    pub corners: Vec<VisionCorner>,
    pub num_corners: usize,
    pub lines: Vec<VisionLine>,
    pub num_lines: usize,
}

impl FieldLines {
    /// Valid corners: the first `min(num_corners, capacity)` entries.
    pub fn reported_corners(&self) -> &[VisionCorner] {
        let n = self.num_corners.min(self.corners.len());
        &self.corners[..n]
    }

    /// Valid lines: the first `min(num_lines, capacity)` entries.
    pub fn reported_lines(&self) -> &[VisionLine] {
        let n = self.num_lines.min(self.lines.len());
        &self.lines[..n]
    }
}

/// Everything vision reported for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionFrame {
    /// Indexed by [`VisionId::index`].
    landmarks: [Detection; 6],
    pub ball: BallDetection,
    pub field_lines: FieldLines,
}

impl Default for VisionFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl VisionFrame {
    /// A frame in which nothing was seen.
    pub fn empty() -> Self {
        Self {
            landmarks: [Detection::NOT_SEEN; 6],
            ball: BallDetection::NOT_SEEN,
            field_lines: FieldLines::default(),
        }
    }

    pub fn detection(&self, id: VisionId) -> &Detection {
        &self.landmarks[id.index()]
    }

    pub fn set_detection(&mut self, id: VisionId, detection: Detection) {
        self.landmarks[id.index()] = detection;
    }

    pub fn with_landmark(mut self, id: VisionId, detection: Detection) -> Self {
        self.set_detection(id, detection);
        self
    }

    pub fn with_ball(mut self, ball: BallDetection) -> Self {
        self.ball = ball;
        self
    }

    pub fn with_corners(mut self, corners: Vec<VisionCorner>, num_corners: usize) -> Self {
        self.field_lines.corners = corners;
        self.field_lines.num_corners = num_corners;
        self
    }

    pub fn with_lines(mut self, lines: Vec<VisionLine>, num_lines: usize) -> Self {
        self.field_lines.lines = lines;
        self.field_lines.num_lines = num_lines;
        self
    }
}
