//! Tracked landmark and ball records.
//!
//! [`WorldModel`] owns one [`FieldObject`] per raw landmark, the [`Ball`],
//! and the per-cycle corner and line lists.  [`WorldModel::refresh`] copies
//! the latest [`VisionFrame`] into them; it must run before any correction
//! is fed to the filter in the same cycle.
//!
//! Refreshing is a pure overwrite.  Nothing is smoothed and nothing from a
//! previous frame survives except the ball posterior written back by the
//! snapshot step.

use striker_types::{BackstopRole, BallEstimate, LandmarkRole, StrikerError, TeamColor, VisionId};
use tracing::{debug, trace};

use crate::detection::{BallDetection, Detection, VisionCorner, VisionFrame, VisionLine};
use crate::geometry::landmark_position;
use crate::landmarks::{LandmarkBindings, LandmarkMapper};

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

/// One trackable landmark (goal post or backstop).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldObject {
    vision_id: VisionId,
    /// Range from the last refresh.  `<= 0` when not seen this cycle.
    pub distance: f32,
    pub bearing: f32,
    pub width: f32,
    pub height: f32,
    /// Known global field position of the landmark.
    x: f32,
    y: f32,
    role: Option<LandmarkRole>,
    backstop_role: Option<BackstopRole>,
}

impl FieldObject {
    pub fn new(vision_id: VisionId) -> Self {
        let (x, y) = landmark_position(vision_id);
        Self {
            vision_id,
            distance: 0.0,
            bearing: 0.0,
            width: 0.0,
            height: 0.0,
            x,
            y,
            role: None,
            backstop_role: None,
        }
    }

    pub fn vision_id(&self) -> VisionId {
        self.vision_id
    }

    /// Team-relative role, once a team color has been bound.  Backstops
    /// never hold a post role.
    pub fn role(&self) -> Option<LandmarkRole> {
        self.role
    }

    pub fn backstop_role(&self) -> Option<BackstopRole> {
        self.backstop_role
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn is_seen(&self) -> bool {
        self.distance > 0.0
    }

    fn update_vision(&mut self, detection: &Detection) {
        self.distance = detection.distance;
        self.bearing = detection.bearing;
        self.width = detection.width;
        self.height = detection.height;
    }
}

/// The ball: this cycle's raw detection plus the filter's posterior.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ball {
    pub distance: f32,
    pub bearing: f32,
    pub seen: bool,
    /// Last posterior read back from the filter.  Not touched by
    /// [`WorldModel::refresh`].
    pub estimate: BallEstimate,
}

impl Ball {
    fn update_vision(&mut self, detection: &BallDetection) {
        self.distance = detection.distance;
        self.bearing = detection.bearing;
        self.seen = detection.seen;
    }

    /// Overwrite the posterior.  Called by the snapshot step only.
    pub fn update_estimate(&mut self, estimate: BallEstimate) {
        self.estimate = estimate;
    }
}

/// A field-line corner seen this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub distance: f32,
    pub bearing: f32,
    pub x: f32,
    pub y: f32,
}

impl From<&VisionCorner> for Corner {
    fn from(c: &VisionCorner) -> Self {
        Self {
            distance: c.distance,
            bearing: c.bearing,
            x: c.x,
            y: c.y,
        }
    }
}

/// A field-line segment seen this cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: (f32, f32),
    pub end: (f32, f32),
}

impl Line {
    pub fn length(&self) -> f32 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<&VisionLine> for Line {
    fn from(l: &VisionLine) -> Self {
        Self {
            start: (l.start_x, l.start_y),
            end: (l.end_x, l.end_y),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WorldModel
// ────────────────────────────────────────────────────────────────────────────

/// Owns every perceived object.  Created once, mutated in place each cycle.
#[derive(Debug, Clone)]
pub struct WorldModel {
    /// Indexed by [`VisionId::index`].
    objects: Vec<FieldObject>,
    ball: Ball,
    corners: Vec<Corner>,
    lines: Vec<Line>,
    bindings: Option<LandmarkBindings>,
}

impl Default for WorldModel {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldModel {
    /// All objects unseen and no roles bound yet.
    pub fn new() -> Self {
        Self {
            objects: VisionId::ALL.into_iter().map(FieldObject::new).collect(),
            ball: Ball::default(),
            corners: Vec::new(),
            lines: Vec::new(),
            bindings: None,
        }
    }

    // -------------------------------------------------------------------------
    // Role binding
    // -------------------------------------------------------------------------

    /// Bind landmark roles for `team_color`.
    ///
    /// The only way roles change.  Every previous binding is cleared first,
    /// so each role is held by exactly one object afterwards.
    pub fn bind_team_color(&mut self, team_color: TeamColor) -> LandmarkBindings {
        let bindings = LandmarkMapper::bind(team_color);
        for obj in &mut self.objects {
            obj.role = bindings.role_of(obj.vision_id);
            obj.backstop_role = bindings.backstop_role_of(obj.vision_id);
        }
        self.bindings = Some(bindings);
        debug!(%team_color, "landmark roles bound");
        bindings
    }

    pub fn bindings(&self) -> Option<&LandmarkBindings> {
        self.bindings.as_ref()
    }

    // -------------------------------------------------------------------------
    // Per-cycle refresh
    // -------------------------------------------------------------------------

    /// Copy the latest detections into every tracked record and rebuild the
    /// corner and line lists from scratch.
    pub fn refresh(&mut self, frame: &VisionFrame) {
        for obj in &mut self.objects {
            obj.update_vision(frame.detection(obj.vision_id));
            if obj.is_seen() {
                trace!(
                    id = ?obj.vision_id,
                    role = ?obj.role,
                    distance = obj.distance,
                    bearing = obj.bearing,
                    width = obj.width,
                    height = obj.height,
                    "landmark seen"
                );
            }
        }
        self.ball.update_vision(&frame.ball);

        self.corners.clear();
        self.corners
            .extend(frame.field_lines.reported_corners().iter().map(Corner::from));

        self.lines.clear();
        self.lines
            .extend(frame.field_lines.reported_lines().iter().map(Line::from));

        if !self.corners.is_empty() || !self.lines.is_empty() {
            debug!(corners = self.corners.len(), lines = self.lines.len(), "field lines refreshed");
        }
        for (i, c) in self.corners.iter().enumerate() {
            trace!(i, distance = c.distance, bearing = c.bearing, "corner");
        }
        for (i, l) in self.lines.iter().enumerate() {
            trace!(i, start = ?l.start, end = ?l.end, "line");
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn object(&self, id: VisionId) -> &FieldObject {
        &self.objects[id.index()]
    }

    /// The object currently holding `role`, or `None` before binding.
    pub fn object_for_role(&self, role: LandmarkRole) -> Option<&FieldObject> {
        self.bindings.map(|b| self.object(b.vision_id(role)))
    }

    pub fn backstop_for(&self, role: BackstopRole) -> Option<&FieldObject> {
        self.bindings.map(|b| self.object(b.backstop(role)))
    }

    /// The four role-bound goal posts, in [`VisionId::GOAL_POSTS`] order.
    ///
    /// # Errors
    ///
    /// Returns [`StrikerError::RolesUnbound`] before the first
    /// [`bind_team_color`][Self::bind_team_color].
    pub fn role_bound_posts(
        &self,
    ) -> Result<impl Iterator<Item = (LandmarkRole, &FieldObject)>, StrikerError> {
        if self.bindings.is_none() {
            return Err(StrikerError::RolesUnbound);
        }
        Ok(VisionId::GOAL_POSTS.into_iter().filter_map(move |id| {
            let obj = &self.objects[id.index()];
            obj.role.map(|role| (role, obj))
        }))
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}
