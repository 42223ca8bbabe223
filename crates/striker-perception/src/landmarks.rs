//! Team-relative landmark binding.
//!
//! Vision names goal posts by goal color; localization wants them by whose
//! goal they are.  [`LandmarkMapper::bind`] produces that table once per
//! team-color assignment.
//!
//! Left and right cross over: a robot defending a goal faces away from it,
//! so the post vision calls "left" is on the robot's right.  The same holds
//! for the opponent goal.
//!
//! | Team color | Raw detection | Role |
//! |---|---|---|
//! | Blue | blue left post | `MyGoalRightPost` |
//! | Blue | blue right post | `MyGoalLeftPost` |
//! | Blue | yellow left post | `OppGoalRightPost` |
//! | Blue | yellow right post | `OppGoalLeftPost` |
//! | Yellow | yellow left post | `MyGoalRightPost` |
//! | Yellow | yellow right post | `MyGoalLeftPost` |
//! | Yellow | blue left post | `OppGoalRightPost` |
//! | Yellow | blue right post | `OppGoalLeftPost` |
//!
//! # Example
//!
//! ```rust
//! use striker_perception::landmarks::LandmarkMapper;
//! use striker_types::{LandmarkRole, TeamColor, VisionId};
//!
//! let bindings = LandmarkMapper::bind(TeamColor::Blue);
//! assert_eq!(
//!     bindings.vision_id(LandmarkRole::MyGoalLeftPost),
//!     VisionId::BlueGoalRightPost
//! );
//! ```

use striker_types::{BackstopRole, LandmarkRole, TeamColor, VisionId};

/// Role table for one team color: every [`LandmarkRole`] maps to exactly
/// one raw goal post, and every [`BackstopRole`] to one backstop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkBindings {
    team_color: TeamColor,
    /// Indexed by [`LandmarkRole::index`].
    posts: [VisionId; 4],
    my_backstop: VisionId,
    opp_backstop: VisionId,
}

impl LandmarkBindings {
    pub fn team_color(&self) -> TeamColor {
        self.team_color
    }

    /// Raw post bound to `role`.
    pub fn vision_id(&self, role: LandmarkRole) -> VisionId {
        self.posts[role.index()]
    }

    /// Role held by the raw post `id`, if it is a goal post.
    pub fn role_of(&self, id: VisionId) -> Option<LandmarkRole> {
        LandmarkRole::ALL
            .into_iter()
            .find(|role| self.posts[role.index()] == id)
    }

    pub fn backstop(&self, role: BackstopRole) -> VisionId {
        match role {
            BackstopRole::MyGoalBackstop => self.my_backstop,
            BackstopRole::OppGoalBackstop => self.opp_backstop,
        }
    }

    pub fn backstop_role_of(&self, id: VisionId) -> Option<BackstopRole> {
        if id == self.my_backstop {
            Some(BackstopRole::MyGoalBackstop)
        } else if id == self.opp_backstop {
            Some(BackstopRole::OppGoalBackstop)
        } else {
            None
        }
    }

    /// `(role, raw post)` pairs in [`LandmarkRole::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkRole, VisionId)> + '_ {
        LandmarkRole::ALL
            .into_iter()
            .map(move |role| (role, self.posts[role.index()]))
    }
}

/// Builds [`LandmarkBindings`] from a team color.
pub struct LandmarkMapper;

impl LandmarkMapper {
    /// Bind all four post roles and both backstop roles for `team_color`.
    ///
    /// Pure: the same color always yields the same table.
    pub fn bind(team_color: TeamColor) -> LandmarkBindings {
        let my_goal = team_color;
        let opp_goal = team_color.opponent();

        let mut posts = [VisionId::BlueGoalLeftPost; 4];
        posts[LandmarkRole::MyGoalLeftPost.index()] = VisionId::right_post(my_goal);
        posts[LandmarkRole::MyGoalRightPost.index()] = VisionId::left_post(my_goal);
        posts[LandmarkRole::OppGoalLeftPost.index()] = VisionId::right_post(opp_goal);
        posts[LandmarkRole::OppGoalRightPost.index()] = VisionId::left_post(opp_goal);

        LandmarkBindings {
            team_color,
            posts,
            my_backstop: VisionId::backstop(my_goal),
            opp_backstop: VisionId::backstop(opp_goal),
        }
    }
}
