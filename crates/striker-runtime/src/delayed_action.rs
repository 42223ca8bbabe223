//! [`DelayedAction`] – fire once after `n` cycles, then stay quiet.
//!
//! # Example
//!
//! ```rust
//! use striker_runtime::delayed_action::DelayedAction;
//!
//! let mut kick = DelayedAction::new(2, "kick");
//! assert_eq!(kick.advance(), None);
//! assert_eq!(kick.advance(), None);
//! assert_eq!(kick.advance(), Some("kick"));
//! assert_eq!(kick.advance(), None);
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayedActionState {
    /// `remaining` more calls to [`DelayedAction::advance`] return `None`
    /// before the action is handed out.
    Waiting { remaining: u32 },
    Fired,
}

#[derive(Debug, Clone)]
pub struct DelayedAction<A> {
    state: DelayedActionState,
    action: Option<A>,
}

impl<A> DelayedAction<A> {
    pub fn new(delay: u32, action: A) -> Self {
        Self {
            state: DelayedActionState::Waiting { remaining: delay },
            action: Some(action),
        }
    }

    /// Step one cycle.  Returns the action on the call after the delay has
    /// run out, and `None` on every other call.
    pub fn advance(&mut self) -> Option<A> {
        match self.state {
            DelayedActionState::Waiting { remaining: 0 } => {
                self.state = DelayedActionState::Fired;
                self.action.take()
            }
            DelayedActionState::Waiting { remaining } => {
                self.state = DelayedActionState::Waiting {
                    remaining: remaining - 1,
                };
                None
            }
            DelayedActionState::Fired => None,
        }
    }

    pub fn state(&self) -> DelayedActionState {
        self.state
    }

    pub fn is_fired(&self) -> bool {
        self.state == DelayedActionState::Fired
    }
}
