use crate::error::MdpError;
use crate::mdps::ActionId;
use std::fmt;

pub const N_ACTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move = 0,
    TurnLeft = 1,
    TurnRight = 2,
    Shoot = 3,
    Grab = 4,
}

impl Action {
    pub const ALL: [Action; N_ACTIONS] = [
        Action::Move,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Shoot,
        Action::Grab,
    ];

    pub fn id(self) -> ActionId {
        self as ActionId
    }
}

impl TryFrom<ActionId> for Action {
    type Error = MdpError;

    fn try_from(a: ActionId) -> Result<Self, Self::Error> {
        Self::ALL.get(a).copied().ok_or(MdpError::InvalidAction {
            action: a,
            n_a: N_ACTIONS,
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Move => "MOVE",
            Action::TurnLeft => "LEFT",
            Action::TurnRight => "RIGHT",
            Action::Shoot => "SHOOT",
            Action::Grab => "GRAB",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_discriminants() {
        for (i, a) in Action::ALL.iter().enumerate() {
            assert_eq!(a.id(), i);
            assert_eq!(Action::try_from(i).unwrap(), *a);
        }
        assert!(matches!(
            Action::try_from(5),
            Err(MdpError::InvalidAction { action: 5, n_a: 5 })
        ));
        assert_eq!(Action::Shoot.to_string(), "SHOOT");
    }
}
