use std::fmt::Display;

/// Which side of the game an agent plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Slider,
    Placer,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Slider => write!(f, "slider"),
            Role::Placer => write!(f, "placer"),
        }
    }
}

impl Role {
    pub fn opponent(&self) -> Role {
        match self {
            Role::Slider => Role::Placer,
            Role::Placer => Role::Slider,
        }
    }
}

/// Naming and lifecycle shared by both players. Each role adds its own
/// `take_action`, since the slider needs the value function and the placer
/// only its random source.
pub trait Agent {
    fn name(&self) -> &str;
    fn role(&self) -> Role;
    fn open_episode(&mut self, _flag: &str) {}
    fn close_episode(&mut self, _flag: &str) {}
}
