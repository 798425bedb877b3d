use super::action::Action;
use super::codec::{Heading, StateDescriptor};
use super::world::World;

pub const FAIL_MOVE: f64 = 0.1; // stay put
pub const FAIL_TURN: f64 = 0.2; // about-face instead
pub const FAIL_SHOOT: f64 = 0.25; // projectile spent, monster lives
pub const FAIL_GRAB: f64 = 0.05; // drop instead

pub const RWD_TREASURE: f64 = 1000.;
pub const RWD_PIT: f64 = -1000.;
pub const RWD_MONSTER: f64 = -1000.;
pub const RWD_PROJECTILE: f64 = -10.;
pub const RWD_STEP: f64 = -1.;

/// One stochastic consequence of an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branch {
    pub next: StateDescriptor,
    pub probability: f64,
    pub reward: f64,
}

impl Branch {
    fn new(next: StateDescriptor, probability: f64, reward: f64) -> Self {
        Self {
            next,
            probability,
            reward,
        }
    }
}

/// Action semantics of one grid-world variant.
pub trait Dynamics {
    fn name(&self) -> &'static str;

    /// Branches of `action` taken in `state`; probabilities sum to 1.
    fn branches(&self, world: &World, state: &StateDescriptor, action: Action) -> Vec<Branch>;

    fn is_terminal(&self, world: &World, state: &StateDescriptor) -> bool {
        state.has_treasure
            || world.is_pit(state.x, state.y)
            || world.is_den_with_live_monster(state.x, state.y, state.killed_monster)
    }
}

/// Maze with a monster that can be shot.
#[derive(Debug, Clone, Copy, Default)]
pub struct WumpusDynamics;

/// Maze without combat: Shoot does nothing and every den is deadly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MazeDynamics;

impl Dynamics for WumpusDynamics {
    fn name(&self) -> &'static str {
        "wumpus"
    }

    fn branches(&self, world: &World, state: &StateDescriptor, action: Action) -> Vec<Branch> {
        match action {
            Action::Move => move_branches(world, state, |s| !s.killed_monster),
            Action::TurnLeft => turn_branches(state, Heading::turn_left),
            Action::TurnRight => turn_branches(state, Heading::turn_right),
            Action::Shoot => shoot_branches(world, state),
            Action::Grab => grab_branches(world, state),
        }
    }
}

impl Dynamics for MazeDynamics {
    fn name(&self) -> &'static str {
        "maze"
    }

    fn branches(&self, world: &World, state: &StateDescriptor, action: Action) -> Vec<Branch> {
        match action {
            Action::Move => move_branches(world, state, |_| true),
            Action::TurnLeft => turn_branches(state, Heading::turn_left),
            Action::TurnRight => turn_branches(state, Heading::turn_right),
            Action::Shoot => vec![Branch::new(*state, 1., RWD_STEP)],
            Action::Grab => grab_branches(world, state),
        }
    }

    fn is_terminal(&self, world: &World, state: &StateDescriptor) -> bool {
        state.has_treasure || world.is_pit(state.x, state.y) || world.is_den(state.x, state.y)
    }
}

fn move_branches(
    world: &World,
    state: &StateDescriptor,
    monster_alive: impl Fn(&StateDescriptor) -> bool,
) -> Vec<Branch> {
    let (x, y) = world.step(state.x, state.y, state.heading.delta());
    let moved = StateDescriptor { x, y, ..*state };

    let r = if world.is_pit(x, y) {
        RWD_PIT
    } else if world.is_den(x, y) && monster_alive(&moved) {
        RWD_MONSTER
    } else {
        RWD_STEP
    };

    vec![
        Branch::new(*state, FAIL_MOVE, RWD_STEP),
        Branch::new(moved, 1. - FAIL_MOVE, r),
    ]
}

fn turn_branches(state: &StateDescriptor, turn: fn(Heading) -> Heading) -> Vec<Branch> {
    let about = StateDescriptor {
        heading: state.heading.about_face(),
        ..*state
    };
    let turned = StateDescriptor {
        heading: turn(state.heading),
        ..*state
    };

    vec![
        Branch::new(about, FAIL_TURN, RWD_STEP),
        Branch::new(turned, 1. - FAIL_TURN, RWD_STEP),
    ]
}

fn shoot_branches(world: &World, state: &StateDescriptor) -> Vec<Branch> {
    if state.used_projectile {
        return vec![Branch::new(*state, 1., RWD_PROJECTILE)];
    }

    let missed = StateDescriptor {
        used_projectile: true,
        ..*state
    };
    let fired = StateDescriptor {
        killed_monster: state.killed_monster || in_line_of_fire(world, state),
        ..missed
    };

    vec![
        Branch::new(missed, FAIL_SHOOT, RWD_PROJECTILE),
        Branch::new(fired, 1. - FAIL_SHOOT, RWD_PROJECTILE),
    ]
}

/// Den on the same row or column, ahead of (or under) the agent.
fn in_line_of_fire(world: &World, state: &StateDescriptor) -> bool {
    let Some((wx, wy)) = world.den_location() else {
        return false;
    };
    let (x, y) = (state.x, state.y);

    match state.heading {
        Heading::Right => y == wy && x <= wx,
        Heading::Up => x == wx && y >= wy,
        Heading::Left => y == wy && x >= wx,
        Heading::Down => x == wx && y <= wy,
    }
}

fn grab_branches(world: &World, state: &StateDescriptor) -> Vec<Branch> {
    let grabbed = StateDescriptor {
        has_treasure: state.has_treasure || world.has_treasure(state.x, state.y),
        ..*state
    };
    let dropped = StateDescriptor {
        has_treasure: false,
        ..*state
    };

    let reward = |next: &StateDescriptor| match (state.has_treasure, next.has_treasure) {
        (false, true) => RWD_TREASURE,
        (true, false) => -RWD_TREASURE,
        _ => RWD_STEP,
    };

    vec![
        Branch::new(dropped, FAIL_GRAB, reward(&dropped)),
        Branch::new(grabbed, 1. - FAIL_GRAB, reward(&grabbed)),
    ]
}
