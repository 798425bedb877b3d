pub mod action;
pub mod codec;
pub mod dynamics;
pub mod world;

use crate::error::Result;
use crate::mdps::{outcomes::Outcomes, ActionId, Mdp, StateId};
use action::{Action, N_ACTIONS};
use codec::{StateCodec, StateDescriptor};
use dynamics::{Dynamics, MazeDynamics, WumpusDynamics};
use rand::prelude::*;
use world::World;

pub type WumpusMdp = GridMdp<WumpusDynamics>;
pub type MazeMdp = GridMdp<MazeDynamics>;

/// A grid world exposed as an [`Mdp`]. Outcome lists are rebuilt on every
/// query from the state id and the world.
#[derive(Debug, Clone)]
pub struct GridMdp<D> {
    world: World,
    codec: StateCodec,
    dynamics: D,
    initial: StateId,
}

impl<D: Dynamics> GridMdp<D> {
    /// Episodes start in the top left corner facing right.
    pub fn new(world: World, dynamics: D) -> Result<Self> {
        let codec = StateCodec::new(world.width(), world.height());
        let initial = codec.encode(&StateDescriptor::start(0, 0))?;

        Ok(Self {
            world,
            codec,
            dynamics,
            initial,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }

    pub fn encode(&self, d: &StateDescriptor) -> Result<StateId> {
        self.codec.encode(d)
    }

    pub fn describe(&self, s: StateId) -> Result<StateDescriptor> {
        self.codec.decode(s)
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }
}

impl<D: Dynamics + Default> GridMdp<D> {
    pub fn parse(layout: &str) -> Result<Self> {
        Self::new(World::parse(layout)?, D::default())
    }
}

impl<D: Dynamics> Mdp for GridMdp<D> {
    fn n_s(&self) -> usize {
        self.codec.n_states()
    }

    fn n_a(&self) -> usize {
        N_ACTIONS
    }

    fn transitions(&self, s: StateId, a: ActionId) -> Result<Outcomes> {
        let state = self.codec.decode(s)?;
        let action = Action::try_from(a)?;

        let mut os = Outcomes::new();
        for b in self.dynamics.branches(&self.world, &state, action) {
            os.push(self.codec.encode(&b.next)?, b.probability, b.reward);
        }

        Ok(os)
    }

    fn sample_initial_state(&self, _rng: &mut StdRng) -> StateId {
        self.initial
    }

    fn is_terminal(&self, s: StateId) -> Result<bool> {
        let state = self.codec.decode(s)?;
        Ok(self.dynamics.is_terminal(&self.world, &state))
    }
}
