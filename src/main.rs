use rand::prelude::*;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use wumpus_rl::{
    config::Config,
    envs::grid::{action::Action, dynamics::Dynamics, world::World},
    evaluation::average_reward,
    mdps::call_stats::CountingMdp,
    trainer::FixedIterationTrainer,
    EpsilonGreedy, ExactSolver, GridMdp, MazeMdp, Mdp, MdpSolver, PolicyIteration, QLambda, Result,
    SarsaLambda, ValueIteration, WumpusMdp,
};

const ROLLOUTS: usize = 100;

const DEFAULT_LAYOUT: &str = "   o  \n o w  \n    o \n  o  x\n      ";

/// Usage: wumpus-rl [layout-file] [wumpus|maze] [config.json]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let world = match args.first() {
        Some(path) => World::load(path)?,
        None => World::parse(DEFAULT_LAYOUT)?,
    };
    let config = match args.get(2) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    println!("{world}\n");
    match args.get(1).map(String::as_str) {
        Some("maze") => run(MazeMdp::new(world, Default::default())?, &config),
        _ => run(WumpusMdp::new(world, Default::default())?, &config),
    }
}

fn run<D: Dynamics + Clone + 'static>(grid: GridMdp<D>, config: &Config) -> Result<()> {
    println!("Variant: {}, states: {}", grid.dynamics().name(), grid.n_s());

    let counting = Rc::new(CountingMdp::new(grid.clone()));
    let mdp = Rc::clone(&counting) as Rc<dyn Mdp>;
    let rng = &mut StdRng::seed_from_u64(config.learner.seed);

    let vi = &mut ValueIteration::new(Rc::clone(&mdp), config.gamma)?;
    let ret = vi.exec(config.theta, config.max_iterations)?;
    println!(
        "Value iteration => converged: {}, iterations: {}. {}",
        ret.0,
        ret.1,
        counting.stats()
    );
    report(&grid, &*mdp, &*vi, rng)?;

    counting.stats().reset();
    let pi = &mut PolicyIteration::new(Rc::clone(&mdp), config.gamma)?;
    let ret = pi.exec(config.theta, config.max_iterations)?;
    println!(
        "Policy iteration => stable: {}, iterations: {}. {}",
        ret.0,
        ret.1,
        counting.stats()
    );
    report(&grid, &*mdp, &*pi, rng)?;

    let epsilon = config.learner.epsilon;
    let iterations = config.learner.iterations;

    counting.stats().reset();
    let ql = &mut QLambda::new(
        Rc::clone(&mdp),
        config.lambda_params(),
        Box::new(EpsilonGreedy::new(epsilon)),
    );
    FixedIterationTrainer::new(ql, iterations).train()?;
    println!(
        "Q(lambda) => episodes: {}, reward while learning: {}. {}",
        ql.episodes(),
        ql.total_reward(),
        counting.stats()
    );
    report(&grid, &*mdp, &*ql, rng)?;

    counting.stats().reset();
    let sl = &mut SarsaLambda::new(
        Rc::clone(&mdp),
        config.lambda_params(),
        Box::new(EpsilonGreedy::new(epsilon)),
    );
    FixedIterationTrainer::new(sl, iterations).train()?;
    println!(
        "Sarsa(lambda) => episodes: {}, reward while learning: {}. {}",
        sl.episodes(),
        sl.total_reward(),
        counting.stats()
    );
    report(&grid, &*mdp, &*sl, rng)
}

fn report<D: Dynamics>(
    grid: &GridMdp<D>,
    mdp: &dyn Mdp,
    solver: &dyn MdpSolver,
    rng: &mut StdRng,
) -> Result<()> {
    let s0 = grid.initial_state();
    let a0 = Action::try_from(solver.pi_star(s0)?)?;
    println!(
        "  {} => V: {:.3}, action: {a0}",
        grid.describe(s0)?,
        solver.v_star(s0)?
    );

    let policy = solver.policy()?;
    let avg = average_reward(mdp, &policy, rng, ROLLOUTS, rollout_cap(grid))?;
    println!("  Average reward over {ROLLOUTS} rollouts: {avg:.1}");

    Ok(())
}

fn rollout_cap<D: Dynamics>(grid: &GridMdp<D>) -> usize {
    10 * grid.world().width() * grid.world().height()
}
