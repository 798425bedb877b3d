use rand::prelude::*;
use rstest::rstest;
use std::rc::Rc;
use wumpus_rl::{
    envs::grid::{
        action::Action,
        codec::{Heading, StateDescriptor},
    },
    evaluation::rollout,
    trainer::FixedIterationTrainer,
    EpsilonGreedy, ExactSolver, MazeMdp, Mdp, MdpSolver, PolicyIteration, QLambda, SarsaLambda,
    ValueIteration, WumpusMdp,
};

const GAMMA: f64 = 0.95;
const THETA: f64 = 1e-8;

fn solve(solver: &str, mdp: Rc<dyn Mdp>) -> Box<dyn MdpSolver> {
    let strategy = || Box::new(EpsilonGreedy::new(0.3));
    match solver {
        "vi" => {
            let mut vi = ValueIteration::new(mdp, GAMMA).unwrap();
            assert!(vi.exec(THETA, Some(10_000)).unwrap().0);
            Box::new(vi)
        }
        "pi" => {
            let mut pi = PolicyIteration::new(mdp, GAMMA).unwrap();
            assert!(pi.exec(THETA, Some(100)).unwrap().0);
            Box::new(pi)
        }
        "q" => {
            let mut ql = QLambda::new(mdp, Default::default(), strategy());
            FixedIterationTrainer::new(&mut ql, 30_000).train().unwrap();
            Box::new(ql)
        }
        "sarsa" => {
            let mut sl = SarsaLambda::new(mdp, Default::default(), strategy());
            FixedIterationTrainer::new(&mut sl, 30_000).train().unwrap();
            Box::new(sl)
        }
        _ => unreachable!("unknown solver {solver}"),
    }
}

fn at(x: usize, y: usize) -> StateDescriptor {
    StateDescriptor::start(x, y)
}

#[rstest]
fn walks_to_the_treasure_and_grabs_it(
    #[values("vi", "pi", "q", "sarsa")] solver: &str,
    #[values(false, true)] maze: bool,
) {
    let grid: Rc<dyn Mdp> = if maze {
        Rc::new(MazeMdp::parse(" x").unwrap())
    } else {
        Rc::new(WumpusMdp::parse(" x").unwrap())
    };
    let ids = WumpusMdp::parse(" x").unwrap();
    let s = solve(solver, Rc::clone(&grid));

    let start = ids.encode(&at(0, 0)).unwrap();
    let on_treasure = ids.encode(&at(1, 0)).unwrap();
    assert_eq!(s.pi_star(start).unwrap(), Action::Move.id());
    assert_eq!(s.pi_star(on_treasure).unwrap(), Action::Grab.id());

    let policy = s.policy().unwrap();
    let rng = &mut StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let e = rollout(&*grid, &policy, rng, 100).unwrap();
        assert!(e.terminated);
        assert!(e.reward > 0., "{e:?}");
    }
}

#[test]
fn shoots_the_monster_blocking_the_corridor() {
    let grid = WumpusMdp::parse("  wx").unwrap();
    let mdp = Rc::new(grid.clone()) as Rc<dyn Mdp>;
    let vi = solve("vi", mdp);

    let facing_den = grid.encode(&at(1, 0)).unwrap();
    let after_kill = grid
        .encode(&StateDescriptor {
            used_projectile: true,
            killed_monster: true,
            ..at(1, 0)
        })
        .unwrap();
    let after_miss = grid
        .encode(&StateDescriptor {
            used_projectile: true,
            ..at(1, 0)
        })
        .unwrap();

    assert_eq!(vi.pi_star(facing_den).unwrap(), Action::Shoot.id());
    assert_eq!(vi.pi_star(after_kill).unwrap(), Action::Move.id());
    assert_ne!(vi.pi_star(after_miss).unwrap(), Action::Move.id());
    assert!(vi.v_star(grid.initial_state()).unwrap() > 0.);
    assert!(vi.v_star(after_miss).unwrap() < 0.);
}

#[test]
fn maze_den_cannot_be_cleared() {
    let grid = MazeMdp::parse("  wx").unwrap();
    let mdp = Rc::new(grid.clone()) as Rc<dyn Mdp>;
    let vi = solve("vi", mdp);

    let facing_den = grid.encode(&at(1, 0)).unwrap();
    assert_ne!(vi.pi_star(facing_den).unwrap(), Action::Move.id());
    assert!(vi.v_star(grid.initial_state()).unwrap() < 0.);
}

#[rstest]
#[case("  o \n w x\n    \n o  ")]
#[case("@   \n o  ")]
#[case("    \n    ")]
fn policy_iteration_agrees_with_value_iteration(#[case] layout: &str) {
    let grid = WumpusMdp::parse(layout).unwrap();
    let mdp = Rc::new(grid) as Rc<dyn Mdp>;
    let vi = solve("vi", Rc::clone(&mdp));
    let pi = solve("pi", Rc::clone(&mdp));

    for s in 0..mdp.n_s() {
        let (a, b) = (vi.v_star(s).unwrap(), pi.v_star(s).unwrap());
        assert!((a - b).abs() < 1e-3, "state {s}: {a} vs {b}");
    }
}

#[test]
fn initial_state_faces_right_in_the_corner() {
    let grid = WumpusMdp::parse("   \n o \n  x").unwrap();
    let d = grid.describe(grid.initial_state()).unwrap();

    assert_eq!(d, at(0, 0));
    assert_eq!(d.heading, Heading::Right);
    assert_eq!(grid.n_s(), 3 * 3 * 4 * 8);
}
