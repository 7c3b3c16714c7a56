//! Unit tests for ares-behavior, including the reference scenarios.

use ares_agent::{Agent, AgentError, State};
use ares_core::{AgentId, DirectionVector, Pos, SimRng};
use ares_params::{ParamError, ParamValue, Parameters};

use crate::factory::{AgentFactory, BehaviorFactory, FactoryRegistry};
use crate::labels::*;
use crate::{BehaviorError, prey};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn make(factory: &BehaviorFactory, values: &[(&str, ParamValue)]) -> Agent {
    let mut agent = factory.create(&Parameters::new()).unwrap();
    for (k, v) in values {
        agent.parameters_mut().set(k, v.clone()).unwrap();
    }
    agent
}

fn hunter(radius: i64) -> Agent {
    make(&BehaviorFactory::predator(), &[(VISION_RADIUS_PREDATOR, radius.into())])
}

fn quarry(radius: i64) -> Agent {
    make(&BehaviorFactory::prey(), &[(VISION_RADIUS_PREY, radius.into())])
}

fn resident(group: &str, threshold: f64) -> Agent {
    make(
        &BehaviorFactory::segregation(group),
        &[(THRESHOLD, threshold.into()), (VISION_RADIUS, 1i64.into())],
    )
}

fn fire_east(radius: i64) -> Agent {
    make(
        &BehaviorFactory::fire(),
        &[
            (RADIUS, radius.into()),
            (DIRECTION, DirectionVector::new(1.0, 0.0).into()),
        ],
    )
}

fn tree() -> Agent {
    make(&BehaviorFactory::tree(), &[])
}

fn type_at(state: &State, pos: Pos) -> Option<&str> {
    state.agent_at(pos).map(Agent::agent_type)
}

/// One simulation step: visit the agents present at the start, skipping any
/// whose cell no longer holds the same agent.
fn step(state: &mut State, rng: &mut SimRng) {
    let order: Vec<(Pos, AgentId)> = state.agents().map(|(p, a)| (p, a.id())).collect();
    for (pos, id) in order {
        if state.agent_at(pos).map(Agent::id) == Some(id) {
            let _ = state.tick_agent(pos, rng);
        }
    }
}

// ── Predator / prey ───────────────────────────────────────────────────────────

#[cfg(test)]
mod predator_prey_tests {
    use super::*;

    #[test]
    fn scenario_a_predator_eats_adjacent_prey() {
        let mut s = State::new(5, 5);
        let predator = hunter(1);
        let predator_id = predator.id();
        s.add_agent(Pos::new(1, 1), predator).unwrap();
        s.add_agent(Pos::new(1, 2), quarry(1)).unwrap();

        s.tick_agent(Pos::new(1, 1), &mut SimRng::new(1)).unwrap();

        assert_eq!(s.agent_count(), 1);
        assert_eq!(s.position_of(predator_id), Some(Pos::new(1, 2)));
        assert!(s.is_free(Pos::new(1, 1)));
    }

    #[test]
    fn predator_takes_first_prey_in_row_major_order() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(2, 2), hunter(1)).unwrap();
        s.add_agent(Pos::new(3, 3), quarry(1)).unwrap();
        s.add_agent(Pos::new(3, 1), quarry(1)).unwrap();

        s.tick_agent(Pos::new(2, 2), &mut SimRng::new(1)).unwrap();

        assert_eq!(type_at(&s, Pos::new(3, 1)), Some(PREDATOR));
        assert_eq!(type_at(&s, Pos::new(3, 3)), Some(PREY));
    }

    #[test]
    fn predator_ignores_other_kinds_and_distant_prey() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(0, 0), hunter(1)).unwrap();
        s.add_agent(Pos::new(1, 0), tree()).unwrap();
        s.add_agent(Pos::new(3, 3), quarry(1)).unwrap();

        s.tick_agent(Pos::new(0, 0), &mut SimRng::new(1)).unwrap();

        assert_eq!(type_at(&s, Pos::new(0, 0)), Some(PREDATOR));
        assert_eq!(s.agent_count(), 3);
    }

    #[test]
    fn unset_vision_radius_is_missing_parameter() {
        let mut s = State::new(3, 3);
        let unconfigured = BehaviorFactory::predator().create(&Parameters::new()).unwrap();
        s.add_agent(Pos::new(1, 1), unconfigured).unwrap();
        s.add_agent(Pos::new(1, 2), quarry(1)).unwrap();

        let err = s.tick_agent(Pos::new(1, 1), &mut SimRng::new(1)).unwrap_err();
        assert_eq!(
            err,
            AgentError::Param(ParamError::MissingParameter(VISION_RADIUS_PREDATOR.into()))
        );
        assert_eq!(s.agent_count(), 2);
    }

    #[test]
    fn prey_flees_away_from_predator() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(1, 2), hunter(1)).unwrap();
        s.add_agent(Pos::new(2, 2), quarry(1)).unwrap();

        s.tick_agent(Pos::new(2, 2), &mut SimRng::new(1)).unwrap();

        assert_eq!(type_at(&s, Pos::new(3, 2)), Some(PREY));
        assert!(s.is_free(Pos::new(2, 2)));
    }

    #[test]
    fn prey_flees_from_centroid_of_several_predators() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(1, 1), hunter(1)).unwrap();
        s.add_agent(Pos::new(1, 3), hunter(1)).unwrap();
        s.add_agent(Pos::new(2, 2), quarry(1)).unwrap();

        s.tick_agent(Pos::new(2, 2), &mut SimRng::new(1)).unwrap();

        assert_eq!(type_at(&s, Pos::new(3, 2)), Some(PREY));
    }

    #[test]
    fn prey_at_edge_is_clamped_in_place() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(3, 2), hunter(1)).unwrap();
        s.add_agent(Pos::new(4, 2), quarry(1)).unwrap();

        s.tick_agent(Pos::new(4, 2), &mut SimRng::new(1)).unwrap();

        assert_eq!(type_at(&s, Pos::new(4, 2)), Some(PREY));
    }

    #[test]
    fn blocked_prey_stays() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(1, 2), hunter(1)).unwrap();
        s.add_agent(Pos::new(2, 2), quarry(1)).unwrap();
        s.add_agent(Pos::new(3, 2), tree()).unwrap();

        s.tick_agent(Pos::new(2, 2), &mut SimRng::new(1)).unwrap();

        assert_eq!(type_at(&s, Pos::new(2, 2)), Some(PREY));
        assert_eq!(type_at(&s, Pos::new(3, 2)), Some(TREE));
    }

    #[test]
    fn flee_vector_rounds_and_handles_empty() {
        assert_eq!(prey::flee_vector(Pos::new(2, 2), &[]), None);
        assert_eq!(
            prey::flee_vector(Pos::new(2, 2), &[Pos::new(1, 1), Pos::new(2, 1)]),
            Some(Pos::new(1, 1))
        );
    }
}

// ── Segregation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod segregation_tests {
    use super::*;

    #[test]
    fn scenario_b_minority_relocates_to_free_cell() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(1, 1), resident("1", 0.5)).unwrap();
        s.add_agent(Pos::new(1, 2), resident("1", 0.5)).unwrap();
        let odd = resident("2", 0.5);
        let odd_id = odd.id();
        s.add_agent(Pos::new(1, 3), odd).unwrap();

        let mut rng = SimRng::new(7);
        s.tick_agent(Pos::new(1, 3), &mut rng).unwrap();

        let now = s.position_of(odd_id).unwrap();
        assert_ne!(now, Pos::new(1, 3));
        assert_ne!(now, Pos::new(1, 1));
        assert_ne!(now, Pos::new(1, 2));
        assert_eq!(s.agent_count(), 3);
    }

    #[test]
    fn satisfied_agent_stays_and_records_ratio() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(1, 1), resident("1", 0.5)).unwrap();
        s.add_agent(Pos::new(1, 2), resident("1", 0.5)).unwrap();
        s.add_agent(Pos::new(2, 2), resident("2", 0.5)).unwrap();

        s.tick_agent(Pos::new(1, 2), &mut SimRng::new(7)).unwrap();

        let agent = s.agent_at(Pos::new(1, 2)).unwrap();
        assert_eq!(agent.agent_type(), "1");
        assert_eq!(agent.parameters().get::<f64>(RATIO), Some(0.5));
    }

    #[test]
    fn lone_agent_is_satisfied_and_ratio_cleared() {
        let mut s = State::new(5, 5);
        let mut lone = resident("1", 1.0);
        lone.observe(RATIO, 0.25).unwrap();
        s.add_agent(Pos::new(0, 0), lone).unwrap();

        s.tick_agent(Pos::new(0, 0), &mut SimRng::new(7)).unwrap();

        let agent = s.agent_at(Pos::new(0, 0)).unwrap();
        assert!(!agent.parameters().parameter(RATIO).unwrap().is_set());
    }

    #[test]
    fn full_grid_means_no_move() {
        let mut s = State::new(2, 1);
        s.add_agent(Pos::new(0, 0), resident("1", 1.0)).unwrap();
        s.add_agent(Pos::new(1, 0), resident("2", 1.0)).unwrap();

        s.tick_agent(Pos::new(0, 0), &mut SimRng::new(7)).unwrap();

        assert_eq!(type_at(&s, Pos::new(0, 0)), Some("1"));
        assert_eq!(type_at(&s, Pos::new(1, 0)), Some("2"));
    }

    #[test]
    fn threshold_out_of_range_is_rejected_by_domain() {
        let mut agent = resident("1", 0.5);
        assert!(agent.parameters_mut().set(THRESHOLD, 1.5).is_err());
        assert_eq!(agent.parameters().get::<f64>(THRESHOLD), Some(0.5));
    }
}

// ── Fire ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fire_tests {
    use super::*;

    fn forest() -> State {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(0, 0), fire_east(1)).unwrap();
        s.add_agent(Pos::new(1, 0), tree()).unwrap();
        s.add_agent(Pos::new(2, 0), tree()).unwrap();
        s.add_agent(Pos::new(2, 2), tree()).unwrap();
        s
    }

    #[test]
    fn scenario_c_fire_converts_adjacent_tree_only() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(0, 0), fire_east(1)).unwrap();
        s.add_agent(Pos::new(1, 0), tree()).unwrap();
        s.add_agent(Pos::new(2, 2), tree()).unwrap();

        s.tick_agent(Pos::new(0, 0), &mut SimRng::new(3)).unwrap();

        assert_eq!(type_at(&s, Pos::new(1, 0)), Some(FIRE));
        assert_eq!(type_at(&s, Pos::new(2, 2)), Some(TREE));
    }

    #[test]
    fn scenario_d_fire_advances_one_cell_per_step() {
        let mut s = forest();
        let mut rng = SimRng::new(3);

        step(&mut s, &mut rng);
        assert_eq!(type_at(&s, Pos::new(1, 0)), Some(FIRE));
        assert_eq!(type_at(&s, Pos::new(2, 0)), Some(TREE));

        step(&mut s, &mut rng);
        assert_eq!(type_at(&s, Pos::new(2, 0)), Some(FIRE));
        assert_eq!(type_at(&s, Pos::new(2, 2)), Some(TREE));
    }

    #[test]
    fn new_fire_inherits_spread_and_tree_fuel() {
        let mut s = State::new(3, 3);
        s.add_agent(Pos::new(0, 0), fire_east(1)).unwrap();
        let mut t = tree();
        t.parameters_mut().set(FUEL, 5.0).unwrap();
        s.add_agent(Pos::new(1, 0), t).unwrap();

        s.tick_agent(Pos::new(0, 0), &mut SimRng::new(3)).unwrap();

        let p = s.agent_at(Pos::new(1, 0)).unwrap().parameters();
        assert_eq!(p.get::<i64>(RADIUS), Some(1));
        assert_eq!(p.get::<DirectionVector>(DIRECTION), Some(DirectionVector::new(1.0, 0.0)));
        assert_eq!(p.get::<f64>(ANGLE), Some(crate::fire::DEFAULT_ANGLE));
        assert_eq!(p.get::<f64>(FUEL), Some(5.0));
    }

    #[test]
    fn fire_does_not_spread_backwards() {
        let mut s = State::new(5, 5);
        s.add_agent(Pos::new(2, 2), fire_east(2)).unwrap();
        s.add_agent(Pos::new(1, 2), tree()).unwrap();
        s.add_agent(Pos::new(2, 0), tree()).unwrap();
        s.add_agent(Pos::new(3, 4), tree()).unwrap();
        s.add_agent(Pos::new(4, 2), tree()).unwrap();
        s.add_agent(Pos::new(3, 3), tree()).unwrap();

        s.tick_agent(Pos::new(2, 2), &mut SimRng::new(3)).unwrap();

        assert_eq!(type_at(&s, Pos::new(1, 2)), Some(TREE));
        assert_eq!(type_at(&s, Pos::new(2, 0)), Some(TREE));
        assert_eq!(type_at(&s, Pos::new(3, 4)), Some(TREE));
        assert_eq!(type_at(&s, Pos::new(4, 2)), Some(FIRE));
        assert_eq!(type_at(&s, Pos::new(3, 3)), Some(FIRE));
    }

    #[test]
    fn fire_burns_out_into_burnt_cell() {
        let mut s = State::new(3, 3);
        let mut f = fire_east(1);
        f.parameters_mut().set(FUEL, 2.0).unwrap();
        s.add_agent(Pos::new(0, 0), f).unwrap();
        let mut rng = SimRng::new(3);

        s.tick_agent(Pos::new(0, 0), &mut rng).unwrap();
        let p = s.agent_at(Pos::new(0, 0)).unwrap().parameters();
        assert_eq!(p.get::<f64>(FUEL), Some(1.0));

        s.tick_agent(Pos::new(0, 0), &mut rng).unwrap();
        assert_eq!(type_at(&s, Pos::new(0, 0)), Some(BURNT));
        assert_eq!(s.agent_count(), 1);
    }

    #[test]
    fn zero_direction_is_rejected() {
        let mut f = fire_east(1);
        let err = f
            .parameters_mut()
            .set(DIRECTION, DirectionVector::new(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, ParamError::DomainValidation { .. }));
    }

    #[test]
    fn burnt_and_tree_are_passive() {
        let mut s = forest();
        s.replace_agent(Pos::new(0, 0), crate::fire::burnt().unwrap()).unwrap();
        let before = s.snapshot();
        step(&mut s, &mut SimRng::new(3));
        assert!(before.same_types(&s.snapshot()));
    }
}

// ── Factories ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory_tests {
    use super::*;

    #[test]
    fn builtin_registry_names() {
        let r = FactoryRegistry::builtin();
        let names: Vec<_> = r.names().collect();
        assert_eq!(names, [PREDATOR, PREY, "Segregation", FIRE, TREE, BURNT]);
    }

    #[test]
    fn unknown_and_duplicate_names() {
        let mut r = FactoryRegistry::builtin();
        assert!(matches!(r.get("Wolf"), Err(BehaviorError::UnknownAgent(n)) if n == "Wolf"));
        assert_eq!(
            r.register(PREY, BehaviorFactory::prey()).unwrap_err(),
            BehaviorError::DuplicateAgent(PREY.into())
        );
        r.register("Wolf", BehaviorFactory::predator()).unwrap();
        assert_eq!(r.get("Wolf").unwrap().agent_type(), PREDATOR);
    }

    #[test]
    fn create_copies_values_into_private_record() {
        let r = FactoryRegistry::builtin();
        let mut template = r.get(PREY).unwrap().parameters().unwrap();
        template.set(VISION_RADIUS_PREY, 3).unwrap();

        let mut a = r.create(PREY, &template).unwrap();
        let b = r.create(PREY, &template).unwrap();
        a.parameters_mut().set(VISION_RADIUS_PREY, 1).unwrap();

        assert_eq!(b.parameters().get::<i64>(VISION_RADIUS_PREY), Some(3));
        assert_eq!(template.get::<i64>(VISION_RADIUS_PREY), Some(3));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn declarations_carry_defaults() {
        let p = BehaviorFactory::fire().parameters().unwrap();
        assert_eq!(p.missing_required(), [RADIUS, DIRECTION]);
        assert_eq!(p.get::<f64>(BURN_RATE), Some(crate::fire::DEFAULT_BURN_RATE));
        let t = BehaviorFactory::tree().parameters().unwrap();
        assert!(t.all_required_set());
    }
}
