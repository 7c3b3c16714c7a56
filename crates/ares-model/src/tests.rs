//! Unit tests for ares-model.

use ares_agent::State;
use ares_behavior::BehaviorFactory;
use ares_behavior::labels::{PREDATOR, PREY, THRESHOLD, VISION_RADIUS_PREY};
use ares_core::{Pos, SimRng};
use ares_params::{ParamError, Parameter};

use crate::catalogue::{self, NUMBER_OF_PREDATORS, NUMBER_OF_PREYS, SIZE};
use crate::{Model, ModelBuilder, ModelError, ModelRegistry};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One prey on a `size × size` grid.
fn single_prey() -> ModelBuilder {
    ModelBuilder::new("Single Prey")
        .parameter(Parameter::of::<i64>("size").required())
        .agent("Prey", BehaviorFactory::prey())
        .init(|params, templates, _rng| {
            let size = params.require::<i64>("size")? as u32;
            let mut state = State::new(size, size);
            state.add_agent(Pos::new(0, 0), templates.spawn("Prey")?)?;
            Ok(state)
        })
        .exit(|_, current| current.agent_count() == 0)
}

fn configured_predator_prey(size: i64, predators: i64, prey: i64) -> Model {
    let mut m = catalogue::predator_prey().unwrap();
    m.parameters_mut().set(SIZE, size).unwrap();
    m.parameters_mut().set(NUMBER_OF_PREDATORS, predators).unwrap();
    m.parameters_mut().set(NUMBER_OF_PREYS, prey).unwrap();
    m
}

// ── ModelBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn missing_init_or_exit_is_illegal_state() {
        let no_init = ModelBuilder::new("m").exit(|_, _| false).build();
        assert!(matches!(no_init, Err(ModelError::IllegalState(_))));

        let no_exit = ModelBuilder::new("m")
            .init(|_, _, _| Ok(State::new(1, 1)))
            .build();
        assert!(matches!(no_exit, Err(ModelError::IllegalState(_))));
    }

    #[test]
    fn duplicate_declarations_are_reported() {
        let dup_param = single_prey()
            .parameter(Parameter::of::<i64>("size"))
            .build();
        assert!(matches!(
            dup_param,
            Err(ModelError::Param(ParamError::DuplicateKey(k))) if k == "size"
        ));

        let dup_agent = single_prey().agent("Prey", BehaviorFactory::prey()).build();
        assert!(matches!(dup_agent, Err(ModelError::Duplicate { .. })));
    }

    #[test]
    fn agent_value_on_unknown_template_fails() {
        let r = single_prey().agent_value("Wolf", VISION_RADIUS_PREY, 1).build();
        assert!(matches!(r, Err(ModelError::UnknownAgent(n)) if n == "Wolf"));
    }

    #[test]
    fn not_runnable_lists_model_and_agent_keys() {
        let model = single_prey().build().unwrap();
        let err = model.init(&mut SimRng::new(0)).unwrap_err();
        assert_eq!(
            err,
            ModelError::NotRunnable(vec!["size".into(), "Prey.visionRadiusPrey".into()])
        );
        assert!(!model.is_runnable());
    }

    #[test]
    fn init_spawns_from_configured_template() {
        let mut model = single_prey().build().unwrap();
        model.parameters_mut().set("size", 3).unwrap();
        model
            .templates_mut()
            .get_mut("Prey")
            .unwrap()
            .parameters_mut()
            .set(VISION_RADIUS_PREY, 2)
            .unwrap();

        let state = model.init(&mut SimRng::new(0)).unwrap();
        assert_eq!(state.dimensions(), (3, 3));
        let prey = state.agent_at(Pos::new(0, 0)).unwrap();
        assert_eq!(prey.agent_type(), PREY);
        assert_eq!(prey.parameters().get::<i64>(VISION_RADIUS_PREY), Some(2));
    }

    #[test]
    fn clones_are_configured_independently() {
        let mut a = single_prey().build().unwrap();
        a.parameters_mut().set("size", 4).unwrap();
        let mut b = a.clone();
        b.parameters_mut().set("size", 9).unwrap();
        assert_eq!(a.parameters().get::<i64>("size"), Some(4));
    }
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalogue_tests {
    use super::*;

    #[test]
    fn predator_prey_layout() {
        let model = configured_predator_prey(6, 2, 5);
        let state = model.init(&mut SimRng::new(11)).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.count_of(PREDATOR), 2);
        assert_eq!(snap.count_of(PREY), 5);
        assert_eq!((snap.width, snap.height), (6, 6));
    }

    #[test]
    fn layout_is_deterministic_per_seed() {
        let model = configured_predator_prey(8, 3, 3);
        let a = model.init(&mut SimRng::new(5)).unwrap().snapshot();
        let b = model.init(&mut SimRng::new(5)).unwrap().snapshot();
        let types = |s: &ares_agent::StateSnapshot| {
            s.cells.iter().map(|c| (c.pos, c.agent_type.clone())).collect::<Vec<_>>()
        };
        assert_eq!(types(&a), types(&b));
    }

    #[test]
    fn overcrowded_grid_is_rejected() {
        let model = configured_predator_prey(2, 3, 2);
        assert_eq!(
            model.init(&mut SimRng::new(0)).unwrap_err(),
            ModelError::Overcrowded { agents: 5, cells: 4 }
        );
    }

    #[test]
    fn predator_prey_finishes_without_prey() {
        let with_prey = configured_predator_prey(3, 0, 1).init(&mut SimRng::new(0)).unwrap();
        let without = configured_predator_prey(3, 1, 0).init(&mut SimRng::new(0)).unwrap();
        let model = catalogue::predator_prey().unwrap();
        assert!(!model.is_finished(&with_prey.snapshot(), &with_prey.snapshot()));
        assert!(model.is_finished(&with_prey.snapshot(), &without.snapshot()));
    }

    #[test]
    fn schelling_finishes_when_nobody_moves() {
        let model = catalogue::schelling().unwrap();
        let mut state = State::new(3, 1);
        state
            .add_agent(Pos::new(0, 0), model.templates().spawn(catalogue::TYPE_A).unwrap())
            .unwrap();
        let before = state.snapshot();
        assert!(model.is_finished(&before, &state.snapshot()));

        state.move_agent(Pos::new(0, 0), Pos::new(2, 0)).unwrap();
        assert!(!model.is_finished(&before, &state.snapshot()));
    }

    #[test]
    fn schelling_templates_have_defaults() {
        let model = catalogue::schelling().unwrap();
        let a = model.templates().get(catalogue::TYPE_A).unwrap();
        assert_eq!(a.agent_type(), "A");
        assert_eq!(a.parameters().get::<f64>(THRESHOLD), Some(0.5));
        assert_eq!(
            model.missing_required(),
            [SIZE, catalogue::NUMBER_OF_TYPE_A, catalogue::NUMBER_OF_TYPE_B]
        );
    }

    #[test]
    fn fire_spread_runs_from_defaults() {
        let mut model = catalogue::fire_spread().unwrap();
        model.parameters_mut().set(SIZE, 5).unwrap();
        model.parameters_mut().set(catalogue::NUMBER_OF_FIRES, 1).unwrap();
        model.parameters_mut().set(catalogue::NUMBER_OF_TREES, 10).unwrap();
        let state = model.init(&mut SimRng::new(2)).unwrap();
        assert_eq!(state.agent_count(), 11);
    }

    #[test]
    fn size_domain_is_enforced() {
        let mut model = catalogue::fire_spread().unwrap();
        assert!(model.parameters_mut().set(SIZE, 0).is_err());
        assert!(model.parameters_mut().set(catalogue::NUMBER_OF_TREES, -1).is_err());
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn builtin_names() {
        let r = ModelRegistry::builtin();
        let names: Vec<_> = r.names().collect();
        assert_eq!(
            names,
            [catalogue::PREDATOR_PREY, catalogue::SCHELLING, catalogue::FIRE_SPREAD]
        );
    }

    #[test]
    fn unknown_model() {
        let r = ModelRegistry::builtin();
        assert!(matches!(r.create("Life"), Err(ModelError::UnknownModel(n)) if n == "Life"));
    }

    #[test]
    fn each_create_is_a_fresh_model() {
        let r = ModelRegistry::builtin();
        let mut a = r.create(catalogue::SCHELLING).unwrap();
        a.parameters_mut().set(SIZE, 10).unwrap();
        let b = r.create(catalogue::SCHELLING).unwrap();
        assert!(!b.parameters().parameter(SIZE).unwrap().is_set());
    }

    #[test]
    fn custom_model_registration() {
        let mut r = ModelRegistry::new();
        r.register("Single Prey", || single_prey().build()).unwrap();
        assert!(matches!(
            r.register("Single Prey", || single_prey().build()),
            Err(ModelError::Duplicate { what: "model", .. })
        ));
        assert_eq!(r.create("Single Prey").unwrap().name(), "Single Prey");
    }
}
