mod common;

use common::{discrete, zero_actions, ScriptedVecEnv};
use gym::{EnvError, Space, Value, VecEnv};
use her::{GoalSampling, GoalStacker, HerWrapper, ResetGoal, SparseReward};

#[test]
fn discrete_observation_comes_before_goal() {
    let stacker = GoalStacker::new(&Space::discrete(4)).unwrap();
    let stacked = stacker.stack(&Value::Discrete(1), &Value::Discrete(3)).unwrap();
    assert_eq!(stacked, Value::MultiDiscrete(vec![1, 3]));
}

#[test]
fn wrapper_stacks_discrete_reset_and_steps() {
    let script = vec![discrete(&[1]), discrete(&[2]), discrete(&[0])];
    let mut env = HerWrapper::with_rng(
        ScriptedVecEnv::new(Space::discrete(4), 1).with_script(script),
        SparseReward::default(),
        GoalSampling::custom(|_: &ScriptedVecEnv| discrete(&[3])),
        fastrand::Rng::with_seed(0),
    )
    .unwrap()
    .with_reset_goal(ResetGoal::Active);

    assert_eq!(env.reset().unwrap(), vec![Value::MultiDiscrete(vec![1, 3])]);
    let out = env.step(zero_actions(1)).unwrap();
    assert_eq!(out.observations, vec![Value::MultiDiscrete(vec![2, 3])]);
    let out = env.step(zero_actions(1)).unwrap();
    assert_eq!(out.observations, vec![Value::MultiDiscrete(vec![0, 3])]);
}

#[test]
fn default_reset_shows_pool_goal_then_steps_show_active_goal() {
    let script = vec![discrete(&[1]), discrete(&[2]), discrete(&[0])];
    let mut env = HerWrapper::with_rng(
        ScriptedVecEnv::new(Space::discrete(4), 1).with_script(script),
        SparseReward::default(),
        GoalSampling::custom(|_: &ScriptedVecEnv| discrete(&[3])),
        fastrand::Rng::with_seed(0),
    )
    .unwrap();
    assert_eq!(env.reset_goal(), ResetGoal::Resampled);

    // before the first reset the pool only holds the initial sampled goal
    let Value::Discrete(initial) = env.goal()[0] else {
        panic!("discrete space samples discrete goals");
    };
    assert_eq!(env.reset().unwrap(), vec![Value::MultiDiscrete(vec![1, initial])]);
    assert_eq!(env.goal_pool(), &[discrete(&[initial])]);
    assert_eq!(env.goal(), discrete(&[3]).as_slice());

    let out = env.step(zero_actions(1)).unwrap();
    assert_eq!(out.observations, vec![Value::MultiDiscrete(vec![2, 3])]);
    let out = env.step(zero_actions(1)).unwrap();
    assert_eq!(out.observations, vec![Value::MultiDiscrete(vec![0, 3])]);
}

#[test]
fn vector_kinds_concatenate() {
    let md = GoalStacker::new(&Space::multi_discrete(vec![3, 3])).unwrap();
    assert_eq!(
        md.stack(&Value::MultiDiscrete(vec![0, 2]), &Value::MultiDiscrete(vec![1, 1])).unwrap(),
        Value::MultiDiscrete(vec![0, 2, 1, 1])
    );

    let mb = GoalStacker::new(&Space::multi_binary(3)).unwrap();
    assert_eq!(
        mb.stack(&Value::MultiBinary(vec![1, 0, 0]), &Value::MultiBinary(vec![0, 1, 1])).unwrap(),
        Value::MultiBinary(vec![1, 0, 0, 0, 1, 1])
    );

    let b = GoalStacker::new(&Space::uniform_box(-1.0, 1.0, vec![2])).unwrap();
    assert_eq!(
        b.stack(&Value::Box(vec![0.1, 0.2]), &Value::Box(vec![-0.3, 0.4])).unwrap(),
        Value::Box(vec![0.1, 0.2, -0.3, 0.4])
    );
}

#[test]
fn box_rows_stack_on_last_axis() {
    let stacker = GoalStacker::new(&Space::uniform_box(0.0, 9.0, vec![2, 2])).unwrap();
    let stacked = stacker
        .stack(&Value::Box(vec![1.0, 2.0, 3.0, 4.0]), &Value::Box(vec![5.0, 6.0, 7.0, 8.0]))
        .unwrap();
    assert_eq!(stacked, Value::Box(vec![1.0, 2.0, 5.0, 6.0, 3.0, 4.0, 7.0, 8.0]));
    assert!(stacker.observation_space().contains(&stacked));
}

#[test]
fn unstack_recovers_observation_and_goal() {
    let cases = [
        (Space::discrete(5), Value::Discrete(4), Value::Discrete(0)),
        (
            Space::uniform_box(0.0, 9.0, vec![2, 3]),
            Value::Box(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            Value::Box(vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0]),
        ),
        (
            Space::multi_discrete(vec![4, 4, 4]),
            Value::MultiDiscrete(vec![3, 2, 1]),
            Value::MultiDiscrete(vec![0, 0, 3]),
        ),
        (
            Space::multi_binary(2),
            Value::MultiBinary(vec![1, 1]),
            Value::MultiBinary(vec![0, 1]),
        ),
    ];
    for (space, obs, goal) in cases {
        let stacker = GoalStacker::new(&space).unwrap();
        let stacked = stacker.stack(&obs, &goal).unwrap();
        assert_eq!(stacker.unstack(&stacked).unwrap(), (obs, goal));
    }
}

#[test]
fn mismatched_values_are_rejected() {
    let stacker = GoalStacker::new(&Space::multi_binary(3)).unwrap();
    let err = stacker
        .stack(&Value::MultiBinary(vec![1, 0, 1]), &Value::MultiBinary(vec![1]))
        .unwrap_err();
    assert!(matches!(err, EnvError::ShapeMismatch(_)));

    let err = stacker
        .stack(&Value::MultiBinary(vec![1, 0, 1]), &Value::Discrete(1))
        .unwrap_err();
    assert!(matches!(err, EnvError::ShapeMismatch(_)));

    assert!(matches!(
        stacker.unstack(&Value::MultiBinary(vec![1, 0, 1])),
        Err(EnvError::ShapeMismatch(_))
    ));

    let err = stacker
        .stack_batch(&[Value::MultiBinary(vec![0; 3])], &[])
        .unwrap_err();
    assert_eq!(err, EnvError::BatchSize { expected: 1, actual: 0 });
}
