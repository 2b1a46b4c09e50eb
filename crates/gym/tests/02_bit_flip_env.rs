use gym::{BitFlipEnv, DummyVecEnv, Env, EnvError, RenderFrame, RenderMode, Space, Value, VecEnv};

#[test]
fn bit_flip_env_basics() {
    let mut env = BitFlipEnv::new(4, 3);
    let mut rng = fastrand::Rng::with_seed(1);
    let obs = env.reset(&mut rng);
    assert!(env.observation_space().contains(&obs));
    let before = env.bits().to_vec();

    let t = env.step(&Value::Discrete(2)).unwrap();
    assert_eq!(t.reward, -1.0);
    assert!(!t.done);
    let Value::MultiBinary(after) = t.observation else {
        panic!("bit flip observations are multi-binary");
    };
    assert_eq!(after[2], 1 - before[2]);
    assert_eq!(after[0], before[0]);

    env.step(&Value::Discrete(0)).unwrap();
    assert!(env.step(&Value::Discrete(0)).unwrap().done);
}

#[test]
fn bit_flip_rejects_bad_actions() {
    let mut env = BitFlipEnv::new(3, 10);
    env.reset(&mut fastrand::Rng::with_seed(0));
    assert!(matches!(env.step(&Value::Discrete(3)), Err(EnvError::InvalidAction(_))));
    assert!(matches!(env.step(&Value::MultiBinary(vec![1])), Err(EnvError::InvalidAction(_))));
}

#[test]
fn vectorized_bit_flip_renders_each_copy() {
    let mut venv = DummyVecEnv::from_prototype(3, &BitFlipEnv::new(5, 8), 7);
    assert_eq!(venv.num_envs(), 3);
    assert_eq!(venv.observation_space(), &Space::multi_binary(5));
    assert_eq!(venv.action_space(), &Space::discrete(5));

    let obs = venv.reset().unwrap();
    assert_eq!(obs.len(), 3);
    let images = venv.get_images().unwrap();
    assert_eq!(images.len(), 3);
    assert!(images.iter().all(|f| matches!(f, RenderFrame::Text(t) if t.len() == 5)));
    assert!(venv.render(RenderMode::Human).unwrap().is_some());
}
