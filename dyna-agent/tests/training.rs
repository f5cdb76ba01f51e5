use anyhow::Result;
use dyna_agent::{Algorithm, Learner, LearnerConfig};
use dyna_core::{
    record::{BufferedRecorder, NullRecorder},
    Agent, Env, Trainer, TrainerConfig,
};
use dyna_gridworld::{GridConfig, Gridworld};
use test_log::test;

fn agent(algorithm: Algorithm) -> Result<Learner<Gridworld>> {
    let env = Gridworld::build(&GridConfig::default())?;
    let config = LearnerConfig::default()
        .algorithm(algorithm)
        .planning_steps(10);
    Learner::build(config, env)
}

fn trainer_config() -> TrainerConfig {
    TrainerConfig::default().max_steps_per_episode(Some(10_000))
}

#[test]
fn test_fit_emits_diagnostics() -> Result<()> {
    let mut agent = agent(Algorithm::DynaQ)?;
    let mut recorder = BufferedRecorder::new();
    let mut trainer = Trainer::build(
        trainer_config()
            .late_portal_episode(3)
            .log_every(vec![0, 4])
            .plot(true),
    );

    trainer.fit(&mut agent, 6, &mut recorder)?;

    assert_eq!(trainer.episodes_played(), 6);
    assert!(trainer.late_portal_activated());
    assert!(agent.env().is_late_portal_active());

    let episodes = trainer
        .snapshots()
        .iter()
        .map(|s| s.episode)
        .collect::<Vec<_>>();
    assert_eq!(episodes, (0..6).collect::<Vec<_>>());
    assert!(trainer.snapshots().iter().all(|s| s.shape == [8, 12]));
    assert_eq!(trainer.snapshots()[5].values.len(), 96);

    assert_eq!(recorder.len(), 2);
    let records = recorder.iter().collect::<Vec<_>>();

    assert_eq!(records[0].get_scalar("episode")?, 0.0);
    assert_eq!(records[0].get_string("algorithm")?, "Dyna-Q");
    assert_eq!(records[0].get_array1("steps")?.len(), 1);
    assert!(records[0].get_scalar("episode_steps").is_ok());
    let (grid, shape) = records[0].get_array2("value_grid")?;
    assert_eq!((grid.len(), shape), (96, [8, 12]));

    assert_eq!(records[1].get_scalar("episode")?, 4.0);
    assert_eq!(records[1].get_array1("steps")?.len(), 5);
    assert_eq!(records[1].get_array1("reward")?.len(), 5);
    let min = records[1].get_scalar("episode_steps_min")?;
    let max = records[1].get_scalar("episode_steps_max")?;
    let mean = records[1].get_scalar("episode_steps_mean")?;
    assert!(min <= mean && mean <= max);
    let (visits, _) = records[1].get_array2("visit_grid")?;
    assert!(visits.iter().sum::<f32>() > 0.0);

    Ok(())
}

#[test]
fn test_fit_without_plot() -> Result<()> {
    let mut agent = agent(Algorithm::QLearning)?;
    let mut recorder = BufferedRecorder::new();
    let mut trainer = Trainer::build(trainer_config().log_every(vec![0, 1]));

    trainer.fit(&mut agent, 2, &mut recorder)?;
    assert!(recorder.is_empty());
    assert!(!trainer.late_portal_activated());
    assert!(!agent.env().is_late_portal_active());
    Ok(())
}

#[test]
fn test_late_portal_opens_once_across_calls() -> Result<()> {
    let mut agent = agent(Algorithm::DynaQPlus)?;
    let mut trainer = Trainer::build(trainer_config().late_portal_episode(3));

    trainer.fit(&mut agent, 2, &mut NullRecorder {})?;
    assert!(!agent.env().is_late_portal_active());

    trainer.fit(&mut agent, 3, &mut NullRecorder {})?;
    assert!(agent.env().is_late_portal_active());
    assert_eq!(trainer.episodes_played(), 5);
    assert_eq!(trainer.snapshots().len(), 5);
    assert_eq!(agent.episodes().len(), 5);
    Ok(())
}

#[test]
fn test_truncated_episodes() -> Result<()> {
    let mut agent = agent(Algorithm::DynaQ)?;
    let mut trainer = Trainer::build(TrainerConfig::default().max_steps_per_episode(Some(3)));

    trainer.fit(&mut agent, 2, &mut NullRecorder {})?;
    assert!(agent
        .episodes()
        .iter()
        .all(|e| e.truncated && e.steps == 3 && !e.is_optimal()));
    Ok(())
}

#[test]
fn test_zero_budget_is_rejected() -> Result<()> {
    let mut agent = agent(Algorithm::QLearning)?;
    let mut trainer = Trainer::build(TrainerConfig::default().max_steps_per_episode(Some(0)));
    assert!(trainer.fit(&mut agent, 1, &mut NullRecorder {}).is_err());
    assert_eq!(trainer.episodes_played(), 0);
    Ok(())
}
