use dining_recipe::framework::TracingObserver;
use dining_recipe::lifecycle::{setup_tracing, DinnerConfig, DinnerSystem};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = DinnerConfig::from_env().map_err(|e| e.to_string())?;
    info!(
        philosophers = config.philosophers,
        cycles = config.cycles,
        "Starting dinner"
    );

    let system =
        DinnerSystem::start(&config, config.pause(), TracingObserver).map_err(|e| e.to_string())?;
    let report = system.join().await.map_err(|e| e.to_string())?;

    for philosopher in &report.philosophers {
        info!(
            name = %philosopher.name,
            times_eaten = philosopher.times_eaten,
            hungry_for = ?philosopher.hungry_for,
            "Summary"
        );
    }
    if let Some(hungriest) = report.hungriest() {
        info!(name = %hungriest.name, "Waited longest for chopsticks");
    }

    info!("Dinner completed successfully");
    Ok(())
}
