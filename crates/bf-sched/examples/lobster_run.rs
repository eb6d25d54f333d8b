//! Run the lobster fishery in the background and print the trajectory.

use std::sync::mpsc::channel;
use std::time::Duration;

use bf_model::{lobster_model, ControlPolicy};
use bf_sched::{RunMode, RunScheduler, StaticOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let (tx, rx) = channel();
    let scheduler = RunScheduler::new(move |result| {
        tx.send(result).unwrap();
    });

    // 20-year dynamic trajectory
    let model = lobster_model(ControlPolicy::Quota);
    scheduler.submit(&model, 20, RunMode::Dynamic);
    let result = rx.recv_timeout(Duration::from_secs(10))?;

    println!("dynamic run ({:?}):", result.mode);
    for name in result.state.default_shown() {
        println!("  {name}: {:?}", result.state.series(name)?);
    }

    // Equilibrium sweep of the quota up to just past MSY
    let params = model.get_parameters();
    let max = params["K"].value * params["r"].value / 4.0 * 1.01;
    scheduler.submit(
        &model,
        20,
        RunMode::Static(StaticOptions {
            independent_variable: "catch".to_string(),
            min: 0.0,
            max,
            convergence_time: 4,
        }),
    );
    let sweep = rx.recv_timeout(Duration::from_secs(10))?;

    println!("equilibrium sweep ({:?}):", sweep.mode);
    println!("  catch:   {:?}", sweep.state.series("catch")?);
    println!("  biomass: {:?}", sweep.state.series("biomass")?);

    Ok(())
}
