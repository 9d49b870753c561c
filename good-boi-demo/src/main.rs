mod delegate;
mod random_model;

use std::env;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use good_boi_core::{
    AuthorizationState, PreviewSurface, SessionConfiguration, SessionOrchestrator, ThreadExecutor,
};
use good_boi_core::sim::{AccessResponse, SimulatedCamera};

use delegate::TailWagger;
use random_model::RandomModel;

/// Usage: good-boi-demo [config.json] [seconds]
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => SessionConfiguration::load(Path::new(&path))?,
        None => SessionConfiguration::default(),
    };
    let seconds: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 5,
    };

    // First launch: the permission prompt has not been answered yet.
    let camera = SimulatedCamera::new()
        .with_authorization(AuthorizationState::Undetermined)
        .with_access_response(AccessResponse::Grant);

    let mut orchestrator = SessionOrchestrator::new(
        camera,
        RandomModel::default(),
        Arc::new(ThreadExecutor::default()),
        config,
    )?;
    let wagger = Arc::new(TailWagger::new());
    orchestrator.set_delegate(wagger.clone());

    orchestrator.setup_preview(PreviewSurface::new(1, 390, 844));
    orchestrator.start_session()?;
    orchestrator.run_for(Duration::from_secs(seconds));
    orchestrator.end_session();

    log::info!("final view: {:?}", wagger.view());
    println!("{}", serde_json::to_string_pretty(orchestrator.diagnostics())?);
    Ok(())
}
