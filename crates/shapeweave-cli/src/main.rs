//! shapeweave - evaluate boolean operations on a JSON scene
//!
//! Usage:
//!   shapeweave <scene.json>   Evaluate a scene file
//!   shapeweave -              Read the scene from stdin
//!   shapeweave <scene> <config.json>
//!                             Override the scene's engine config
//!
//! Prints the shapes left visible after every statement as JSON. Set
//! `RUST_LOG=debug` for per-operation detail.

mod scene;

use scene::{CliError, CliResult, Scene};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every statement succeeded.
fn run() -> CliResult<bool> {
    let mut args = env::args().skip(1);
    let path = args.next().ok_or(CliError::Usage)?;
    let mut scene = Scene::load(&path)?;
    if let Some(config) = args.next() {
        scene.load_config(&config)?;
    }
    let evaluation = scene.evaluate();
    log::info!("Consumed shapes: {:?}", evaluation.consumed_names());

    println!("{}", evaluation.visible_json()?);
    if !evaluation.succeeded() {
        log::warn!("{} statement(s) failed", evaluation.failures.len());
    }
    Ok(evaluation.succeeded())
}
