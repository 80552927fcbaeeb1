//! Implementation of the `run` command: the watcher loop.
//!
//! Each configured module gets its own watcher thread, named after the
//! module, looping check-then-sleep at the module's interval. Modules are
//! independent; a failing check in one never stalls the others. With
//! `--once` a single sequential pass replaces the loop, which is the mode
//! for cron-style setups.

use crate::checkpoint::CheckpointStore;
use crate::cli::RunArgs;
use crate::commands::check::check_module;
use crate::config::Config;
use crate::context::AppDirs;
use crate::error::{Result, SvnwatchError};
use log::{info, warn};
use std::thread;
use std::time::Duration;

pub fn cmd_run(args: RunArgs) -> Result<()> {
    let dirs = AppDirs::resolve(args.config.as_deref())?;
    let config = Config::load(&dirs.config_file)?;
    let checkpoints = CheckpointStore::new(&dirs.last_revs_dir);

    info!(
        "loaded {} module(s) from {}, state in {}",
        config.modules.len(),
        dirs.config_file.display(),
        dirs.root.display()
    );

    if args.once {
        return run_once(&config, &checkpoints);
    }

    let mut handles = Vec::new();
    for module in config.module_names() {
        let settings = config.module_settings(module)?;
        info!(
            "starting watcher for {} ({}), checking every {} minute(s)",
            module, settings.repo, settings.interval_minutes
        );

        let module = module.to_string();
        let config = config.clone();
        let checkpoints = checkpoints.clone();
        let interval = Duration::from_secs(settings.interval_minutes * 60);

        let handle = thread::Builder::new()
            .name(format!("watch-{}", module))
            .spawn(move || loop {
                if let Err(e) = check_module(&config, &module, &checkpoints) {
                    warn!(target: module.as_str(), "check failed: {}", e);
                }
                thread::sleep(interval);
            })
            .map_err(|e| {
                SvnwatchError::UserError(format!("failed to start watcher thread: {}", e))
            })?;
        handles.push(handle);
    }

    // Watcher threads run until the process is stopped.
    for handle in handles {
        let _ = handle.join();
    }
    Ok(())
}

/// One sequential pass over all modules; the first error is reported after
/// every module has had its turn.
fn run_once(config: &Config, checkpoints: &CheckpointStore) -> Result<()> {
    let mut first_error = None;

    for module in config.module_names() {
        if let Err(e) = check_module(config, module, checkpoints) {
            warn!(target: module, "check failed: {}", e);
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        None => Ok(()),
        Some(e) => Err(e),
    }
}
