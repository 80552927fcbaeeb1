//! Implementation of the `check` command and the per-module check pass.

use crate::checkpoint::CheckpointStore;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::context::AppDirs;
use crate::diff;
use crate::error::Result;
use crate::notify;
use crate::report;
use crate::svn::SvnClient;
use log::{debug, info, warn};

/// Run a single check pass for one module from the command line.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let dirs = AppDirs::resolve(args.config.as_deref())?;
    let config = Config::load(&dirs.config_file)?;
    let checkpoints = CheckpointStore::new(&dirs.last_revs_dir);

    check_module(&config, &args.module, &checkpoints)
}

/// Check one module for new revisions and deliver a report per revision.
///
/// The checkpoint only advances after a revision is fully processed, so a
/// failed delivery leaves the revision to be retried on the next pass.
/// On the very first check the latest revision is recorded as a baseline
/// and no reports are sent.
pub fn check_module(config: &Config, module: &str, checkpoints: &CheckpointStore) -> Result<()> {
    let settings = config.module_settings(module)?;
    let template = report::load_template(settings.template_file.as_deref())?;
    let client = SvnClient::new(settings.repo.clone());

    info!(target: module, "checking {}", settings.repo);

    let latest = client.latest_revision()?;
    debug!(target: module, "latest remote revision {}", latest);

    let Some(last_checked) = checkpoints.read(module)? else {
        info!(target: module, "first check, recording baseline revision {}", latest);
        return checkpoints.write(module, latest);
    };
    debug!(target: module, "last checked revision {}", last_checked);

    if last_checked >= latest {
        info!(target: module, "no changes since last check");
        return Ok(());
    }

    let mut delivered = 0u64;
    for revision in (last_checked + 1)..=latest {
        debug!(target: module, "checking log for revision {}", revision);

        if let Some(mut log_entry) = client.log_entry(revision)? {
            info!(target: module, "processing revision {}", revision);

            let mut diff_text = client.diff(revision)?;
            if let Some(max) = settings.max_diff_size
                && diff_text.len() > max
            {
                info!(
                    target: module,
                    "diff size {} exceeds configured maximum {}, truncating",
                    diff_text.len(),
                    max
                );
                truncate_at_char_boundary(&mut diff_text, max);
            }

            log_entry.author_name = settings.author_display_name(&log_entry.author).to_string();

            let files = diff::parse(&diff_text, &settings.repo);
            let html = report::render_report(
                &template,
                module,
                revision,
                &log_entry,
                &diff_text,
                &files,
            );

            if let Err(e) = notify::deliver(&settings, revision, &log_entry, &html, &diff_text) {
                warn!(
                    target: module,
                    "delivery for revision {} failed, will retry next pass: {}", revision, e
                );
                return Err(e);
            }
            delivered += 1;
        }

        checkpoints.write(module, revision)?;
    }

    if delivered == 0 {
        info!(
            target: module,
            "no log entries between revisions {} and {}",
            last_checked + 1,
            latest
        );
    }
    Ok(())
}

/// Truncate a diff to at most `max` bytes without splitting a character.
fn truncate_at_char_boundary(text: &mut String, max: usize) {
    let mut cut = max;
    while cut > 0 && !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_a_byte_limit() {
        let mut text = "abcdef".to_string();
        truncate_at_char_boundary(&mut text, 4);
        assert_eq!(text, "abcd");
    }

    #[test]
    fn truncation_never_splits_characters() {
        let mut text = "a\u{00e9}\u{00e9}".to_string(); // 1 + 2 + 2 bytes
        truncate_at_char_boundary(&mut text, 2);
        assert_eq!(text, "a");
    }

    #[test]
    fn short_text_is_untouched() {
        let mut text = "short".to_string();
        truncate_at_char_boundary(&mut text, 100);
        assert_eq!(text, "short");
    }
}
