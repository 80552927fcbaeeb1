//! Report delivery for svnwatch.
//!
//! A rendered report either goes out as an HTML mail to the module's
//! subscribers or, when the module configures `diff_dir`, the raw diff is
//! written to a file for out-of-band processing.

mod email;
mod file;

pub use email::{send_mail, EmailMessage};
pub use file::write_diff_file;

use crate::config::ModuleSettings;
use crate::error::Result;
use crate::svn::LogEntry;
use log::info;

/// Deliver one revision's report according to the module settings.
pub fn deliver(
    settings: &ModuleSettings,
    revision: u64,
    log: &LogEntry,
    html_report: &str,
    diff: &str,
) -> Result<()> {
    match &settings.diff_dir {
        Some(diff_dir) => {
            let path = write_diff_file(
                diff_dir,
                settings.group_by_date,
                &settings.name,
                revision,
                log,
                diff,
            )?;
            info!(
                "wrote diff for {} r{} to {}",
                settings.name,
                revision,
                path.display()
            );
            Ok(())
        }
        None => {
            let message = EmailMessage {
                from: format!("{}@{}", log.author, settings.from_domain),
                to: settings.subscribers.clone(),
                subject: format!(
                    "[svnwatch for {}, r{}] {}",
                    settings.name,
                    revision,
                    log.summary()
                ),
                html_body: html_report.to_string(),
            };
            info!(
                "sending mail for {} r{} to {}",
                settings.name,
                revision,
                settings.subscribers.join(", ")
            );
            send_mail(&message, &settings.sendmail_command)
        }
    }
}
