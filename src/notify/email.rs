//! Mail delivery through a sendmail-compatible command.
//!
//! The formatted message is piped to the stdin of the configured transport
//! command (`sendmail -i -t` by default), which reads the recipients from
//! the message headers. Keeping the transport external avoids carrying an
//! SMTP client; any MTA or wrapper script with a sendmail interface works.

use crate::error::{Result, SvnwatchError};
use chrono::Utc;
use std::io::Write;
use std::process::{Command, Stdio};

/// One outgoing notification mail.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

impl EmailMessage {
    /// Format the message with headers for a sendmail-style transport.
    pub fn format(&self) -> String {
        let mut message = String::new();
        message.push_str(&format!("From: {}\n", self.from));
        message.push_str(&format!("To: {}\n", self.to.join(", ")));
        message.push_str(&format!("Subject: {}\n", self.subject));
        message.push_str(&format!("Date: {}\n", Utc::now().to_rfc2822()));
        message.push_str(&format!("Message-ID: <{}>\n", message_id()));
        message.push_str("MIME-Version: 1.0\n");
        message.push_str("Content-Type: text/html; charset=utf-8\n");
        message.push_str("Content-Transfer-Encoding: 8bit\n");
        message.push('\n');
        message.push_str(&self.html_body);
        message.push('\n');
        message
    }
}

/// Unique-enough message id: timestamp plus the local hostname.
fn message_id() -> String {
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "localhost".to_string());
    format!("svnwatch.{}@{}", Utc::now().timestamp_micros(), host)
}

/// Pipe the formatted message to the transport command.
pub fn send_mail(message: &EmailMessage, sendmail_command: &str) -> Result<()> {
    let args = shell_words::split(sendmail_command).map_err(|e| {
        SvnwatchError::NotifyError(format!(
            "invalid sendmail command '{}': {}",
            sendmail_command, e
        ))
    })?;

    let Some((program, program_args)) = args.split_first() else {
        return Err(SvnwatchError::NotifyError(
            "sendmail command is empty".to_string(),
        ));
    };

    let mut child = Command::new(program)
        .args(program_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            SvnwatchError::NotifyError(format!("failed to execute '{}': {}", program, e))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(message.format().as_bytes())
            .map_err(|e| SvnwatchError::NotifyError(format!("failed to write message: {}", e)))?;
    }

    let output = child.wait_with_output().map_err(|e| {
        SvnwatchError::NotifyError(format!("failed to wait for '{}': {}", program, e))
    })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(SvnwatchError::NotifyError(format!(
            "'{}' exited with code {}: {}",
            program,
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> EmailMessage {
        EmailMessage {
            from: "jdoe@example.com".to_string(),
            to: vec![
                "dev@example.com".to_string(),
                "qa@example.com".to_string(),
            ],
            subject: "[svnwatch for infra, r3417] Bump infrastructure release.".to_string(),
            html_body: "<html><body>report</body></html>".to_string(),
        }
    }

    #[test]
    fn format_includes_all_headers() {
        let formatted = sample_message().format();

        assert!(formatted.starts_with("From: jdoe@example.com\n"));
        assert!(formatted.contains("To: dev@example.com, qa@example.com\n"));
        assert!(formatted.contains("Subject: [svnwatch for infra, r3417] Bump infrastructure release.\n"));
        assert!(formatted.contains("Content-Type: text/html; charset=utf-8\n"));
        assert!(formatted.contains("Message-ID: <svnwatch."));
    }

    #[test]
    fn format_separates_headers_from_body() {
        let formatted = sample_message().format();
        let (headers, body) = formatted.split_once("\n\n").unwrap();

        assert!(headers.contains("MIME-Version: 1.0"));
        assert!(body.contains("<html><body>report</body></html>"));
    }

    #[test]
    #[cfg(unix)]
    fn send_mail_pipes_to_command() {
        // A transport that swallows stdin and succeeds.
        let result = send_mail(&sample_message(), "sh -c 'cat > /dev/null'");
        assert!(result.is_ok());
    }

    #[test]
    #[cfg(unix)]
    fn send_mail_reports_failing_transport() {
        let err = send_mail(&sample_message(), "false").unwrap_err();
        assert!(matches!(err, SvnwatchError::NotifyError(_)));
    }

    #[test]
    fn send_mail_reports_missing_program() {
        let err = send_mail(&sample_message(), "/nonexistent/sendmail -t").unwrap_err();
        assert!(matches!(err, SvnwatchError::NotifyError(_)));
    }

    #[test]
    fn send_mail_rejects_empty_command() {
        let err = send_mail(&sample_message(), "").unwrap_err();
        assert!(err.to_string().contains("sendmail command is empty"));
    }
}
