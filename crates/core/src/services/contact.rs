//! Contact form submissions.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use obf_common::{AppError, AppResult};
use obf_richtext::html_escape;
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use super::email::{Mailer, OutgoingEmail};

/// A contact form submission. Every field is required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 128))]
    pub first_name: String,
    #[validate(length(min = 1, max = 128))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 256))]
    pub organization: String,
    #[validate(length(min = 1, max = 256))]
    pub role: String,
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
}

impl ContactSubmission {
    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            organization: self.organization.trim().to_string(),
            role: self.role.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    fn rows(&self) -> [(&'static str, &str); 6] {
        [
            ("First Name", &self.first_name),
            ("Last Name", &self.last_name),
            ("Email Address", &self.email),
            ("Phone Number", &self.phone_number),
            ("Organization/Affiliation", &self.organization),
            ("Role/Title", &self.role),
        ]
    }
}

/// Forwards contact form submissions to the site's inbox.
#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    recipients: Vec<String>,
}

impl ContactService {
    /// Create a new contact service.
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, recipients: Vec<String>) -> Self {
        Self { mailer, recipients }
    }

    /// Validate a submission and mail it to the recipients.
    pub async fn submit(&self, submission: ContactSubmission) -> AppResult<()> {
        let submission = submission.trimmed();
        submission.validate()?;

        if self.recipients.is_empty() {
            return Err(AppError::Config(
                "No recipients configured for notifications".to_string(),
            ));
        }

        let email = render(&submission, &self.recipients, Utc::now());
        if let Err(e) = self.mailer.send(email).await {
            error!(error = %e, "Failed to send contact form notification");
            return Err(e);
        }

        info!(organization = %submission.organization, "Contact form submitted");
        Ok(())
    }
}

fn render(submission: &ContactSubmission, recipients: &[String], at: DateTime<Utc>) -> OutgoingEmail {
    let timestamp = at.format("%b %d, %Y, %H:%M:%S");

    let mut html = String::from(
        "<!DOCTYPE html><html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\"></head><body>",
    );
    let _ = write!(
        html,
        "<h1>New Contact Form Submission</h1><p>Submitted on {timestamp} UTC</p><table>"
    );
    for (label, value) in submission.rows() {
        let _ = write!(
            html,
            "<tr><td><strong>{label}</strong></td><td>{}</td></tr>",
            html_escape(value)
        );
    }
    let _ = write!(
        html,
        "<tr><td><strong>Message</strong></td><td style=\"white-space:pre-wrap\">{}</td></tr></table>\
         <p>This message was submitted through the One Big Future contact form.</p></body></html>",
        html_escape(&submission.message)
    );

    let mut text = format!("New Contact Form Submission\nSubmitted on {timestamp} UTC\n\n");
    for (label, value) in submission.rows() {
        let _ = writeln!(text, "{label}: {value}");
    }
    let _ = write!(
        text,
        "\nMessage:\n{}\n\n---\nThis message was submitted through the One Big Future contact form.",
        submission.message
    );

    OutgoingEmail {
        to: recipients.to_vec(),
        subject: format!("New Contact Form Submission \u{2022} {timestamp} UTC"),
        html,
        text,
        reply_to: Some(submission.email.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::email::testing::RecordingMailer;
    use chrono::TimeZone;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            first_name: "  Asha ".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone_number: "+91 98765 43210".to_string(),
            organization: "R&D <Labs>".to_string(),
            role: "Director".to_string(),
            message: "Hello\nthere".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_sends_to_recipients() {
        let mailer = Arc::new(RecordingMailer::default());
        let service = ContactService::new(mailer.clone(), vec!["arun@t9l.com".to_string()]);

        service.submit(submission()).await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["arun@t9l.com".to_string()]);
        assert!(sent[0].text.contains("First Name: Asha\n"));
        assert!(sent[0].html.contains("R&amp;D &lt;Labs&gt;"));
    }

    #[tokio::test]
    async fn test_blank_or_malformed_fields_are_rejected() {
        let service = ContactService::new(
            Arc::new(RecordingMailer::default()),
            vec!["arun@t9l.com".to_string()],
        );

        let blank = ContactSubmission {
            role: "   ".to_string(),
            ..submission()
        };
        assert!(matches!(service.submit(blank).await, Err(AppError::Validation(_))));

        let bad_email = ContactSubmission {
            email: "asha@".to_string(),
            ..submission()
        };
        assert!(matches!(service.submit(bad_email).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_mail_failure_is_a_server_error() {
        let service = ContactService::new(
            Arc::new(RecordingMailer::failing()),
            vec!["arun@t9l.com".to_string()],
        );

        let err = service.submit(submission()).await.unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_render_uses_utc_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        let email = render(&submission().trimmed(), &["x@example.com".to_string()], at);

        assert_eq!(
            email.subject,
            "New Contact Form Submission \u{2022} Mar 07, 2025, 09:05:01 UTC"
        );
        assert!(email.text.ends_with("contact form."));
        assert_eq!(email.reply_to.as_deref(), Some("asha@example.com"));
    }
}
