//! Owner notification email. Message submission spawns the send and only
//! logs failures; delivery is best-effort by contract.

use anyhow::Result;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as Email, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::site::Message;

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    owner_address: String,
}

impl Mailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
            owner_address: config.owner_address.clone(),
        })
    }

    /// Sends the owner a plain-text copy of an inbound contact message.
    pub async fn notify_new_message(&self, message: &Message) -> Result<()> {
        let subject = match &message.subject {
            Some(subject) => format!("New portfolio message: {subject}"),
            None => format!("New portfolio message from {}", message.name),
        };

        let email = Email::builder()
            .from(self.from_address.parse()?)
            .to(self.owner_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(render_notification(message))?;

        self.transport.send(email).await?;
        Ok(())
    }
}

fn render_notification(message: &Message) -> String {
    format!(
        "From: {} <{}>\nReceived: {}\n\n{}",
        message.name,
        message.email,
        message.created_at.format("%Y-%m-%d %H:%M UTC"),
        message.body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_notification_contains_sender_and_body() {
        let message = Message {
            id: Uuid::new_v4(),
            name: "Visitor".to_string(),
            email: "visitor@example.com".to_string(),
            subject: None,
            body: "Love the site!".to_string(),
            read: false,
            created_at: Utc::now(),
        };
        let text = render_notification(&message);
        assert!(text.contains("Visitor <visitor@example.com>"));
        assert!(text.contains("Love the site!"));
    }
}
