use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;
use crate::config::MailParameters;
use crate::errors::MailError;

/// Struct for sending the daily report over SMTP
pub struct Mail {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl Mail {
    /// Returns a new instance of the Mail struct
    ///
    /// The connection uses STARTTLS against the configured endpoint with
    /// the configured credentials.
    ///
    /// # Arguments
    ///
    /// * 'mail' - mail parameters from the configuration
    pub fn new(mail: &MailParameters) -> Result<Self, MailError> {
        let credentials = Credentials::new(mail.smtp_user.clone(), mail.smtp_password.clone());

        let transport = SmtpTransport::starttls_relay(&mail.smtp_endpoint)?
            .credentials(credentials)
            .build();

        Ok(
            Self {
                transport,
                from: mail.from.parse::<Mailbox>()?,
                to: mail.to.parse::<Mailbox>()?,
            }
        )
    }

    /// Sends a plain text mail with the given subject and body
    ///
    /// # Arguments
    ///
    /// * 'subject' - the subject of the mail
    /// * 'body' - the body of the mail
    pub fn send_mail(&self, subject: String, body: String) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        let _ = self.transport.send(&message)?;
        info!("report mail sent to {}", self.to);

        Ok(())
    }
}
