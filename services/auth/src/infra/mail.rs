use askama::Template;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::CodeNotifier;
use crate::domain::types::LOGIN_CODE_TTL_SECS;
use crate::error::DeliveryFailure;

const LOGIN_CODE_SUBJECT: &str = "Code de vérification";

/// Greeting used when the account has no display name.
const FALLBACK_NAME: &str = "utilisateur";

#[derive(Template)]
#[template(path = "login_code.html")]
pub struct LoginCodeEmailTemplate<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub ttl_minutes: i64,
}

impl<'a> LoginCodeEmailTemplate<'a> {
    pub fn new(name: &'a str, code: &'a str) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() { FALLBACK_NAME } else { name },
            code,
            ttl_minutes: LOGIN_CODE_TTL_SECS / 60,
        }
    }
}

/// Login-code mailer. `Log` stands in when no SMTP relay is configured.
#[derive(Clone)]
pub enum MailNotifier {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    Log,
}

impl MailNotifier {
    /// Must run inside a tokio runtime: the pooled transport spawns its reaper.
    pub fn smtp(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        from: &str,
    ) -> anyhow::Result<Self> {
        let from: Mailbox = from.parse()?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?.port(port);
        if let Some((username, password)) = credentials {
            builder = builder.credentials(Credentials::new(username, password));
        }
        Ok(Self::Smtp {
            transport: builder.build(),
            from,
        })
    }
}

impl CodeNotifier for MailNotifier {
    async fn send_login_code(
        &self,
        email: &str,
        name: &str,
        code: &str,
    ) -> Result<(), DeliveryFailure> {
        let (transport, from) = match self {
            Self::Smtp { transport, from } => (transport, from),
            Self::Log => {
                tracing::info!(email, "smtp not configured, login code mail skipped");
                return Ok(());
            }
        };

        let to: Mailbox = email
            .parse()
            .map_err(|e| DeliveryFailure(format!("bad recipient: {e}")))?;
        let body = LoginCodeEmailTemplate::new(name, code)
            .render()
            .map_err(|e| DeliveryFailure(format!("template render failed: {e}")))?;
        let message = Message::builder()
            .from(from.clone())
            .to(to)
            .subject(LOGIN_CODE_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| DeliveryFailure(e.to_string()))?;

        transport
            .send(message)
            .await
            .map_err(|e| DeliveryFailure(e.to_string()))?;
        Ok(())
    }
}
