// Contact form submission.
// Gates sends behind the cooldown, an email shape check, and a per-form token.

use std::time::Duration;

use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::clock::{Clock, SystemClock};
use crate::error::{FolioError, Result};
use crate::security::{SubmissionGate, escape_special_chars, generate_csrf_token, is_valid_email};
use crate::telemetry::{Level, Reason, Telemetry};

const FORMSPREE_BASE: &str = "https://formspree.io/f";

/// Fields of the contact form, plus the token it was issued with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub token: String,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    RateLimited { remaining: Duration },
    InvalidEmail,
    StaleForm,
    Failed(String),
}

impl SubmitOutcome {
    /// Inline message shown under the form; `None` clears it.
    pub fn inline_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Sent => None,
            SubmitOutcome::RateLimited { remaining } => Some(format!(
                "Please wait {}s before submitting again",
                remaining.as_millis().div_ceil(1000)
            )),
            SubmitOutcome::InvalidEmail => Some("Please enter a valid email address".to_string()),
            SubmitOutcome::StaleForm => {
                Some("This form has expired, please review and send again".to_string())
            }
            SubmitOutcome::Failed(_) => {
                Some("Message could not be sent, please try again later".to_string())
            }
        }
    }
}

/// Delivers a validated form somewhere.
#[allow(async_fn_in_trait)]
pub trait FormTransport {
    async fn send(&mut self, form: &ContactForm) -> Result<()>;
}

/// Posts forms to a Formspree endpoint.
pub struct FormspreeClient {
    client: Client,
    endpoint: String,
}

impl FormspreeClient {
    pub fn new(form_id: &str) -> Result<Self> {
        Self::with_endpoint(format!("{}/{}", FORMSPREE_BASE, form_id))
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("folio-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(FolioError::Api)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl FormTransport for FormspreeClient {
    async fn send(&mut self, form: &ContactForm) -> Result<()> {
        let fields = [
            ("name", form.name.as_str()),
            ("email", form.email.as_str()),
            ("message", form.message.as_str()),
        ];
        let response = self
            .client
            .post(&self.endpoint)
            .form(&fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FolioError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            })
        }
    }
}

/// Owns the submission gate and the current form token.
pub struct ContactController<C: Clock = SystemClock> {
    gate: SubmissionGate<C>,
    token: String,
}

impl<C: Clock> ContactController<C> {
    pub fn new(gate: SubmissionGate<C>) -> Self {
        Self {
            gate,
            token: generate_csrf_token(),
        }
    }

    /// A blank form bound to the current token.
    pub fn new_form(&self) -> ContactForm {
        ContactForm {
            token: self.token.clone(),
            ..ContactForm::default()
        }
    }

    /// Run the checks in order and send the form if they all pass.
    ///
    /// A rejected attempt never reaches the transport. A successful send
    /// rotates the token so the same form cannot be posted twice.
    pub async fn submit<T: FormTransport>(
        &mut self,
        form: &ContactForm,
        transport: &mut T,
        telemetry: &mut dyn Telemetry,
    ) -> SubmitOutcome {
        if !self.gate.try_acquire() {
            let remaining = self.gate.remaining_cooldown();
            telemetry.report(
                Level::Warn,
                Reason::RapidSubmission,
                &format!("rapid form submission, retry in {}ms", remaining.as_millis()),
            );
            return SubmitOutcome::RateLimited { remaining };
        }

        let email = form.email.trim();
        if !is_valid_email(email) {
            telemetry.report(
                Level::Warn,
                Reason::InvalidEmail,
                &format!("invalid email submission attempt ({} chars)", email.chars().count()),
            );
            return SubmitOutcome::InvalidEmail;
        }

        if form.token != self.token {
            telemetry.report(
                Level::Warn,
                Reason::TokenMismatch,
                "form token does not match the issued token",
            );
            return SubmitOutcome::StaleForm;
        }

        let outgoing = ContactForm {
            email: email.to_string(),
            ..form.clone()
        };
        match transport.send(&outgoing).await {
            Ok(()) => {
                self.token = generate_csrf_token();
                telemetry.report(
                    Level::Info,
                    Reason::Submitted,
                    &format!("message from {} sent", escape_special_chars(form.name.trim())),
                );
                SubmitOutcome::Sent
            }
            Err(e) => {
                telemetry.report(Level::Error, Reason::SubmitFailed, &e.to_string());
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }
}
