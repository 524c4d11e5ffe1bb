use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::gateway::DataGateway;
use crate::intake::{IntakeSession, ValidProfile};
use crate::models::{FormatNumberResponse, IntakeRequest};
use crate::utils::format_whatsapp_input;

pub const CREATE_PROFILE_PROCEDURE: &str = "create_player_profile";

pub const GENERIC_SUBMIT_ERROR: &str =
    "There was an error submitting your form. Please try again.";

/// Known constraint-violation signatures and the message shown for each, checked in order.
const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    (
        "customers_email_unique",
        "An account with this email address already exists. Please use a different email or contact support if you need help.",
    ),
    (
        "duplicate key value violates unique constraint",
        "This information appears to already exist in our system. Please check your details or contact support for assistance.",
    ),
    (
        "not-null constraint",
        "Some required information is missing. Please check all required fields and try again.",
    ),
    (
        "foreign key constraint",
        "There was an issue with your selection. Please refresh the page and try again.",
    ),
    (
        "check constraint",
        "Some of your information doesn't meet our requirements. Please check your details and try again.",
    ),
];

/// Message shown to the customer for a failed submission.
pub fn submission_error_message(err: &AppError) -> String {
    let Some(raw) = err.remote_message() else {
        return GENERIC_SUBMIT_ERROR.to_string();
    };

    CONSTRAINT_MESSAGES
        .iter()
        .find(|(signature, _)| raw.contains(signature))
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| {
            if raw.trim().is_empty() {
                GENERIC_SUBMIT_ERROR.to_string()
            } else {
                raw
            }
        })
}

/// Named arguments for the profile-creation procedure.
pub fn create_profile_args(profile: &ValidProfile, accepted_at: DateTime<Utc>) -> Value {
    let consoles: Vec<&str> = profile.consoles.iter().map(|c| c.id()).collect();
    let retro_consoles: Vec<&str> = profile.retro_consoles.iter().map(|c| c.id()).collect();
    let categories: Vec<&str> = profile.shop_categories.iter().map(|c| c.id()).collect();

    json!({
        "p_full_name": profile.full_name,
        "p_whatsapp_country_code": profile.whatsapp_country_code,
        "p_whatsapp_number": profile.whatsapp_number,
        "p_email": profile.email,
        "p_custom_country_code": profile.custom_country_code,
        "p_terms_accepted": profile.terms_accepted,
        "p_terms_accepted_at": accepted_at.to_rfc3339(),
        "p_shop_categories": categories,
        "p_consoles": consoles,
        "p_retro_consoles": retro_consoles,
    })
}

fn id_from_value(value: Value) -> String {
    match value {
        Value::String(id) => id,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub struct IntakeService {
    gateway: Arc<dyn DataGateway>,
    home_country_code: String,
}

impl IntakeService {
    pub fn new(gateway: Arc<dyn DataGateway>, home_country_code: String) -> Self {
        Self {
            gateway,
            home_country_code,
        }
    }

    pub fn home_country_code(&self) -> &str {
        &self.home_country_code
    }

    pub fn session_from_request(&self, request: &IntakeRequest) -> IntakeSession {
        IntakeSession::new(request.to_form(&self.home_country_code))
    }

    /// Live formatting for a number being typed under `country_code`.
    pub fn format_number(&self, country_code: &str, value: &str) -> FormatNumberResponse {
        let home = country_code == self.home_country_code;
        FormatNumberResponse {
            value: format_whatsapp_input(value, home),
            placeholder: if home {
                "xxx-xxxx".to_string()
            } else {
                "Enter WhatsApp number".to_string()
            },
        }
    }

    /// Validates and submits the session's form with one procedure call.
    ///
    /// Validation failures keep the session editing and return
    /// [`AppError::InvalidForm`]. Remote failures move it to `Error` and come
    /// back as [`AppError::RemoteError`] carrying the customer-facing message.
    pub async fn submit(&self, session: &mut IntakeSession) -> AppResult<String> {
        let profile = match session.begin_submit() {
            None => {
                return Err(AppError::ValidationError(
                    "Form is not open for submission".to_string(),
                ));
            }
            Some(Err(errors)) => {
                log::warn!("Form validation errors: {errors}");
                return Err(AppError::InvalidForm(errors));
            }
            Some(Ok(profile)) => profile,
        };

        log::debug!(
            "Form submit (redacted): categories={:?} consoles={} retro_consoles={}",
            profile.shop_categories,
            profile.consoles.len(),
            profile.retro_consoles.len()
        );

        let args = create_profile_args(&profile, Utc::now());
        match self.gateway.call(CREATE_PROFILE_PROCEDURE, args).await {
            Ok(value) => {
                let customer_id = id_from_value(value);
                log::info!("Player profile created with id {customer_id}");
                session.succeed(customer_id.clone());
                Ok(customer_id)
            }
            Err(err) => {
                log::error!("Player profile creation failed: {err}");
                let message = submission_error_message(&err);
                let code = match &err {
                    AppError::RemoteError { code, .. } => code.clone(),
                    _ => None,
                };
                session.fail(message.clone());
                Err(AppError::remote(message, code))
            }
        }
    }

    /// Convenience for stateless callers: build a session from `request`, submit it,
    /// and hand back the finished session alongside the outcome.
    pub async fn submit_request(
        &self,
        request: &IntakeRequest,
    ) -> (IntakeSession, AppResult<String>) {
        let mut session = self.session_from_request(request);
        let result = self.submit(&mut session).await;
        (session, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::{MemoryGateway, Recorded};
    use crate::intake::{FormField, FormState, IntakeForm};
    use crate::models::{Console, RetroConsole, ShopCategory};
    use chrono::TimeZone;

    fn request() -> IntakeRequest {
        IntakeRequest {
            full_name: "Ana Gomez".into(),
            email: "A@B.com ".into(),
            whatsapp_country_code: "+1 (246)".into(),
            custom_country_code: None,
            whatsapp_number: "246-1234".into(),
            shop_categories: vec![ShopCategory::VideoGames],
            selected_consoles: vec![Console::Ps5, Console::Retro],
            selected_retro_consoles: vec![RetroConsole::Ps2],
            accepted_terms: true,
        }
    }

    fn service(gateway: Arc<MemoryGateway>) -> IntakeService {
        IntakeService::new(gateway, "+1 (246)".to_string())
    }

    #[tokio::test]
    async fn test_submit_issues_one_call_with_normalized_fields() {
        let gateway = Arc::new(
            MemoryGateway::new().returning(CREATE_PROFILE_PROCEDURE, json!("cust-42")),
        );
        let (session, result) = service(gateway.clone()).submit_request(&request()).await;

        assert_eq!(result.unwrap(), "cust-42");
        assert_eq!(
            session.state(),
            &FormState::Success {
                customer_id: "cust-42".into()
            }
        );

        let calls = gateway.recorded();
        assert_eq!(calls.len(), 1);
        let Recorded::Call { procedure, args } = &calls[0] else {
            panic!("expected a procedure call");
        };
        assert_eq!(procedure, CREATE_PROFILE_PROCEDURE);
        assert_eq!(args["p_email"], json!("a@b.com"));
        assert_eq!(args["p_custom_country_code"], Value::Null);
        assert_eq!(args["p_shop_categories"], json!(["video_games"]));
        assert_eq!(args["p_consoles"], json!(["ps5", "retro"]));
        assert_eq!(args["p_retro_consoles"], json!(["ps2"]));
        assert_eq!(args["p_terms_accepted"], json!(true));
        assert!(args["p_terms_accepted_at"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_gateway() {
        let gateway = Arc::new(MemoryGateway::new());
        let mut bad = request();
        bad.accepted_terms = false;
        bad.email = "nope".into();

        let (session, result) = service(gateway.clone()).submit_request(&bad).await;
        match result {
            Err(AppError::InvalidForm(errors)) => {
                assert_eq!(errors.first().unwrap().field, FormField::Email);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(session.state(), &FormState::Editing);
        assert!(gateway.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_gets_specific_message() {
        let gateway = Arc::new(MemoryGateway::new().failing(
            CREATE_PROFILE_PROCEDURE,
            "duplicate key value violates unique constraint \"customers_email_unique\"",
        ));
        let (session, result) = service(gateway).submit_request(&request()).await;

        let expected = CONSTRAINT_MESSAGES[0].1;
        match result {
            Err(AppError::RemoteError { message, .. }) => assert_eq!(message, expected),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(
            session.state(),
            &FormState::Error {
                message: expected.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_retry_after_failure_can_succeed() {
        let gateway = Arc::new(
            MemoryGateway::new()
                .failing(CREATE_PROFILE_PROCEDURE, "connection reset")
                .returning(CREATE_PROFILE_PROCEDURE, json!("cust-7")),
        );
        let service = service(gateway.clone());
        let mut session = service.session_from_request(&request());

        assert!(service.submit(&mut session).await.is_err());
        assert_eq!(
            session.state(),
            &FormState::Error {
                message: "connection reset".into()
            }
        );

        gateway.recover(CREATE_PROFILE_PROCEDURE);
        assert!(session.retry());
        assert_eq!(service.submit(&mut session).await.unwrap(), "cust-7");
    }

    #[test]
    fn test_submission_error_messages() {
        let msg = |raw: &str| submission_error_message(&AppError::remote(raw, None));
        assert_eq!(
            msg("null value in column \"full_name\" violates not-null constraint"),
            CONSTRAINT_MESSAGES[2].1
        );
        assert_eq!(
            msg("insert violates foreign key constraint \"fk_customer\""),
            CONSTRAINT_MESSAGES[3].1
        );
        assert_eq!(
            msg("new row violates check constraint \"number_format\""),
            CONSTRAINT_MESSAGES[4].1
        );
        assert_eq!(
            msg("duplicate key value violates unique constraint \"customers_pkey\""),
            CONSTRAINT_MESSAGES[1].1
        );
        assert_eq!(msg("timeout"), "timeout");
        assert_eq!(msg("  "), GENERIC_SUBMIT_ERROR);
        assert_eq!(
            submission_error_message(&AppError::ConfigError("Missing SUPABASE_URL".into())),
            GENERIC_SUBMIT_ERROR
        );
    }

    #[test]
    fn test_create_profile_args_for_other_country_code() {
        let mut form = IntakeForm::new("+1 (246)");
        form.full_name = "Rui".into();
        form.email = "rui@example.pt".into();
        form.select_country_code("other");
        form.set_custom_country_code("+351");
        form.set_whatsapp_number("912345678");
        form.accepted_terms = true;

        let profile = crate::intake::validate(&form).unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let args = create_profile_args(&profile, at);
        assert_eq!(args["p_whatsapp_country_code"], json!("other"));
        assert_eq!(args["p_custom_country_code"], json!("+351"));
        assert_eq!(args["p_terms_accepted_at"], json!("2025-03-01T09:30:00+00:00"));
        assert_eq!(args["p_consoles"], json!([]));
    }

    #[test]
    fn test_format_number() {
        let gateway = Arc::new(MemoryGateway::new());
        let service = service(gateway);
        let formatted = service.format_number("+1 (246)", "2461234567");
        assert_eq!(formatted.value, "246-1234");
        assert_eq!(formatted.placeholder, "xxx-xxxx");
        assert_eq!(service.format_number("+44", "020 7946").value, "0207946");
    }
}
