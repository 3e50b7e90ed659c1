// Account creation: profile form -> one-time code -> registration continuation

use serde::{Deserialize, Serialize};
use statig::prelude::*;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::api::types::ProfileFields;
use crate::api::ProfileSync;
use crate::identity::{IdentityError, IdentityProvider, SignupRequest, VerificationStatus};
use crate::navigation::{Navigator, Route};
use crate::session::Session;
use crate::workflows::profile_sync::{dual_sync, SyncOutcome};

const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Individual,
    Institution,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Individual => "individual",
            AccountType::Institution => "institution",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(AccountType::Individual),
            "institution" => Ok(AccountType::Institution),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

/// Where a signup deep link leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupEntry {
    Engage(AccountType),
    Redirect(Route),
}

impl SignupEntry {
    /// Anything but a known account type goes back to the type picker
    pub fn resolve(type_param: Option<&str>) -> Self {
        match type_param.map(AccountType::from_str) {
            Some(Ok(account_type)) => SignupEntry::Engage(account_type),
            _ => SignupEntry::Redirect(Route::AccountTypeSelection),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEvent {
    CodeSent { signup_id: String, email: String },
    ProfileRejected { message: String },
    CodeRejected { message: String },
    Verified { account_type: AccountType },
    Expired { message: String },
    Restart,
}

/// Step machine for account creation
#[derive(Debug, Default)]
pub struct SignupMachine;

#[state_machine(initial = "State::form(None)", state(derive(Debug, Clone, PartialEq, Eq)))]
impl SignupMachine {
    #[state]
    fn form(error: &mut Option<String>, event: &SignupEvent) -> Outcome<State> {
        match event {
            SignupEvent::CodeSent { signup_id, email } => {
                info!(%signup_id, "Verification code sent, waiting for code");
                Transition(State::verify(signup_id.clone(), email.clone(), None))
            }
            SignupEvent::ProfileRejected { message } => {
                *error = Some(message.clone());
                Handled
            }
            _ => Handled,
        }
    }

    #[state]
    fn verify(
        signup_id: &mut String,
        email: &mut String,
        error: &mut Option<String>,
        event: &SignupEvent,
    ) -> Outcome<State> {
        match event {
            SignupEvent::CodeRejected { message } => {
                *error = Some(message.clone());
                Handled
            }
            SignupEvent::Verified { account_type } => {
                info!(%signup_id, %email, "Sign-up verified");
                Transition(State::complete(*account_type))
            }
            SignupEvent::Expired { message } => Transition(State::failed(message.clone())),
            SignupEvent::Restart => Transition(State::form(None)),
            _ => Handled,
        }
    }

    #[state]
    fn complete(account_type: &mut AccountType, event: &SignupEvent) -> Outcome<State> {
        tracing::debug!(account_type = account_type.as_str(), ?event, "Sign-up already complete");
        Handled
    }

    #[state]
    fn failed(message: &mut String, event: &SignupEvent) -> Outcome<State> {
        match event {
            SignupEvent::Restart => Transition(State::form(None)),
            _ => {
                tracing::debug!(%message, ?event, "Sign-up failed, waiting for restart");
                Handled
            }
        }
    }
}

pub type SignupState = State;

/// Fields collected on the first step
#[derive(Debug, Clone, PartialEq)]
pub struct SignupProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl SignupProfile {
    fn validate(&self) -> Result<(), SignupError> {
        let blank = [&self.first_name, &self.last_name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty());
        if blank {
            return Err(SignupError::Validation(
                "Please fill in your first name, last name, email and password".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(SignupError::Validation("Please enter a valid email address".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Provider(#[from] IdentityError),
    #[error("Verification was not completed (status: {status}). Please check the code and try again.")]
    Incomplete { status: VerificationStatus },
    #[error("This action is not available at the current sign-up step")]
    WrongStep,
}

/// What a completed sign-up produced
#[derive(Debug, Clone, PartialEq)]
pub struct SignupCompletion {
    pub account_type: AccountType,
    pub route: Route,
    pub sync: SyncOutcome,
    /// Backend session built from the minted token, when minting worked
    pub session: Option<Session>,
}

/// Drives [`SignupMachine`] against the identity provider and the backend
pub struct SignupFlow {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileSync>,
    navigator: Arc<dyn Navigator>,
    account_type: AccountType,
    profile: Option<SignupProfile>,
    machine: StateMachine<SignupMachine>,
}

impl SignupFlow {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileSync>,
        navigator: Arc<dyn Navigator>,
        account_type: AccountType,
    ) -> Self {
        Self {
            identity,
            profiles,
            navigator,
            account_type,
            profile: None,
            machine: SignupMachine.state_machine(),
        }
    }

    pub fn state(&self) -> &SignupState {
        self.machine.state()
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    /// Inline error for the current step, if any
    pub fn current_error(&self) -> Option<&str> {
        match self.machine.state() {
            State::Form { error } => error.as_deref(),
            State::Verify { error, .. } => error.as_deref(),
            State::Failed { message } => Some(message.as_str()),
            State::Complete { .. } => None,
        }
    }

    /// Step one: create the pending sign-up and send the code
    pub async fn submit_profile(&mut self, profile: SignupProfile) -> Result<(), SignupError> {
        if !matches!(self.machine.state(), State::Form { .. }) {
            return Err(SignupError::WrongStep);
        }

        if let Err(e) = profile.validate() {
            self.machine.handle(&SignupEvent::ProfileRejected { message: e.to_string() });
            return Err(e);
        }

        let request = SignupRequest {
            first_name: profile.first_name.trim().to_string(),
            last_name: profile.last_name.trim().to_string(),
            email_address: profile.email.trim().to_string(),
            password: profile.password.clone(),
        };

        let result = async {
            let pending = self.identity.create_pending_signup(&request).await?;
            self.identity.send_verification_code(&pending.id).await?;
            Ok::<_, IdentityError>(pending)
        }
        .await;

        match result {
            Ok(pending) => {
                self.machine.handle(&SignupEvent::CodeSent {
                    signup_id: pending.id,
                    email: request.email_address,
                });
                self.profile = Some(profile);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Identity provider rejected sign-up");
                self.machine.handle(&SignupEvent::ProfileRejected { message: e.to_string() });
                Err(e.into())
            }
        }
    }

    /// Step two: check the code, then activate, sync and move on
    pub async fn verify_code(&mut self, code: &str) -> Result<SignupCompletion, SignupError> {
        let signup_id = match self.machine.state() {
            State::Verify { signup_id, .. } => signup_id.clone(),
            _ => return Err(SignupError::WrongStep),
        };

        let code = code.trim();
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            let err = SignupError::Validation(format!("The verification code must be {CODE_LENGTH} digits"));
            self.machine.handle(&SignupEvent::CodeRejected { message: err.to_string() });
            return Err(err);
        }

        let attempt = match self.identity.attempt_verification(&signup_id, code).await {
            Ok(attempt) => attempt,
            Err(e) => return Err(self.reject_code(e.into())),
        };

        if !attempt.is_complete() {
            info!(%signup_id, status = %attempt.status, "Verification not complete");
            return Err(self.reject_code(SignupError::Incomplete { status: attempt.status }));
        }

        let Some(session_id) = attempt.created_session_id else {
            return Err(self.reject_code(
                IdentityError::InvalidResponse("verification completed without a session".to_string()).into(),
            ));
        };

        if let Err(e) = self.identity.activate_session(&session_id).await {
            return Err(self.reject_code(e.into()));
        }
        info!(%session_id, "Identity session activated");

        let (sync, session) = self.sync_new_account(&session_id).await;

        self.machine.handle(&SignupEvent::Verified { account_type: self.account_type });
        let route = Route::RegisterContinuation { account_type: self.account_type };
        self.navigator.navigate(route);

        Ok(SignupCompletion {
            account_type: self.account_type,
            route,
            sync,
            session,
        })
    }

    /// Back to the profile form from verify or a failed attempt
    pub fn restart(&mut self) {
        self.machine.handle(&SignupEvent::Restart);
        self.profile = None;
    }

    fn reject_code(&mut self, err: SignupError) -> SignupError {
        match &err {
            SignupError::Provider(IdentityError::SignupExpired) => {
                self.machine.handle(&SignupEvent::Expired { message: err.to_string() });
            }
            _ => {
                self.machine.handle(&SignupEvent::CodeRejected { message: err.to_string() });
            }
        }
        err
    }

    async fn sync_new_account(&self, session_id: &str) -> (SyncOutcome, Option<Session>) {
        let token = match self.identity.mint_token(session_id).await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not mint access token, skipping profile sync");
                return (SyncOutcome::Failed, None);
            }
        };

        let fields = match &self.profile {
            Some(profile) => ProfileFields {
                first_name: profile.first_name.trim().to_string(),
                last_name: profile.last_name.trim().to_string(),
                email: profile.email.trim().to_string(),
                account_type: self.account_type.as_str().to_string(),
            },
            None => {
                warn!("No profile captured for this sign-up, skipping profile sync");
                return (SyncOutcome::Failed, Some(Session::new(token)));
            }
        };

        let outcome = dual_sync(self.profiles.as_ref(), &token, &fields).await;
        (outcome, Some(Session::new(token)))
    }
}
