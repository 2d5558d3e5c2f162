//! Account actions: register, login, logout.

use super::{JobBoardClient, NavigationTarget};
use crate::api::{endpoints, ApiRequest, Transport};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::form::FormSubmission;
use crate::domain::session::SessionUser;
use serde::Deserialize;
use serde_json::json;

const REGISTER_FAILED: &str = "Sorry: Could not create account try again.";
const LOGIN_REJECTED: &str = "Incorrect Password try again.";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

impl<T: Transport> JobBoardClient<T> {
    /// Creates an account. The session is not touched; the user signs in
    /// afterwards.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Validation`] if `username`, `email`, `password`,
    ///   `confirmation` or `role` is missing, or the passwords differ
    /// - [`JobBoardError::Remote`] if the server refuses the account
    /// - [`JobBoardError::Network`] on transport failure
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn register(&self, form: &FormSubmission) -> Result<NavigationTarget> {
        let [username, email, password, confirmation, role] = form.require(
            ["username", "email", "password", "confirmation", "role"],
            "Inputs must be filled.",
        )?;
        if password != confirmation {
            return Err(JobBoardError::Validation(
                "Password do not match".to_string(),
            ));
        }

        let body = json!({
            "name": username,
            "email": email,
            "password": password,
            "role": role,
            "phone": form.text("phone"),
            "gender": form.text("gender"),
        });

        let response = self
            .dispatch(ApiRequest::post(endpoints::REGISTER).with_json(body))
            .await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "registration refused");
            return Err(JobBoardError::Remote {
                status: response.status,
                message: REGISTER_FAILED.to_string(),
                payload: response.body,
            });
        }

        tracing::info!(email = %email, "account created");
        Ok(NavigationTarget::Login)
    }

    /// Signs in and stores the token and user together.
    ///
    /// A rejected or failed login leaves the existing session as it was.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Validation`] if `email` or `password` is missing
    /// - [`JobBoardError::Auth`] if the server rejects the credentials
    /// - [`JobBoardError::Network`] on transport failure or a malformed reply
    /// - [`JobBoardError::Storage`] if the session cannot be persisted
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn login(&self, form: &FormSubmission) -> Result<NavigationTarget> {
        let [email, password] =
            form.require(["email", "password"], "Please type email and password.")?;

        let response = self
            .dispatch(
                ApiRequest::post(endpoints::LOGIN)
                    .with_json(json!({ "email": email, "password": password })),
            )
            .await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "login rejected");
            return Err(JobBoardError::Auth(LOGIN_REJECTED.to_string()));
        }

        let LoginResponse { token, user } = response.json()?;
        let user_id = user.id.clone();
        let version = self.session.sign_in(token, user)?;

        tracing::info!(user_id = %user_id, version = version, "signed in");
        Ok(NavigationTarget::JobListing)
    }

    /// Clears the token and user.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Storage`] if the backend cannot be updated.
    pub fn logout(&self) -> Result<NavigationTarget> {
        let version = self.session.sign_out()?;
        tracing::info!(version = version, "signed out");
        Ok(NavigationTarget::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{client, signed_in_client};
    use super::*;
    use crate::api::{Method, RequestBody};
    use crate::domain::ErrorKind;

    fn registration() -> FormSubmission {
        FormSubmission::new()
            .with_text("username", "Ada")
            .with_text("email", "ada@example.com")
            .with_text("password", "s3cret")
            .with_text("confirmation", "s3cret")
            .with_text("role", "user")
            .with_text("phone", "555-0100")
    }

    #[tokio::test]
    async fn register_sends_renamed_fields() {
        let (client, transport) = client();
        transport.reply(201, json!({ "message": "created" }));

        let target = client.register(&registration()).await.unwrap();
        assert_eq!(target, NavigationTarget::Login);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/user/register");
        assert_eq!(request.bearer, None);
        let RequestBody::Json(body) = request.body else {
            panic!("expected JSON body");
        };
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["phone"], "555-0100");
        assert!(body["gender"].is_null());
        assert!(!client.session().snapshot().session.is_authenticated());
    }

    #[tokio::test]
    async fn register_with_any_required_field_missing_stays_offline() {
        let fields = [
            ("username", "Ada"),
            ("email", "ada@example.com"),
            ("password", "s3cret"),
            ("confirmation", "s3cret"),
            ("role", "user"),
        ];

        for skipped in fields.iter().map(|(name, _)| *name) {
            let (client, transport) = client();
            let form = fields
                .iter()
                .filter(|(name, _)| *name != skipped)
                .fold(FormSubmission::new(), |form, (name, value)| {
                    form.with_text(*name, *value)
                });

            let err = client.register(&form).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "missing {skipped}");
            assert!(transport.requests().is_empty(), "missing {skipped}");
        }
    }

    #[tokio::test]
    async fn register_rejects_mismatched_passwords_offline() {
        let (client, transport) = client();
        let form = FormSubmission::new()
            .with_text("username", "Ada")
            .with_text("email", "ada@example.com")
            .with_text("password", "s3cret")
            .with_text("confirmation", "other")
            .with_text("role", "user");

        let err = client.register(&form).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Password do not match");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn register_failure_uses_fixed_message() {
        let (client, transport) = client();
        transport.reply(409, json!({ "error": "email taken" }));

        let err = client.register(&registration()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.message(), REGISTER_FAILED);
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let (client, transport) = client();
        transport.reply(
            200,
            json!({ "token": "tok-1", "user": { "_id": "u1", "name": "Ada", "role": "user" } }),
        );

        let form = FormSubmission::new()
            .with_text("email", "ada@example.com")
            .with_text("password", "s3cret");
        let target = client.login(&form).await.unwrap();

        assert_eq!(target, NavigationTarget::JobListing);
        assert_eq!(client.session().token().as_deref(), Some("tok-1"));
        assert_eq!(client.session().current_user().unwrap().id, "u1");
    }

    #[tokio::test]
    async fn login_accepts_user_with_both_id_keys() {
        let (client, transport) = client();
        transport.reply(
            200,
            json!({ "token": "tok-2", "user": { "_id": "u4", "id": "u4", "name": "Bo" } }),
        );

        let form = FormSubmission::new()
            .with_text("email", "bo@example.com")
            .with_text("password", "s3cret");
        client.login(&form).await.unwrap();

        assert_eq!(client.session().current_user().unwrap().id, "u4");
    }

    #[tokio::test]
    async fn rejected_login_keeps_previous_session() {
        let (client, transport) = signed_in_client("u9", "user");
        let before = client.session().snapshot();
        transport.reply(401, json!({ "error": "bad credentials" }));

        let form = FormSubmission::new()
            .with_text("email", "ada@example.com")
            .with_text("password", "wrong");
        let err = client.login(&form).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.message(), LOGIN_REJECTED);
        assert_eq!(client.session().snapshot(), before);
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let (client, transport) = client();
        let form = FormSubmission::new().with_text("email", "ada@example.com");

        let err = client.login(&form).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn logout_clears_session() {
        let (client, _transport) = signed_in_client("u1", "user");
        assert_eq!(client.logout().unwrap(), NavigationTarget::Login);
        assert!(client.session().token().is_none());
        assert!(client.session().current_user().is_none());
    }
}
