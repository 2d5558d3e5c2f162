//! Job posting actions: create, update, delete, apply.

use super::{JobBoardClient, NavigationTarget};
use crate::api::{endpoints, ApiRequest, Transport};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::form::FormSubmission;
use crate::domain::job::Applicant;
use crate::domain::roster::ApplicantRoster;
use serde_json::{json, Value};

/// Whether a posting form creates a new posting or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostingMode {
    Create,
    Update { id: String },
}

/// Successful application: the entry to append to the roster and whatever
/// the server answered.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReceipt {
    pub applicant: Applicant,
    pub response: Value,
}

impl<T: Transport> JobBoardClient<T> {
    /// Creates or updates a posting owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Validation`] if any of `title`, `company_name`,
    ///   `requirements`, `position`, `description` is missing
    /// - [`JobBoardError::Auth`] without a signed-in user
    /// - [`JobBoardError::Remote`] carrying the server's error document
    #[tracing::instrument(level = "debug", skip(self, form))]
    pub async fn save_job_posting(
        &self,
        form: &FormSubmission,
        mode: PostingMode,
    ) -> Result<NavigationTarget> {
        let [title, company_name, requirements, position, description] = form.require(
            ["title", "company_name", "requirements", "position", "description"],
            "Please fill inputs.",
        )?;
        let user = self.require_user("save a job posting")?;

        let body = json!({
            "title": title,
            "companyName": company_name,
            "requirements": requirements,
            "position": position,
            "description": description,
            "uid": user.id,
        });
        let request = match &mode {
            PostingMode::Create => ApiRequest::post(endpoints::CREATE_POST),
            PostingMode::Update { id } => ApiRequest::patch(endpoints::update_post(id)),
        };

        let response = self.dispatch(request.with_json(body)).await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "posting rejected");
            return Err(response.into_remote_error("Could not save job posting"));
        }

        tracing::info!(title = %title, "posting saved");
        Ok(NavigationTarget::JobListing)
    }

    /// Deletes a posting. Callers gate this behind a confirmation step.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Remote`] or [`JobBoardError::Network`] on
    /// failure; either is also logged at error level.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete_job_posting(&self, job_id: &str) -> Result<NavigationTarget> {
        let response = self
            .dispatch(ApiRequest::delete(endpoints::delete_post(job_id)))
            .await
            .map_err(|e| {
                tracing::error!(job_id = %job_id, error = %e, "error during deletion");
                e
            })?;

        if !response.is_success() {
            let err = response.into_remote_error("Failed to delete");
            tracing::error!(job_id = %job_id, error = %err, "failed to delete");
            return Err(err);
        }

        tracing::info!(job_id = %job_id, "posting deleted");
        Ok(NavigationTarget::JobListing)
    }

    /// Applies the signed-in user to a posting.
    ///
    /// `roster` is the view's current applicant list; applying twice is
    /// refused before any request is made. The caller appends the returned
    /// applicant to its roster as an optimistic entry.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Auth`] without a signed-in user
    /// - [`JobBoardError::Application`] if already applied or the server
    ///   refuses
    /// - [`JobBoardError::Network`] on transport failure
    #[tracing::instrument(level = "debug", skip(self, roster))]
    pub async fn apply_to_job(
        &self,
        job_id: &str,
        roster: &ApplicantRoster,
    ) -> Result<ApplyReceipt> {
        let user = self.require_user("apply")?;
        if roster.contains(&user.id) {
            return Err(JobBoardError::Application(
                "You have already applied to this job.".to_string(),
            ));
        }

        let response = self
            .dispatch(
                ApiRequest::patch(endpoints::apply_post(job_id))
                    .with_json(json!({ "uid": user.id, "pid": job_id })),
            )
            .await?;
        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| "Could not apply to this job.".to_string());
            tracing::error!(job_id = %job_id, error = %message, "error during job application");
            return Err(JobBoardError::Application(message));
        }

        tracing::info!(job_id = %job_id, user_id = %user.id, "applied");
        Ok(ApplyReceipt {
            applicant: Applicant {
                id: user.id,
                name: user.name,
            },
            response: response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{client, signed_in_client};
    use super::*;
    use crate::api::{Method, RequestBody};
    use crate::domain::ErrorKind;

    fn posting_form() -> FormSubmission {
        FormSubmission::new()
            .with_text("title", "Engineer")
            .with_text("company_name", "Acme")
            .with_text("requirements", "SQL")
            .with_text("position", "mid")
            .with_text("description", "Build things")
    }

    #[tokio::test]
    async fn create_posts_camel_case_body_with_owner() {
        let (client, transport) = signed_in_client("u1", "recruiter");
        transport.reply(201, json!({ "_id": "p1" }));

        let target = client
            .save_job_posting(&posting_form(), PostingMode::Create)
            .await
            .unwrap();
        assert_eq!(target, NavigationTarget::JobListing);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/post/create");
        assert_eq!(request.bearer.as_deref(), Some("token-u1"));
        assert_eq!(request.content_type(), Some("application/json"));
        let RequestBody::Json(body) = request.body else {
            panic!("expected JSON body");
        };
        assert_eq!(body["companyName"], "Acme");
        assert_eq!(body["uid"], "u1");
    }

    #[tokio::test]
    async fn update_patches_by_id() {
        let (client, transport) = signed_in_client("u1", "recruiter");
        transport.reply(200, json!({}));

        client
            .save_job_posting(&posting_form(), PostingMode::Update { id: "p7".into() })
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/post/update/p7");
    }

    #[tokio::test]
    async fn missing_field_never_reaches_network() {
        let (client, transport) = signed_in_client("u1", "recruiter");
        let form = FormSubmission::new().with_text("title", "Engineer");

        let err = client
            .save_job_posting(&form, PostingMode::Create)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn save_requires_session() {
        let (client, transport) = client();
        let err = client
            .save_job_posting(&posting_form(), PostingMode::Create)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn save_failure_carries_server_payload() {
        let (client, transport) = signed_in_client("u1", "recruiter");
        transport.reply(422, json!({ "error": "title too long" }));

        let err = client
            .save_job_posting(&posting_form(), PostingMode::Create)
            .await
            .unwrap_err();
        match err {
            JobBoardError::Remote { status, message, payload } => {
                assert_eq!(status, 422);
                assert_eq!(message, "title too long");
                assert_eq!(payload["error"], "title too long");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_failure_is_returned() {
        let (client, transport) = signed_in_client("u1", "recruiter");
        transport.reply(403, json!({ "error": "not yours" }));

        let err = client.delete_job_posting("p1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(transport.last_request().unwrap().method, Method::Delete);
        assert_eq!(transport.last_request().unwrap().content_type(), None);
    }

    #[tokio::test]
    async fn already_applied_is_refused_offline() {
        let (client, transport) = signed_in_client("u1", "user");
        let roster = ApplicantRoster::from_server(&[Applicant {
            id: "u1".into(),
            name: "User u1".into(),
        }]);

        let err = client.apply_to_job("p1", &roster).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn pending_optimistic_entry_blocks_reapply() {
        let (client, transport) = signed_in_client("u1", "user");
        let mut roster = ApplicantRoster::new();
        roster.append_optimistic(Applicant {
            id: "u1".into(),
            name: "User u1".into(),
        });

        let err = client.apply_to_job("p1", &roster).await.unwrap_err();
        assert_eq!(err.message(), "You have already applied to this job.");
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn apply_sends_user_and_post_ids() {
        let (client, transport) = signed_in_client("u2", "user");
        transport.reply(200, json!({ "message": "applied" }));

        let receipt = client
            .apply_to_job("p1", &ApplicantRoster::new())
            .await
            .unwrap();
        assert_eq!(receipt.applicant.id, "u2");
        assert_eq!(receipt.applicant.name, "User u2");

        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/post/apply/p1");
        assert_eq!(request.body, RequestBody::Json(json!({ "uid": "u2", "pid": "p1" })));
    }

    #[tokio::test]
    async fn apply_failure_surfaces_server_error() {
        let (client, transport) = signed_in_client("u2", "user");
        transport.reply(400, json!({ "error": "Applications closed" }));

        let err = client
            .apply_to_job("p1", &ApplicantRoster::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.message(), "Applications closed");
    }
}
