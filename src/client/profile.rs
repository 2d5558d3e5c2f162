//! Profile actions: edit profile, change password.

use super::{JobBoardClient, NavigationTarget};
use crate::api::{endpoints, ApiRequest, MultipartPart, Transport};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::form::FormSubmission;
use crate::domain::session::ProfilePatch;
use serde_json::json;

const PASSWORD_REJECTED: &str = "Incorrect password.Please try again";

impl<T: Transport> JobBoardClient<T> {
    /// Updates a user's profile with a multipart body and, once the server
    /// accepts it, merges the new fields into the stored session user.
    ///
    /// Skills are sent as one JSON array field. The `cv` file is attached
    /// only when present.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Validation`] if `username`, `image` or `phone` is
    ///   missing
    /// - [`JobBoardError::Remote`] if the server refuses; the session is left
    ///   untouched
    /// - [`JobBoardError::Storage`] if the merged session cannot be persisted
    #[tracing::instrument(level = "debug", skip(self, form))]
    pub async fn edit_profile(
        &self,
        user_id: &str,
        form: &FormSubmission,
    ) -> Result<NavigationTarget> {
        let [username, image, phone] =
            form.require(["username", "image", "phone"], "Please fill the inputs.")?;
        let skills: Vec<String> = form.all_text("skills").into_iter().map(String::from).collect();
        let cv = form.file("cv");

        let encoded_skills = serde_json::to_string(&skills)
            .map_err(|e| JobBoardError::Validation(format!("invalid skills: {e}")))?;
        let mut parts = vec![
            MultipartPart::text("username", username),
            MultipartPart::text("image", image),
            MultipartPart::text("phone", phone),
            MultipartPart::text("skills", encoded_skills),
        ];
        if let Some(file) = cv {
            parts.push(MultipartPart::File {
                name: "cv".to_string(),
                file: file.clone(),
            });
        }

        let response = self
            .dispatch(ApiRequest::patch(endpoints::update_user(user_id)).with_multipart(parts))
            .await?;
        if !response.is_success() {
            tracing::warn!(user_id = %user_id, status = response.status, "profile update refused");
            return Err(response.into_remote_error("Could not update profile"));
        }

        let patch = ProfilePatch {
            name: username.to_string(),
            image: image.to_string(),
            phone: phone.to_string(),
            skills,
            cv: cv.map(|file| file.file_name.clone()),
        };
        if self.session.merge_profile(user_id, &patch)?.is_none() {
            tracing::debug!(user_id = %user_id, "edited profile is not the session user");
        }

        Ok(NavigationTarget::Profile(user_id.to_string()))
    }

    /// Changes a user's password. Both the old and the new password are
    /// required.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Validation`] if either password is missing
    /// - [`JobBoardError::Auth`] if the server refuses the change
    #[tracing::instrument(level = "debug", skip(self, form))]
    pub async fn change_password(
        &self,
        user_id: &str,
        form: &FormSubmission,
    ) -> Result<NavigationTarget> {
        let [old_password, new_password] = form.require(
            ["oldPassword", "newPassword"],
            "Please fill the passwords",
        )?;

        let response = self
            .dispatch(
                ApiRequest::patch(endpoints::update_password(user_id)).with_json(json!({
                    "id": user_id,
                    "oldPassword": old_password,
                    "newPassword": new_password,
                })),
            )
            .await?;
        if !response.is_success() {
            tracing::warn!(user_id = %user_id, status = response.status, "password change refused");
            return Err(JobBoardError::Auth(PASSWORD_REJECTED.to_string()));
        }

        tracing::info!(user_id = %user_id, "password changed");
        Ok(NavigationTarget::Profile(user_id.to_string()))
    }
}
