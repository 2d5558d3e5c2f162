//! Profile page state.

use crate::domain::session::SessionUser;
use crate::resource::{FetchTicket, ResourceState, UserDetailHook};
use crate::ui::viewmodel::{ProfileView, ProfileViewModel};

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub user: UserDetailHook,
    pub viewer: Option<SessionUser>,
}

impl ProfileState {
    #[must_use]
    pub fn new(viewer: Option<SessionUser>) -> Self {
        Self {
            user: UserDetailHook::new(),
            viewer,
        }
    }

    pub fn mount(&mut self, user_id: &str) -> Option<FetchTicket> {
        self.user.activate(Some(user_id))
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> ProfileView {
        let profile = match self.user.state() {
            ResourceState::Ready(profile) => profile,
            ResourceState::Failed(message) => {
                return ProfileView::Failed {
                    message: message.clone(),
                }
            }
            ResourceState::Idle | ResourceState::Loading => return ProfileView::Loading,
        };

        ProfileView::Ready(ProfileViewModel {
            user_id: profile.id.clone(),
            name: profile.name.clone(),
            email: profile.email.clone(),
            image: profile.image.clone(),
            phone: profile.phone.clone(),
            skills: profile.skills.clone(),
            cv: profile.cv.clone(),
            can_edit: self
                .viewer
                .as_ref()
                .is_some_and(|viewer| viewer.id == profile.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::UserProfile;

    fn profile(id: &str) -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "name": "Grace",
            "skills": ["cobol"]
        }))
        .unwrap()
    }

    #[test]
    fn only_the_owner_can_edit() {
        let mut own = ProfileState::new(Some(SessionUser::new("u1", "Grace", "user")));
        let ticket = own.mount("u1").unwrap();
        own.user.settle(&ticket, Ok(profile("u1")));
        let ProfileView::Ready(vm) = own.compute_viewmodel() else {
            panic!("profile should be ready");
        };
        assert!(vm.can_edit);
        assert_eq!(vm.skills, vec!["cobol".to_string()]);

        let mut other = ProfileState::new(Some(SessionUser::new("u2", "Ada", "user")));
        let ticket = other.mount("u1").unwrap();
        other.user.settle(&ticket, Ok(profile("u1")));
        let ProfileView::Ready(vm) = other.compute_viewmodel() else {
            panic!("profile should be ready");
        };
        assert!(!vm.can_edit);
    }

    #[test]
    fn loading_until_settled() {
        let mut state = ProfileState::new(None);
        state.mount("u1");
        assert_eq!(state.compute_viewmodel(), ProfileView::Loading);
    }
}
