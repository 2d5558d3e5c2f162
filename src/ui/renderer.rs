//! Plain-text rendering of view models.
//!
//! Each `render_*` function turns a view model into the text the CLI prints.
//! Rendering makes no decisions of its own: whatever the view model omits
//! (owner controls, apply button, dialog) is simply not drawn.

use crate::ui::viewmodel::{
    JobDetailView, JobDetailViewModel, JobListingViewModel, ProfileView, ProfileViewModel,
};
use std::fmt::Write;

/// Renders the job detail page.
#[must_use]
pub fn render_job_detail(view: &JobDetailView) -> String {
    match view {
        JobDetailView::Loading => "Loading...\n".to_string(),
        JobDetailView::Failed { message } => format!("{message}\n"),
        JobDetailView::Ready(vm) => render_job(vm),
    }
}

fn render_job(vm: &JobDetailViewModel) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}", vm.poster.name);
    if let Some(link) = &vm.poster.profile_link {
        let _ = write!(out, " <{link}>");
    }
    if let Some(avatar) = &vm.poster.avatar {
        let _ = write!(out, " [avatar: {avatar}]");
    }
    out.push('\n');
    if let Some(controls) = &vm.owner_controls {
        let _ = writeln!(out, "[Edit: {}] [{}]", controls.edit_link, controls.delete_label);
    }
    out.push('\n');

    let _ = writeln!(out, "{}", vm.title_line);
    let _ = writeln!(out, "{}", vm.company);
    let _ = writeln!(out, "\nDescription\n{}", vm.description);
    out.push_str("\nRequirements:\n");
    for requirement in &vm.requirements {
        let _ = writeln!(out, "  - {requirement}");
    }
    let _ = writeln!(out, "\n{}", vm.applicants_line);
    let _ = writeln!(out, "{}", vm.posted_on);

    if let Some(button) = &vm.apply_button {
        let marker = if button.disabled { " (disabled)" } else { "" };
        let _ = writeln!(out, "\n[ {} ]{marker}", button.label);
    }
    if let Some(notice) = &vm.notice {
        let _ = writeln!(out, "\n! {notice}");
    }
    if let Some(dialog) = &vm.confirm_dialog {
        let _ = writeln!(
            out,
            "\n== {} ==\n{}\n[{}] [{}]",
            dialog.title, dialog.message, dialog.cancel_label, dialog.confirm_label
        );
    }
    out
}

/// Renders the listing, marking the selected row with `>` and search
/// matches with brackets.
#[must_use]
pub fn render_job_listing(vm: &JobListingViewModel) -> String {
    let mut out = String::new();

    if let Some(query) = &vm.search_query {
        let _ = writeln!(out, "Search: {query}\n");
    }
    if vm.is_loading {
        out.push_str("Loading...\n");
        return out;
    }
    if let Some(error) = &vm.error {
        let _ = writeln!(out, "{error}");
        return out;
    }
    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "{}\n{}", empty.message, empty.subtitle);
        return out;
    }

    for item in &vm.items {
        let cursor = if item.is_selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{cursor} {}  {} ({})  {}  [{}]",
            highlight(&item.title, &item.highlight_ranges),
            item.company,
            item.position_label,
            item.applicants_line,
            item.job_id
        );
    }
    out
}

/// Renders a profile page.
#[must_use]
pub fn render_profile(view: &ProfileView) -> String {
    match view {
        ProfileView::Loading => "Loading...\n".to_string(),
        ProfileView::Failed { message } => format!("{message}\n"),
        ProfileView::Ready(vm) => render_profile_details(vm),
    }
}

fn render_profile_details(vm: &ProfileViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vm.name);
    let optional = [
        ("Email", vm.email.as_deref()),
        ("Image", vm.image.as_deref()),
        ("Phone", vm.phone.as_deref()),
        ("CV", vm.cv.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if !vm.skills.is_empty() {
        let _ = writeln!(out, "Skills: {}", vm.skills.join(", "));
    }
    if vm.can_edit {
        let _ = writeln!(
            out,
            "\n[Edit profile: /profile/{id}/edit] [Change password: /profile/{id}/password]",
            id = vm.user_id
        );
    }
    out
}

/// Wraps highlighted character ranges in brackets.
fn highlight(text: &str, ranges: &[(usize, usize)]) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current || start >= end {
            continue;
        }
        out.extend(&chars[current..start]);
        out.push('[');
        out.extend(&chars[start..end]);
        out.push(']');
        current = end;
    }
    out.extend(&chars[current..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{ApplyButton, ConfirmDialog, EmptyState, ListingItem, PosterInfo};

    fn job_vm() -> JobDetailViewModel {
        JobDetailViewModel {
            job_id: "p1".into(),
            title_line: "Engineer (mid-level)".into(),
            company: "Acme".into(),
            description: "Build things".into(),
            requirements: vec!["SQL".into()],
            applicants_line: "0 Applicants".into(),
            posted_on: "Posted on: March 5, 2024".into(),
            poster: PosterInfo {
                name: "Olive".into(),
                profile_link: Some("/profile/owner".into()),
                avatar: None,
            },
            owner_controls: None,
            apply_button: Some(ApplyButton {
                label: "Apply Now".into(),
                disabled: false,
            }),
            confirm_dialog: None,
            notice: None,
        }
    }

    #[test]
    fn detail_includes_every_line() {
        let text = render_job_detail(&JobDetailView::Ready(Box::new(job_vm())));
        assert!(text.contains("Engineer (mid-level)"));
        assert!(text.contains("  - SQL"));
        assert!(text.contains("Posted on: March 5, 2024"));
        assert!(text.contains("[ Apply Now ]"));
        assert!(!text.contains("Edit:"));
    }

    #[test]
    fn dialog_is_drawn_when_open() {
        let mut vm = job_vm();
        vm.confirm_dialog = Some(ConfirmDialog {
            title: "Confirm Deletion".into(),
            message: "Sure?".into(),
            confirm_label: "Delete".into(),
            cancel_label: "Cancel".into(),
        });
        let text = render_job_detail(&JobDetailView::Ready(Box::new(vm)));
        assert!(text.contains("== Confirm Deletion =="));
    }

    #[test]
    fn listing_marks_selection_and_matches() {
        let vm = JobListingViewModel {
            items: vec![ListingItem {
                job_id: "p1".into(),
                title: "Engineer".into(),
                company: "Acme".into(),
                position_label: "mid-level".into(),
                applicants_line: "2 Applicants".into(),
                is_selected: true,
                highlight_ranges: vec![(0, 3)],
            }],
            selected_index: 0,
            is_loading: false,
            error: None,
            search_query: Some("eng".into()),
            empty_state: None,
        };
        let text = render_job_listing(&vm);
        assert!(text.contains("> [Eng]ineer  Acme (mid-level)  2 Applicants  [p1]"));
    }

    #[test]
    fn listing_empty_state() {
        let vm = JobListingViewModel {
            items: vec![],
            selected_index: 0,
            is_loading: false,
            error: None,
            search_query: None,
            empty_state: Some(EmptyState {
                message: "No job postings yet".into(),
                subtitle: "Create one to get started".into(),
            }),
        };
        assert_eq!(
            render_job_listing(&vm),
            "No job postings yet\nCreate one to get started\n"
        );
    }

    #[test]
    fn highlight_ignores_out_of_range() {
        assert_eq!(highlight("abc", &[(1, 9)]), "a[bc]");
        assert_eq!(highlight("abc", &[]), "abc");
    }
}
