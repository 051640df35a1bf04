use leptos::prelude::*;

use agora_utils::errors::AppError;

use crate::geometry::{compute_connector_geometry, ConnectorGeometry};
use crate::reply::{ReplyStatus, SubmitOutcome};

/// State of a comment form: its visibility, the draft being written and the status of its submission
#[derive(Copy, Clone)]
pub struct ReplyFormState {
    pub is_open: RwSignal<bool>,
    pub draft: RwSignal<String>,
    pub status: RwSignal<ReplyStatus>,
}

impl ReplyFormState {
    pub fn new() -> Self {
        Self {
            is_open: RwSignal::new(false),
            draft: RwSignal::new(String::new()),
            status: RwSignal::new(ReplyStatus::Idle),
        }
    }

    pub fn toggle(&self) {
        self.is_open.update(|is_open| *is_open = !*is_open);
    }

    pub fn close(&self) {
        self.is_open.set(false);
    }

    pub fn is_submitting(&self) -> bool {
        self.status.with(|status| *status == ReplyStatus::Submitting)
    }

    pub fn error(&self) -> Option<AppError> {
        self.status.with(|status| match status {
            ReplyStatus::Failed(error) => Some(error.clone()),
            _ => None,
        })
    }

    /// Marks the form as submitting and returns the draft to send, or `None` if a submission is already pending
    pub fn begin_submit(&self) -> Option<String> {
        if self.status.with_untracked(|status| *status == ReplyStatus::Submitting) {
            return None;
        }
        self.status.set(ReplyStatus::Submitting);
        Some(self.draft.get_untracked())
    }

    /// Updates the form with the result of its submission. The draft is only discarded once published.
    pub fn apply_result(&self, result: Result<SubmitOutcome, AppError>) {
        match result {
            Ok(SubmitOutcome::Posted) => {
                self.draft.set(String::new());
                self.is_open.set(false);
                self.status.set(ReplyStatus::Idle);
            },
            Ok(SubmitOutcome::SignInRequested) | Ok(SubmitOutcome::EmptyBody) => self.status.set(ReplyStatus::Idle),
            Err(error) => self.status.set(ReplyStatus::Failed(error)),
        }
    }
}

impl Default for ReplyFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a rendered comment, owned by its component and never shared with other comments
#[derive(Copy, Clone)]
pub struct ThreadNodeState {
    pub is_collapsed: RwSignal<bool>,
    pub is_liked: RwSignal<bool>,
    /// Offsets of the anchors of the direct replies, relative to the top of the comment
    pub child_offsets: RwSignal<Vec<f64>>,
    pub reply_form: ReplyFormState,
}

impl ThreadNodeState {
    pub fn new() -> Self {
        Self {
            is_collapsed: RwSignal::new(false),
            is_liked: RwSignal::new(false),
            child_offsets: RwSignal::new(Vec::new()),
            reply_form: ReplyFormState::new(),
        }
    }

    pub fn toggle_collapsed(&self) {
        self.is_collapsed.update(|is_collapsed| *is_collapsed = !*is_collapsed);
    }

    pub fn toggle_like(&self) {
        self.is_liked.update(|is_liked| *is_liked = !*is_liked);
    }

    /// Like count to display given the count stored with the comment
    pub fn like_count(&self, base_like_count: i32) -> i32 {
        match self.is_liked.get() {
            true => base_like_count + 1,
            false => base_like_count,
        }
    }

    /// Whether the anchors of the replies are laid out, hidden replies would all measure at the top of the comment
    pub fn can_measure_children(&self, has_children: bool) -> bool {
        has_children && !self.is_collapsed.get_untracked()
    }

    pub fn set_child_offsets(&self, child_offsets: Vec<f64>) {
        if self.child_offsets.with_untracked(|current_offsets| *current_offsets != child_offsets) {
            self.child_offsets.set(child_offsets);
        }
    }

    pub fn connector_geometry(&self) -> ConnectorGeometry {
        let is_collapsed = self.is_collapsed.get();
        self.child_offsets.with(|child_offsets| compute_connector_geometry(child_offsets, is_collapsed))
    }
}

impl Default for ThreadNodeState {
    fn default() -> Self {
        Self::new()
    }
}
