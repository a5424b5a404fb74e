//! Controlled form state for the "create workspace" modal.
//!
//! Presentation lives in the frontend; this type owns the transitions so the
//! rules (trimmed names, no dismissal mid-submit, single callback invocation)
//! are enforced in one place.

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Idle,
    Submitting,
}

/// What a call to [`CreateWorkspaceModal::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Callback succeeded; the modal is closed and the field cleared
    Created,
    /// Nothing to submit (closed, busy, or blank name); callback not invoked
    Ignored,
}

#[derive(Debug)]
pub struct CreateWorkspaceModal {
    state: ModalState,
    name: String,
}

impl Default for CreateWorkspaceModal {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateWorkspaceModal {
    pub fn new() -> Self {
        Self {
            state: ModalState::Closed,
            name: String::new(),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open(&mut self) {
        if self.state == ModalState::Closed {
            self.state = ModalState::Idle;
        }
    }

    /// Input change; ignored unless the form is editable
    pub fn set_name(&mut self, value: impl Into<String>) {
        if self.state == ModalState::Idle {
            self.name = value.into();
        }
    }

    /// Whether the Create button is enabled
    pub fn can_submit(&self) -> bool {
        self.state == ModalState::Idle && !self.name.trim().is_empty()
    }

    /// Runs the caller's creation callback with the trimmed name.
    ///
    /// On error the modal stays open with the name intact and the error is
    /// returned for the caller to display.
    pub async fn submit<F, Fut, E>(&mut self, on_create: F) -> Result<SubmitOutcome, E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        if !self.can_submit() {
            return Ok(SubmitOutcome::Ignored);
        }

        let name = self.name.trim().to_string();
        self.state = ModalState::Submitting;

        // Dropping the future mid-await must not leave the form locked.
        let mut guard = SubmitGuard {
            modal: self,
            settled: false,
        };
        let result = on_create(name).await;
        guard.settled = true;

        match result {
            Ok(()) => {
                guard.modal.name.clear();
                guard.modal.state = ModalState::Closed;
                Ok(SubmitOutcome::Created)
            }
            Err(e) => {
                guard.modal.state = ModalState::Idle;
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.dismiss();
    }

    pub fn backdrop_click(&mut self) {
        self.dismiss();
    }

    fn dismiss(&mut self) {
        if self.state == ModalState::Idle {
            self.state = ModalState::Closed;
        }
    }
}

/// Returns an abandoned submission to `Idle`
struct SubmitGuard<'a> {
    modal: &'a mut CreateWorkspaceModal,
    settled: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.modal.state = ModalState::Idle;
        }
    }
}
