pub mod workspace_modal;

pub use workspace_modal::{CreateWorkspaceModal, ModalState, SubmitOutcome};
