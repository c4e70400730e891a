use crate::model::CaseMetadata;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseAction {
    CopyGuid,
    Edit,
    Close,
    Reopen,
    Delete,
}

impl CaseAction {
    pub fn label(&self) -> &'static str {
        match self {
            CaseAction::CopyGuid => "Copy GUID",
            CaseAction::Edit => "Edit",
            CaseAction::Close => "Close",
            CaseAction::Reopen => "Reopen",
            CaseAction::Delete => "Delete",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaseMenuItem {
    pub action: CaseAction,
    pub enabled: bool,
}

/// Closed cases can be reopened or deleted but not edited.
pub fn case_menu(case: &CaseMetadata) -> Vec<CaseMenuItem> {
    let closed = case.is_closed();
    let item = |action, enabled| CaseMenuItem { action, enabled };
    vec![
        item(CaseAction::CopyGuid, true),
        item(CaseAction::Edit, !closed),
        if closed {
            item(CaseAction::Reopen, true)
        } else {
            item(CaseAction::Close, true)
        },
        item(CaseAction::Delete, true),
    ]
}
