//! Message severity kinds.

/// The closed set of message categories.
///
/// Each kind carries a fixed render marker and color (the table lives in
/// the renderer) and belongs to one of the groups exposed as predicates
/// below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A plain message with no decoration beyond the `:` marker.
    Message,
    /// A notification (`:: `).
    Notify,
    /// A highlighted notification (`:: `).
    NotifyH,
    /// A top-level action (` > `).
    Action,
    /// A nested action (`   > `).
    Action2,
    /// A minor action in the default color (`   - `).
    Action3,
    /// A warning (`:warning:`).
    Warning,
    /// An error (`:error:`).
    Error,
    /// A successful outcome (` o `).
    Success,
    /// A failed outcome (` x `).
    Failure,
    /// A side note (` - `).
    Note,
    /// Raw file contents, rendered unprefixed.
    File,
    /// A title line, rendered with a trailing `:`.
    Title,
}

impl Severity {
    /// Plain message kind.
    pub fn is_message(self) -> bool {
        self == Severity::Message
    }

    /// Notification group: [`Notify`](Severity::Notify), [`NotifyH`](Severity::NotifyH).
    pub fn is_notify(self) -> bool {
        matches!(self, Severity::Notify | Severity::NotifyH)
    }

    /// Action group: [`Action`](Severity::Action) through [`Action3`](Severity::Action3).
    pub fn is_action(self) -> bool {
        matches!(self, Severity::Action | Severity::Action2 | Severity::Action3)
    }

    /// Warning kind.
    pub fn is_warning(self) -> bool {
        self == Severity::Warning
    }

    /// Error kind.
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Report group: [`Success`](Severity::Success), [`Failure`](Severity::Failure),
    /// [`Note`](Severity::Note).
    pub fn is_report(self) -> bool {
        matches!(self, Severity::Success | Severity::Failure | Severity::Note)
    }

    /// Raw file-contents kind.
    pub fn is_file(self) -> bool {
        self == Severity::File
    }

    /// Title kind.
    pub fn is_title(self) -> bool {
        self == Severity::Title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Severity; 13] = [
        Severity::Message,
        Severity::Notify,
        Severity::NotifyH,
        Severity::Action,
        Severity::Action2,
        Severity::Action3,
        Severity::Warning,
        Severity::Error,
        Severity::Success,
        Severity::Failure,
        Severity::Note,
        Severity::File,
        Severity::Title,
    ];

    #[test]
    fn groups_partition_the_kinds() {
        for kind in ALL {
            let memberships = [
                kind.is_message(),
                kind.is_notify(),
                kind.is_action(),
                kind.is_warning(),
                kind.is_error(),
                kind.is_report(),
                kind.is_file(),
                kind.is_title(),
            ];
            assert_eq!(
                memberships.iter().filter(|&&m| m).count(),
                1,
                "{kind:?} must belong to exactly one group"
            );
        }
    }

    #[test]
    fn group_membership() {
        assert!(Severity::NotifyH.is_notify());
        assert!(Severity::Action2.is_action());
        assert!(Severity::Action3.is_action());
        assert!(Severity::Note.is_report());
        assert!(!Severity::Warning.is_error());
    }
}
