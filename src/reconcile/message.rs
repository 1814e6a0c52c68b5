//! Commit message templates.
//!
//! Each message is a summary line plus a short bullet list, and depends only
//! on the commit kind and the installed workflow path.

use std::path::Path;

/// Which of the three commit templates applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// The workflow did not exist before.
    Add,
    /// The workflow existed and its content changed.
    Update,
    /// Forced commit with no content change.
    Refresh,
}

impl CommitKind {
    /// Pick the template for a change set. `None` means nothing to commit.
    pub fn select(file_existed: bool, has_changes: bool, force: bool) -> Option<Self> {
        match (has_changes, force) {
            (true, _) if file_existed => Some(CommitKind::Update),
            (true, _) => Some(CommitKind::Add),
            (false, true) => Some(CommitKind::Refresh),
            (false, false) => None,
        }
    }

    /// Full commit message for `target` (the workflow path inside the repository).
    pub fn message(self, target: &Path) -> String {
        let path = target.display();
        let name = target
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());

        match self {
            CommitKind::Add => format!(
                "feat: add {name} workflow\n\n\
                 - Install {path} from the organization's canonical template\n\
                 - Run the shared CI checks on every push and pull request\n\
                 - The file is managed centrally; local edits are overwritten by the next rollout"
            ),
            CommitKind::Update => format!(
                "chore: update {name} workflow\n\n\
                 - Sync {path} with the organization's canonical template\n\
                 - Pick up the latest centrally managed CI changes"
            ),
            CommitKind::Refresh => format!(
                "chore: refresh {name} workflow\n\n\
                 - Forced rollout; {path} already matched the canonical template\n\
                 - Empty commit records that this repository was re-checked"
            ),
        }
    }

    /// Past-tense label for outcome lines and history records.
    pub fn label(self) -> &'static str {
        match self {
            CommitKind::Add => "added",
            CommitKind::Update => "updated",
            CommitKind::Refresh => "refreshed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_decision_table() {
        assert_eq!(CommitKind::select(false, true, false), Some(CommitKind::Add));
        assert_eq!(CommitKind::select(false, true, true), Some(CommitKind::Add));
        assert_eq!(CommitKind::select(true, true, false), Some(CommitKind::Update));
        assert_eq!(CommitKind::select(true, true, true), Some(CommitKind::Update));
        assert_eq!(CommitKind::select(true, false, true), Some(CommitKind::Refresh));
        assert_eq!(CommitKind::select(false, false, true), Some(CommitKind::Refresh));
        assert_eq!(CommitKind::select(true, false, false), None);
        assert_eq!(CommitKind::select(false, false, false), None);
    }

    #[test]
    fn test_messages_have_distinct_summaries() {
        let target = Path::new(".github/workflows/ci.yml");
        let add = CommitKind::Add.message(target);
        let update = CommitKind::Update.message(target);
        let refresh = CommitKind::Refresh.message(target);

        assert!(add.starts_with("feat: add ci workflow\n\n"));
        assert!(update.starts_with("chore: update ci workflow\n\n"));
        assert!(refresh.starts_with("chore: refresh ci workflow\n\n"));
        assert_ne!(add.lines().next(), update.lines().next());
        assert_ne!(update.lines().next(), refresh.lines().next());
    }

    #[test]
    fn test_messages_are_deterministic_and_mention_path() {
        let target = Path::new(".github/workflows/review.yml");
        for kind in [CommitKind::Add, CommitKind::Update, CommitKind::Refresh] {
            let message = kind.message(target);
            assert_eq!(message, kind.message(target));
            assert!(message.contains(".github/workflows/review.yml"));
            let bullets = message.lines().filter(|l| l.starts_with("- ")).count();
            assert!((2..=3).contains(&bullets), "{:?} has {} bullets", kind, bullets);
        }
    }
}
