//! Confirm Gate
//!
//! No destructive request leaves the client without an explicit "yes".
//! A pending action is parked in the gate until the user affirms it (the
//! action is handed back to run) or rejects it (the action is dropped).
//! Synchronous dialogs such as `window.confirm` plug in via `Confirmer`.

use std::fmt;

/// Text of a confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
        }
    }

    /// Prompt for deleting `count` records of kind `noun`
    pub fn delete(noun: &str, count: usize) -> Self {
        let (title, message) = if count == 1 {
            (format!("Delete {}", noun), format!("Delete this {}? This cannot be undone.", noun))
        } else {
            (
                format!("Delete {} {}s", count, noun),
                format!("Delete {} selected {}s? This cannot be undone.", count, noun),
            )
        };
        Self { title, message, confirm_label: "Delete".to_string() }
    }
}

/// A dialog that answers yes/no immediately
pub trait Confirmer {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Always answers the same way
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub(crate) struct FixedAnswer(pub bool);

#[cfg(test)]
impl Confirmer for FixedAnswer {
    fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.0
    }
}

/// Which records a pending delete targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete<Id> {
    One(Id),
    Many(Vec<Id>),
}

impl<Id: Clone> PendingDelete<Id> {
    pub fn ids(&self) -> Vec<Id> {
        match self {
            PendingDelete::One(id) => vec![id.clone()],
            PendingDelete::Many(ids) => ids.clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PendingDelete::One(_) => 1,
            PendingDelete::Many(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<Id: fmt::Display> fmt::Display for PendingDelete<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingDelete::One(id) => write!(f, "#{}", id),
            PendingDelete::Many(ids) => write!(f, "{} records", ids.len()),
        }
    }
}

/// Holds at most one action awaiting confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmGate<A> {
    pending: Option<(ConfirmPrompt, A)>,
}

impl<A> Default for ConfirmGate<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmGate<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `action` behind `prompt`, replacing anything already pending
    pub fn request(&mut self, prompt: ConfirmPrompt, action: A) {
        self.pending = Some((prompt, action));
    }

    pub fn prompt(&self) -> Option<&ConfirmPrompt> {
        self.pending.as_ref().map(|(prompt, _)| prompt)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The user said yes: hand the action back to be run
    pub fn affirm(&mut self) -> Option<A> {
        self.pending.take().map(|(_, action)| action)
    }

    /// The user said no: the action is dropped unrun
    pub fn reject(&mut self) {
        self.pending = None;
    }

    /// Resolve the pending action with a synchronous dialog
    pub fn resolve_with<C: Confirmer + ?Sized>(&mut self, confirmer: &C) -> Option<A> {
        let affirmed = self.prompt().map(|prompt| confirmer.confirm(prompt))?;
        if affirmed {
            self.affirm()
        } else {
            self.reject();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirm_returns_action_once() {
        let mut gate = ConfirmGate::new();
        gate.request(ConfirmPrompt::delete("room", 1), PendingDelete::One(3));
        assert!(gate.is_pending());
        assert_eq!(gate.affirm(), Some(PendingDelete::One(3)));
        assert_eq!(gate.affirm(), None);
    }

    #[test]
    fn test_reject_drops_action() {
        let mut gate = ConfirmGate::new();
        gate.request(ConfirmPrompt::delete("room", 1), PendingDelete::One(3));
        gate.reject();
        assert!(!gate.is_pending());
        assert_eq!(gate.affirm(), None);
    }

    #[test]
    fn test_resolve_with_dialog() {
        let mut gate = ConfirmGate::new();
        gate.request(ConfirmPrompt::delete("tenant", 2), PendingDelete::Many(vec![1, 2]));
        assert_eq!(gate.resolve_with(&FixedAnswer(false)), None);
        assert!(!gate.is_pending());

        gate.request(ConfirmPrompt::delete("tenant", 2), PendingDelete::Many(vec![1, 2]));
        assert_eq!(gate.resolve_with(&FixedAnswer(true)), Some(PendingDelete::Many(vec![1, 2])));
    }

    #[test]
    fn test_nothing_pending_resolves_to_none() {
        let mut gate: ConfirmGate<PendingDelete<u32>> = ConfirmGate::new();
        assert_eq!(gate.resolve_with(&FixedAnswer(true)), None);
    }

    #[test]
    fn test_delete_prompt_wording() {
        assert_eq!(ConfirmPrompt::delete("asset", 1).title, "Delete asset");
        assert_eq!(ConfirmPrompt::delete("asset", 3).message, "Delete 3 selected assets? This cannot be undone.");
    }
}
