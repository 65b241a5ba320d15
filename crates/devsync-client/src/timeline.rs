// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat timeline reconciliation.
//!
//! The timeline merges three sources: the history loaded when a project is
//! opened, the caller's own sends (shown immediately as pending entries and
//! replaced in place once the server confirms them) and messages broadcast by
//! other connections. Every server message id is shown at most once.

use std::collections::HashSet;

use devsync_core::{Message, UserSummary};

/// Prefix of the synthetic ids given to pending entries. Server ids are
/// UUIDs and never carry it.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Handle tying a pending entry to the outcome of its send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Correlation(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEntry {
    /// Persisted message.
    Confirmed(Message),
    /// Own message still in flight.
    Pending {
        correlation: Correlation,
        local_id: String,
        sender: UserSummary,
        content: String,
    },
}

impl TimelineEntry {
    /// Server id or synthetic local id.
    pub fn id(&self) -> &str {
        match self {
            TimelineEntry::Confirmed(message) => &message.id,
            TimelineEntry::Pending { local_id, .. } => local_id,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            TimelineEntry::Confirmed(message) => &message.content,
            TimelineEntry::Pending { content, .. } => content,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TimelineEntry::Pending { .. })
    }
}

/// A send that the server rejected; its entry has been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFailure {
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ChatTimeline {
    project_id: Option<String>,
    entries: Vec<TimelineEntry>,
    seen: HashSet<String>,
    next_correlation: u64,
}

impl ChatTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project the timeline currently shows.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Replace everything with the history of `project_id`.
    pub fn load_history(&mut self, project_id: &str, history: Vec<Message>) {
        self.reset();
        self.project_id = Some(project_id.to_string());
        for message in history {
            if self.seen.insert(message.id.clone()) {
                self.entries.push(TimelineEntry::Confirmed(message));
            }
        }
    }

    /// Show an own message before the server has stored it.
    pub fn begin_send(&mut self, sender: UserSummary, content: &str) -> Correlation {
        let correlation = Correlation(self.next_correlation);
        self.next_correlation += 1;
        self.entries.push(TimelineEntry::Pending {
            correlation,
            local_id: format!("{LOCAL_ID_PREFIX}{}", uuid::Uuid::new_v4()),
            sender,
            content: content.to_string(),
        });
        correlation
    }

    /// Swap the pending entry for the stored message, keeping its position.
    ///
    /// If the stored id is already on screen (a broadcast overtook the
    /// response), the pending entry is dropped instead. Returns false when
    /// the correlation is unknown, e.g. after a project switch.
    pub fn confirm(&mut self, correlation: Correlation, message: Message) -> bool {
        let Some(index) = self.pending_index(correlation) else {
            return false;
        };
        if self.seen.contains(&message.id) {
            self.entries.remove(index);
        } else {
            self.seen.insert(message.id.clone());
            self.entries[index] = TimelineEntry::Confirmed(message);
        }
        true
    }

    /// Remove a pending entry whose send failed.
    pub fn fail(&mut self, correlation: Correlation, reason: impl Into<String>) -> Option<SendFailure> {
        let index = self.pending_index(correlation)?;
        let content = self.entries.remove(index).content().to_string();
        Some(SendFailure {
            content,
            reason: reason.into(),
        })
    }

    /// Append a message relayed by another connection. Returns false when it
    /// was discarded as a duplicate or as belonging to another project.
    pub fn receive_broadcast(&mut self, message: Message) -> bool {
        if self.project_id.as_deref() != Some(message.project_id.as_str()) {
            tracing::debug!(message_id = %message.id, "broadcast for another project ignored");
            return false;
        }
        if !self.seen.insert(message.id.clone()) {
            return false;
        }
        self.entries.push(TimelineEntry::Confirmed(message));
        true
    }

    /// Forget everything, including pending sends. Used on project switch.
    pub fn reset(&mut self) {
        self.project_id = None;
        self.entries.clear();
        self.seen.clear();
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_pending()).count()
    }

    fn pending_index(&self, correlation: Correlation) -> Option<usize> {
        self.entries.iter().position(|e| {
            matches!(e, TimelineEntry::Pending { correlation: c, .. } if *c == correlation)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserSummary {
        UserSummary {
            id: "u1".into(),
            name: "Alice".into(),
        }
    }

    fn message(id: &str, content: &str) -> Message {
        Message {
            id: id.into(),
            project_id: "p1".into(),
            sender_id: "u1".into(),
            content: content.into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
            sender: alice(),
        }
    }

    fn ids(timeline: &ChatTimeline) -> Vec<&str> {
        timeline.entries().iter().map(TimelineEntry::id).collect()
    }

    #[test]
    fn history_seeds_seen_ids() {
        let mut timeline = ChatTimeline::new();
        timeline.load_history("p1", vec![message("m1", "a"), message("m2", "b")]);
        assert!(!timeline.receive_broadcast(message("m1", "a")));
        assert!(timeline.receive_broadcast(message("m3", "c")));
        assert_eq!(ids(&timeline), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn confirm_replaces_in_place() {
        let mut timeline = ChatTimeline::new();
        timeline.load_history("p1", vec![message("m1", "a")]);
        let pending = timeline.begin_send(alice(), "mine");
        assert!(timeline.entries()[1].id().starts_with(LOCAL_ID_PREFIX));
        assert!(timeline.receive_broadcast(message("m2", "theirs")));

        assert!(timeline.confirm(pending, message("m9", "mine")));
        assert_eq!(ids(&timeline), vec!["m1", "m9", "m2"]);
        assert_eq!(timeline.pending_count(), 0);
        // A late echo of the confirmed message is discarded.
        assert!(!timeline.receive_broadcast(message("m9", "mine")));
    }

    #[test]
    fn confirm_after_broadcast_drops_pending() {
        let mut timeline = ChatTimeline::new();
        timeline.load_history("p1", vec![]);
        let pending = timeline.begin_send(alice(), "mine");
        assert!(timeline.receive_broadcast(message("m1", "mine")));
        assert!(timeline.confirm(pending, message("m1", "mine")));
        assert_eq!(ids(&timeline), vec!["m1"]);
    }

    #[test]
    fn failed_send_is_removed() {
        let mut timeline = ChatTimeline::new();
        timeline.load_history("p1", vec![message("m1", "a")]);
        let pending = timeline.begin_send(alice(), "oops");
        let failure = timeline.fail(pending, "forbidden").unwrap();
        assert_eq!(failure.content, "oops");
        assert_eq!(failure.reason, "forbidden");
        assert_eq!(ids(&timeline), vec!["m1"]);
        assert!(timeline.fail(pending, "again").is_none());
    }

    #[test]
    fn reset_forgets_pending_and_other_projects_are_ignored() {
        let mut timeline = ChatTimeline::new();
        timeline.load_history("p1", vec![]);
        let pending = timeline.begin_send(alice(), "mine");
        timeline.load_history("p2", vec![]);
        assert!(!timeline.confirm(pending, message("m1", "mine")));
        assert!(!timeline.receive_broadcast(message("m2", "from p1")));
        assert!(timeline.is_empty());
        assert_eq!(timeline.project_id(), Some("p2"));
    }
}
