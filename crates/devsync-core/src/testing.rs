// SPDX-FileCopyrightText: 2026 DevSync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory store used by the unit tests of this crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::DevsyncError;
use crate::traits::{MembershipStore, MessageStore, ProjectStore, TaskStore, UserStore};
use crate::types::{
    new_id, now_timestamp, MemberRole, Membership, Message, NewTask, Project, StoredUser, Task,
    TaskPatch, User, UserSummary,
};

#[derive(Default)]
struct State {
    users: Vec<StoredUser>,
    projects: Vec<Project>,
    members: Vec<(String, String, String, MemberRole)>,
    tasks: Vec<Task>,
    messages: Vec<Message>,
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    state: Mutex<State>,
    membership_lookups: AtomicUsize,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_user(&self, email: &str, name: &str) -> User {
        let user = User {
            id: new_id(),
            email: email.to_string(),
            name: name.to_string(),
        };
        self.state.lock().unwrap().users.push(StoredUser {
            user: user.clone(),
            password_hash: String::new(),
        });
        user
    }

    pub(crate) fn add_project(&self, owner_id: &str, name: &str) -> Project {
        let now = now_timestamp();
        let project = Project {
            id: new_id(),
            name: name.to_string(),
            description: None,
            owner_id: owner_id.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.state.lock().unwrap().projects.push(project.clone());
        project
    }

    /// Writes a membership row directly, bypassing every rule.
    pub(crate) fn put_member(&self, project_id: &str, user_id: &str, role: MemberRole) {
        let mut state = self.state.lock().unwrap();
        state
            .members
            .retain(|(_, p, u, _)| !(p == project_id && u == user_id));
        state
            .members
            .push((new_id(), project_id.to_string(), user_id.to_string(), role));
    }

    pub(crate) fn membership_lookups(&self) -> usize {
        self.membership_lookups.load(Ordering::SeqCst)
    }

    fn membership(state: &State, project_id: &str, user_id: &str) -> Option<Membership> {
        let (id, _, _, role) = state
            .members
            .iter()
            .find(|(_, p, u, _)| p == project_id && u == user_id)?;
        let user = state.users.iter().find(|s| s.user.id == user_id)?.user.clone();
        Some(Membership {
            id: id.clone(),
            project_id: project_id.to_string(),
            user_id: user_id.to_string(),
            role: *role,
            user,
            created_at: now_timestamp(),
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|s| s.user.email == email) {
            return Err(DevsyncError::Conflict("email already registered".into()));
        }
        let user = User {
            id: new_id(),
            email: email.to_string(),
            name: name.to_string(),
        };
        state.users.push(StoredUser {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<StoredUser>, DevsyncError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|s| s.user.email == email).cloned())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, DevsyncError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|s| s.user.id == id)
            .map(|s| s.user.clone()))
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(
        &self,
        owner_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Project, DevsyncError> {
        let mut project = self.add_project(owner_id, name);
        project.description = description.map(str::to_string);
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.projects.iter_mut().find(|p| p.id == project.id) {
            *stored = project.clone();
        }
        Ok(project)
    }

    async fn get_project(&self, id: &str) -> Result<Option<Project>, DevsyncError> {
        let state = self.state.lock().unwrap();
        Ok(state.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn list_projects_for_user(&self, user_id: &str) -> Result<Vec<Project>, DevsyncError> {
        let state = self.state.lock().unwrap();
        let mut projects: Vec<Project> = state
            .projects
            .iter()
            .filter(|p| {
                p.owner_id == user_id
                    || state
                        .members
                        .iter()
                        .any(|(_, pid, uid, _)| pid == &p.id && uid == user_id)
            })
            .cloned()
            .collect();
        projects.reverse();
        Ok(projects)
    }

    async fn delete_project(&self, id: &str) -> Result<bool, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        state.members.retain(|(_, p, _, _)| p != id);
        state.tasks.retain(|t| t.project_id != id);
        state.messages.retain(|m| m.project_id != id);
        Ok(state.projects.len() != before)
    }
}

#[async_trait]
impl MembershipStore for MemoryStore {
    async fn member_role(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<MemberRole>, DevsyncError> {
        self.membership_lookups.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state
            .members
            .iter()
            .find(|(_, p, u, _)| p == project_id && u == user_id)
            .map(|(_, _, _, r)| *r))
    }

    async fn list_members(&self, project_id: &str) -> Result<Vec<Membership>, DevsyncError> {
        let state = self.state.lock().unwrap();
        let mut members: Vec<Membership> = state
            .members
            .iter()
            .filter(|(_, p, _, _)| p == project_id)
            .filter_map(|(_, p, u, _)| Self::membership(&state, p, u))
            .collect();
        members.sort_by(|a, b| a.user.name.cmp(&b.user.name));
        Ok(members)
    }

    async fn upsert_member(
        &self,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Membership, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        match state
            .members
            .iter_mut()
            .find(|(_, p, u, _)| p == project_id && u == user_id)
        {
            Some(row) => row.3 = role,
            None => state
                .members
                .push((new_id(), project_id.to_string(), user_id.to_string(), role)),
        }
        Self::membership(&state, project_id, user_id)
            .ok_or_else(|| DevsyncError::not_found("user"))
    }

    async fn update_member_role(
        &self,
        project_id: &str,
        user_id: &str,
        role: MemberRole,
    ) -> Result<Option<Membership>, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        let Some(row) = state
            .members
            .iter_mut()
            .find(|(_, p, u, _)| p == project_id && u == user_id)
        else {
            return Ok(None);
        };
        row.3 = role;
        Ok(Self::membership(&state, project_id, user_id))
    }

    async fn remove_member(&self, project_id: &str, user_id: &str) -> Result<bool, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        let before = state.members.len();
        state
            .members
            .retain(|(_, p, u, _)| !(p == project_id && u == user_id));
        Ok(state.members.len() != before)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, DevsyncError> {
        let state = self.state.lock().unwrap();
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            (a.status.column_index(), a.order, &a.created_at, &a.id)
                .cmp(&(b.status.column_index(), b.order, &b.created_at, &b.id))
        });
        Ok(tasks)
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, DevsyncError> {
        let now = now_timestamp();
        let created = Task {
            id: new_id(),
            project_id: task.project_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            order: task.order,
            assignee_id: None,
            created_at: now.clone(),
            updated_at: now,
        };
        self.state.lock().unwrap().tasks.push(created.clone());
        Ok(created)
    }

    async fn get_task(&self, id: &str) -> Result<Option<Task>, DevsyncError> {
        let state = self.state.lock().unwrap();
        Ok(state.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(order) = patch.order {
            task.order = order;
        }
        if let Some(assignee) = &patch.assignee_id {
            task.assignee_id = assignee.clone();
        }
        task.updated_at = now_timestamp();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: &str) -> Result<bool, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        let before = state.tasks.len();
        state.tasks.retain(|t| t.id != id);
        Ok(state.tasks.len() != before)
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn list_messages(&self, project_id: &str) -> Result<Vec<Message>, DevsyncError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .messages
            .iter()
            .filter(|m| m.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_message(
        &self,
        project_id: &str,
        sender_id: &str,
        content: &str,
    ) -> Result<Message, DevsyncError> {
        let mut state = self.state.lock().unwrap();
        let sender = state
            .users
            .iter()
            .find(|s| s.user.id == sender_id)
            .map(|s| UserSummary {
                id: s.user.id.clone(),
                name: s.user.name.clone(),
            })
            .ok_or_else(|| DevsyncError::not_found("user"))?;
        let message = Message {
            id: new_id(),
            project_id: project_id.to_string(),
            sender_id: sender_id.to_string(),
            content: content.to_string(),
            created_at: now_timestamp(),
            sender,
        };
        state.messages.push(message.clone());
        Ok(message)
    }
}
