//! In-memory stand-ins for the Postgres repositories, used by service tests.
//! They mirror the SQL semantics: unique email/username, one refresh token row
//! per user, one activity row per `(post_id, user_id)`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::data::activity_repository::{ActivityChange, ActivityRepository};
use crate::data::user_repository::{NewRefreshToken, NewUser, UserCredentials, UserRepository};
use crate::domain::activity::UserActivity;
use crate::domain::error::DomainError;
use crate::domain::user::{RefreshToken, User};

#[derive(Default)]
struct State {
    users: Vec<UserCredentials>,
    refresh_tokens: HashMap<i64, RefreshToken>,
    activities: HashMap<(i64, i64), UserActivity>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub(crate) struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("in-memory store mutex poisoned")
    }

    pub(crate) fn refresh_token_rows(&self) -> usize {
        self.lock().refresh_tokens.len()
    }

    pub(crate) fn stored_refresh_token(&self, user_id: i64) -> Option<RefreshToken> {
        self.lock().refresh_tokens.get(&user_id).cloned()
    }

    pub(crate) fn put_refresh_token(&self, user_id: i64, token: &str, expired_at: DateTime<Utc>) {
        self.lock().refresh_tokens.insert(
            user_id,
            RefreshToken {
                token: token.to_string(),
                expired_at,
            },
        );
    }

    pub(crate) fn activity(&self, post_id: i64, user_id: i64) -> Option<UserActivity> {
        self.lock().activities.get(&(post_id, user_id)).cloned()
    }

    pub(crate) fn activity_rows(&self) -> usize {
        self.lock().activities.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut state = self.lock();
        if state.users.iter().any(|c| c.user.email == input.email) {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }
        if state.users.iter().any(|c| c.user.username == input.username) {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        let id = state.next_id();
        let user = User::new(id, input.username, input.email, Utc::now())?;
        state.users.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|c| c.user.email == email || c.user.username == username)
            .map(|c| c.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone()))
    }

    async fn find_active_refresh_token(
        &self,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, DomainError> {
        Ok(self
            .lock()
            .refresh_tokens
            .get(&user_id)
            .filter(|token| token.is_active_at(now))
            .cloned())
    }

    async fn insert_refresh_token_if_absent(
        &self,
        input: NewRefreshToken,
        now: DateTime<Utc>,
    ) -> Result<RefreshToken, DomainError> {
        let mut state = self.lock();
        if let Some(existing) = state.refresh_tokens.get(&input.user_id)
            && existing.is_active_at(now)
        {
            return Ok(existing.clone());
        }
        let token = RefreshToken {
            token: input.token,
            expired_at: input.expired_at,
        };
        state.refresh_tokens.insert(input.user_id, token.clone());
        Ok(token)
    }
}

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn upsert_activity(&self, change: ActivityChange) -> Result<UserActivity, DomainError> {
        let mut state = self.lock();
        let key = (change.post_id, change.user_id);
        if let Some(existing) = state.activities.get_mut(&key) {
            existing.is_liked = change.is_liked;
            existing.updated_at = change.at;
            return Ok(existing.clone());
        }
        let id = state.next_id();
        let activity = UserActivity {
            id,
            post_id: change.post_id,
            user_id: change.user_id,
            is_liked: change.is_liked,
            created_at: change.at,
            updated_at: change.at,
        };
        state.activities.insert(key, activity.clone());
        Ok(activity)
    }

    async fn update_activity(
        &self,
        change: ActivityChange,
    ) -> Result<Option<UserActivity>, DomainError> {
        let mut state = self.lock();
        Ok(state
            .activities
            .get_mut(&(change.post_id, change.user_id))
            .map(|existing| {
                existing.is_liked = change.is_liked;
                existing.updated_at = change.at;
                existing.clone()
            }))
    }
}
