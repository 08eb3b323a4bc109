//! Business methods and parameter types.
//!
//! Routing and validation for everything annotated here is generated by
//! `build.rs` and included at the bottom of this file.

use apigen::{ApiError, Context};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

// =============================================================================
// Types
// =============================================================================

/// Stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub status: i32,
}

/// Result of a successful `/user/create` on [`MyApi`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub id: u64,
}

/// Result of a successful `/user/create` on [`OtherApi`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherUser {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub level: i32,
}

#[derive(Debug, Default)]
pub struct ProfileParams {
    /// apivalidator: required
    pub login: String,
}

#[derive(Debug, Default)]
pub struct CreateParams {
    /// apivalidator: required,min=10
    pub login: String,
    /// apivalidator: paramname=full_name
    pub name: String,
    /// apivalidator: enum=user|moderator|admin,default=user
    pub status: String,
    /// apivalidator: min=0,max=128
    pub age: i32,
    /// apivalidator: required,default=guest
    pub role: String,
}

#[derive(Debug, Default)]
pub struct OtherCreateParams {
    /// apivalidator: required,min=3
    pub username: String,
    /// apivalidator: paramname=account_name
    pub name: String,
    /// apivalidator: enum=warrior|sorcerer|rouge,default=warrior
    pub class: String,
    /// apivalidator: min=1,max=50
    pub level: i32,
    /// apivalidator: enum=1|2|3
    pub tier: i32,
}

/// Failures that are not part of the API contract. They reach clients as
/// `500 Internal Server Error`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bad user")]
    Rejected,

    #[error("user store is unavailable")]
    Poisoned,
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug)]
struct UserTable {
    users: Vec<User>,
    next_id: u64,
}

/// In-memory user store shared by clones.
#[derive(Debug, Clone)]
pub struct UserStore {
    table: Arc<Mutex<UserTable>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(UserTable {
                users: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// A store holding one `rvasily` account.
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(mut table) = store.lock() {
            table.users.push(User {
                id: 42,
                login: "rvasily".to_string(),
                full_name: "Vasily Romanov".to_string(),
                status: 20,
            });
            table.next_id = 43;
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::Poisoned)
    }

    pub fn find(&self, login: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.users.iter().find(|u| u.login == login).cloned())
    }

    /// Insert a user, returning `None` when the login is taken.
    pub fn insert(
        &self,
        login: &str,
        full_name: &str,
        status: i32,
    ) -> Result<Option<User>, StoreError> {
        let mut table = self.lock()?;
        if table.users.iter().any(|u| u.login == login) {
            return Ok(None);
        }

        let user = User {
            id: table.next_id,
            login: login.to_string(),
            full_name: full_name.to_string(),
            status,
        };
        table.next_id += 1;
        table.users.push(user.clone());
        Ok(Some(user))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|t| t.users.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn status_code(status: &str) -> i32 {
    match status {
        "admin" => 20,
        "moderator" => 10,
        _ => 0,
    }
}

// =============================================================================
// Receivers
// =============================================================================

/// User profile API.
#[derive(Debug, Clone, Default)]
pub struct MyApi {
    store: UserStore,
}

impl MyApi {
    pub fn new(store: UserStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, _ctx: Context, params: ProfileParams) -> Result<User, ApiError> {
        if params.login == "bad_user" {
            return Err(ApiError::from_business(StoreError::Rejected));
        }

        self.store
            .find(&params.login)
            .map_err(ApiError::from_business)?
            .ok_or_else(|| ApiError::not_found("user not exist"))
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, _ctx: Context, params: CreateParams) -> Result<NewUser, ApiError> {
        if params.login == "bad_username" {
            return Err(ApiError::from_business(StoreError::Rejected));
        }

        let inserted = self
            .store
            .insert(&params.login, &params.name, status_code(&params.status))
            .map_err(ApiError::from_business)?;

        match inserted {
            Some(user) => {
                tracing::info!(id = user.id, login = %user.login, "user created");
                Ok(NewUser { id: user.id })
            }
            None => Err(ApiError::conflict(format!("user {} exist", params.login))),
        }
    }
}

/// Second receiver sharing a url with [`MyApi`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OtherApi;

impl OtherApi {
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(
        &self,
        _ctx: &Context,
        params: &OtherCreateParams,
    ) -> Result<OtherUser, StoreError> {
        if params.username == "bad_username" {
            return Err(StoreError::Rejected);
        }

        Ok(OtherUser {
            id: 12,
            login: params.username.clone(),
            full_name: params.name.clone(),
            level: params.level,
        })
    }
}

include!(concat!(env!("OUT_DIR"), "/api_handlers.rs"));
