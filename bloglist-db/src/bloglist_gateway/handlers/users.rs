use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use tracing::debug;

use crate::bloglist_engine::config::Config;
use crate::bloglist_engine::storage_core::{
    BlogListStorage, MAX_KEY_BYTES, storage_methods::StorageMethods,
};
use crate::bloglist_engine::types::StoreError;
use crate::bloglist_gateway::gateway::{AppState, respond};
use crate::protocol::{self, BlogListError, Format, JsonBody};
use crate::utils::{
    id::ID,
    items::{BlogSummary, NewUser, PopulatedUser, User},
    password::hash_password,
};

const USERNAME_TAKEN: &str = "Username already exists.";

/// Length limits applied when registering a user.
#[derive(Debug, Clone, Copy)]
pub struct UserRules {
    pub min_username_len: usize,
    pub min_password_len: usize,
}

impl From<&Config> for UserRules {
    fn from(config: &Config) -> Self {
        UserRules {
            min_username_len: config.min_username_len,
            min_password_len: config.min_password_len,
        }
    }
}

// curl "http://localhost:PORT/api/users"
pub async fn list_users_handler(State(state): State<Arc<AppState>>) -> axum::response::Response {
    respond(state.worker_pool.process(list_users_inner).await)
}

pub fn list_users_inner(storage: &BlogListStorage) -> Result<protocol::Response, BlogListError> {
    let txn = storage.env.read_txn()?;

    let users = storage
        .list_users(&txn)?
        .into_iter()
        .map(|user| -> Result<PopulatedUser, StoreError> {
            let blogs = storage
                .user_blog_ids(&txn, &user.id)?
                .iter()
                .map(|blog_id| storage.get_blog(&txn, blog_id).map(|b| BlogSummary::from(&b)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(user.populate(blogs))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Format::Json.create_response(StatusCode::OK, &users)
}

// curl -X POST -H 'Content-Type: application/json' \
//   -d '{"username":"root","name":"Superuser","password":"salainen"}' "http://localhost:PORT/api/users"
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(new_user): JsonBody<NewUser>,
) -> axum::response::Response {
    let rules = UserRules::from(&state.config);
    respond(
        state
            .worker_pool
            .process(move |s| create_user_inner(s, rules, new_user))
            .await,
    )
}

/// Registers a user.
///
/// Checks run in this order, the first failure wins:
/// 1. the username is not taken
/// 2. the password is long enough
/// 3. the username is long enough
/// 4. a name is present
pub fn create_user_inner(
    storage: &BlogListStorage,
    rules: UserRules,
    new_user: NewUser,
) -> Result<protocol::Response, BlogListError> {
    let username = new_user.username.unwrap_or_default();
    let password = new_user.password.unwrap_or_default();

    {
        let txn = storage.env.read_txn()?;
        if storage.find_user_by_username(&txn, &username)?.is_some() {
            return Err(BlogListError::Validation(USERNAME_TAKEN.to_string()));
        }
    }

    if password.chars().count() < rules.min_password_len {
        return Err(BlogListError::Validation(format!(
            "Password must be at least {} characters long.",
            rules.min_password_len
        )));
    }
    if username.chars().count() < rules.min_username_len {
        return Err(BlogListError::Validation(format!(
            "Username must be at least {} characters long.",
            rules.min_username_len
        )));
    }
    if username.len() > MAX_KEY_BYTES {
        return Err(BlogListError::Validation("Username is too long.".to_string()));
    }
    let name = match new_user.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(BlogListError::Validation("name is required".to_string())),
    };

    // hashing is slow, keep it outside the write transaction
    let user = User {
        id: ID::generate(),
        username,
        name,
        password_hash: hash_password(&password)?,
    };

    let mut txn = storage.env.write_txn()?;
    match storage.insert_user(&mut txn, &user) {
        Ok(()) => {}
        Err(StoreError::DuplicateKey(_)) => {
            return Err(BlogListError::Validation(USERNAME_TAKEN.to_string()));
        }
        Err(e) => return Err(e.into()),
    }
    txn.commit()?;

    debug!(username = %user.username, "Created user");
    Format::Json.create_response(StatusCode::CREATED, &user.populate(Vec::new()))
}
