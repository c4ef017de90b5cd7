use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::debug;

use crate::bloglist_engine::storage_core::{BlogListStorage, storage_methods::StorageMethods};
use crate::bloglist_engine::types::StoreError;
use crate::bloglist_gateway::gateway::{AppState, respond};
use crate::protocol::{self, BlogListError, Format, JsonBody, request::parse_id};
use crate::utils::{
    id::ID,
    items::{Blog, BlogUpdate, NewBlog},
};

// curl "http://localhost:PORT/api/blogs"
pub async fn list_blogs_handler(State(state): State<Arc<AppState>>) -> axum::response::Response {
    respond(state.worker_pool.process(list_blogs_inner).await)
}

pub fn list_blogs_inner(storage: &BlogListStorage) -> Result<protocol::Response, BlogListError> {
    let txn = storage.env.read_txn()?;
    let blogs = storage.list_blogs(&txn)?;
    Format::Json.create_response(StatusCode::OK, &blogs)
}

pub async fn get_blog_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return respond(Err(e)),
    };
    respond(state.worker_pool.process(move |s| get_blog_inner(s, id)).await)
}

pub fn get_blog_inner(storage: &BlogListStorage, id: ID) -> Result<protocol::Response, BlogListError> {
    let txn = storage.env.read_txn()?;
    let blog = storage.get_blog(&txn, &id)?;
    Format::Json.create_response(StatusCode::OK, &blog)
}

// curl -X POST -H 'Content-Type: application/json' \
//   -d '{"title":"...","author":"...","url":"...","likes":0}' "http://localhost:PORT/api/blogs"
pub async fn create_blog_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(new_blog): JsonBody<NewBlog>,
) -> axum::response::Response {
    respond(
        state
            .worker_pool
            .process(move |s| create_blog_inner(s, new_blog))
            .await,
    )
}

pub fn create_blog_inner(
    storage: &BlogListStorage,
    new_blog: NewBlog,
) -> Result<protocol::Response, BlogListError> {
    let title = required(new_blog.title, "title")?;
    let url = required(new_blog.url, "url")?;

    let blog = Blog {
        id: ID::generate(),
        title,
        author: new_blog.author,
        url,
        likes: new_blog.likes.unwrap_or(0),
        user: new_blog.user_id,
    };

    let mut txn = storage.env.write_txn()?;
    match storage.insert_blog(&mut txn, &blog) {
        Ok(()) => {}
        Err(StoreError::UserNotFound) => {
            return Err(BlogListError::Validation("user does not exist".to_string()));
        }
        Err(e) => return Err(e.into()),
    }
    txn.commit()?;

    debug!(id = %blog.id, "Created blog");
    Format::Json.create_response(StatusCode::CREATED, &blog)
}

// curl -X PUT -H 'Content-Type: application/json' -d '{"likes":5}' "http://localhost:PORT/api/blogs/ID"
pub async fn update_blog_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<BlogUpdate>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return respond(Err(e)),
    };
    respond(
        state
            .worker_pool
            .process(move |s| update_blog_inner(s, id, update))
            .await,
    )
}

pub fn update_blog_inner(
    storage: &BlogListStorage,
    id: ID,
    update: BlogUpdate,
) -> Result<protocol::Response, BlogListError> {
    let mut txn = storage.env.write_txn()?;
    let mut blog = storage.get_blog(&txn, &id)?;
    update.apply(&mut blog);
    not_blank(&blog.title, "title")?;
    not_blank(&blog.url, "url")?;

    storage.update_blog(&mut txn, &blog)?;
    txn.commit()?;

    Format::Json.create_response(StatusCode::OK, &blog)
}

// curl -X DELETE "http://localhost:PORT/api/blogs/ID"
pub async fn delete_blog_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return respond(Err(e)),
    };
    respond(state.worker_pool.process(move |s| delete_blog_inner(s, id)).await)
}

pub fn delete_blog_inner(storage: &BlogListStorage, id: ID) -> Result<protocol::Response, BlogListError> {
    let mut txn = storage.env.write_txn()?;
    let removed = storage.drop_blog(&mut txn, &id)?;
    txn.commit()?;

    debug!(%id, removed, "Deleted blog");
    Ok(protocol::Response::no_content())
}

fn required(value: Option<String>, field: &str) -> Result<String, BlogListError> {
    let value = value.unwrap_or_default();
    not_blank(&value, field)?;
    Ok(value)
}

/// Whitespace-only values count as missing, on create and on update alike.
fn not_blank(value: &str, field: &str) -> Result<(), BlogListError> {
    if value.trim().is_empty() {
        return Err(BlogListError::Validation(format!("{field} is required")));
    }
    Ok(())
}
