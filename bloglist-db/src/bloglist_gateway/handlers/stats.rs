use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::bloglist_engine::stats::{self, AuthorBlogs, AuthorLikes};
use crate::bloglist_engine::storage_core::{BlogListStorage, storage_methods::StorageMethods};
use crate::bloglist_gateway::gateway::{AppState, respond};
use crate::protocol::{self, BlogListError, Format, OrEmpty};
use crate::utils::items::Blog;

/// Statistics over every stored blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    pub total_likes: u64,
    pub favorite_blog: OrEmpty<Blog>,
    pub most_blogs: OrEmpty<AuthorBlogs>,
    pub most_likes: OrEmpty<AuthorLikes>,
}

impl BlogStats {
    pub fn from_blogs(blogs: &[Blog]) -> Self {
        BlogStats {
            total_likes: stats::total_likes(blogs),
            favorite_blog: stats::favorite_blog(blogs).cloned().into(),
            most_blogs: stats::most_blogs(blogs).into(),
            most_likes: stats::most_likes(blogs).into(),
        }
    }
}

// curl "http://localhost:PORT/api/blogs/stats"
pub async fn blog_stats_handler(State(state): State<Arc<AppState>>) -> axum::response::Response {
    respond(state.worker_pool.process(blog_stats_inner).await)
}

pub fn blog_stats_inner(storage: &BlogListStorage) -> Result<protocol::Response, BlogListError> {
    let txn = storage.env.read_txn()?;
    let blogs = storage.list_blogs(&txn)?;
    Format::Json.create_response(StatusCode::OK, &BlogStats::from_blogs(&blogs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bloglist_gateway::handlers::blogs::create_blog_inner;
    use crate::bloglist_gateway::handlers::test_utils::setup_storage;
    use crate::utils::items::NewBlog;

    fn add_blog(storage: &BlogListStorage, title: &str, author: &str, likes: u64) {
        let body = NewBlog {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            url: Some(format!("https://blogs.test/{title}")),
            likes: Some(likes),
            user_id: None,
        };
        create_blog_inner(storage, body).unwrap();
    }

    #[test]
    fn test_stats_on_empty_store() {
        let (storage, _temp_dir) = setup_storage();
        let response = blog_stats_inner(&storage).unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            std::str::from_utf8(&response.body).unwrap(),
            r#"{"totalLikes":0,"favoriteBlog":{},"mostBlogs":{},"mostLikes":{}}"#
        );
    }

    #[test]
    fn test_stats_over_stored_blogs() {
        let (storage, _temp_dir) = setup_storage();
        add_blog(&storage, "a", "A", 3);
        add_blog(&storage, "b", "A", 4);
        add_blog(&storage, "c", "B", 5);

        let response = blog_stats_inner(&storage).unwrap();
        let stats: BlogStats = sonic_rs::from_slice(&response.body).unwrap();

        assert_eq!(stats.total_likes, 12);
        assert_eq!(stats.favorite_blog.into_option().unwrap().title, "c");
        assert_eq!(
            stats.most_blogs.into_option(),
            Some(AuthorBlogs {
                author: Some("A".to_string()),
                blogs: 2,
            })
        );
        assert_eq!(
            stats.most_likes.into_option(),
            Some(AuthorLikes {
                author: Some("A".to_string()),
                likes: 7,
            })
        );
    }

    #[test]
    fn test_stats_from_blogs_is_pure() {
        let blogs: Vec<Blog> = vec![];
        let stats = BlogStats::from_blogs(&blogs);
        assert_eq!(stats.favorite_blog, OrEmpty::Empty {});
        assert_eq!(stats.total_likes, 0);
    }
}
