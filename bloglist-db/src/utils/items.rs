//! Blog and user documents.
//!
//! Stored records omit the id, which is the LMDB key. JSON representations
//! carry the id as a hyphenated UUID string and never include password hashes.

use bincode::Options;
use serde::{Deserialize, Serialize};

use crate::{bloglist_engine::stats::BlogRecord, utils::id::ID};

/// A blog entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: ID,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// The user that added the blog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ID>,
}

#[derive(Serialize, Deserialize)]
struct StoredBlog {
    title: String,
    author: Option<String>,
    url: String,
    likes: u64,
    user: Option<ID>,
}

impl Blog {
    pub fn from_bincode_bytes(id: u128, bytes: &[u8]) -> bincode::Result<Self> {
        let stored: StoredBlog = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .deserialize(bytes)?;
        Ok(Blog {
            id: ID::from(id),
            title: stored.title,
            author: stored.author,
            url: stored.url,
            likes: stored.likes,
            user: stored.user,
        })
    }

    pub fn to_bincode_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(&StoredBlog {
            title: self.title.clone(),
            author: self.author.clone(),
            url: self.url.clone(),
            likes: self.likes,
            user: self.user,
        })
    }
}

impl BlogRecord for Blog {
    fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

impl std::fmt::Display for Blog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ id: {}, title: {}, likes: {} }}", self.id, self.title, self.likes)
    }
}

/// A registered user. Not serializable; use [`PopulatedUser`] for responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

#[derive(Serialize, Deserialize)]
struct StoredUser {
    username: String,
    name: String,
    password_hash: String,
}

impl User {
    pub fn from_bincode_bytes(id: u128, bytes: &[u8]) -> bincode::Result<Self> {
        let stored: StoredUser = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .allow_trailing_bytes()
            .deserialize(bytes)?;
        Ok(User {
            id: ID::from(id),
            username: stored.username,
            name: stored.name,
            password_hash: stored.password_hash,
        })
    }

    pub fn to_bincode_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(&StoredUser {
            username: self.username.clone(),
            name: self.name.clone(),
            password_hash: self.password_hash.clone(),
        })
    }

    pub fn populate(&self, blogs: Vec<BlogSummary>) -> PopulatedUser {
        PopulatedUser {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
            blogs,
        }
    }
}

/// The blog fields shown inside a user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub id: ID,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub url: String,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        BlogSummary {
            id: blog.id,
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
        }
    }
}

/// A user with its blogs resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedUser {
    pub id: ID,
    pub username: String,
    pub name: String,
    pub blogs: Vec<BlogSummary>,
}

// Request bodies. Every field is optional so that missing fields surface as
// validation errors with a message instead of a decode failure.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
    #[serde(alias = "user")]
    pub user_id: Option<ID>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<u64>,
}

impl BlogUpdate {
    /// Overwrites the fields present in the update.
    pub fn apply(self, blog: &mut Blog) {
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(author) = self.author {
            blog.author = Some(author);
        }
        if let Some(url) = self.url {
            blog.url = url;
        }
        if let Some(likes) = self.likes {
            blog.likes = likes;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}
