//! Summary statistics over a list of blogs.
//!
//! Everything here is pure: the functions only read the records they are given,
//! so they can be called from any thread on shared data. Absent results are
//! `None`; the gateway renders them as `{}`.

#[cfg(test)]
mod stats_tests;

use serde::{Deserialize, Serialize};

use crate::utils::group_by::GroupBy;

/// The two fields the statistics look at.
///
/// `likes` is trusted as-is. It is a `u64`, so non-numeric, negative and
/// fractional likes are turned away when a request body is decoded and never
/// reach these functions. Sums of likes saturate at `u64::MAX` rather than
/// wrapping.
pub trait BlogRecord {
    /// `None` is a group of its own; names compare case-sensitively.
    fn author(&self) -> Option<&str>;
    fn likes(&self) -> u64;
}

/// The author with the most blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorBlogs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub blogs: u64,
}

/// The author whose blogs have the most likes in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorLikes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub likes: u64,
}

/// Always 1. Used as a smoke test for the test harness.
pub const fn dummy() -> u64 {
    1
}

/// Sum of all likes, saturating at `u64::MAX`. Empty input gives 0.
pub fn total_likes<R: BlogRecord>(records: &[R]) -> u64 {
    records
        .iter()
        .fold(0u64, |sum, record| sum.saturating_add(record.likes()))
}

/// Returns the blog with the most likes. Ties go to the earliest blog.
pub fn favorite_blog<R: BlogRecord>(records: &[R]) -> Option<&R> {
    first_max_by_key(records.iter(), |record| record.likes())
}

pub fn most_blogs<R: BlogRecord>(records: &[R]) -> Option<AuthorBlogs> {
    let mut groups: GroupBy<Option<&str>, u64> = GroupBy::new();
    for record in records {
        *groups.entry(record.author()) += 1;
    }

    first_max_by_key(groups, |(_, blogs)| *blogs).map(|(author, blogs)| AuthorBlogs {
        author: author.map(str::to_string),
        blogs,
    })
}

pub fn most_likes<R: BlogRecord>(records: &[R]) -> Option<AuthorLikes> {
    let mut groups: GroupBy<Option<&str>, u64> = GroupBy::new();
    for record in records {
        let likes = groups.entry(record.author());
        *likes = likes.saturating_add(record.likes());
    }

    first_max_by_key(groups, |(_, likes)| *likes).map(|(author, likes)| AuthorLikes {
        author: author.map(str::to_string),
        likes,
    })
}

/// Like `Iterator::max_by_key`, but keeps the first maximum instead of the last.
fn first_max_by_key<I, T, F>(items: I, key: F) -> Option<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> u64,
{
    let mut best: Option<(u64, T)> = None;
    for item in items {
        let value = key(&item);
        let replace = match &best {
            Some((current, _)) => value > *current,
            None => true,
        };
        if replace {
            best = Some((value, item));
        }
    }
    best.map(|(_, item)| item)
}
