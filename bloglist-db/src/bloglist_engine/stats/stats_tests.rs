use proptest::prelude::*;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct TestBlog {
    title: &'static str,
    author: Option<&'static str>,
    likes: u64,
}

impl BlogRecord for TestBlog {
    fn author(&self) -> Option<&str> {
        self.author
    }

    fn likes(&self) -> u64 {
        self.likes
    }
}

fn blog(title: &'static str, author: &'static str, likes: u64) -> TestBlog {
    TestBlog {
        title,
        author: Some(author),
        likes,
    }
}

fn sample_blogs() -> Vec<TestBlog> {
    vec![
        blog("React patterns", "Michael Chan", 7),
        blog("Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
        blog("Canonical string reduction", "Edsger W. Dijkstra", 12),
        blog("First class tests", "Robert C. Martin", 10),
        blog("TDD harms architecture", "Robert C. Martin", 0),
        blog("Type wars", "Robert C. Martin", 2),
    ]
}

// ============================================================================
// dummy
// ============================================================================

#[test]
fn test_dummy_returns_one() {
    assert_eq!(dummy(), 1);
    assert_eq!(dummy(), dummy());
}

// ============================================================================
// total_likes
// ============================================================================

#[test]
fn test_total_likes_empty() {
    let blogs: Vec<TestBlog> = vec![];
    assert_eq!(total_likes(&blogs), 0);
}

#[test]
fn test_total_likes_single() {
    assert_eq!(total_likes(&[blog("only", "A", 5)]), 5);
}

#[test]
fn test_total_likes_many() {
    assert_eq!(total_likes(&sample_blogs()), 36);
}

#[test]
fn test_total_likes_saturates() {
    let blogs = [blog("a", "A", u64::MAX), blog("b", "B", 1)];
    assert_eq!(total_likes(&blogs), u64::MAX);
}

// ============================================================================
// favorite_blog
// ============================================================================

#[test]
fn test_favorite_blog_empty_is_none() {
    let blogs: Vec<TestBlog> = vec![];
    assert_eq!(favorite_blog(&blogs), None);
}

#[test]
fn test_favorite_blog_picks_max() {
    let blogs = sample_blogs();
    let favorite = favorite_blog(&blogs).unwrap();
    assert_eq!(favorite.title, "Canonical string reduction");
    assert_eq!(favorite.likes, 12);
}

#[test]
fn test_favorite_blog_first_wins_on_tie() {
    let blogs = [blog("a", "A", 5), blog("b", "B", 10), blog("c", "C", 10)];
    assert_eq!(favorite_blog(&blogs).unwrap().title, "b");
}

#[test]
fn test_favorite_blog_all_zero_returns_first() {
    let blogs = [blog("a", "A", 0), blog("b", "B", 0)];
    assert_eq!(favorite_blog(&blogs).unwrap().title, "a");
}

// ============================================================================
// most_blogs
// ============================================================================

#[test]
fn test_most_blogs_empty_is_none() {
    let blogs: Vec<TestBlog> = vec![];
    assert_eq!(most_blogs(&blogs), None);
}

#[test]
fn test_most_blogs_counts_per_author() {
    let blogs = [blog("1", "A", 0), blog("2", "A", 0), blog("3", "B", 0)];
    assert_eq!(
        most_blogs(&blogs),
        Some(AuthorBlogs {
            author: Some("A".to_string()),
            blogs: 2,
        })
    );
}

#[test]
fn test_most_blogs_sample() {
    assert_eq!(
        most_blogs(&sample_blogs()),
        Some(AuthorBlogs {
            author: Some("Robert C. Martin".to_string()),
            blogs: 3,
        })
    );
}

#[test]
fn test_most_blogs_tie_goes_to_first_seen_author() {
    let blogs = [
        blog("1", "B", 0),
        blog("2", "A", 0),
        blog("3", "A", 0),
        blog("4", "B", 0),
    ];
    assert_eq!(most_blogs(&blogs).unwrap().author.as_deref(), Some("B"));
}

#[test]
fn test_most_blogs_author_is_case_sensitive() {
    let blogs = [blog("1", "ann", 0), blog("2", "Ann", 0), blog("3", "Ann", 0)];
    assert_eq!(most_blogs(&blogs).unwrap().author.as_deref(), Some("Ann"));
}

#[test]
fn test_most_blogs_missing_author_is_its_own_group() {
    let anonymous = |title| TestBlog {
        title,
        author: None,
        likes: 1,
    };
    let blogs = [anonymous("1"), blog("2", "A", 1), anonymous("3")];
    assert_eq!(
        most_blogs(&blogs),
        Some(AuthorBlogs {
            author: None,
            blogs: 2,
        })
    );
}

// ============================================================================
// most_likes
// ============================================================================

#[test]
fn test_most_likes_empty_is_none() {
    let blogs: Vec<TestBlog> = vec![];
    assert_eq!(most_likes(&blogs), None);
}

#[test]
fn test_most_likes_sums_per_author() {
    let blogs = [blog("1", "A", 3), blog("2", "A", 4), blog("3", "B", 5)];
    assert_eq!(
        most_likes(&blogs),
        Some(AuthorLikes {
            author: Some("A".to_string()),
            likes: 7,
        })
    );
}

#[test]
fn test_most_likes_sample() {
    assert_eq!(
        most_likes(&sample_blogs()),
        Some(AuthorLikes {
            author: Some("Edsger W. Dijkstra".to_string()),
            likes: 17,
        })
    );
}

#[test]
fn test_most_likes_tie_goes_to_first_seen_author() {
    let blogs = [blog("1", "A", 4), blog("2", "B", 6), blog("3", "A", 2)];
    assert_eq!(most_likes(&blogs).unwrap().author.as_deref(), Some("A"));
}

// ============================================================================
// Serialization of summaries
// ============================================================================

#[test]
fn test_author_summary_json() {
    let summary = AuthorBlogs {
        author: Some("A".to_string()),
        blogs: 2,
    };
    assert_eq!(
        sonic_rs::to_string(&summary).unwrap(),
        r#"{"author":"A","blogs":2}"#
    );
}

// ============================================================================
// Properties
// ============================================================================

const AUTHORS: [&str; 4] = ["A", "B", "C", "D"];

fn arb_blogs() -> impl Strategy<Value = Vec<TestBlog>> {
    prop::collection::vec((0..AUTHORS.len(), 0u64..1_000), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(author, likes)| blog("t", AUTHORS[author], likes))
            .collect()
    })
}

fn likes_of(blogs: &[TestBlog], author: &str) -> u64 {
    blogs
        .iter()
        .filter(|b| b.author == Some(author))
        .map(|b| b.likes)
        .sum()
}

fn count_of(blogs: &[TestBlog], author: &str) -> u64 {
    blogs.iter().filter(|b| b.author == Some(author)).count() as u64
}

proptest! {
    #[test]
    fn prop_total_likes_ignores_order(mut blogs in arb_blogs()) {
        let before = total_likes(&blogs);
        blogs.reverse();
        prop_assert_eq!(total_likes(&blogs), before);
    }

    #[test]
    fn prop_favorite_blog_is_maximal(blogs in arb_blogs()) {
        match favorite_blog(&blogs) {
            None => prop_assert!(blogs.is_empty()),
            Some(favorite) => {
                prop_assert!(blogs.iter().all(|b| b.likes <= favorite.likes));
                let first = blogs.iter().position(|b| b.likes == favorite.likes).unwrap();
                prop_assert!(std::ptr::eq(favorite, &blogs[first]));
            }
        }
    }

    #[test]
    fn prop_most_blogs_is_maximal(blogs in arb_blogs()) {
        match most_blogs(&blogs) {
            None => prop_assert!(blogs.is_empty()),
            Some(winner) => {
                let author = winner.author.clone().unwrap();
                prop_assert_eq!(winner.blogs, count_of(&blogs, &author));
                for other in AUTHORS {
                    prop_assert!(count_of(&blogs, other) <= winner.blogs);
                }
            }
        }
    }

    #[test]
    fn prop_most_likes_is_maximal(blogs in arb_blogs()) {
        match most_likes(&blogs) {
            None => prop_assert!(blogs.is_empty()),
            Some(winner) => {
                let author = winner.author.clone().unwrap();
                prop_assert_eq!(winner.likes, likes_of(&blogs, &author));
                for other in AUTHORS {
                    prop_assert!(likes_of(&blogs, other) <= winner.likes);
                }
            }
        }
    }

    #[test]
    fn prop_group_totals_add_up(blogs in arb_blogs()) {
        let total: u64 = AUTHORS.iter().map(|a| likes_of(&blogs, a)).sum();
        prop_assert_eq!(total, total_likes(&blogs));
    }
}
