//! Aggregations over a list of blogs.
//!
//! Every function is pure. Ties always resolve to the earliest entry: the
//! first blog for [`favorite_blog`], the first author seen for
//! [`most_blogs`] and [`most_likes`].

use serde::{Deserialize, Serialize};

use crate::models::models::Blog;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthorBlogs {
    pub author: String,
    pub blogs: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: u64,
}

pub fn dummy(_blogs: &[Blog]) -> u64 {
    1
}

/// Saturates at `u64::MAX`.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs.iter().fold(0u64, |acc, b| acc.saturating_add(b.likes))
}

pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    let mut iter = blogs.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |fav, b| if b.likes > fav.likes { b } else { fav }))
}

pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    top_author(blogs, |_| 1).map(|(author, blogs)| AuthorBlogs { author, blogs })
}

pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    top_author(blogs, |b| b.likes).map(|(author, likes)| AuthorLikes { author, likes })
}

/// Sums `weight` per author, keeping authors in first-seen order, and
/// returns the author with the strictly largest total. Totals saturate.
fn top_author(blogs: &[Blog], weight: impl Fn(&Blog) -> u64) -> Option<(String, u64)> {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    for blog in blogs {
        match totals.iter_mut().find(|(a, _)| *a == blog.author) {
            Some((_, total)) => *total = total.saturating_add(weight(blog)),
            None => totals.push((blog.author.as_str(), weight(blog))),
        }
    }

    let mut iter = totals.into_iter();
    let first = iter.next()?;
    let (author, total) = iter.fold(first, |top, cur| if cur.1 > top.1 { cur } else { top });
    Some((author.to_string(), total))
}
