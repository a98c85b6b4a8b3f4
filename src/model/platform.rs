//! Domain models for objects supplied by the upstream UCube platform client.
//!
//! These are transient: nothing here is persisted except post slugs recorded in
//! `Destination::already_posted`.

/// A UCube club ("community").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    /// Opaque upstream identifier.
    pub slug: String,
    /// Display name; compared case-insensitively.
    pub name: String,
}

/// A new-content event for a club.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub slug: String,
    pub post_slug: String,
    pub club_slug: String,
    pub club_name: String,
    /// Name of the user who created the post.
    pub user_name: String,
}

/// An image attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostImage {
    /// Download URL.
    pub path: String,
    /// File name used when staging the image locally.
    pub name: String,
}

/// A video attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostVideo {
    /// Download URL.
    pub url: String,
    /// File name, when the platform provides one.
    pub name: Option<String>,
}

/// Full content of a post, materialized by the platform client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub content: String,
    /// Name of the user who created the post.
    pub user_name: String,
    pub images: Vec<PostImage>,
    pub videos: Vec<PostVideo>,
}
