// Remote-to-store conversions.

use crate::remote::{RemotePost, RemoteUser};
use crate::store::{Post, User};

/// Flatten a remote user into a store row filed under `id`.
pub fn flatten_user(id: u64, remote: RemoteUser) -> User {
    User {
        id,
        name: remote.name,
        email: remote.email,
        phone: remote.phone,
        website: remote.website,
        city: remote.address.city,
        company: remote.company.name,
    }
}

/// Convert remote posts into store rows owned by `user_id`, each carrying
/// the caller's annotation.
pub fn tag_posts(user_id: u64, posts: Vec<RemotePost>, annotation: Option<&str>) -> Vec<Post> {
    posts
        .into_iter()
        .map(|post| Post {
            user_id,
            title: post.title,
            body: post.body,
            company: annotation.map(str::to_string),
        })
        .collect()
}
