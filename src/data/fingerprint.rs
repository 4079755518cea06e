//! Content fingerprinting.
//!
//! A fingerprint is a deterministic string built from everything a feed
//! publishes. The scheduler compares fingerprints across ticks to detect
//! change, so the construction must be order-independent wherever the
//! underlying collection is unordered (posts, likes) and order-dependent
//! where order is semantic (replies by time, albums in display order).
//!
//! Fingerprints never leave the process and are only ever compared against
//! other fingerprints of the same feed, so a tagged concatenation is enough;
//! no digest is taken.

use super::{Album, Feed, Profile};

/// Types whose publishable content can be summarized as a deterministic
/// string. Computing the fingerprint never mutates the value.
pub trait Fingerprintable {
    fn fingerprint(&self) -> String;
}

impl Fingerprintable for Profile {
    fn fingerprint(&self) -> String {
        let mut fp = String::from("Profile(");
        if let Some(first_name) = &self.first_name {
            fp.push_str("FirstName(");
            fp.push_str(first_name);
            fp.push(')');
        }
        if let Some(middle_name) = &self.middle_name {
            fp.push_str("MiddleName(");
            fp.push_str(middle_name);
            fp.push(')');
        }
        if let Some(last_name) = &self.last_name {
            fp.push_str("LastName(");
            fp.push_str(last_name);
            fp.push(')');
        }
        if let Some(avatar) = &self.avatar {
            fp.push_str("Avatar(");
            fp.push_str(avatar.as_str());
            fp.push(')');
        }
        fp.push_str("Fields(");
        for field in &self.fields {
            fp.push_str("Field(");
            fp.push_str(&field.name);
            fp.push('=');
            fp.push_str(&field.value);
            fp.push(')');
        }
        fp.push(')');
        fp.push(')');
        fp
    }
}

impl Fingerprintable for Album {
    fn fingerprint(&self) -> String {
        let mut fp = String::from("Album(");
        fp.push_str("ID(");
        fp.push_str(self.id.as_str());
        fp.push(')');
        fp.push_str("Title(");
        fp.push_str(&self.title);
        fp.push(')');
        fp.push_str("Description(");
        fp.push_str(&self.description);
        fp.push(')');

        fp.push_str("Albums(");
        for album in &self.albums {
            fp.push_str(&album.fingerprint());
        }
        fp.push(')');

        fp.push_str("Images(");
        for image in &self.images {
            fp.push_str("Image(");
            fp.push_str("ID(");
            fp.push_str(image.id.as_str());
            fp.push(')');
            if let Some(key) = &image.key {
                fp.push_str("Key(");
                fp.push_str(key);
                fp.push(')');
            }
            fp.push_str("Title(");
            fp.push_str(&image.title);
            fp.push(')');
            fp.push_str("Description(");
            fp.push_str(&image.description);
            fp.push(')');
            fp.push_str(&format!("Size({}x{})", image.width, image.height));
            fp.push(')');
        }
        fp.push(')');

        fp.push(')');
        fp
    }
}

impl Fingerprintable for Feed {
    /// Construction order: profile, posts (sorted IDs), replies (newest
    /// first, ties in arrival order), liked post IDs, liked reply IDs,
    /// albums recursively in display order.
    fn fingerprint(&self) -> String {
        let mut fp = String::new();
        fp.push_str(&self.profile.fingerprint());

        fp.push_str("Posts(");
        // BTreeMap keys are already in sorted order; each ID appears at most
        // once, so sorted concatenation is an unordered content hash.
        for post_id in self.posts.keys() {
            fp.push_str("Post(");
            fp.push_str(post_id.as_str());
            fp.push(')');
        }
        fp.push(')');

        fp.push_str("Replies(");
        for reply in self.replies_by_time() {
            fp.push_str("Reply(");
            fp.push_str(reply.id.as_str());
            fp.push(')');
        }
        fp.push(')');

        fp.push_str("LikedPosts(");
        for post_id in &self.liked_post_ids {
            fp.push_str("Post(");
            fp.push_str(post_id.as_str());
            fp.push(')');
        }
        fp.push(')');

        fp.push_str("LikedReplies(");
        for reply_id in &self.liked_reply_ids {
            fp.push_str("Reply(");
            fp.push_str(reply_id.as_str());
            fp.push(')');
        }
        fp.push(')');

        fp.push_str("Albums(");
        for album in &self.albums {
            fp.push_str(&album.fingerprint());
        }
        fp.push(')');

        fp
    }
}
