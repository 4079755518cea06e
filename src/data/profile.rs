//! Feed profiles.

use serde::{Deserialize, Serialize};

use super::ImageId;

/// A user's profile: names, avatar, and free-form fields, all optional.
///
/// `Profile` is a plain value type; the feed stores its own copy so a
/// profile held by the application can be edited freely and stored back in
/// one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// Image used as the avatar, if one was chosen.
    pub avatar: Option<ImageId>,
    /// Custom fields in display order.
    pub fields: Vec<ProfileField>,
}

impl Profile {
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(ProfileField {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn remove_field(&mut self, name: &str) {
        self.fields.retain(|field| field.name != name);
    }
}

/// A single named profile field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileField {
    pub name: String,
    pub value: String,
}
