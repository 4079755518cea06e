//! Albums and images.
//!
//! Albums form an ordered forest: each album holds sub-albums and images,
//! both in display order. Order is semantic here (unlike posts), so it is
//! part of the fingerprint.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::string_id;

string_id!(
    /// Identifier of an album.
    AlbumId
);
string_id!(
    /// Identifier of an image.
    ImageId
);

/// An ordered collection of images and sub-albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub description: String,
    /// Sub-albums in display order.
    pub albums: Vec<Album>,
    /// Images in display order.
    pub images: Vec<Image>,
}

impl Album {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: AlbumId::random(),
            title: title.into(),
            description: String::new(),
            albums: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: AlbumId::new(id),
            title: title.into(),
            description: String::new(),
            albums: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// An image stored in the distributed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    /// Store key of the uploaded image data, once the upload finished.
    pub key: Option<String>,
    pub title: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: ImageId::random(),
            key: None,
            title: title.into(),
            description: String::new(),
            width,
            height,
        }
    }

    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ImageId::new(id),
            key: None,
            title: title.into(),
            description: String::new(),
            width: 0,
            height: 0,
        }
    }
}
