use serde::{Deserialize, Serialize};

use crate::schema::{artwork_fields as f, FromDocument};
use crate::{Categorized, Category, Collection, Document};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub prompt: String,
    pub category: Category,
    pub image_url: String,
}

impl Categorized for Artwork {
    fn category(&self) -> &Category {
        &self.category
    }
}

impl FromDocument for Artwork {
    const COLLECTION: Collection = Collection::Artworks;

    fn from_document(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            prompt: f::PROMPT.read(document),
            category: Category::new(f::CATEGORY.read(document)),
            image_url: f::IMAGE_URL.read(document),
        }
    }
}
