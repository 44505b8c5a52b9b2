//! Admin form input and validation.
//!
//! Each form is normalized (whitespace trimmed, empty optional strings turned
//! into `None`), validated with `validator`, and finally resolved into a
//! `Valid*` value whose slug is always present. Validation happens before any
//! database or storage call.

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::slug::{slugify, SLUG_REGEX};
use crate::types::DbId;

/// Trim an optional string, mapping blank input to `None`.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Use the explicit slug or derive one from `source`.
///
/// Fails on the `slug` field when nothing usable can be derived.
fn resolve_slug(explicit: Option<String>, source: &str) -> Result<String, CoreError> {
    let slug = explicit.unwrap_or_else(|| slugify(source));
    if slug.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "slug",
            ValidationError::new("derive")
                .with_message("A slug could not be derived; please enter one".into()),
        );
        return Err(errors.into());
    }
    Ok(slug)
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryForm {
    pub id: Option<DbId>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(regex(path = *SLUG_REGEX, message = "Slug may only contain lowercase letters, digits and hyphens"))]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCategory {
    pub id: Option<DbId>,
    pub name: String,
    pub slug: String,
}

impl CategoryForm {
    pub fn into_valid(self) -> Result<ValidCategory, CoreError> {
        let form = Self {
            id: self.id,
            name: self.name.trim().to_string(),
            slug: normalize(self.slug),
        };
        form.validate()?;
        let slug = resolve_slug(form.slug, &form.name)?;
        Ok(ValidCategory {
            id: form.id,
            name: form.name,
            slug,
        })
    }
}

// ---------------------------------------------------------------------------
// Subcategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubcategoryForm {
    pub id: Option<DbId>,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(regex(path = *SLUG_REGEX, message = "Slug may only contain lowercase letters, digits and hyphens"))]
    pub slug: Option<String>,
    #[validate(required(message = "Please select a parent category"))]
    pub category_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubcategory {
    pub id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub category_id: DbId,
}

impl SubcategoryForm {
    pub fn into_valid(self) -> Result<ValidSubcategory, CoreError> {
        let form = Self {
            id: self.id,
            name: self.name.trim().to_string(),
            slug: normalize(self.slug),
            category_id: self.category_id,
        };
        form.validate()?;
        let slug = resolve_slug(form.slug, &form.name)?;
        let category_id = form
            .category_id
            .ok_or_else(|| CoreError::Validation("category_id is required".into()))?;
        Ok(ValidSubcategory {
            id: form.id,
            name: form.name,
            slug,
            category_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Project form fields. Built from a multipart request by the API layer; the
/// image file itself travels separately.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectForm {
    pub id: Option<DbId>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(regex(path = *SLUG_REGEX, message = "Slug may only contain lowercase letters, digits and hyphens"))]
    pub slug: Option<String>,
    pub content: Option<String>,
    #[validate(url(message = "Music link must be a valid URL"))]
    pub music_url: Option<String>,
    /// Existing image reference to keep when no new file is uploaded.
    pub image_url: Option<String>,
    #[validate(required(message = "Please select a category"))]
    pub category_id: Option<DbId>,
    pub subcategory_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub music_url: Option<String>,
    pub image_url: Option<String>,
    pub category_id: DbId,
    pub subcategory_id: Option<DbId>,
}

impl ProjectForm {
    pub fn into_valid(self) -> Result<ValidProject, CoreError> {
        let form = Self {
            id: self.id,
            title: self.title.trim().to_string(),
            slug: normalize(self.slug),
            // Content is long-form text; only blank content is dropped.
            content: self.content.filter(|c| !c.trim().is_empty()),
            music_url: normalize(self.music_url),
            image_url: normalize(self.image_url),
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
        };
        form.validate()?;
        let slug = resolve_slug(form.slug, &form.title)?;
        let category_id = form
            .category_id
            .ok_or_else(|| CoreError::Validation("category_id is required".into()))?;
        Ok(ValidProject {
            id: form.id,
            title: form.title,
            slug,
            content: form.content,
            music_url: form.music_url,
            image_url: form.image_url,
            category_id,
            subcategory_id: form.subcategory_id,
        })
    }
}
