//! Derived post fields as a pure function.
//!
//! Slug, excerpt, read time, and the publication timestamp are computed here
//! before persistence. The store never derives anything implicitly.

use chrono::{DateTime, Utc};

use super::post::{Post, PostPatch, PostStatus};

const EXCERPT_LEN: usize = 150;
const WORDS_PER_MINUTE: usize = 200;

/// Fields recomputed for a create or update. `None` means "no change".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedFields {
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub read_time: Option<i32>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Compute the derived fields for a patch applied on top of `previous`
/// (`None` for creation). `slug_token` is the uniqueness suffix appended to
/// generated slugs; the caller supplies it so this function stays
/// deterministic.
pub fn derive_post_fields(
    previous: Option<&Post>,
    patch: &PostPatch,
    now: DateTime<Utc>,
    slug_token: &str,
) -> DerivedFields {
    let mut derived = DerivedFields::default();

    // Slug follows the title: generated at creation, regenerated when the
    // title actually changes.
    let title_changed = match (previous, patch.title.as_deref()) {
        (None, Some(_)) => true,
        (Some(prev), Some(title)) => prev.title != title,
        _ => false,
    };
    if title_changed {
        if let Some(title) = patch.title.as_deref() {
            derived.slug = Some(format!("{}-{}", slugify(title), slug_token));
        }
    }

    let content_changed = match (previous, patch.content.as_deref()) {
        (None, Some(_)) => true,
        (Some(prev), Some(content)) => prev.content != content,
        _ => false,
    };

    // An excerpt explicitly supplied in the same patch wins over derivation.
    if content_changed && patch.excerpt.is_none() {
        let content = patch.content.as_deref().unwrap_or_default();
        derived.excerpt = Some(format!(
            "{}...",
            content.chars().take(EXCERPT_LEN).collect::<String>()
        ));
    }

    if content_changed {
        let words = patch
            .content
            .as_deref()
            .map(word_count)
            .unwrap_or_default();
        derived.read_time = Some(read_time_minutes(words));
    }

    // published_at is set exactly once, on the first transition to Published.
    let becomes_published = patch.status == Some(PostStatus::Published);
    let already_published = previous.is_some_and(|p| p.published_at.is_some());
    if becomes_published && !already_published {
        derived.published_at = Some(now);
    }

    derived
}

/// Lowercase the title, collapse non-alphanumeric runs to single hyphens,
/// and trim hyphens from the edges.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Estimated minutes to read at 200 words per minute, never below 1.
fn read_time_minutes(words: usize) -> i32 {
    (words.div_ceil(WORDS_PER_MINUTE)).max(1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn existing_post() -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "Original Title".to_string(),
            content: "some original content with several words".to_string(),
            excerpt: "some original content...".to_string(),
            slug: "original-title-abc123".to_string(),
            featured_image: None,
            status: PostStatus::Draft,
            tags: vec![],
            category: None,
            read_time: 1,
            views: 0,
            likes: 0,
            published_at: None,
            meta_title: None,
            meta_description: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  --Rust & Actix--  "), "rust-actix");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }

    #[test]
    fn create_derives_slug_with_token() {
        let patch = PostPatch {
            title: Some("Hello, World!".to_string()),
            content: Some("ten characters of content".to_string()),
            ..Default::default()
        };
        let derived = derive_post_fields(None, &patch, Utc::now(), "f00dcafe");
        assert_eq!(derived.slug.as_deref(), Some("hello-world-f00dcafe"));
    }

    #[test]
    fn create_derives_excerpt_from_content() {
        let content = "word ".repeat(100);
        let patch = PostPatch {
            title: Some("T".repeat(3)),
            content: Some(content.clone()),
            ..Default::default()
        };
        let derived = derive_post_fields(None, &patch, Utc::now(), "t");
        let excerpt = derived.excerpt.unwrap();
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), 150 + 3);
        assert!(content.starts_with(excerpt.trim_end_matches("...")));
    }

    #[test]
    fn explicit_excerpt_suppresses_derivation() {
        let patch = PostPatch {
            content: Some("entirely new content for the article".to_string()),
            excerpt: Some("hand written excerpt".to_string()),
            ..Default::default()
        };
        let derived = derive_post_fields(Some(&existing_post()), &patch, Utc::now(), "t");
        assert_eq!(derived.excerpt, None);
    }

    #[test]
    fn read_time_uses_ceiling_with_floor_of_one() {
        for (words, minutes) in [(1, 1), (199, 1), (200, 1), (201, 2), (600, 3), (601, 4)] {
            let content = vec!["word"; words].join(" ");
            let patch = PostPatch {
                content: Some(content),
                ..Default::default()
            };
            let derived = derive_post_fields(None, &patch, Utc::now(), "t");
            assert_eq!(derived.read_time, Some(minutes), "words = {words}");
        }
    }

    #[test]
    fn unchanged_title_keeps_slug() {
        let prev = existing_post();
        let patch = PostPatch {
            title: Some(prev.title.clone()),
            category: Some("rust".to_string()),
            ..Default::default()
        };
        let derived = derive_post_fields(Some(&prev), &patch, Utc::now(), "t");
        assert_eq!(derived.slug, None);
        assert_eq!(derived.read_time, None);
    }

    #[test]
    fn first_publish_sets_published_at_once() {
        let mut prev = existing_post();
        let patch = PostPatch {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let first = derive_post_fields(Some(&prev), &patch, Utc::now(), "t");
        assert!(first.published_at.is_some());

        prev.status = PostStatus::Published;
        prev.published_at = first.published_at;
        let again = derive_post_fields(Some(&prev), &patch, Utc::now(), "t");
        assert_eq!(again.published_at, None);
    }

    #[test]
    fn create_as_published_sets_published_at() {
        let patch = PostPatch {
            title: Some("A Launch Post".to_string()),
            content: Some("launch day content here".to_string()),
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let derived = derive_post_fields(None, &patch, Utc::now(), "t");
        assert!(derived.published_at.is_some());
    }
}
