//! Short-form copy derived from a finished project: the business-profile post,
//! two social caption drafts, and the email that delivers the drafts.

use crate::common::utils::{hashtag, truncate_chars};

use super::models::{Caption, CaptionStyle, ContentArtifact, EmailDraft, SocialPost};

/// Google Business Profile rejects local posts longer than this.
pub const MAX_POST_CHARS: usize = 1500;

const STORY_OPENERS: &[&str] = &[
    "Another happy customer!",
    "Fresh off the job site:",
    "We love how this one turned out.",
    "Before and after, this is why we do it.",
];

const QUICK_OPENERS: &[&str] = &["Just finished:", "Job done:", "Latest project:"];

const HASHTAG_POOL: &[&str] = &[
    "#HomeImprovement",
    "#BeforeAndAfter",
    "#LocalBusiness",
    "#SupportLocal",
    "#HomeServices",
    "#JobWellDone",
    "#Craftsmanship",
    "#CurbAppeal",
];

const POOL_PICKS: usize = 3;

/// Build the short promotional post for the business profile.
pub fn promo_post(artifact: &ContentArtifact) -> SocialPost {
    let mut summary = format!("{}\n\n{}", artifact.title, artifact.summary);
    if artifact.page_url.is_some() {
        summary.push_str(" See the full project on our website.");
    }

    SocialPost {
        summary: truncate_chars(&summary, MAX_POST_CHARS),
        link: artifact.page_url.clone(),
        photo_url: artifact.media.first().map(|m| m.url.clone()),
    }
}

/// Two caption drafts in different styles. The rng decides openers and the
/// extra hashtags, so a fixed seed gives fixed output.
pub fn caption_variants(artifact: &ContentArtifact, rng: &mut fastrand::Rng) -> [Caption; 2] {
    let story_opener = STORY_OPENERS[rng.usize(..STORY_OPENERS.len())];
    let mut story_text = format!("{} {}", story_opener, artifact.summary);
    if let Some(url) = &artifact.page_url {
        story_text.push_str(&format!("\n\nSee more: {}", url));
    }

    let quick_opener = QUICK_OPENERS[rng.usize(..QUICK_OPENERS.len())];
    let quick_text = format!("{} {} in {}.", quick_opener, artifact.service, artifact.city);

    [
        Caption {
            style: CaptionStyle::Story,
            text: story_text,
            hashtags: hashtags(artifact, rng),
        },
        Caption {
            style: CaptionStyle::Quick,
            text: quick_text,
            hashtags: hashtags(artifact, rng),
        },
    ]
}

fn hashtags(artifact: &ContentArtifact, rng: &mut fastrand::Rng) -> Vec<String> {
    let mut tags: Vec<String> = [hashtag(&artifact.service), hashtag(&artifact.city)]
        .into_iter()
        .flatten()
        .collect();

    let mut pool: Vec<&str> = HASHTAG_POOL.to_vec();
    rng.shuffle(&mut pool);
    for tag in pool.into_iter().take(POOL_PICKS) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    tags
}

/// Email carrying both caption drafts and the photo links for manual posting.
pub fn draft_email(artifact: &ContentArtifact, captions: &[Caption]) -> EmailDraft {
    let subject = format!("Social drafts ready: {}", artifact.title);

    let mut body = format!(
        "New project published: {}\n{}\n",
        artifact.title,
        artifact.page_url.as_deref().unwrap_or("(no page URL configured)")
    );

    for (i, caption) in captions.iter().enumerate() {
        let label = match caption.style {
            CaptionStyle::Story => "story",
            CaptionStyle::Quick => "quick",
        };
        body.push_str(&format!(
            "\n--- Option {} ({}) ---\n{}\n",
            i + 1,
            label,
            caption.render()
        ));
    }

    body.push_str("\n--- Photos ---\n");
    for item in &artifact.media {
        body.push_str(&format!("{}\n", item.url));
    }

    EmailDraft { subject, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::content::MediaItem;
    use chrono::Utc;

    fn artifact() -> ContentArtifact {
        ContentArtifact {
            slug: "deck-staining-boulder-7".into(),
            title: "Deck Staining in Boulder".into(),
            summary: "Professional deck staining completed in Boulder.".into(),
            body: String::new(),
            city: "Boulder".into(),
            service: "Deck Staining".into(),
            page_url: Some("https://example.com/projects/deck-staining-boulder-7".into()),
            media: vec![
                MediaItem {
                    url: "https://cdn.example/1.jpg".into(),
                    alt: "a".into(),
                },
                MediaItem {
                    url: "https://cdn.example/2.jpg".into(),
                    alt: "b".into(),
                },
            ],
            structured_data: serde_json::Value::Null,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn promo_post_links_page_and_first_photo() {
        let post = promo_post(&artifact());

        assert!(post.summary.starts_with("Deck Staining in Boulder"));
        assert_eq!(post.link.as_deref(), Some("https://example.com/projects/deck-staining-boulder-7"));
        assert_eq!(post.photo_url.as_deref(), Some("https://cdn.example/1.jpg"));
    }

    #[test]
    fn promo_post_is_capped() {
        let mut artifact = artifact();
        artifact.summary = "x".repeat(MAX_POST_CHARS * 2);

        assert_eq!(promo_post(&artifact).summary.chars().count(), MAX_POST_CHARS);
    }

    #[test]
    fn captions_have_both_styles_and_local_tags() {
        let mut rng = fastrand::Rng::with_seed(3);
        let [story, quick] = caption_variants(&artifact(), &mut rng);

        assert_eq!(story.style, CaptionStyle::Story);
        assert_eq!(quick.style, CaptionStyle::Quick);
        assert!(story.text.contains("See more: https://example.com/projects"));
        assert!(quick.text.ends_with("Deck Staining in Boulder."));
        for caption in [&story, &quick] {
            assert_eq!(caption.hashtags[0], "#DeckStaining");
            assert_eq!(caption.hashtags[1], "#Boulder");
            assert_eq!(caption.hashtags.len(), 2 + POOL_PICKS);
        }
    }

    #[test]
    fn captions_are_reproducible_from_seed() {
        let first = caption_variants(&artifact(), &mut fastrand::Rng::with_seed(11));
        let second = caption_variants(&artifact(), &mut fastrand::Rng::with_seed(11));

        assert_eq!(first, second);
    }

    #[test]
    fn email_contains_both_captions_and_photos() {
        let artifact = artifact();
        let captions = caption_variants(&artifact, &mut fastrand::Rng::with_seed(5));
        let email = draft_email(&artifact, &captions);

        assert_eq!(email.subject, "Social drafts ready: Deck Staining in Boulder");
        assert!(email.body.contains("Option 1 (story)"));
        assert!(email.body.contains("Option 2 (quick)"));
        assert!(email.body.contains("https://cdn.example/2.jpg"));
    }
}
