use chrono::{DateTime, Utc};
use serde_json::json;

use crate::common::utils::slugify;

use super::error::ContentError;
use super::models::{ContentArtifact, ContentData, MediaItem};

const TITLE_TEMPLATES: &[&str] = &[
    "{service} in {city}",
    "{service} Project in {city}",
    "Recent {service} Work in {city}",
    "{city} {service}: Completed Project",
];

const INTRO_TEMPLATES: &[&str] = &[
    "Our crew recently wrapped up a {service_lower} project in {city}.",
    "Here's a look at a {service_lower} job we just finished in {city}.",
    "Another {service_lower} project completed for a neighbor in {city}.",
];

const SUMMARY_TEMPLATES: &[&str] = &[
    "Professional {service_lower} completed in {city}.",
    "{service} done right for a homeowner in {city}.",
    "See the results of our latest {service_lower} job in {city}.",
];

/// Inputs that make building deterministic.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub seed: u64,
    /// Public site root used to compute the project page URL.
    pub site_url: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl BuildOptions {
    pub fn new(seed: u64, site_url: Option<String>, generated_at: DateTime<Utc>) -> Self {
        Self {
            seed,
            site_url,
            generated_at,
        }
    }

    pub fn page_url(&self, slug: &str) -> Option<String> {
        self.site_url
            .as_deref()
            .map(|root| format!("{}/projects/{}", root.trim_end_matches('/'), slug))
    }
}

/// Build the project page content from extracted job content and the photos
/// that processed successfully.
pub fn build_project(
    content: &ContentData,
    options: &BuildOptions,
) -> Result<ContentArtifact, ContentError> {
    let photo_urls: Vec<&str> = content
        .successful_photos()
        .filter_map(|p| p.url.as_deref())
        .collect();
    if photo_urls.is_empty() {
        return Err(ContentError::NoProcessedPhotos);
    }

    let job_key = content
        .job_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| content.job_id.clone());
    let slug = slugify(&format!("{}-{}-{}", content.service, content.city, job_key));
    if slug.is_empty() {
        return Err(ContentError::EmptySlug {
            service: content.service.clone(),
            city: content.city.clone(),
        });
    }

    let mut rng = fastrand::Rng::with_seed(options.seed);
    let title = fill(pick(&mut rng, TITLE_TEMPLATES), content);
    let intro = fill(pick(&mut rng, INTRO_TEMPLATES), content);
    let summary = fill(pick(&mut rng, SUMMARY_TEMPLATES), content);

    let media: Vec<MediaItem> = photo_urls
        .iter()
        .enumerate()
        .map(|(i, url)| MediaItem {
            url: url.to_string(),
            alt: format!("{} in {} - photo {}", content.service, content.city, i + 1),
        })
        .collect();

    let body = render_body(content, &intro, &media);
    let page_url = options.page_url(&slug);

    let structured_data = json!({
        "@context": "https://schema.org",
        "@type": "Service",
        "name": title,
        "serviceType": content.service,
        "description": summary,
        "areaServed": {
            "@type": "City",
            "name": content.city,
        },
        "image": media.iter().map(|m| m.url.as_str()).collect::<Vec<_>>(),
        "url": page_url,
    });

    Ok(ContentArtifact {
        slug,
        title,
        summary,
        body,
        city: content.city.clone(),
        service: content.service.clone(),
        page_url,
        media,
        structured_data,
        created_at: options.generated_at,
    })
}

fn pick<'a>(rng: &mut fastrand::Rng, options: &[&'a str]) -> &'a str {
    options[rng.usize(..options.len())]
}

fn fill(template: &str, content: &ContentData) -> String {
    template
        .replace("{service_lower}", &content.service.to_lowercase())
        .replace("{service}", &content.service)
        .replace("{city}", &content.city)
}

fn render_body(content: &ContentData, intro: &str, media: &[MediaItem]) -> String {
    let mut body = String::new();
    body.push_str(intro);
    body.push_str("\n\n## Scope of Work\n\n");

    if content.services.is_empty() {
        body.push_str(&format!("- {}\n", content.service));
    } else {
        for service in &content.services {
            body.push_str(&format!("- {}\n", service));
        }
    }

    if !content.description.is_empty() {
        body.push('\n');
        body.push_str(&content.description);
        body.push('\n');
    }

    if !content.notes.is_empty() {
        body.push_str("\n## Notes From the Crew\n\n");
        for note in &content.notes {
            body.push_str(&format!("- {}\n", note));
        }
    }

    body.push_str("\n## Photos\n\n");
    for item in media {
        body.push_str(&format!("![{}]({})\n", item.alt, item.url));
    }

    body
}
