use crate::common::utils::title_case;
use crate::domains::jobs::JobRecord;

use super::models::ContentData;

const DEFAULT_CITY: &str = "Local Area";
const DEFAULT_SERVICE: &str = "Home Service";

/// Derive content data from a normalized job record.
pub fn extract_content(job: &JobRecord) -> ContentData {
    let city = non_blank(job.address.city.as_deref())
        .map(title_case)
        .unwrap_or_else(|| DEFAULT_CITY.to_string());

    let mut services: Vec<String> = Vec::new();
    for item in &job.line_items {
        if let Some(name) = non_blank(Some(item.name.as_str())) {
            let name = title_case(name);
            if !services.contains(&name) {
                services.push(name);
            }
        }
    }

    let service = services
        .first()
        .cloned()
        .or_else(|| non_blank(job.title.as_deref()).map(title_case))
        .unwrap_or_else(|| DEFAULT_SERVICE.to_string());

    let descriptions: Vec<&str> = job
        .line_items
        .iter()
        .filter_map(|item| non_blank(item.description.as_deref()))
        .collect();
    let description = if descriptions.is_empty() {
        non_blank(job.title.as_deref()).unwrap_or_default().to_string()
    } else {
        descriptions.join(" ")
    };

    let notes = job
        .notes
        .iter()
        .filter_map(|note| non_blank(Some(note.as_str())))
        .map(str::to_string)
        .collect();

    let photos = job.photos.iter().filter(|p| p.is_image()).cloned().collect();

    ContentData {
        job_id: job.id.clone(),
        job_number: job.job_number,
        city,
        province: non_blank(job.address.province.as_deref()).map(str::to_string),
        service,
        services,
        description,
        notes,
        photos,
        processed_photos: Vec::new(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::jobs::{Address, LineItem, PhotoRef};

    fn job() -> JobRecord {
        JobRecord {
            id: "job-1".into(),
            job_number: Some(42),
            title: Some("spring tune-up".into()),
            address: Address {
                city: Some("  fort collins ".into()),
                province: Some("CO".into()),
                ..Default::default()
            },
            line_items: vec![
                LineItem {
                    name: "gutter cleaning".into(),
                    description: Some("Cleared all gutters.".into()),
                    quantity: Some(1.0),
                },
                LineItem::named("Gutter Cleaning"),
                LineItem {
                    name: "Downspout Repair".into(),
                    description: Some("Resealed two joints.".into()),
                    quantity: None,
                },
            ],
            notes: vec!["  ".into(), " Customer very happy ".into()],
            photos: vec![
                PhotoRef::new("p1", "https://files.example/p1"),
                PhotoRef {
                    content_type: Some("application/pdf".into()),
                    ..PhotoRef::new("d1", "https://files.example/d1")
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn extracts_city_service_and_notes() {
        let content = extract_content(&job());

        assert_eq!(content.city, "Fort Collins");
        assert_eq!(content.province.as_deref(), Some("CO"));
        assert_eq!(content.service, "Gutter Cleaning");
        assert_eq!(content.services, vec!["Gutter Cleaning", "Downspout Repair"]);
        assert_eq!(content.description, "Cleared all gutters. Resealed two joints.");
        assert_eq!(content.notes, vec!["Customer very happy"]);
        assert_eq!(content.photos.len(), 1);
        assert!(content.processed_photos.is_empty());
    }

    #[test]
    fn falls_back_when_job_is_sparse() {
        let content = extract_content(&JobRecord {
            id: "job-2".into(),
            ..Default::default()
        });

        assert_eq!(content.city, "Local Area");
        assert_eq!(content.service, "Home Service");
        assert!(content.description.is_empty());
    }

    #[test]
    fn uses_title_when_no_line_items() {
        let content = extract_content(&JobRecord {
            id: "job-3".into(),
            title: Some("window washing".into()),
            ..Default::default()
        });

        assert_eq!(content.service, "Window Washing");
        assert_eq!(content.description, "window washing");
    }
}
