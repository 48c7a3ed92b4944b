//! Test fixtures for creating job data.

use showcase_core::domains::jobs::{Address, JobRecord, LineItem, PhotoRef};

/// A completed gutter job in Denver with `photo_count` image attachments
/// named `p1`, `p2`, ...
pub fn completed_job(id: &str, photo_count: usize) -> JobRecord {
    JobRecord {
        id: id.to_string(),
        job_number: Some(42),
        title: Some("Gutter cleaning and repair".to_string()),
        client_name: Some("Pat Example".to_string()),
        address: Address {
            street: Some("1 Main St".to_string()),
            city: Some("denver".to_string()),
            province: Some("CO".to_string()),
            postal_code: Some("80202".to_string()),
        },
        line_items: vec![
            LineItem {
                name: "gutter cleaning".to_string(),
                description: Some("Cleared all gutters and downspouts".to_string()),
                quantity: Some(1.0),
            },
            LineItem::named("Downspout Repair"),
        ],
        notes: vec!["Customer very happy".to_string(), "   ".to_string()],
        photos: (1..=photo_count)
            .map(|i| {
                let mut photo =
                    PhotoRef::new(format!("p{}", i), format!("https://files.test/p{}.jpg", i));
                photo.content_type = Some("image/jpeg".to_string());
                photo
            })
            .collect(),
        completed_at: None,
    }
}
