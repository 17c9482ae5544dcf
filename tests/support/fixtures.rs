// tests/support/fixtures.rs
use super::{TestWorld, business_owner, traveler};
use chrono::{TimeZone, Utc};
use trailhead_core::application::commands::businesses::CreateBusinessCommand;
use trailhead_core::application::commands::events::CreateEventCommand;
use trailhead_core::application::commands::packages::CreatePackageCommand;
use trailhead_core::application::dto::{EventDto, PackageDto};

pub fn event_command(title: &str, capacity: Option<i32>) -> CreateEventCommand {
    CreateEventCommand {
        title: title.into(),
        description: "Sunrise coffee walk through the old town.".into(),
        category: "Culture".into(),
        start_date: Utc.with_ymd_and_hms(2024, 2, 1, 6, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
        location: "Harar".into(),
        address: None,
        latitude: Some(9.31),
        longitude: Some(42.12),
        price_cents: Some(1_500),
        capacity,
        status: None,
    }
}

/// A published event organised by [`traveler`].
pub async fn published_event(world: &TestWorld, title: &str, capacity: Option<i32>) -> EventDto {
    let organizer = traveler();
    let events = &world.services.event_commands;
    let draft = events
        .create_event(&organizer, event_command(title, capacity))
        .await
        .unwrap();
    events.toggle_status(&organizer, draft.id).await.unwrap()
}

pub fn package_command(title: &str) -> CreatePackageCommand {
    CreatePackageCommand {
        title: title.into(),
        description: "Four days on the escarpment with local guides.".into(),
        short_description: None,
        location: "Debark".into(),
        region: "Amhara".into(),
        category: "Trekking".into(),
        price_cents: 120_000,
        discounted_price_cents: None,
        duration_in_days: 4,
        max_group_size: Some(12),
        latitude: None,
        longitude: None,
        status: None,
    }
}

/// An active package owned by [`business_owner`].
pub async fn owned_package(world: &TestWorld, title: &str) -> PackageDto {
    world
        .services
        .package_commands
        .create_package(&business_owner(), package_command(title))
        .await
        .unwrap()
}

pub fn business_command(name: &str) -> CreateBusinessCommand {
    CreateBusinessCommand {
        name: name.into(),
        business_type: "Lodge".into(),
        description: "Stone cottages above the valley.".into(),
        contact_email: Some("stay@example.com".into()),
        contact_phone: None,
        website: None,
        region: "Tigray".into(),
        city: "Hawzen".into(),
        address: None,
        coordinates: None,
    }
}
