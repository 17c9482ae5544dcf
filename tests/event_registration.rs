use axum::http::StatusCode;
use trailhead_core::domain::event::{EventStatus, RegistrationStatus};

mod support;

#[tokio::test]
async fn events_start_as_drafts_with_a_slug() {
    let world = support::TestWorld::new();
    let event = world
        .services
        .event_commands
        .create_event(
            &support::traveler(),
            support::event_command("Harar Coffee Walk", Some(10)),
        )
        .await
        .unwrap();

    assert_eq!(event.status, EventStatus::Draft);
    assert_eq!(event.slug, "harar-coffee-walk");
    assert_eq!(event.current_attendees, 0);
}

#[tokio::test]
async fn drafts_do_not_accept_registrations() {
    let world = support::TestWorld::new();
    let draft = world
        .services
        .event_commands
        .create_event(&support::traveler(), support::event_command("Quiet Draft", None))
        .await
        .unwrap();

    let err = world
        .services
        .event_commands
        .register(&support::other_traveler(), draft.id)
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn capacity_is_never_exceeded() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Timkat Procession", Some(1)).await;
    let events = &world.services.event_commands;

    let seat = events.register(&support::other_traveler(), event.id).await.unwrap();
    assert_eq!(seat.status, RegistrationStatus::Confirmed);
    assert_eq!(seat.current_attendees, 1);

    let err = events.register(&support::staff(), event.id).await.unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::CONFLICT);
    assert_eq!(world.events.get(event.id).unwrap().current_attendees, 1);
}

#[tokio::test]
async fn registering_twice_is_a_conflict() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Meskel Bonfire", None).await;
    let events = &world.services.event_commands;

    events.register(&support::other_traveler(), event.id).await.unwrap();
    let err = events
        .register(&support::other_traveler(), event.id)
        .await
        .unwrap_err();

    assert_eq!(support::status_of(err), StatusCode::CONFLICT);
    assert_eq!(world.events.get(event.id).unwrap().current_attendees, 1);
}

#[tokio::test]
async fn cancelling_twice_is_a_conflict_and_frees_the_seat_once() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Gondar Castles Tour", Some(2)).await;
    let events = &world.services.event_commands;
    let guest = support::other_traveler();

    events.register(&guest, event.id).await.unwrap();
    events.register(&support::staff(), event.id).await.unwrap();

    let cancelled = events.cancel_registration(&guest, event.id).await.unwrap();
    assert_eq!(cancelled.status, RegistrationStatus::Cancelled);
    assert_eq!(cancelled.current_attendees, 1);

    let err = events.cancel_registration(&guest, event.id).await.unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::CONFLICT);
    assert_eq!(world.events.get(event.id).unwrap().current_attendees, 1);
}

#[tokio::test]
async fn cancelling_without_registration_is_not_found() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Axum Obelisks", None).await;

    let err = world
        .services
        .event_commands
        .cancel_registration(&support::other_traveler(), event.id)
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn a_cancelled_seat_can_be_taken_again() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Lake Tana Boat Trip", Some(1)).await;
    let events = &world.services.event_commands;
    let guest = support::other_traveler();

    events.register(&guest, event.id).await.unwrap();
    events.cancel_registration(&guest, event.id).await.unwrap();
    let again = events.register(&guest, event.id).await.unwrap();

    assert_eq!(again.status, RegistrationStatus::Confirmed);
    assert_eq!(again.current_attendees, 1);
}

#[tokio::test]
async fn status_cycles_forward_only() {
    let world = support::TestWorld::new();
    let organizer = support::traveler();
    let events = &world.services.event_commands;
    let event = support::published_event(&world, "Erta Ale Night Hike", None).await;
    assert_eq!(event.status, EventStatus::Published);

    let cancelled = events.toggle_status(&organizer, event.id).await.unwrap();
    assert_eq!(cancelled.status, EventStatus::Cancelled);

    let err = events.toggle_status(&organizer, event.id).await.unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::CONFLICT);
}

#[tokio::test]
async fn strangers_cannot_change_an_event() {
    let world = support::TestWorld::new();
    let event = support::published_event(&world, "Bale Mountains Camp", None).await;

    let err = world
        .services
        .event_commands
        .toggle_status(&support::other_traveler(), event.id)
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn end_must_follow_start() {
    let world = support::TestWorld::new();
    let mut command = support::event_command("Backwards Festival", None);
    command.end_date = command.start_date;

    let err = world
        .services
        .event_commands
        .create_event(&support::traveler(), command)
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);
}
