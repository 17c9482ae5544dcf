use axum::http::{Method, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use tower::ServiceExt;
use trailhead_core::application::commands::bookings::CreateBookingCommand;
use trailhead_core::application::commands::departures::{
    CreateDepartureCommand, UpdateDepartureCommand,
};
use trailhead_core::application::dto::DepartureDto;
use trailhead_core::domain::resource::ResourceKind;

mod support;

fn starts(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, 6, 0, 0).unwrap()
}

fn departure(package_id: i64, start: DateTime<Utc>, slots: i32) -> CreateDepartureCommand {
    CreateDepartureCommand {
        package_id,
        start_date: start,
        end_date: start + Duration::days(4),
        price_cents: 110_000,
        total_slots: slots,
        is_guaranteed: false,
    }
}

fn seats(package_id: i64, departure_id: i64, guests: i32) -> CreateBookingCommand {
    CreateBookingCommand {
        target_kind: ResourceKind::Package,
        target_id: package_id,
        guests,
        notes: None,
        departure_id: Some(departure_id),
    }
}

async fn schedule(world: &support::TestWorld, slots: i32) -> (i64, DepartureDto) {
    let package = support::owned_package(world, "Simien Mountains Trek").await;
    let departure = world
        .services
        .departure_commands
        .create_departure(
            &support::business_owner(),
            departure(package.id, starts(3, 1), slots),
        )
        .await
        .unwrap();
    (package.id, departure)
}

#[tokio::test]
async fn owners_schedule_departures_listed_soonest_first() {
    let world = support::TestWorld::new();
    let owner = support::business_owner();
    let package = support::owned_package(&world, "Bale Mountains Circuit").await;
    let commands = &world.services.departure_commands;
    commands
        .create_departure(&owner, departure(package.id, starts(5, 10), 8))
        .await
        .unwrap();
    let early = commands
        .create_departure(&owner, departure(package.id, starts(2, 14), 12))
        .await
        .unwrap();
    assert_eq!(early.available_slots, 12);
    assert_eq!(early.total_slots, 12);

    let queries = &world.services.departure_queries;
    let listed = queries.upcoming_for_package(package.id).await.unwrap();
    let dates: Vec<_> = listed.iter().map(|d| d.start_date).collect();
    assert_eq!(dates, [starts(2, 14), starts(5, 10)]);

    let mine = queries.my_departures(&owner).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(queries.my_departures(&support::traveler()).await.unwrap().is_empty());
    assert_eq!(queries.get_departure(early.id).await.unwrap().id, early.id);
}

#[tokio::test]
async fn only_the_package_owner_or_staff_manage_departures() {
    let world = support::TestWorld::new();
    let package = support::owned_package(&world, "Omo Valley Journey").await;
    let commands = &world.services.departure_commands;

    let err = commands
        .create_departure(&support::traveler(), departure(package.id, starts(4, 1), 6))
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::FORBIDDEN);

    let by_staff = commands
        .create_departure(&support::staff(), departure(package.id, starts(4, 1), 6))
        .await
        .unwrap();
    let err = commands
        .delete_departure(&support::traveler(), by_staff.id)
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn departure_dates_and_slots_are_validated() {
    let world = support::TestWorld::new();
    let owner = support::business_owner();
    let package = support::owned_package(&world, "Danakil Expedition").await;
    let commands = &world.services.departure_commands;

    let past = Utc.with_ymd_and_hms(2023, 12, 20, 6, 0, 0).unwrap();
    let err = commands
        .create_departure(&owner, departure(package.id, past, 6))
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);

    let mut backwards = departure(package.id, starts(3, 3), 6);
    backwards.end_date = starts(3, 1);
    let err = commands.create_departure(&owner, backwards).await.unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);

    let err = commands
        .create_departure(&owner, departure(package.id, starts(3, 3), 0))
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);

    let err = commands
        .create_departure(&owner, departure(9_999, starts(3, 3), 6))
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bookings_take_slots_and_cancellations_return_them() {
    let world = support::TestWorld::new();
    let (package_id, scheduled) = schedule(&world, 5).await;
    let bookings = &world.services.booking_commands;

    let first = bookings
        .create_booking(&support::traveler(), seats(package_id, scheduled.id, 3))
        .await
        .unwrap();
    assert_eq!(first.departure_id, Some(scheduled.id));
    assert_eq!(world.departures.get(scheduled.id).unwrap().available_slots, 2);

    let err = bookings
        .create_booking(&support::other_traveler(), seats(package_id, scheduled.id, 3))
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::CONFLICT);
    assert_eq!(world.departures.get(scheduled.id).unwrap().available_slots, 2);

    bookings
        .cancel_booking(&support::traveler(), first.id)
        .await
        .unwrap();
    assert_eq!(world.departures.get(scheduled.id).unwrap().available_slots, 5);

    bookings
        .create_booking(&support::other_traveler(), seats(package_id, scheduled.id, 3))
        .await
        .unwrap();
}

#[tokio::test]
async fn departures_only_serve_their_own_package() {
    let world = support::TestWorld::new();
    let (_, scheduled) = schedule(&world, 5).await;
    let other = support::owned_package(&world, "Lake Tana Boat Tour").await;
    let bookings = &world.services.booking_commands;

    let err = bookings
        .create_booking(&support::traveler(), seats(other.id, scheduled.id, 1))
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);

    let event = support::published_event(&world, "Timkat Procession", None).await;
    let err = bookings
        .create_booking(
            &support::traveler(),
            CreateBookingCommand {
                target_kind: ResourceKind::Event,
                target_id: event.id,
                guests: 1,
                notes: None,
                departure_id: Some(scheduled.id),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::BAD_REQUEST);
    assert_eq!(world.departures.get(scheduled.id).unwrap().available_slots, 5);
}

#[tokio::test]
async fn reserved_seats_pin_capacity_and_block_deletion() {
    let world = support::TestWorld::new();
    let owner = support::business_owner();
    let (package_id, scheduled) = schedule(&world, 6).await;
    world
        .services
        .booking_commands
        .create_booking(&support::traveler(), seats(package_id, scheduled.id, 4))
        .await
        .unwrap();
    let commands = &world.services.departure_commands;

    let err = commands
        .update_departure(
            &owner,
            UpdateDepartureCommand {
                id: scheduled.id,
                total_slots: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::CONFLICT);

    let grown = commands
        .update_departure(
            &owner,
            UpdateDepartureCommand {
                id: scheduled.id,
                total_slots: Some(10),
                is_guaranteed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(grown.total_slots, 10);
    assert_eq!(grown.available_slots, 6);
    assert!(grown.is_guaranteed);

    let err = commands
        .delete_departure(&owner, scheduled.id)
        .await
        .unwrap_err();
    assert_eq!(support::status_of(err), StatusCode::CONFLICT);

    let empty = commands
        .create_departure(&owner, departure(package_id, starts(6, 1), 4))
        .await
        .unwrap();
    commands.delete_departure(&owner, empty.id).await.unwrap();
    assert!(world.departures.get(empty.id).is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_never_oversell_a_departure() {
    let world = support::TestWorld::new();
    let (package_id, scheduled) = schedule(&world, 10).await;
    let mut handles = Vec::new();
    for n in 0..30_i64 {
        let services = Arc::clone(&world.services);
        let departure_id = scheduled.id;
        handles.push(tokio::spawn(async move {
            services
                .booking_commands
                .create_booking(
                    &support::traveler_numbered(100 + n),
                    seats(package_id, departure_id, 1),
                )
                .await
        }));
    }

    let mut booked = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(err) => assert_eq!(support::status_of(err), StatusCode::CONFLICT),
        }
    }
    assert_eq!(booked, 10);
    assert_eq!(world.departures.get(scheduled.id).unwrap().available_slots, 0);
}

#[tokio::test]
async fn departure_routes_list_publicly_and_create_with_a_token() {
    let world = support::TestWorld::new();
    let package = support::owned_package(&world, "Harar Old Town Walk").await;
    let uri = format!("/api/v1/packages/{}/departures", package.id);

    let resp = world
        .router()
        .oneshot(support::json_request(
            Method::POST,
            &uri,
            Some(support::BUSINESS_OWNER_TOKEN),
            serde_json::json!({
                "start_date": "2024-04-02T07:00:00Z",
                "end_date": "2024-04-02T12:00:00Z",
                "price_cents": 4_000,
                "total_slots": 15
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = world
        .router()
        .oneshot(support::empty_request(Method::GET, &uri, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = support::read_json(resp).await;
    assert_eq!(json[0]["availableSlots"], 15);
    assert_eq!(json[0]["isGuaranteed"], false);

    let resp = world
        .router()
        .oneshot(support::empty_request(
            Method::GET,
            "/api/v1/departures/mine",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
