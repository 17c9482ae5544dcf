// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod blog;
pub mod catalog;
pub mod departures;
pub mod events;
pub mod listings;
pub mod records;
pub mod reviews;
pub mod security;
pub mod time;

pub use blog::InMemoryPosts;
pub use catalog::Catalog;
pub use departures::InMemoryDepartures;
pub use events::{InMemoryEvents, InMemoryRegistrations};
pub use listings::{InMemoryBusinesses, InMemoryDestinations, InMemoryPackages};
pub use records::{InMemoryBookings, InMemorySaved, InMemoryUsers};
pub use reviews::InMemoryReviews;
pub use security::{
    BUSINESS_OWNER_TOKEN, OTHER_TRAVELER_TOKEN, PlainPasswordHasher, STAFF_TOKEN, StubTokenManager,
    TRAVELER_TOKEN, business_owner, other_traveler, staff, traveler, traveler_numbered,
};
pub use time::{FixedClock, fixed_now};
