// src/application/dto/mod.rs
pub mod auth;
pub mod blog;
pub mod bookings;
pub mod businesses;
pub mod departures;
pub mod destinations;
pub mod events;
pub mod packages;
pub mod pagination;
pub mod reviews;
pub mod saved;
pub mod serde_time;
pub mod users;

pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use blog::{BlogPostDto, CommentDto, ViewCountDto};
pub use bookings::BookingDto;
pub use businesses::BusinessDto;
pub use departures::DepartureDto;
pub use destinations::DestinationDto;
pub use events::{CalendarDayDto, EventDto, RegistrationDto};
pub use packages::PackageDto;
pub use pagination::CursorPage;
pub use reviews::{HelpfulVotesDto, ReviewDto};
pub use saved::SavedItemDto;
pub use users::{CapabilityView, UserDto, UserProfileDto};
