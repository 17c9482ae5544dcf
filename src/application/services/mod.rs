// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            blog::BlogCommandService, bookings::BookingCommandService,
            businesses::BusinessCommandService, departures::DepartureCommandService,
            destinations::DestinationCommandService,
            events::EventCommandService, packages::PackageCommandService,
            reviews::ReviewCommandService, saved::SavedItemService, users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
            util::SlugGenerator,
        },
        queries::{
            blog::BlogQueryService, bookings::BookingQueryService,
            businesses::BusinessQueryService, departures::DepartureQueryService,
            destinations::DestinationQueryService,
            events::EventQueryService, packages::PackageQueryService,
            reviews::ReviewQueryService, users::UserQueryService,
        },
        ApplicationResult,
    },
    domain::{
        blog::BlogPostRepository,
        booking::BookingRepository,
        business::BusinessRepository,
        departure::DepartureRepository,
        destination::DestinationRepository,
        event::{EventRepository, RegistrationRepository},
        package::PackageRepository,
        resource::RecordLookup,
        review::ReviewRepository,
        saved::SavedItemRepository,
        slug::{SlugAssigner, SlugRepository},
        user::UserRepository,
    },
};

/// Storage ports, one per record family.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn BlogPostRepository>,
    pub packages: Arc<dyn PackageRepository>,
    pub departures: Arc<dyn DepartureRepository>,
    pub events: Arc<dyn EventRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub destinations: Arc<dyn DestinationRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub saved: Arc<dyn SavedItemRepository>,
    pub slugs: Arc<dyn SlugRepository>,
    pub records: Arc<dyn RecordLookup>,
}

/// Collaborators that are not storage.
#[derive(Clone)]
pub struct Collaborators {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
    pub slug_max_attempts: u32,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub blog_commands: Arc<BlogCommandService>,
    pub blog_queries: Arc<BlogQueryService>,
    pub package_commands: Arc<PackageCommandService>,
    pub package_queries: Arc<PackageQueryService>,
    pub departure_commands: Arc<DepartureCommandService>,
    pub departure_queries: Arc<DepartureQueryService>,
    pub event_commands: Arc<EventCommandService>,
    pub event_queries: Arc<EventQueryService>,
    pub destination_commands: Arc<DestinationCommandService>,
    pub destination_queries: Arc<DestinationQueryService>,
    pub business_commands: Arc<BusinessCommandService>,
    pub business_queries: Arc<BusinessQueryService>,
    pub booking_commands: Arc<BookingCommandService>,
    pub booking_queries: Arc<BookingQueryService>,
    pub review_commands: Arc<ReviewCommandService>,
    pub review_queries: Arc<ReviewQueryService>,
    pub saved_items: Arc<SavedItemService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(repos: Repositories, deps: Collaborators) -> Self {
        let clock = deps.clock;
        let slugs = Arc::new(
            SlugAssigner::new(
                Arc::clone(&repos.slugs),
                Arc::clone(&deps.slugger),
                Arc::clone(&clock),
            )
            .with_max_attempts(deps.slug_max_attempts),
        );

        Self {
            user_commands: Arc::new(UserCommandService::new(
                Arc::clone(&repos.users),
                deps.password_hasher,
                Arc::clone(&deps.token_manager),
                Arc::clone(&clock),
            )),
            user_queries: Arc::new(UserQueryService::new(
                Arc::clone(&repos.users),
                Arc::clone(&clock),
            )),
            blog_commands: Arc::new(BlogCommandService::new(
                Arc::clone(&repos.posts),
                Arc::clone(&slugs),
                Arc::clone(&clock),
            )),
            blog_queries: Arc::new(BlogQueryService::new(Arc::clone(&repos.posts))),
            package_commands: Arc::new(PackageCommandService::new(
                Arc::clone(&repos.packages),
                Arc::clone(&slugs),
                Arc::clone(&clock),
            )),
            package_queries: Arc::new(PackageQueryService::new(Arc::clone(&repos.packages))),
            departure_commands: Arc::new(DepartureCommandService::new(
                Arc::clone(&repos.departures),
                Arc::clone(&repos.records),
                Arc::clone(&clock),
            )),
            departure_queries: Arc::new(DepartureQueryService::new(
                Arc::clone(&repos.departures),
                Arc::clone(&repos.records),
                Arc::clone(&clock),
            )),
            event_commands: Arc::new(EventCommandService::new(
                Arc::clone(&repos.events),
                Arc::clone(&repos.registrations),
                Arc::clone(&slugs),
                Arc::clone(&clock),
            )),
            event_queries: Arc::new(EventQueryService::new(
                Arc::clone(&repos.events),
                Arc::clone(&repos.registrations),
                Arc::clone(&clock),
            )),
            destination_commands: Arc::new(DestinationCommandService::new(
                Arc::clone(&repos.destinations),
                Arc::clone(&slugs),
                Arc::clone(&clock),
            )),
            destination_queries: Arc::new(DestinationQueryService::new(Arc::clone(
                &repos.destinations,
            ))),
            business_commands: Arc::new(BusinessCommandService::new(
                Arc::clone(&repos.businesses),
                Arc::clone(&slugs),
                Arc::clone(&clock),
            )),
            business_queries: Arc::new(BusinessQueryService::new(Arc::clone(&repos.businesses))),
            booking_commands: Arc::new(BookingCommandService::new(
                Arc::clone(&repos.bookings),
                Arc::clone(&repos.departures),
                Arc::clone(&repos.records),
                Arc::clone(&clock),
            )),
            booking_queries: Arc::new(BookingQueryService::new(
                Arc::clone(&repos.bookings),
                Arc::clone(&clock),
            )),
            review_commands: Arc::new(ReviewCommandService::new(
                Arc::clone(&repos.reviews),
                Arc::clone(&repos.records),
                Arc::clone(&clock),
            )),
            review_queries: Arc::new(ReviewQueryService::new(
                Arc::clone(&repos.reviews),
                Arc::clone(&repos.records),
            )),
            saved_items: Arc::new(SavedItemService::new(
                Arc::clone(&repos.saved),
                Arc::clone(&repos.records),
                Arc::clone(&clock),
            )),
            token_manager: deps.token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Resolves a raw bearer token into the acting principal.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
