// tests/support/mocks/records.rs
use super::departures::DepartureTable;
use super::events::EventTable;
use super::listings::split;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use trailhead_core::domain::booking::{Booking, BookingRepository, BookingStatus, NewBooking};
use trailhead_core::domain::cursor::ListCursor;
use trailhead_core::domain::errors::{DomainError, DomainResult};
use trailhead_core::domain::ids::{BookingId, SavedItemId};
use trailhead_core::domain::resource::ResourceKind;
use trailhead_core::domain::saved::{SavedItem, SavedItemRepository};
use trailhead_core::domain::user::{
    Email, NewUser, User, UserId, UserRepository, UserUpdate, Username,
};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    ids: AtomicI64,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email already exists".into()));
        }
        let user = User {
            id: UserId(self.ids.fetch_add(1, Ordering::SeqCst) + 1),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DomainError::NotFound(format!("user {} not found", update.id)))?;
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(password_hash) = update.password_hash {
            user.password_hash = password_hash;
        }
        Ok(user.clone())
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == *username)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list_page(
        &self,
        limit: u32,
        cursor: Option<ListCursor>,
        search: Option<&str>,
    ) -> DomainResult<(Vec<User>, Option<ListCursor>)> {
        let mut matching: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                search.is_none_or(|q| {
                    u.username.as_str().contains(q) || u.email.as_str().contains(q)
                })
            })
            .filter(|u| {
                cursor
                    .as_ref()
                    .is_none_or(|c| (u.created_at, u.id.0) < (c.created_at, c.id))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(split(matching, limit, |u| ListCursor::new(u.created_at, u.id.0)))
    }
}

#[derive(Default)]
pub struct InMemorySaved {
    items: Mutex<Vec<SavedItem>>,
    ids: AtomicI64,
}

#[async_trait]
impl SavedItemRepository for InMemorySaved {
    async fn insert(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        target_id: i64,
        at: DateTime<Utc>,
    ) -> DomainResult<SavedItem> {
        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|i| i.user_id == user_id && i.target_kind == kind && i.target_id == target_id)
        {
            return Err(DomainError::Conflict("record is already saved".into()));
        }
        let item = SavedItem {
            id: SavedItemId(self.ids.fetch_add(1, Ordering::SeqCst) + 1),
            user_id,
            target_kind: kind,
            target_id,
            saved_at: at,
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn delete(
        &self,
        user_id: UserId,
        kind: ResourceKind,
        target_id: i64,
    ) -> DomainResult<bool> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| {
            !(i.user_id == user_id && i.target_kind == kind && i.target_id == target_id)
        });
        Ok(items.len() < before)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        kind: ResourceKind,
    ) -> DomainResult<Vec<SavedItem>> {
        let mut items: Vec<SavedItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id && i.target_kind == kind)
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.saved_at, b.id).cmp(&(a.saved_at, a.id)));
        Ok(items)
    }
}

/// Bookings against the shared event and departure rows. Slot accounting
/// locks the departures before the bookings, in every path.
pub struct InMemoryBookings {
    events: EventTable,
    departures: DepartureTable,
    bookings: Mutex<Vec<Booking>>,
    ids: AtomicI64,
}

impl InMemoryBookings {
    pub fn new(events: EventTable, departures: DepartureTable) -> Self {
        Self {
            events,
            departures,
            bookings: Mutex::new(Vec::new()),
            ids: AtomicI64::new(0),
        }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn insert(&self, booking: NewBooking) -> DomainResult<Booking> {
        let mut departures = self.departures.lock().unwrap();
        if let Some(departure_id) = booking.departure_id {
            let departure = departures
                .get_mut(&i64::from(departure_id))
                .ok_or_else(|| {
                    DomainError::NotFound(format!("departure {departure_id} not found"))
                })?;
            departure.ensure_seats(booking.guests)?;
            departure.available_slots -= booking.guests;
        }
        let stored = Booking {
            id: BookingId(self.ids.fetch_add(1, Ordering::SeqCst) + 1),
            user_id: booking.user_id,
            target_kind: booking.target_kind,
            target_id: booking.target_id,
            guests: booking.guests,
            departure_id: booking.departure_id,
            status: booking.status,
            notes: booking.notes,
            created_at: booking.created_at,
            updated_at: booking.created_at,
        };
        self.bookings.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: BookingId) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn transition(
        &self,
        id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
        at: DateTime<Utc>,
    ) -> DomainResult<Booking> {
        let mut departures = self.departures.lock().unwrap();
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id && b.status == expected)
            .ok_or_else(|| DomainError::Conflict(format!("booking {id} is no longer {expected}")))?;
        if next == BookingStatus::Cancelled {
            let departure = booking
                .departure_id
                .and_then(|d| departures.get_mut(&i64::from(d)));
            if let Some(departure) = departure {
                departure.available_slots =
                    (departure.available_slots + booking.guests).min(departure.total_slots);
            }
        }
        booking.status = next;
        booking.updated_at = at;
        Ok(booking.clone())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        cursor: Option<ListCursor>,
    ) -> DomainResult<(Vec<Booking>, Option<ListCursor>)> {
        let mut matching: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| {
                cursor
                    .as_ref()
                    .is_none_or(|c| (b.created_at, i64::from(b.id)) < (c.created_at, c.id))
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(split(matching, limit, |b| ListCursor::new(b.created_at, b.id.into())))
    }

    async fn upcoming_for_user(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let events = self.events.lock().unwrap();
        let mut upcoming: Vec<(DateTime<Utc>, Booking)> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                b.user_id == user_id
                    && b.target_kind == ResourceKind::Event
                    && b.status == BookingStatus::Confirmed
            })
            .filter_map(|b| {
                events
                    .get(&b.target_id)
                    .filter(|e| e.start_date > now)
                    .map(|e| (e.start_date, b.clone()))
            })
            .collect();
        upcoming.sort_by_key(|(start, b)| (*start, b.id));
        Ok(upcoming.into_iter().map(|(_, b)| b).collect())
    }
}
