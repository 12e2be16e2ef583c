//! User management service: application-layer orchestration
//!
//! Parses the date of birth, delegates persistence to the repository and
//! decorates every record with its age. HTTP handlers stay thin wrappers.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use super::age::{calculate_age, parse_dob};
use super::view::UserView;
use crate::domain::{CreateUserDto, DomainResult, UpdateUserDto, User, UserRepositoryInterface};

/// User service.
///
/// Holds no mutable state; safe to share across concurrent requests.
pub struct UserService {
    repo: Arc<dyn UserRepositoryInterface>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepositoryInterface>) -> Self {
        Self::with_clock(repo, Arc::new(DefaultClock))
    }

    pub fn with_clock(repo: Arc<dyn UserRepositoryInterface>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create_user(&self, name: &str, dob: &str) -> DomainResult<UserView> {
        let dob = parse_dob(dob)?;
        let user = self
            .repo
            .create_user(CreateUserDto {
                name: name.to_string(),
                dob,
            })
            .await?;

        debug!(user_id = user.id, "User persisted");
        Ok(self.to_view(user))
    }

    pub async fn update_user(&self, id: i32, name: &str, dob: &str) -> DomainResult<UserView> {
        let dob = parse_dob(dob)?;
        let user = self
            .repo
            .update_user(
                id,
                UpdateUserDto {
                    name: name.to_string(),
                    dob,
                },
            )
            .await?;

        Ok(self.to_view(user))
    }

    pub async fn delete_user(&self, id: i32) -> DomainResult<()> {
        self.repo.delete_user(id).await
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, id: i32) -> DomainResult<UserView> {
        let user = self.repo.get_user_by_id(id).await?;
        Ok(self.to_view(user))
    }

    /// All users in ascending id order; empty when there are none.
    pub async fn list_users(&self) -> DomainResult<Vec<UserView>> {
        let users = self.repo.list_users().await?;
        let today = self.today();

        Ok(users
            .into_iter()
            .map(|user| view_on(user, today))
            .collect())
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Current calendar date in UTC.
    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    fn to_view(&self, user: User) -> UserView {
        view_on(user, self.today())
    }
}

fn view_on(user: User, today: NaiveDate) -> UserView {
    UserView {
        age: calculate_age(user.dob, today),
        id: user.id,
        name: user.name,
        dob: user.dob,
    }
}
