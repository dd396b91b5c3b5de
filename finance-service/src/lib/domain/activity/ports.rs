use async_trait::async_trait;

use crate::domain::activity::errors::ActivityError;
use crate::domain::activity::models::Activity;
use crate::domain::activity::models::ActivityId;
use crate::domain::activity::models::CreateActivityCommand;
use crate::domain::activity::models::UpdateActivityCommand;
use crate::domain::user::models::UserId;

/// Port for activity domain service operations.
///
/// Every single-activity operation takes the caller so ownership is decided
/// here rather than in each handler.
#[async_trait]
pub trait ActivityServicePort: Send + Sync + 'static {
    /// Create an activity owned by `owner`.
    ///
    /// # Errors
    /// * `UnknownTypology` - Referenced typology does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_activity(
        &self,
        owner: UserId,
        command: CreateActivityCommand,
    ) -> Result<Activity, ActivityError>;

    /// Retrieve one activity of the caller.
    ///
    /// # Errors
    /// * `NotFound` - Activity does not exist
    /// * `NotOwner` - Activity belongs to another user
    async fn get_activity(&self, caller: UserId, id: ActivityId)
        -> Result<Activity, ActivityError>;

    /// List activities of one user, newest date first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_user_activities(&self, owner: UserId) -> Result<Vec<Activity>, ActivityError>;

    /// List every activity of every user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all_activities(&self) -> Result<Vec<Activity>, ActivityError>;

    /// Update an activity of the caller. The owner never changes.
    ///
    /// # Errors
    /// * `NotFound` - Activity does not exist
    /// * `NotOwner` - Activity belongs to another user
    /// * `UnknownTypology` - Referenced typology does not exist
    async fn update_activity(
        &self,
        caller: UserId,
        id: ActivityId,
        command: UpdateActivityCommand,
    ) -> Result<Activity, ActivityError>;

    /// Delete an activity of the caller.
    ///
    /// # Errors
    /// * `NotFound` - Activity does not exist
    /// * `NotOwner` - Activity belongs to another user
    async fn delete_activity(&self, caller: UserId, id: ActivityId) -> Result<(), ActivityError>;
}

/// Repository port for activity persistence operations.
#[async_trait]
pub trait ActivityRepository: Send + Sync + 'static {
    /// Persist a new activity.
    async fn create(&self, activity: Activity) -> Result<Activity, ActivityError>;

    /// Retrieve activity by identifier.
    ///
    /// # Returns
    /// Optional activity (None if not found)
    async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>, ActivityError>;

    /// Activities owned by `user_id`, newest date first.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Activity>, ActivityError>;

    /// Every stored activity, newest date first.
    async fn find_all(&self) -> Result<Vec<Activity>, ActivityError>;

    /// Overwrite the mutable fields of an existing activity.
    ///
    /// # Errors
    /// * `NotFound` - Activity does not exist
    async fn update(&self, activity: Activity) -> Result<Activity, ActivityError>;

    /// Remove activity from storage.
    ///
    /// # Errors
    /// * `NotFound` - Activity does not exist
    async fn delete(&self, id: ActivityId) -> Result<(), ActivityError>;
}
