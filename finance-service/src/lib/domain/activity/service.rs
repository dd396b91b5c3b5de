use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::activity::errors::ActivityError;
use crate::domain::activity::models::Activity;
use crate::domain::activity::models::ActivityId;
use crate::domain::activity::models::CreateActivityCommand;
use crate::domain::activity::models::UpdateActivityCommand;
use crate::domain::activity::ports::ActivityRepository;
use crate::domain::activity::ports::ActivityServicePort;
use crate::domain::typology::models::TypologyId;
use crate::domain::typology::ports::TypologyRepository;
use crate::domain::user::models::UserId;

/// Concrete implementation of ActivityServicePort.
///
/// Generic over both repositories for testability. Typology references are
/// checked against the typology repository before anything is written.
pub struct ActivityService<AR, TR>
where
    AR: ActivityRepository,
    TR: TypologyRepository,
{
    activity_repository: Arc<AR>,
    typology_repository: Arc<TR>,
}

impl<AR, TR> ActivityService<AR, TR>
where
    AR: ActivityRepository,
    TR: TypologyRepository,
{
    pub fn new(activity_repository: Arc<AR>, typology_repository: Arc<TR>) -> Self {
        Self {
            activity_repository,
            typology_repository,
        }
    }

    async fn ensure_typology_exists(&self, id: Option<TypologyId>) -> Result<(), ActivityError> {
        let Some(id) = id else {
            return Ok(());
        };

        let found = self
            .typology_repository
            .find_by_id(&id)
            .await
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        match found {
            Some(_) => Ok(()),
            None => Err(ActivityError::UnknownTypology(id.to_string())),
        }
    }

    /// Load an activity and check the caller owns it.
    async fn owned_activity(
        &self,
        caller: UserId,
        id: ActivityId,
    ) -> Result<Activity, ActivityError> {
        let activity = self
            .activity_repository
            .find_by_id(id)
            .await?
            .ok_or(ActivityError::NotFound(id.to_string()))?;

        if activity.user_id != caller {
            tracing::warn!(
                activity_id = %id,
                caller_id = %caller,
                "Access to another user's activity refused"
            );
            return Err(ActivityError::NotOwner {
                activity_id: id.to_string(),
            });
        }

        Ok(activity)
    }
}

#[async_trait]
impl<AR, TR> ActivityServicePort for ActivityService<AR, TR>
where
    AR: ActivityRepository,
    TR: TypologyRepository,
{
    async fn create_activity(
        &self,
        owner: UserId,
        command: CreateActivityCommand,
    ) -> Result<Activity, ActivityError> {
        self.ensure_typology_exists(command.typology_id).await?;

        let activity = Activity {
            id: ActivityId::new(),
            user_id: owner,
            name: command.name,
            amount: command.amount,
            description: command.description,
            date: command.date,
            kind: command.kind,
            typology_id: command.typology_id,
            created_at: Utc::now(),
        };

        let created = self.activity_repository.create(activity).await?;
        tracing::info!(activity_id = %created.id, user_id = %owner, "Activity created");

        Ok(created)
    }

    async fn get_activity(
        &self,
        caller: UserId,
        id: ActivityId,
    ) -> Result<Activity, ActivityError> {
        self.owned_activity(caller, id).await
    }

    async fn list_user_activities(&self, owner: UserId) -> Result<Vec<Activity>, ActivityError> {
        self.activity_repository.find_by_user(owner).await
    }

    async fn list_all_activities(&self) -> Result<Vec<Activity>, ActivityError> {
        self.activity_repository.find_all().await
    }

    async fn update_activity(
        &self,
        caller: UserId,
        id: ActivityId,
        command: UpdateActivityCommand,
    ) -> Result<Activity, ActivityError> {
        let mut activity = self.owned_activity(caller, id).await?;
        self.ensure_typology_exists(command.typology_id).await?;

        if let Some(name) = command.name {
            activity.name = name;
        }
        if let Some(amount) = command.amount {
            activity.amount = amount;
        }
        if let Some(description) = command.description {
            activity.description = Some(description);
        }
        if let Some(date) = command.date {
            activity.date = date;
        }
        if let Some(kind) = command.kind {
            activity.kind = kind;
        }
        if let Some(typology_id) = command.typology_id {
            activity.typology_id = Some(typology_id);
        }

        let updated = self.activity_repository.update(activity).await?;
        tracing::info!(activity_id = %id, "Activity updated");

        Ok(updated)
    }

    async fn delete_activity(&self, caller: UserId, id: ActivityId) -> Result<(), ActivityError> {
        self.owned_activity(caller, id).await?;
        self.activity_repository.delete(id).await?;
        tracing::info!(activity_id = %id, "Activity deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::mock;

    use super::*;
    use crate::domain::activity::models::ActivityName;
    use crate::domain::activity::models::Amount;
    use crate::domain::typology::errors::TypologyError;
    use crate::domain::typology::models::EntryKind;
    use crate::domain::typology::models::Typology;

    mock! {
        pub TestActivityRepository {}

        #[async_trait]
        impl ActivityRepository for TestActivityRepository {
            async fn create(&self, activity: Activity) -> Result<Activity, ActivityError>;
            async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>, ActivityError>;
            async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Activity>, ActivityError>;
            async fn find_all(&self) -> Result<Vec<Activity>, ActivityError>;
            async fn update(&self, activity: Activity) -> Result<Activity, ActivityError>;
            async fn delete(&self, id: ActivityId) -> Result<(), ActivityError>;
        }
    }

    mock! {
        pub TestTypologyRepository {}

        #[async_trait]
        impl TypologyRepository for TestTypologyRepository {
            async fn list(&self, kind: Option<EntryKind>, include_inactive: bool) -> Result<Vec<Typology>, TypologyError>;
            async fn find_by_id(&self, id: &TypologyId) -> Result<Option<Typology>, TypologyError>;
        }
    }

    fn create_command(typology_id: Option<TypologyId>) -> CreateActivityCommand {
        CreateActivityCommand {
            name: ActivityName::new("Spesa settimanale".to_string()).unwrap(),
            amount: Amount::new(85.40).unwrap(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            kind: EntryKind::Expense,
            typology_id,
        }
    }

    fn activity(owner: UserId) -> Activity {
        Activity {
            id: ActivityId::new(),
            user_id: owner,
            name: ActivityName::new("Stipendio marzo".to_string()).unwrap(),
            amount: Amount::new(1800.0).unwrap(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 27).unwrap(),
            kind: EntryKind::Income,
            typology_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_activity_owned_by_caller() {
        let mut activities = MockTestActivityRepository::new();
        let typologies = MockTestTypologyRepository::new();

        let owner = UserId::new();
        activities
            .expect_create()
            .withf(move |activity| activity.user_id == owner)
            .times(1)
            .returning(|activity| Ok(activity));

        let service = ActivityService::new(Arc::new(activities), Arc::new(typologies));
        let created = service
            .create_activity(owner, create_command(None))
            .await
            .unwrap();

        assert_eq!(created.user_id, owner);
        assert_eq!(created.kind, EntryKind::Expense);
    }

    #[tokio::test]
    async fn test_create_activity_unknown_typology() {
        let mut activities = MockTestActivityRepository::new();
        let mut typologies = MockTestTypologyRepository::new();

        typologies
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        activities.expect_create().times(0);

        let service = ActivityService::new(Arc::new(activities), Arc::new(typologies));
        let result = service
            .create_activity(UserId::new(), create_command(Some(TypologyId::new())))
            .await;

        assert!(matches!(result, Err(ActivityError::UnknownTypology(_))));
    }

    #[tokio::test]
    async fn test_update_other_users_activity_is_refused() {
        let mut activities = MockTestActivityRepository::new();
        let typologies = MockTestTypologyRepository::new();

        let stored = activity(UserId::new());
        let id = stored.id;
        activities
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        activities.expect_update().times(0);

        let service = ActivityService::new(Arc::new(activities), Arc::new(typologies));
        let result = service
            .update_activity(UserId::new(), id, UpdateActivityCommand::default())
            .await;

        assert!(matches!(result, Err(ActivityError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_owner_and_applies_fields() {
        let mut activities = MockTestActivityRepository::new();
        let typologies = MockTestTypologyRepository::new();

        let owner = UserId::new();
        let stored = activity(owner);
        let id = stored.id;
        activities
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        activities
            .expect_update()
            .withf(move |activity| activity.user_id == owner && activity.amount.value() == 2000.0)
            .times(1)
            .returning(|activity| Ok(activity));

        let service = ActivityService::new(Arc::new(activities), Arc::new(typologies));
        let command = UpdateActivityCommand {
            amount: Some(Amount::new(2000.0).unwrap()),
            ..Default::default()
        };

        let updated = service.update_activity(owner, id, command).await.unwrap();
        assert_eq!(updated.name.as_str(), "Stipendio marzo");
    }

    #[tokio::test]
    async fn test_delete_missing_activity() {
        let mut activities = MockTestActivityRepository::new();
        let typologies = MockTestTypologyRepository::new();

        activities
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        activities.expect_delete().times(0);

        let service = ActivityService::new(Arc::new(activities), Arc::new(typologies));
        let result = service
            .delete_activity(UserId::new(), ActivityId::new())
            .await;

        assert!(matches!(result, Err(ActivityError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_own_activity() {
        let mut activities = MockTestActivityRepository::new();
        let typologies = MockTestTypologyRepository::new();

        let owner = UserId::new();
        let stored = activity(owner);
        let id = stored.id;
        activities
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        activities
            .expect_delete()
            .withf(move |deleted| *deleted == id)
            .times(1)
            .returning(|_| Ok(()));

        let service = ActivityService::new(Arc::new(activities), Arc::new(typologies));

        assert!(service.delete_activity(owner, id).await.is_ok());
    }
}
