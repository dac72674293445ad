use crate::entities::{NewUser, User};
use crate::errors::DomainError;
use crate::repositories::UserRepository;
use std::sync::Arc;

/// User Service - maps repository results onto the request contract.
/// Every by-id operation that matches zero rows becomes `UserNotFound`;
/// the caller cannot tell "never existed" from "already deleted".
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Get all users, ordered by ascending id.
    pub async fn get_all_users(&self) -> Result<Vec<User>, DomainError> {
        self.user_repository.find_all().await
    }

    /// Get user by ID
    pub async fn get_user_by_id(&self, id: i32) -> Result<User, DomainError> {
        match self.user_repository.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    /// Create a new user from already-validated fields.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        self.user_repository.insert(&new_user).await
    }

    /// Fully replace the mutable fields of an existing user.
    pub async fn update_user(&self, id: i32, new_user: NewUser) -> Result<User, DomainError> {
        match self.user_repository.replace(id, &new_user).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    /// Delete user, returning the removed row.
    pub async fn delete_user(&self, id: i32) -> Result<User, DomainError> {
        match self.user_repository.delete(id).await? {
            Some(user) => Ok(user),
            None => Err(DomainError::UserNotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    struct StubRepository {
        users: Mutex<Vec<User>>,
    }

    impl StubRepository {
        fn with_users(users: Vec<User>) -> Arc<Self> {
            Arc::new(Self {
                users: Mutex::new(users),
            })
        }
    }

    #[async_trait]
    impl UserRepository for StubRepository {
        async fn find_all(&self) -> Result<Vec<User>, DomainError> {
            Ok(self.users.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == id)
                .cloned())
        }

        async fn insert(&self, new_user: &NewUser) -> Result<User, DomainError> {
            let user = User::new(
                1,
                new_user.name.clone(),
                new_user.email.clone(),
                new_user.age,
            );
            self.users.lock().unwrap().push(user.clone());
            Ok(user)
        }

        async fn replace(&self, id: i32, new_user: &NewUser) -> Result<Option<User>, DomainError> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|u| u.id == id) {
                Some(user) => {
                    user.name = new_user.name.clone();
                    user.email = new_user.email.clone();
                    user.age = new_user.age;
                    Ok(Some(user.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: i32) -> Result<Option<User>, DomainError> {
            let mut users = self.users.lock().unwrap();
            match users.iter().position(|u| u.id == id) {
                Some(index) => Ok(Some(users.remove(index))),
                None => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn get_user_by_id_maps_absence_to_not_found() {
        let service = UserService::new(StubRepository::with_users(vec![]));

        let err = service.get_user_by_id(42).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(42)));
    }

    #[tokio::test]
    async fn update_on_missing_user_is_not_found() {
        let service = UserService::new(StubRepository::with_users(vec![]));

        let err = service
            .update_user(7, NewUser::new("Ann".into(), "ann@x.com".into(), 30))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(7)));
    }

    #[tokio::test]
    async fn delete_returns_removed_row_once() {
        let ann = User::new(1, "Ann".into(), "ann@x.com".into(), 30);
        let service = UserService::new(StubRepository::with_users(vec![ann.clone()]));

        let deleted = service.delete_user(1).await.unwrap();
        assert_eq!(deleted, ann);

        let err = service.delete_user(1).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(1)));
    }

    #[tokio::test]
    async fn create_returns_persisted_row() {
        let service = UserService::new(StubRepository::with_users(vec![]));

        let user = service
            .create_user(NewUser::new("Ann".into(), "ann@x.com".into(), 30))
            .await
            .unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@x.com");
        assert_eq!(user.age, 30);
    }
}
