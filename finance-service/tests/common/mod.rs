use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Clock;
use auth::ManualClock;
use chrono::Utc;
use finance_service::domain::access::ports::CredentialIssuer;
use finance_service::domain::access::ports::CredentialVerifier;
use finance_service::domain::access::BearerCredentials;
use finance_service::domain::access::SessionCredentials;
use finance_service::domain::activity::errors::ActivityError;
use finance_service::domain::activity::models::Activity;
use finance_service::domain::activity::models::ActivityId;
use finance_service::domain::activity::ports::ActivityRepository;
use finance_service::domain::activity::service::ActivityService;
use finance_service::domain::typology::errors::TypologyError;
use finance_service::domain::typology::models::EntryKind;
use finance_service::domain::typology::models::Typology;
use finance_service::domain::typology::models::TypologyId;
use finance_service::domain::typology::ports::TypologyRepository;
use finance_service::domain::typology::service::TypologyService;
use finance_service::domain::user::errors::UserError;
use finance_service::domain::user::models::Role;
use finance_service::domain::user::models::User;
use finance_service::domain::user::models::UserId;
use finance_service::domain::user::ports::UserRepository;
use finance_service::domain::user::service::UserService;
use finance_service::inbound::http::cookies::SessionCookie;
use finance_service::inbound::http::router::create_router;
use finance_service::inbound::http::router::AppState;
use finance_service::outbound::sessions::InMemorySessionStore;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const SESSION_SECRET: &[u8] = b"test-session-secret-for-cookie-signing-32-bytes";
pub const COOKIE_NAME: &str = "connect.sid";

/// Credential mode the test server runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Bearer { revoke_on_logout: bool },
    Session,
}

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub typologies: Arc<InMemoryTypologyRepository>,
}

impl TestApp {
    /// Spawn in bearer mode with logout revocation enabled
    pub async fn spawn() -> Self {
        Self::spawn_with(Mode::Bearer {
            revoke_on_logout: true,
        })
        .await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with(mode: Mode) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(Utc::now()));
        let authenticator = Arc::new(Authenticator::with_clock(
            JWT_SECRET,
            24,
            clock.clone() as Arc<dyn Clock>,
        ));

        let users = Arc::new(InMemoryUserRepository::default());
        let typologies = Arc::new(InMemoryTypologyRepository::seeded());
        let activities = Arc::new(InMemoryActivityRepository::default());

        let (verifier, issuer, session_cookie): (
            Arc<dyn CredentialVerifier>,
            Arc<dyn CredentialIssuer>,
            Option<SessionCookie>,
        ) = match mode {
            Mode::Bearer { revoke_on_logout } => {
                let credentials = Arc::new(BearerCredentials::new(
                    authenticator.clone(),
                    users.clone(),
                    revoke_on_logout,
                ));
                let verifier: Arc<dyn CredentialVerifier> = credentials.clone();
                let issuer: Arc<dyn CredentialIssuer> = credentials;
                (verifier, issuer, None)
            }
            Mode::Session => {
                let credentials = Arc::new(SessionCredentials::new(
                    users.clone(),
                    Arc::new(InMemorySessionStore::new()),
                    clock.clone() as Arc<dyn Clock>,
                    chrono::Duration::hours(24),
                ));
                let cookie = SessionCookie::new(COOKIE_NAME, SESSION_SECRET)
                    .expect("Failed to build session cookie");
                let verifier: Arc<dyn CredentialVerifier> = credentials.clone();
                let issuer: Arc<dyn CredentialIssuer> = credentials;
                (verifier, issuer, Some(cookie))
            }
        };

        let state = AppState {
            user_service: Arc::new(UserService::new(users.clone(), authenticator, issuer)),
            activity_service: Arc::new(ActivityService::new(activities, typologies.clone())),
            typology_service: Arc::new(TypologyService::new(typologies.clone())),
            verifier,
            session_cookie,
            credential_ttl_hours: 24,
        };

        let router = create_router(state);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            clock,
            users,
            typologies,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, name: &str, surname: &str, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/auth/register")
            .json(&json!({
                "name": name,
                "surname": surname,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return (user id, bearer token)
    pub async fn register_and_login(&self, name: &str, email: &str) -> (String, String) {
        let body = self.register(name, "Rossi", email, "password123").await;
        let user_id = body["data"]["id"].as_str().unwrap().to_string();

        let response = self.login(email, "password123").await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        let token = body["data"]["token"].as_str().unwrap_or_default().to_string();

        (user_id, token)
    }
}

/// User store with the same uniqueness rules as the users table
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn set_role(&self, email: &str, role: Role) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.values_mut().find(|u| u.email.as_str() == email) {
            user.role = role;
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn stored_by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.stored_by_email(email))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match users.get_mut(&user.id) {
            Some(stored) => {
                stored.name = user.name.clone();
                stored.surname = user.surname.clone();
                stored.email = user.email.clone();
                stored.password_hash = user.password_hash.clone();
                Ok(stored.clone())
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn set_session_token(
        &self,
        id: &UserId,
        token: Option<String>,
    ) -> Result<(), UserError> {
        match self.users.lock().unwrap().get_mut(id) {
            Some(user) => {
                user.session_token = token;
                Ok(())
            }
            None => Err(UserError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        match self.users.lock().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(UserError::NotFound(id.to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemoryActivityRepository {
    activities: Mutex<Vec<Activity>>,
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn create(&self, activity: Activity) -> Result<Activity, ActivityError> {
        self.activities.lock().unwrap().push(activity.clone());
        Ok(activity)
    }

    async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>, ActivityError> {
        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Activity>, ActivityError> {
        let mut found: Vec<_> = self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<Activity>, ActivityError> {
        let mut found = self.activities.lock().unwrap().clone();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn update(&self, activity: Activity) -> Result<Activity, ActivityError> {
        let mut activities = self.activities.lock().unwrap();
        match activities.iter_mut().find(|a| a.id == activity.id) {
            Some(stored) => {
                *stored = activity.clone();
                Ok(activity)
            }
            None => Err(ActivityError::NotFound(activity.id.to_string())),
        }
    }

    async fn delete(&self, id: ActivityId) -> Result<(), ActivityError> {
        let mut activities = self.activities.lock().unwrap();
        let before = activities.len();
        activities.retain(|a| a.id != id);
        if activities.len() == before {
            return Err(ActivityError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

pub struct InMemoryTypologyRepository {
    typologies: Vec<Typology>,
}

impl InMemoryTypologyRepository {
    /// Two active income, one active expense and one inactive expense typology
    pub fn seeded() -> Self {
        let typology = |name: &str, kind, is_active| Typology {
            id: TypologyId::new(),
            name: name.to_string(),
            description: None,
            icon: "🏷️".to_string(),
            color: "#17a2b8".to_string(),
            kind,
            is_active,
        };

        Self {
            typologies: vec![
                typology("Stipendio", EntryKind::Income, true),
                typology("Freelance", EntryKind::Income, true),
                typology("Alimentari", EntryKind::Expense, true),
                typology("Dismessa", EntryKind::Expense, false),
            ],
        }
    }

    pub fn id_of(&self, name: &str) -> TypologyId {
        self.typologies
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id)
            .unwrap()
    }
}

#[async_trait]
impl TypologyRepository for InMemoryTypologyRepository {
    async fn list(
        &self,
        kind: Option<EntryKind>,
        include_inactive: bool,
    ) -> Result<Vec<Typology>, TypologyError> {
        let mut found: Vec<_> = self
            .typologies
            .iter()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .filter(|t| include_inactive || t.is_active)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: &TypologyId) -> Result<Option<Typology>, TypologyError> {
        Ok(self.typologies.iter().find(|t| t.id == *id).cloned())
    }
}
