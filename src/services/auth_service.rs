use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use super::{decode_document, encode_document};
use crate::database::{CollectionName, DocumentStore, StoreError};
use crate::models::{LoginData, LoginRequest, RegisterRequest, User, UserProfile};
use crate::utils::AppError;

pub const DEFAULT_HASH_COST: u32 = 10;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub email: String,
    pub iat: i64, // issued at
    pub exp: i64, // expiration
}

/// Password hashing and bearer token issuing/verification.
#[derive(Clone)]
pub struct CredentialService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    hash_cost: u32,
}

impl CredentialService {
    pub fn new(secret: &str, token_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
            hash_cost: DEFAULT_HASH_COST,
        }
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    pub fn hash_password(&self, plain: &str) -> Result<String, AppError> {
        hash(plain, self.hash_cost).map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// A stored value that is not a bcrypt hash never matches.
    pub fn verify_password(&self, plain: &str, hashed: &str) -> bool {
        match verify(plain, hashed) {
            Ok(valid) => valid,
            Err(e) => {
                log::warn!("⚠️  Stored password is not a valid bcrypt hash: {}", e);
                false
            }
        }
    }

    pub fn issue_token(&self, email: &str) -> Result<String, AppError> {
        self.issue_token_at(email, Utc::now().timestamp())
    }

    pub fn issue_token_at(&self, email: &str, issued_at: i64) -> Result<String, AppError> {
        let claims = Claims {
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at + self.token_ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Unauthorized("unauthorized access".to_string())
            })
    }
}

/// Parses a token lifetime such as `3600`, `30m`, `12h`, `1d` or `2w`.
pub fn parse_expires_in(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let amount: i64 = digits
        .parse()
        .map_err(|_| format!("'{}' does not start with a number", raw))?;
    if amount <= 0 {
        return Err(format!("'{}' must be positive", raw));
    }

    let duration = match unit.trim() {
        "" | "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        other => return Err(format!("unknown unit '{}'", other)),
    };
    duration.ok_or_else(|| format!("'{}' is out of range", raw))
}

async fn hash_blocking(credentials: &CredentialService, password: String) -> Result<String, AppError> {
    let credentials = credentials.clone();
    tokio::task::spawn_blocking(move || credentials.hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
}

async fn verify_blocking(credentials: &CredentialService, password: String, hashed: String) -> Result<bool, AppError> {
    let credentials = credentials.clone();
    tokio::task::spawn_blocking(move || credentials.verify_password(&password, &hashed))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))
}

// User registration
pub async fn register(
    store: &dyn DocumentStore,
    credentials: &CredentialService,
    request: RegisterRequest,
) -> Result<(), AppError> {
    request.validate()?;

    if store
        .find_one(CollectionName::Users, doc! { "email": &request.email })
        .await?
        .is_some()
    {
        return Err(AppError::AlreadyExists("User already exists".to_string()));
    }

    let user = User {
        id: None,
        name: request.name,
        email: request.email,
        password: hash_blocking(credentials, request.password).await?,
        image: request.image,
    };

    match store.insert_one(CollectionName::Users, encode_document(&user)?).await {
        Ok(_) => Ok(()),
        // unique index caught a concurrent registration
        Err(StoreError::DuplicateKey) => Err(AppError::AlreadyExists("User already exists".to_string())),
        Err(e) => Err(e.into()),
    }
}

// User login
pub async fn login(
    store: &dyn DocumentStore,
    credentials: &CredentialService,
    request: LoginRequest,
) -> Result<LoginData, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user: User = match store
        .find_one(CollectionName::Users, doc! { "email": &request.email })
        .await?
    {
        Some(document) => decode_document(document)?,
        None => return Err(invalid()),
    };

    if !verify_blocking(credentials, request.password, user.password.clone()).await? {
        return Err(invalid());
    }

    let token = credentials.issue_token(&user.email)?;
    Ok(LoginData { token, email: user.email })
}

pub async fn get_user(store: &dyn DocumentStore, email: &str) -> Result<UserProfile, AppError> {
    let document = store
        .find_one(CollectionName::Users, doc! { "email": email })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let user: User = decode_document(document)?;
    Ok(user.into())
}

/// Fast-hashing credentials shared by the test modules.
#[cfg(test)]
pub(crate) fn test_credentials() -> CredentialService {
    CredentialService::new("test-secret", Duration::hours(1)).with_hash_cost(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn credentials() -> CredentialService {
        test_credentials()
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Rahim".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            image: None,
        }
    }

    #[test]
    fn test_parse_expires_in() {
        assert_eq!(parse_expires_in("3600").unwrap(), Duration::seconds(3600));
        assert_eq!(parse_expires_in("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_expires_in("1d").unwrap(), Duration::days(1));
        assert_eq!(parse_expires_in(" 2w ").unwrap(), Duration::weeks(2));
        assert!(parse_expires_in("1y").is_err());
        assert!(parse_expires_in("d").is_err());
        assert!(parse_expires_in("0").is_err());
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let creds = credentials();
        let hashed = creds.hash_password("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(creds.verify_password("hunter2", &hashed));
        assert!(!creds.verify_password("hunter3", &hashed));
        assert!(!creds.verify_password("hunter2", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_accepted_within_expiry() {
        let creds = credentials();
        let token = creds.issue_token("ana@example.com").unwrap();
        let claims = creds.verify_token(&token).unwrap();
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_rejected_after_expiry() {
        let creds = credentials();
        let two_hours_ago = Utc::now().timestamp() - 7200;
        let token = creds.issue_token_at("ana@example.com", two_hours_ago).unwrap();
        assert!(matches!(creds.verify_token(&token), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let creds = credentials();
        let token = creds.issue_token("ana@example.com").unwrap();

        let other = CredentialService::new("another-secret", Duration::hours(1));
        assert!(other.verify_token(&token).is_err());

        // flip the first character of the signature segment
        let signature_start = token.rfind('.').unwrap() + 1;
        let original = token.as_bytes()[signature_start] as char;
        let replacement = if original == 'A' { "B" } else { "A" };
        let mut tampered = token.clone();
        tampered.replace_range(signature_start..signature_start + 1, replacement);
        assert!(creds.verify_token(&tampered).is_err());

        assert!(creds.verify_token("not.a.token").is_err());
    }

    #[tokio::test]
    async fn test_register_existing_email_performs_no_insert() {
        let store = MemoryStore::new();
        let creds = credentials();

        register(&store, &creds, register_request("ana@example.com", "pw1")).await.unwrap();
        assert_eq!(store.count(CollectionName::Users).await, 1);

        let err = register(&store, &creds, register_request("ana@example.com", "pw2"))
            .await
            .unwrap_err();
        assert_eq!(err, AppError::AlreadyExists("User already exists".to_string()));
        assert_eq!(store.count(CollectionName::Users).await, 1);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let store = MemoryStore::new();
        register(&store, &credentials(), register_request("ana@example.com", "pw1"))
            .await
            .unwrap();

        let stored = store
            .find_one(CollectionName::Users, doc! { "email": "ana@example.com" })
            .await
            .unwrap()
            .unwrap();
        assert!(stored.get_str("password").unwrap().starts_with("$2"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_or_unknown_email_is_unauthorized() {
        let store = MemoryStore::new();
        let creds = credentials();
        register(&store, &creds, register_request("ana@example.com", "right")).await.unwrap();

        let wrong_password = login(
            &store,
            &creds,
            LoginRequest { email: "ana@example.com".into(), password: "wrong".into() },
        )
        .await;
        assert!(matches!(wrong_password, Err(AppError::Unauthorized(_))));

        let unknown = login(
            &store,
            &creds,
            LoginRequest { email: "nobody@example.com".into(), password: "right".into() },
        )
        .await;
        assert_eq!(unknown.unwrap_err(), wrong_password.unwrap_err());
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let store = MemoryStore::new();
        let creds = credentials();
        register(&store, &creds, register_request("ana@example.com", "right")).await.unwrap();

        let data = login(
            &store,
            &creds,
            LoginRequest { email: "ana@example.com".into(), password: "right".into() },
        )
        .await
        .unwrap();
        assert_eq!(creds.verify_token(&data.token).unwrap().email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_get_user_hides_password() {
        let store = MemoryStore::new();
        register(&store, &credentials(), register_request("ana@example.com", "pw")).await.unwrap();

        let profile = get_user(&store, "ana@example.com").await.unwrap();
        let body = serde_json::to_value(&profile).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["email"], "ana@example.com");

        assert!(matches!(get_user(&store, "x@example.com").await, Err(AppError::NotFound(_))));
    }
}
