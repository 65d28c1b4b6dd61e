use std::sync::Arc;

use super::activity_service::ActivityService;
use super::auth_service::AuthService;
use crate::data::in_memory::InMemoryStore;
use crate::domain::user::{LoginRequest, SignUpRequest};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::test_hasher;

#[tokio::test]
async fn sign_up_login_like_unlike() {
    let store = InMemoryStore::new();
    let jwt = Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 86_400));
    let auth = AuthService::new(store.clone(), jwt.clone(), test_hasher(), 864_000);
    let activity = ActivityService::new(store.clone());

    let user = auth
        .sign_up(SignUpRequest {
            email: "a@x.com".to_string(),
            username: "a".to_string(),
            password: "p1".to_string(),
        })
        .await
        .expect("sign up must succeed");

    let login = || LoginRequest {
        email: "a@x.com".to_string(),
        password: "p1".to_string(),
    };
    let first = auth.login(login()).await.expect("first login");
    assert!(!first.access_token.is_empty());
    assert!(!first.refresh_token.is_empty());

    let second = auth.login(login()).await.expect("second login");
    assert_eq!(second.refresh_token, first.refresh_token);

    let identity = jwt
        .verify_access(&second.access_token)
        .expect("access token must verify");
    assert_eq!(identity.user_id, user.id);

    let liked = activity
        .upsert_user_activity(5, identity.user_id, true)
        .await
        .expect("like must create a row");
    assert!(liked.is_liked);

    let unliked = activity
        .upsert_user_activity(5, identity.user_id, false)
        .await
        .expect("unlike must update the row");
    assert_eq!(unliked.id, liked.id);
    assert!(!unliked.is_liked);
    assert_eq!(store.activity_rows(), 1);

    let refreshed = auth
        .validate_refresh_token(identity.user_id, &first.refresh_token)
        .await
        .expect("refresh must succeed");
    assert!(!refreshed.is_empty());
}
