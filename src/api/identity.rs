use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::error::ServiceError;
use crate::db::{account_repository::AccountRepository, models::UserRow};

/// Header set by the authenticating gateway in front of this service
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The user making the request, loaded from the accounts table
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRow);

impl std::ops::Deref for CurrentUser {
    type Target = UserRow;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn user_id_from(req: &HttpRequest) -> Option<i32> {
    req.headers()
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

impl FromRequest for CurrentUser {
    type Error = ServiceError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = user_id_from(req);
        let pool = req.app_data::<Data<Pool<Postgres>>>().cloned();

        Box::pin(async move {
            let (Some(user_id), Some(pool)) = (user_id, pool) else {
                return Err(ServiceError::Unauthenticated);
            };

            let user = AccountRepository::find_user(pool.get_ref(), user_id)
                .await?
                .ok_or(ServiceError::Unauthenticated)?;

            debug!("Request made by user {}", user.id);
            Ok(CurrentUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn parses_numeric_header() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, " 17 "))
            .to_http_request();
        assert_eq!(user_id_from(&req), Some(17));
    }

    #[test]
    fn rejects_missing_or_garbage_header() {
        assert_eq!(user_id_from(&TestRequest::default().to_http_request()), None);

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "abc"))
            .to_http_request();
        assert_eq!(user_id_from(&req), None);
    }

    #[actix_web::test]
    async fn missing_header_is_unauthenticated() {
        let (req, mut payload) = TestRequest::default().to_http_parts();
        let result = CurrentUser::from_request(&req, &mut payload).await;
        assert!(matches!(result, Err(ServiceError::Unauthenticated)));
    }
}
