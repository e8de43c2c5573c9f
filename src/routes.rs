use std::sync::Arc;

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::api::handlers::{admin_handlers, ai_handlers, booking_handlers, message_handlers, pet_handlers, user_handlers};
use crate::utils::security::JwtMiddleware;

#[get("/")]
async fn entry_point() -> impl Responder {
    "This is the PetsHub API. Use /register to create an account and /login to get a token."
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(entry_point);
    cfg.service(health);

    cfg.service(
        web::resource("/register")
            .route(web::post().to(user_handlers::create_user))
    );

    cfg.service(
        web::resource("/login")
            .route(web::post().to(user_handlers::login_user))
    );
}

/// Everything here needs a bearer token. Register after [`public_routes`]:
/// the scope has no prefix and claims every path it sees.
pub fn private_routes(cfg: &mut web::ServiceConfig, secret_key: Arc<String>) {
    cfg.service(
        web::scope("")
            .wrap(JwtMiddleware { secret_key })
            .service(
                web::resource("/me")
                    .route(web::get().to(user_handlers::get_me))
                    .route(web::put().to(user_handlers::update_me))
            )
            .route("/caregivers", web::get().to(user_handlers::list_caregivers))
            .service(
                web::scope("/admin")
                    .route("/pending", web::get().to(admin_handlers::list_pending))
                    .route("/users", web::get().to(admin_handlers::list_users))
                    .route("/users/{handle}", web::delete().to(admin_handlers::delete_user))
                    .route("/users/{handle}/approve", web::post().to(admin_handlers::approve_user))
                    .route("/users/{handle}/status", web::put().to(admin_handlers::set_user_status))
            )
            .service(
                web::scope("/ai")
                    .route("/tips", web::get().to(ai_handlers::daily_tips))
                    .route("/scan", web::post().to(ai_handlers::body_scan))
                    .route("/clinics", web::get().to(ai_handlers::find_clinics))
            )
            .service(
                web::resource("/pets")
                    .route(web::get().to(pet_handlers::list_pets))
                    .route(web::post().to(pet_handlers::create_pet))
            )
            .service(
                web::resource("/pets/{id}")
                    .route(web::put().to(pet_handlers::update_pet))
                    .route(web::delete().to(pet_handlers::delete_pet))
            )
            .route("/messages", web::post().to(message_handlers::send_message))
            .route("/messages/inbox", web::get().to(message_handlers::inbox))
            .route("/messages/sent", web::get().to(message_handlers::sent))
            .service(
                web::resource("/bookings")
                    .route(web::get().to(booking_handlers::list_bookings))
                    .route(web::post().to(booking_handlers::create_booking))
            )
            .route("/bookings/{id}/status", web::put().to(booking_handlers::update_booking_status))
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use crate::api::handlers::test_support::{json_body, TestWorld};

    #[actix_web::test]
    async fn test_public_routes_need_no_token() {
        let world = TestWorld::new(None);
        let app = test::init_service(world.app()).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(json_body(resp).await["status"], "ok");
    }

    #[actix_web::test]
    async fn test_private_routes_reject_anonymous_callers() {
        let world = TestWorld::new(None);
        let app = test::init_service(world.app()).await;

        for uri in ["/me", "/caregivers", "/pets", "/messages/inbox", "/bookings", "/ai/tips", "/admin/users"] {
            let resp = test::try_call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            let status = match resp {
                Ok(resp) => resp.status(),
                Err(error) => error.error_response().status(),
            };
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} should be private", uri);
        }
    }
}
