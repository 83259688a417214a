use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bookswap_models::{
    Achievement, Book, BookRead, ChangePasswordRequest, CreateBookDto, CreateExchangeDto,
    CreateTagDto, CreateUserDto, ErrorResponse, ExchangeRequest, ExchangeRequestRead,
    HealthResponse, LoginRequest, Race, RegisterRequest, RequestStatus, StatusMessageResponse, Tag,
    TokenResponse, UpdateExchangeStatusDto, UserDetail, UserRead, Warrior, WarriorBook,
    WarriorCreatedResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::list_users,
        crate::modules::auth::controller::change_password,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::tags::controller::create_tag,
        crate::modules::tags::controller::list_tags,
        crate::modules::tags::controller::attach_tag,
        crate::modules::books::controller::create_book,
        crate::modules::books::controller::list_books,
        crate::modules::books::controller::get_book,
        crate::modules::exchanges::controller::create_exchange,
        crate::modules::exchanges::controller::list_exchanges,
        crate::modules::exchanges::controller::update_exchange_status,
        crate::modules::warriors::controller::list_warriors,
        crate::modules::warriors::controller::get_warrior,
        crate::modules::warriors::controller::create_warrior,
        crate::modules::warriors::controller::update_warrior,
        crate::modules::warriors::controller::delete_warrior,
    ),
    components(
        schemas(
            UserRead,
            UserDetail,
            CreateUserDto,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            ChangePasswordRequest,
            Tag,
            CreateTagDto,
            Book,
            BookRead,
            CreateBookDto,
            RequestStatus,
            ExchangeRequest,
            ExchangeRequestRead,
            CreateExchangeDto,
            UpdateExchangeStatusDto,
            Race,
            Achievement,
            WarriorBook,
            Warrior,
            WarriorCreatedResponse,
            StatusMessageResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration, login and the current user"),
        (name = "Users", description = "User profiles"),
        (name = "Tags", description = "Tags and book tagging"),
        (name = "Books", description = "Book catalog"),
        (name = "Exchanges", description = "Book exchange requests"),
        (name = "Warriors", description = "In-memory warriors list")
    ),
    info(
        title = "Bookswap API",
        version = "0.1.0",
        description = "Book exchange service built with Rust and Axum, with JWT bearer authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
