use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rede API",
        version = "0.1.0",
        description = "Content-management backend for users, news, modules, and logos."
    ),
    paths(
        crate::routes::auth::login,
        crate::routes::users::bootstrap,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
        crate::routes::users::list_user_modules,
        crate::routes::users::add_user_module,
        crate::routes::users::update_user_module,
        crate::routes::users::remove_user_module,
        crate::routes::modules::create_module,
        crate::routes::modules::list_modules,
        crate::routes::modules::get_module,
        crate::routes::modules::update_module,
        crate::routes::modules::delete_module,
        crate::routes::news::create_news,
        crate::routes::news::list_news,
        crate::routes::news::get_news,
        crate::routes::news::update_news,
        crate::routes::news::delete_news,
        crate::routes::news::register_clique,
        crate::routes::logos::create_logo,
        crate::routes::logos::list_logos,
        crate::routes::logos::get_logo,
        crate::routes::logos::update_logo,
        crate::routes::logos::delete_logo,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::LoginRequest,
        crate::dto::LoginResponse,
        crate::dto::LoginUserResponse,
        crate::dto::CreateUserRequest,
        crate::dto::UpdateUserRequest,
        crate::dto::UserModuleEntry,
        crate::dto::UserResponse,
        crate::dto::UserModuleResponse,
        crate::dto::AddUserModuleRequest,
        crate::dto::UpdateUserModuleRequest,
        crate::dto::CreateModuleRequest,
        crate::dto::UpdateModuleRequest,
        crate::dto::ModuleResponse,
        crate::dto::CreateNewsRequest,
        crate::dto::UpdateNewsRequest,
        crate::dto::NewsResponse,
        crate::dto::UserRefResponse,
        crate::dto::CliqueResponse,
        crate::dto::CreateLogoRequest,
        crate::dto::UpdateLogoRequest,
        crate::dto::LogoResponse,
        crate::dto::MessageResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Login and token issuance"),
        (name = "users", description = "User accounts and their module lists"),
        (name = "modules", description = "Reusable module catalog"),
        (name = "news", description = "News articles and the public click counter"),
        (name = "logos", description = "Logo assets"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds Bearer token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token obtained from POST /auth/login."))
                        .build(),
                ),
            );
        }
    }
}
