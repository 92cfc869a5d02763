use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};

/// OpenAPI description of the `/users` endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(dto::UserDto, dto::CreateUserReq, dto::UpdateUserReq)),
    tags((name = "users", description = "User management"))
)]
pub struct UsersApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_users_operation() {
        let doc = UsersApiDoc::openapi();

        let users = doc.paths.paths.get("/users").expect("/users documented");
        assert!(users.get.is_some());
        assert!(users.post.is_some());

        let by_id = doc
            .paths
            .paths
            .get("/users/{id}")
            .expect("/users/{id} documented");
        assert!(by_id.get.is_some());
        assert!(by_id.put.is_some());
        assert!(by_id.delete.is_some());

        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert!(schemas.contains_key("UserDto"));
        assert!(schemas.contains_key("CreateUserReq"));
        assert!(schemas.contains_key("UpdateUserReq"));
    }
}
