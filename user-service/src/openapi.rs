//! OpenAPI document and Swagger UI for the `/users` API
//!
//! The document is served at [`OPENAPI_JSON_PATH`] and browsed at
//! [`SWAGGER_UI_PATH`].

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, ErrorBody};
use crate::models::{User, UserPayload};

/// Base path of the Swagger UI
pub const SWAGGER_UI_PATH: &str = "/swagger";

/// Path of the generated OpenAPI JSON
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of the user endpoints
#[derive(OpenApi)]
#[openapi(
    info(title = "user-service", description = "CRUD API for users"),
    paths(
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::users::list_users,
    ),
    components(schemas(User, UserPayload, ErrorBody)),
    tags((name = "users", description = "User management"))
)]
pub struct ApiDoc;

/// Swagger UI serving [`ApiDoc`]; merge it into any router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_user_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];

        for method in ["get", "post"] {
            assert!(paths["/users"][method].is_object(), "{method} /users");
        }
        for method in ["get", "put", "delete"] {
            assert!(paths["/users/{id}"][method].is_object(), "{method} /users/{{id}}");
        }
    }

    #[test]
    fn test_document_has_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        for name in ["User", "UserPayload", "ErrorBody"] {
            assert!(schemas[name].is_object(), "{name}");
        }
    }

    #[test]
    fn test_list_documents_query_parameters() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let names: Vec<&str> = doc["paths"]["/users"]["get"]["parameters"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, ["name", "email", "page", "limit"]);
    }
}
