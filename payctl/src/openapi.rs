//! OpenAPI documentation for the `/api` surface.

use utoipa::OpenApi;

use crate::api;
use crate::validation::ValidationErrors;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "payctl API",
        description = "Employee benefits configuration and employee records"
    ),
    servers(
        (url = "/api", description = "payctl API server")
    ),
    paths(
        api::handlers::configuration::get_configuration,
        api::handlers::configuration::update_configuration,
        api::handlers::employees::list_employees,
        api::handlers::employees::get_employee,
        api::handlers::employees::create_employee,
        api::handlers::employees::update_employee,
        api::handlers::employees::delete_employee,
    ),
    components(
        schemas(
            api::models::configuration::Configuration,
            api::models::employees::EmployeeRequest,
            api::models::employees::EmployeeResponse,
            api::models::employees::EmployeeManage,
            ValidationErrors,
        )
    ),
    tags(
        (name = "configuration", description = "Global payroll and benefit parameters"),
        (name = "employees", description = "Employees and their ordered dependents"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/configuration"));
        assert!(paths.contains(&"/employee"));
        assert!(paths.contains(&"/employee/manage"));
        assert!(paths.contains(&"/employee/{id}"));
        assert!(doc.components.unwrap().schemas.contains_key("Configuration"));
    }
}
