//! Test utilities shared by the handler and application tests.

use crate::config::{Config, PoolSettings};
use crate::db::handlers::{Employees, Repository};
use crate::db::models::employees::EmployeeCreateDBRequest;
use crate::types::EmployeeId;
use axum_test::TestServer;
use sqlx::PgPool;

/// Build the full application on a test pool, seeded with the default configuration.
pub async fn create_test_app(pool: PgPool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    };
    config.database.pool = PoolSettings {
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    config
}

/// Insert an employee with dependents directly through the repository.
pub async fn create_test_employee(pool: &PgPool, name: &str, dependents: &[&str]) -> EmployeeId {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut repo = Employees::new(&mut conn);

    let employee = repo
        .create(&EmployeeCreateDBRequest {
            name: name.to_string(),
            dependent_names: dependents.iter().map(|d| d.to_string()).collect(),
        })
        .await
        .expect("Failed to create test employee");
    employee.id
}
