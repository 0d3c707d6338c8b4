//! Typed HTTP client for the payctl API and the employee editing session built on it.
//!
//! [`PayrollClient`] maps each endpoint to a method and each failure to a [`ClientError`]. It
//! never retries.
//!
//! [`EmployeeForm`] mirrors one employee while it is being created or edited. It loads the
//! configuration (and the employee, when editing) once, then recomputes the
//! [`BenefitsEstimate`] locally on every edit. Closing the form cancels its liveness token; any
//! response that resolves after that is dropped without touching the form.

use crate::api::models::configuration::Configuration;
use crate::api::models::employees::{EmployeeManage, EmployeeRequest, EmployeeResponse};
use crate::calculation::{self, BenefitsEstimate};
use crate::types::EmployeeId;
use crate::validation::{self, ValidationErrors};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Field-level problems, found locally or reported by the server
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The requested record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The server could not be reached or the response could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other non-success response
    #[error("Server returned {status}: {message}")]
    Server { status: StatusCode, message: String },

    /// The base URL cannot be joined with an API path
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Body of a 400 response carrying field messages.
#[derive(Deserialize)]
struct ValidationBody {
    errors: ValidationErrors,
}

/// Makes sure a url has a trailing slash, so `join` appends instead of replacing the last
/// path segment.
fn ensure_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        url.clone()
    } else {
        let mut new_url = url.clone();
        let path = format!("{}/", new_url.path());
        new_url.set_path(&path);
        new_url
    }
}

/// Client for the `/api` endpoints of a payctl server.
#[derive(Debug, Clone)]
pub struct PayrollClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PayrollClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        // Already installed when running inside the binary
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let http = reqwest::Client::builder().timeout(Self::REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: ensure_slash(&base_url),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join("api/")?.join(path)?)
    }

    /// Turn a non-success response into the matching error.
    async fn check(response: Response, resource: &str) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(resource.to_string()));
        }

        let message = response.text().await?;
        if status == StatusCode::BAD_REQUEST
            && let Ok(body) = serde_json::from_str::<ValidationBody>(&message)
        {
            return Err(ClientError::Validation(body.errors));
        }
        Err(ClientError::Server { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T, ClientError> {
        let response = self.http.get(self.url(path)?).send().await?;
        Ok(Self::check(response, resource).await?.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn get_configuration(&self) -> Result<Configuration, ClientError> {
        self.get_json("configuration", "Configuration").await
    }

    #[instrument(skip_all, err)]
    pub async fn update_configuration(&self, configuration: &Configuration) -> Result<(), ClientError> {
        validation::validate_configuration(configuration).map_err(ClientError::Validation)?;
        let response = self.http.put(self.url("configuration")?).json(configuration).send().await?;
        Self::check(response, "Configuration").await?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    pub async fn list_employees(&self) -> Result<Vec<EmployeeManage>, ClientError> {
        self.get_json("employee/manage", "Employees").await
    }

    #[instrument(skip(self), err)]
    pub async fn get_employee(&self, id: EmployeeId) -> Result<EmployeeResponse, ClientError> {
        self.get_json(&format!("employee/{id}"), &format!("Employee {id}")).await
    }

    #[instrument(skip_all, err)]
    pub async fn create_employee(&self, employee: &EmployeeRequest) -> Result<(), ClientError> {
        let response = self.http.post(self.url("employee")?).json(employee).send().await?;
        Self::check(response, "Employee").await?;
        Ok(())
    }

    #[instrument(skip(self, employee), err)]
    pub async fn update_employee(&self, id: EmployeeId, employee: &EmployeeRequest) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.url(&format!("employee/{id}"))?)
            .json(employee)
            .send()
            .await?;
        Self::check(response, &format!("Employee {id}")).await?;
        Ok(())
    }

    /// Delete an employee. Deleting one that is already gone succeeds.
    #[instrument(skip(self), err)]
    pub async fn delete_employee(&self, id: EmployeeId) -> Result<(), ClientError> {
        let response = self.http.delete(self.url(&format!("employee/{id}"))?).send().await?;
        Self::check(response, &format!("Employee {id}")).await?;
        Ok(())
    }
}

/// Editing session for creating or updating one employee.
pub struct EmployeeForm {
    client: PayrollClient,
    employee_id: Option<EmployeeId>,
    configuration: Option<Configuration>,
    employee_name: String,
    dependent_names: Vec<String>,
    estimate: Option<BenefitsEstimate>,
    alive: CancellationToken,
}

impl EmployeeForm {
    /// Form for a new employee.
    pub fn create(client: PayrollClient) -> Self {
        Self::new(client, None)
    }

    /// Form for an existing employee; [`EmployeeForm::load`] fetches its current values.
    pub fn edit(client: PayrollClient, employee_id: EmployeeId) -> Self {
        Self::new(client, Some(employee_id))
    }

    fn new(client: PayrollClient, employee_id: Option<EmployeeId>) -> Self {
        Self {
            client,
            employee_id,
            configuration: None,
            employee_name: String::new(),
            dependent_names: Vec::new(),
            estimate: None,
            alive: CancellationToken::new(),
        }
    }

    /// Token that closes this form when cancelled, for use from another task.
    pub fn liveness(&self) -> CancellationToken {
        self.alive.clone()
    }

    pub fn close(&self) {
        self.alive.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.alive.is_cancelled()
    }

    /// Fetch the configuration, then the employee when editing.
    ///
    /// Each response is applied only if the form is still open once it arrives.
    #[instrument(skip(self), fields(employee_id = ?self.employee_id), err)]
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let configuration = self.client.get_configuration().await?;
        if self.is_closed() {
            debug!("Form closed, discarding configuration");
            return Ok(());
        }
        self.configuration = Some(configuration);

        if let Some(id) = self.employee_id {
            let employee = self.client.get_employee(id).await?;
            if self.is_closed() {
                debug!("Form closed, discarding employee");
                return Ok(());
            }
            self.employee_name = employee.employee_name;
            self.dependent_names = employee.dependent_names;
        }

        self.recalculate();
        Ok(())
    }

    fn recalculate(&mut self) {
        self.estimate = self
            .configuration
            .as_ref()
            .map(|config| calculation::calculate(config, &self.employee_name, &self.dependent_names));
    }

    pub fn set_employee_name(&mut self, name: impl Into<String>) {
        self.employee_name = name.into();
        self.recalculate();
    }

    /// Append a dependent, returning its position.
    pub fn add_dependent(&mut self, name: impl Into<String>) -> usize {
        self.dependent_names.push(name.into());
        self.recalculate();
        self.dependent_names.len() - 1
    }

    /// Rename the dependent at `index`. Out of range indexes are ignored.
    pub fn set_dependent_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(slot) = self.dependent_names.get_mut(index) {
            *slot = name.into();
            self.recalculate();
        }
    }

    /// Remove the dependent at `index`, keeping the order of the rest.
    pub fn remove_dependent(&mut self, index: usize) -> Option<String> {
        if index >= self.dependent_names.len() {
            return None;
        }
        let removed = self.dependent_names.remove(index);
        self.recalculate();
        Some(removed)
    }

    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }

    pub fn employee_name(&self) -> &str {
        &self.employee_name
    }

    pub fn dependent_names(&self) -> &[String] {
        &self.dependent_names
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        self.configuration.as_ref()
    }

    /// Latest estimate; `None` until the configuration has loaded.
    pub fn estimate(&self) -> Option<&BenefitsEstimate> {
        self.estimate.as_ref()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validation::validate_employee(Some(self.employee_name.as_str()), &self.dependent_names)
    }

    /// Validate locally, then create or update the employee on the server.
    #[instrument(skip(self), fields(employee_id = ?self.employee_id), err)]
    pub async fn submit(&self) -> Result<(), ClientError> {
        self.validate().map_err(ClientError::Validation)?;

        let request = EmployeeRequest {
            employee_name: Some(self.employee_name.clone()),
            dependent_names: Some(self.dependent_names.clone()),
        };
        match self.employee_id {
            Some(id) => self.client.update_employee(id, &request).await,
            None => self.client.create_employee(&request).await,
        }
    }
}

impl Drop for EmployeeForm {
    fn drop(&mut self) {
        self.alive.cancel();
    }
}
