//! PostgreSQL server creation step of the "create server" wizard.
//!
//! The step performs a single create call against the management plane with a
//! fixed default SKU. It only runs while the wizard context holds no server yet,
//! so running the wizard again after success does nothing.

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

/// Storage size given to new servers, in megabytes.
pub const DEFAULT_STORAGE_SIZE_MB: u32 = 51200;

/// Execution priority of the step among the wizard's execute steps.
pub const SERVER_CREATE_STEP_PRIORITY: u32 = 150;

/// A PostgreSQL server as returned by the management plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresServer {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub name: String,
    pub tier: String,
    pub capacity: u32,
    pub family: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    #[serde(rename = "storageMB")]
    pub storage_mb: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    pub administrator_login: String,
    pub administrator_login_password: String,
    pub ssl_enforcement: String,
    pub create_mode: String,
    pub version: String,
    pub storage_profile: StorageProfile,
}

/// Request body of a server creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerForCreate {
    pub location: String,
    pub sku: Sku,
    pub properties: ServerProperties,
}

impl ServerForCreate {
    /// Basic tier, Gen5, one vCore, PostgreSQL 10 with SSL enforced.
    pub fn with_defaults(location: &str, administrator_login: &str, password: &str) -> Self {
        Self {
            location: location.to_string(),
            sku: Sku {
                name: "B_Gen5_1".to_string(),
                tier: "Basic".to_string(),
                capacity: 1,
                family: "Gen5".to_string(),
                size: DEFAULT_STORAGE_SIZE_MB.to_string(),
            },
            properties: ServerProperties {
                administrator_login: administrator_login.to_string(),
                administrator_login_password: password.to_string(),
                ssl_enforcement: "Enabled".to_string(),
                create_mode: "Default".to_string(),
                version: "10".to_string(),
                storage_profile: StorageProfile {
                    storage_mb: DEFAULT_STORAGE_SIZE_MB,
                },
            },
        }
    }
}

/// State collected by the wizard's prompt steps.
#[derive(Debug, Clone, Default)]
pub struct PostgresServerWizardContext {
    pub location: Option<String>,
    pub resource_group: Option<String>,
    pub new_server_name: Option<String>,
    pub admin_password: Option<String>,
    pub short_user_name: Option<String>,
    /// Set once the server exists.
    pub server: Option<PostgresServer>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ProvisioningError {
    #[error("Internal error: Expected value for property \"{0}\"")]
    MissingProperty(&'static str),

    #[error("Failed to create PostgreSQL server: {0}")]
    Remote(String),
}

/// Management-plane client able to create servers.
#[async_trait]
pub trait PostgresManagementClient: Send + Sync {
    async fn create_server(
        &self,
        resource_group: &str,
        server_name: &str,
        parameters: &ServerForCreate,
    ) -> Result<PostgresServer, String>;
}

/// Receives progress messages for display while the step runs.
pub trait ProgressSink: Send + Sync {
    fn report(&self, message: &str);
}

pub struct PostgresServerCreateStep<C> {
    client: C,
}

impl<C: PostgresManagementClient> PostgresServerCreateStep<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn priority(&self) -> u32 {
        SERVER_CREATE_STEP_PRIORITY
    }

    pub fn should_execute(&self, context: &PostgresServerWizardContext) -> bool {
        context.server.is_none()
    }

    /// Creates the server and stores it in `context.server`.
    ///
    /// All required context properties are checked before the client is called.
    /// The admin password never appears in a returned error.
    pub async fn execute(
        &self,
        context: &mut PostgresServerWizardContext,
        progress: &dyn ProgressSink,
    ) -> Result<(), ProvisioningError> {
        if !self.should_execute(context) {
            return Ok(());
        }

        let location = required(&context.location, "location")?;
        let resource_group = required(&context.resource_group, "resourceGroup")?;
        let server_name = required(&context.new_server_name, "newServerName")?;
        let password = required(&context.admin_password, "adminPassword")?;
        let user_name = required(&context.short_user_name, "shortUserName")?;

        let message = format!(
            "Creating PostgreSQL Server \"{server_name}\"... It should be ready in several minutes."
        );
        info!("{message}");
        progress.report(&message);

        let parameters = ServerForCreate::with_defaults(location, user_name, password);
        let server = self
            .client
            .create_server(resource_group, server_name, &parameters)
            .await
            .map_err(|e| ProvisioningError::Remote(mask(&e, password)))?;

        info!("Created PostgreSQL Server \"{}\"", server.name);
        context.server = Some(server);
        Ok(())
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ProvisioningError> {
    value
        .as_deref()
        .filter(|value| !value.is_empty())
        .ok_or(ProvisioningError::MissingProperty(name))
}

fn mask(text: &str, secret: &str) -> String {
    text.replace(secret, "***")
}
