use std::sync::Arc;

use crate::error::Result;
use crate::resource::{Associations, RemoteResource, Resource};
use crate::resources::workspace::Workspace;
use crate::session::{default_session, Session};

/// Path of the API entry point: the authenticated user.
pub const ENTRY_PATH: &str = "/entry";

#[derive(Debug, Clone)]
pub struct User {
    resource: Resource,
}

impl RemoteResource for User {
    const ROOT_ELEMENT: &'static str = "user";
    const RESOURCE_PATH: &'static str = "/users/:id";

    fn from_resource(resource: Resource) -> Self {
        Self { resource }
    }

    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl User {
    /// The user the session belongs to.
    pub async fn current(session: Arc<Session>) -> Result<Self> {
        Self::find_by_path(session, ENTRY_PATH).await
    }

    pub async fn current_default() -> Result<Self> {
        Self::current(default_session()?).await
    }

    pub fn name(&self) -> Result<Option<String>> {
        self.resource.document().child_text("profile/personal/displayname")
    }

    pub async fn workspaces(&self) -> Result<Arc<Vec<Arc<Workspace>>>> {
        self.resource
            .many("membership/workspaces/workspace", false, Associations::new())
            .await
    }
}
