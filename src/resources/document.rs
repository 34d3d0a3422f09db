use std::sync::Arc;

use crate::error::Result;
use crate::resource::{Associations, RemoteResource, Resource};
use crate::resources::folder::Folder;
use crate::resources::user::User;
use crate::resources::workspace::Workspace;

#[derive(Debug, Clone)]
pub struct Document {
    resource: Resource,
}

impl RemoteResource for Document {
    const ROOT_ELEMENT: &'static str = "document";
    const RESOURCE_PATH: &'static str = "/files/documents/:id";

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

impl Document {
    pub fn title(&self) -> Option<&str> {
        self.resource.attribute("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.resource.attribute("description")
    }

    pub async fn owner(&self) -> Result<Option<Arc<User>>> {
        self.resource
            .one("actor[@rel='owner']", false, Associations::new())
            .await
    }

    pub async fn workspace(&self) -> Result<Option<Arc<Workspace>>> {
        self.resource.one("workspace", true, Associations::new()).await
    }

    pub async fn folder(&self) -> Result<Arc<Folder>> {
        let mut carried = Associations::new();
        if let Some(workspace) = self.workspace().await? {
            carried.insert("workspace".to_owned(), workspace);
        }
        self.resource
            .fetch_from_link("folder", "parent-folder", carried)
            .await
    }

    /// Raw file content, requested with the media type of the `content` link.
    pub async fn content(&self) -> Result<Vec<u8>> {
        self.resource.fetch_link_content("content").await
    }
}
