use std::sync::Arc;

use crate::error::Result;
use crate::resource::{Associations, RemoteResource, Resource};
use crate::resources::document::Document;
use crate::resources::user::User;
use crate::resources::workspace::Workspace;

#[derive(Debug, Clone)]
pub struct Folder {
    resource: Resource,
}

impl RemoteResource for Folder {
    const ROOT_ELEMENT: &'static str = "folder";
    const RESOURCE_PATH: &'static str = "/files/folders/:id";

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

impl Folder {
    pub fn name(&self) -> Option<&str> {
        self.resource.attribute("displayName")
    }

    pub async fn owner(&self) -> Result<Option<Arc<User>>> {
        self.resource
            .one("actor[@rel='owner']", false, Associations::new())
            .await
    }

    /// Owning workspace; carried in when listed under one, fetched in full otherwise.
    pub async fn workspace(&self) -> Result<Option<Arc<Workspace>>> {
        self.resource.one("workspace", true, Associations::new()).await
    }

    pub async fn folders(&self) -> Result<Arc<Vec<Arc<Folder>>>> {
        let carried = self.carried_workspace().await?;
        self.resource.many("folders/folder", false, carried).await
    }

    /// Documents in this folder; each carries this instance as its folder.
    pub async fn documents(self: &Arc<Self>) -> Result<Arc<Vec<Arc<Document>>>> {
        let mut carried = self.carried_workspace().await?;
        carried.insert("folder".to_owned(), Arc::clone(self) as Arc<dyn std::any::Any + Send + Sync>);
        self.resource.many("documents/document", false, carried).await
    }

    async fn carried_workspace(&self) -> Result<Associations> {
        let mut carried = Associations::new();
        if let Some(workspace) = self.workspace().await? {
            carried.insert("workspace".to_owned(), workspace);
        }
        Ok(carried)
    }
}
