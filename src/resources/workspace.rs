use std::sync::Arc;

use crate::error::Result;
use crate::resource::{Associations, RemoteResource, Resource};
use crate::resources::folder::Folder;

#[derive(Debug, Clone)]
pub struct Workspace {
    resource: Resource,
}

impl RemoteResource for Workspace {
    const ROOT_ELEMENT: &'static str = "workspace";
    const RESOURCE_PATH: &'static str = "/workspaces/:id";

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

impl Workspace {
    /// Workspace type, e.g. `shared`.
    pub fn workspace_type(&self) -> Option<&str> {
        self.resource.attribute("type")
    }

    pub fn title(&self) -> Option<&str> {
        self.resource.attribute("title")
    }

    /// Root folder of the workspace's document library. The folder carries
    /// this very instance as its workspace.
    pub async fn document_library_folder(self: &Arc<Self>) -> Result<Arc<Folder>> {
        let mut carried = Associations::new();
        carried.insert("workspace".to_owned(), Arc::clone(self) as Arc<dyn std::any::Any + Send + Sync>);
        self.resource
            .fetch_from_link("folder", "documentLibrary", carried)
            .await
    }
}
