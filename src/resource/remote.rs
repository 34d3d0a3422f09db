use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::locator::resource_path_for;
use crate::resource::association::Associations;
use crate::resource::link::Link;
use crate::resource::resource::{Resource, ResourceKind};
use crate::session::{default_session, Session};
use crate::utils::constants::DEFAULT_MEDIA_TYPE;
use crate::xml::Element;

/// A concrete resource type backed by a [`Resource`].
///
/// Implementors declare their document root and path template; fetching,
/// lookup and construction come with the trait.
pub trait RemoteResource: Sized + Send + Sync + 'static {
    const ROOT_ELEMENT: &'static str;
    /// Path template with `:name` placeholders, e.g. `/workspaces/:id`.
    const RESOURCE_PATH: &'static str;
    const MEDIA_TYPE: &'static str = DEFAULT_MEDIA_TYPE;

    fn from_resource(resource: Resource) -> Self;
    fn resource(&self) -> &Resource;
    fn resource_mut(&mut self) -> &mut Resource;

    fn resource_kind() -> ResourceKind {
        ResourceKind {
            root_element: Self::ROOT_ELEMENT,
            media_type: Self::MEDIA_TYPE,
        }
    }

    /// Wrap a raw document; no network.
    fn parse(xml: &str, session: Arc<Session>) -> Result<Self> {
        Resource::parse(Self::resource_kind(), xml, session).map(Self::from_resource)
    }

    /// Fetch and parse the document at `path` without wrapping it.
    fn fetch(session: &Session, path: &str) -> impl Future<Output = Result<Element>> + Send {
        Resource::fetch_document(Self::resource_kind(), session, path)
    }

    fn find_by_path(session: Arc<Session>, path: &str) -> impl Future<Output = Result<Self>> + Send {
        Self::find_by_path_with(session, path, Associations::new())
    }

    fn find_by_path_with(
        session: Arc<Session>,
        path: &str,
        carried: Associations,
    ) -> impl Future<Output = Result<Self>> + Send {
        async move {
            Resource::fetch(Self::resource_kind(), session, path, carried)
                .await
                .map(Self::from_resource)
        }
    }

    /// Fetch the resource at `RESOURCE_PATH` rendered with `substitutions`.
    fn find(
        session: Arc<Session>,
        substitutions: &[(&str, &dyn Display)],
    ) -> impl Future<Output = Result<Self>> + Send {
        let path = resource_path_for(Self::RESOURCE_PATH, substitutions);
        async move { Self::find_by_path(session, &path?).await }
    }

    fn find_by_id(session: Arc<Session>, id: u64) -> impl Future<Output = Result<Self>> + Send {
        let path = resource_path_for(Self::RESOURCE_PATH, &[("id", &id)]);
        async move { Self::find_by_path(session, &path?).await }
    }

    /// [`RemoteResource::find_by_id`] through the process default session.
    fn find_default(id: u64) -> impl Future<Output = Result<Self>> + Send {
        async move { Self::find_by_id(default_session()?, id).await }
    }

    /// Build from an embedded element, as navigation does for children.
    fn instantiate(
        document: Element,
        session: Arc<Session>,
        eager: bool,
        carried: Associations,
    ) -> impl Future<Output = Result<Self>> + Send {
        async move {
            Resource::materialize(Self::resource_kind(), document, session, eager, carried)
                .await
                .map(Self::from_resource)
        }
    }

    fn id(&self) -> Option<u64> {
        self.resource().id()
    }

    fn links(&self) -> &HashMap<String, Link> {
        self.resource().links()
    }

    /// Re-fetch from the self link, dropping resolved associations.
    ///
    /// Navigation hands out shared `Arc<Self>` values; those are reloaded
    /// through a clone, which leaves the shared instance untouched.
    fn reload(&mut self) -> impl Future<Output = Result<&mut Self>> + Send {
        async move {
            self.resource_mut().reload().await?;
            Ok(self)
        }
    }
}
