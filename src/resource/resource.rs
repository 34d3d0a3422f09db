use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::helpers::time::parse_timestamp;
use crate::resource::association::{carry, downcast, Associations, Slot, Slots};
use crate::resource::link::{scan_links, Link};
use crate::resource::remote::RemoteResource;
use crate::session::Session;
use crate::utils::constants::SELF_RELATION;
use crate::xml::{parse_root, Element, Selector};

/// Static description of a resource type: its document root and media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub root_element: &'static str,
    pub media_type: &'static str,
}

/// A hypermedia resource: the document fragment it was built from, the
/// link relations found in it and every association resolved so far.
///
/// Navigation (`one`, `many`, `fetch_from_link`) resolves each key at
/// most once; the cache lock is held for the whole resolution. Only
/// [`Resource::reload`] replaces the document and empties the cache.
pub struct Resource {
    kind: ResourceKind,
    document: Element,
    links: OnceLock<HashMap<String, Link>>,
    associations: Mutex<Slots>,
    session: Arc<Session>,
}

impl Resource {
    pub fn new(kind: ResourceKind, document: Element, session: Arc<Session>) -> Self {
        Self {
            kind,
            document,
            links: OnceLock::new(),
            associations: Mutex::new(Slots::new()),
            session,
        }
    }

    /// Construct from a document fragment, reloading it in full when
    /// `eager`, then seed the carried associations.
    pub async fn materialize(
        kind: ResourceKind,
        document: Element,
        session: Arc<Session>,
        eager: bool,
        carried: Associations,
    ) -> Result<Self> {
        let mut resource = Self::new(kind, document, session);
        if eager {
            resource.reload().await?;
        }
        resource.associations.get_mut().extend(carry(carried));
        Ok(resource)
    }

    /// Build from raw XML without touching the network.
    pub fn parse(kind: ResourceKind, xml: &str, session: Arc<Session>) -> Result<Self> {
        Ok(Self::new(kind, parse_root(xml, kind.root_element)?, session))
    }

    pub async fn fetch_document(kind: ResourceKind, session: &Session, path: &str) -> Result<Element> {
        let body = session.get_text(path, kind.media_type).await?;
        parse_root(&body, kind.root_element)
    }

    pub async fn fetch(
        kind: ResourceKind,
        session: Arc<Session>,
        path: &str,
        carried: Associations,
    ) -> Result<Self> {
        let document = Self::fetch_document(kind, &session, path).await?;
        let mut resource = Self::new(kind, document, session);
        resource.associations.get_mut().extend(carry(carried));
        Ok(resource)
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn document(&self) -> &Element {
        &self.document
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.document.get(name)
    }

    pub fn links(&self) -> &HashMap<String, Link> {
        self.links.get_or_init(|| scan_links(&self.document))
    }

    pub fn link(&self, relation: &str) -> Option<&Link> {
        self.links().get(relation)
    }

    /// Trailing integer of the self link; `None` without one.
    pub fn id(&self) -> Option<u64> {
        self.link(SELF_RELATION).and_then(Link::trailing_id)
    }

    pub fn created_at(&self) -> Result<Option<DateTime<Utc>>> {
        self.timestamp("createdDate")
    }

    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>> {
        self.timestamp("updatedDate")
    }

    fn timestamp(&self, element: &str) -> Result<Option<DateTime<Utc>>> {
        match self.document.child_text(element)? {
            None => Ok(None),
            Some(value) => parse_timestamp(&value)
                .map(Some)
                .ok_or_else(|| Error::InvalidTimestamp {
                    element: element.to_owned(),
                    value,
                }),
        }
    }

    /// Re-fetch the document from the self link and drop every cached association.
    ///
    /// Needs exclusive access: a resource reached through navigation is a
    /// shared `Arc<T>`, so reload a clone of it (`(*shared).clone()`).
    pub async fn reload(&mut self) -> Result<&mut Self> {
        let href = self
            .link(SELF_RELATION)
            .map(|link| link.href.clone())
            .ok_or(Error::MissingSelfLink)?;

        debug!("reloading <{}> from {}", self.kind.root_element, href);
        self.document = Self::fetch_document(self.kind, &self.session, &href).await?;
        self.links = OnceLock::new();
        self.associations.get_mut().clear();
        Ok(self)
    }

    /// First resource matching `selector`. A single resource carried in
    /// under the same key wins; otherwise this is `many(..).first()`.
    pub async fn one<T: RemoteResource>(
        &self,
        selector: &str,
        eager: bool,
        carried: Associations,
    ) -> Result<Option<Arc<T>>> {
        {
            let cache = self.associations.lock().await;
            if let Some(single) = cache
                .get(selector)
                .and_then(Slot::value)
                .and_then(|value| value.downcast::<T>().ok())
            {
                debug!("association '{}' carried in", selector);
                return Ok(Some(single));
            }
        }
        Ok(self.many::<T>(selector, eager, carried).await?.first().cloned())
    }

    /// Every embedded element matching `selector`, wrapped as `T`.
    ///
    /// The list is cached under `selector`; later calls return the same
    /// `Arc` whatever `eager` and `carried` they pass.
    pub async fn many<T: RemoteResource>(
        &self,
        selector: &str,
        eager: bool,
        carried: Associations,
    ) -> Result<Arc<Vec<Arc<T>>>> {
        let mut cache = self.associations.lock().await;
        if let Some(value) = cache.get(selector).and_then(Slot::value) {
            debug!("association '{}' served from cache", selector);
            return downcast::<Vec<Arc<T>>>(selector, &value);
        }

        let parsed = Selector::parse(selector)?;
        let elements: Vec<Element> = self.document.select(&parsed).into_iter().cloned().collect();
        debug!("resolving '{}': {} element(s)", selector, elements.len());

        let mut resolved = Vec::with_capacity(elements.len());
        for element in elements {
            let instance = T::instantiate(element, self.session.clone(), eager, carried.clone()).await?;
            resolved.push(Arc::new(instance));
        }

        let resolved = Arc::new(resolved);
        cache.insert(selector.to_owned(), Slot::Resolved(resolved.clone()));
        Ok(resolved)
    }

    /// Fetch the target of link `relation` as `T`, cached under `key`.
    ///
    /// Fails with [`Error::LinkNotFound`] before any request when the
    /// relation is absent.
    pub async fn fetch_from_link<T: RemoteResource>(
        &self,
        key: &str,
        relation: &str,
        carried: Associations,
    ) -> Result<Arc<T>> {
        let mut cache = self.associations.lock().await;
        if let Some(value) = cache.get(key).and_then(Slot::value) {
            debug!("association '{}' served from cache", key);
            return downcast::<T>(key, &value);
        }

        let href = self
            .link(relation)
            .map(|link| link.href.clone())
            .ok_or_else(|| Error::LinkNotFound(relation.to_owned()))?;

        debug!("following '{}' to {}", relation, href);
        let instance = Arc::new(T::find_by_path_with(self.session.clone(), &href, carried).await?);
        cache.insert(key.to_owned(), Slot::Resolved(instance.clone()));
        Ok(instance)
    }

    /// Raw body behind link `relation`, requested with the link's media type.
    pub async fn fetch_link_content(&self, relation: &str) -> Result<Vec<u8>> {
        let link = self
            .link(relation)
            .ok_or_else(|| Error::LinkNotFound(relation.to_owned()))?;
        let accept = link.media_type().unwrap_or("*/*");
        self.session.get_bytes(&link.href, accept).await
    }
}

/// Clones share the document but start with no resolved associations.
impl Clone for Resource {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            document: self.document.clone(),
            links: self.links.clone(),
            associations: Mutex::new(Slots::new()),
            session: self.session.clone(),
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("root", &self.kind.root_element)
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}
