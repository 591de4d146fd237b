//! Event Relay - synchronous publish/subscribe between engine and wizard
//!
//! The installation engine never talks to the wizard or the rendering layer
//! directly. It publishes [`Event`]s here and whoever cares subscribes.
//!
//! Topics form a closed set ([`Topic`]) and every event carries a typed
//! payload, so subscribers match on variants instead of parsing arguments.
//!
//! # Dispatch rules
//!
//! - Subscribers run in subscription order, synchronously, on the caller's
//!   thread.
//! - A subscriber with no filter receives every event.
//! - Subscribing again under an existing [`SubscriberId`] replaces that
//!   subscriber's filter and handler in place. It keeps its original position
//!   in the dispatch order and is never registered twice.
//! - If a handler fails, later handlers are skipped and the failure is
//!   returned to the publisher as a [`RelayError`].

use crate::paths::NormalizedPath;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

/// Event categories a subscriber can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    PathChanged,
    InstallSuccess,
    InstallNoSuchDirectory,
    InstallError,
    WroteSharedSetup,
    ProcessedUserSetup,
    WroteBoot,
    OpenedProductPage,
}

impl Topic {
    /// Human-readable topic name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Topic::PathChanged => "CHANGED FOLDER PATH",
            Topic::InstallSuccess => "INSTALLATION SUCCESSFUL",
            Topic::InstallNoSuchDirectory => "INSTALLATION NO SUCH DIRECTORY",
            Topic::InstallError => "INSTALLATION ERROR",
            Topic::WroteSharedSetup => "WROTE SHARED USER SETUP",
            Topic::ProcessedUserSetup => "PROCESSED USER SETUP",
            Topic::WroteBoot => "WROTE FOUNDATION BOOT",
            Topic::OpenedProductPage => "OPENED PRODUCT PAGE",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event together with its topic-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The shared folder path was set (`Some`) or cleared (`None`)
    PathChanged(Option<NormalizedPath>),

    /// All three installation steps completed
    InstallSuccess,

    /// A target directory was missing; carries the failure trace
    InstallNoSuchDirectory(String),

    /// Any other installation failure; carries the failure trace
    InstallError(String),

    /// The shared setup file was created at this path
    WroteSharedSetup(PathBuf),

    /// The user setup file was created or appended to
    ProcessedUserSetup(PathBuf),

    /// The bootstrap module was written
    WroteBoot(PathBuf),

    /// The product page was requested
    OpenedProductPage(String),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::PathChanged(_) => Topic::PathChanged,
            Event::InstallSuccess => Topic::InstallSuccess,
            Event::InstallNoSuchDirectory(_) => Topic::InstallNoSuchDirectory,
            Event::InstallError(_) => Topic::InstallError,
            Event::WroteSharedSetup(_) => Topic::WroteSharedSetup,
            Event::ProcessedUserSetup(_) => Topic::ProcessedUserSetup,
            Event::WroteBoot(_) => Topic::WroteBoot,
            Event::OpenedProductPage(_) => Topic::OpenedProductPage,
        }
    }
}

/// Identity of a subscriber. Re-subscribing with the same id replaces the
/// previous registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(String);

impl SubscriberId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubscriberId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failure raised by a subscriber while handling an event
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("subscriber '{subscriber}' failed while handling '{topic}'")]
    Handler {
        subscriber: SubscriberId,
        topic: Topic,
        #[source]
        source: anyhow::Error,
    },
}

type Handler = Rc<dyn Fn(&Event) -> anyhow::Result<()>>;

struct Subscription {
    id: SubscriberId,
    filter: Option<Topic>,
    handler: Handler,
}

impl Subscription {
    fn accepts(&self, topic: Topic) -> bool {
        self.filter.map_or(true, |filter| filter == topic)
    }
}

/// Explicitly constructed event relay, shared through `Rc`
#[derive(Default)]
pub struct EventRelay {
    subscriptions: RefCell<Vec<Subscription>>,
}

impl EventRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `id`, optionally restricted to one topic
    pub fn subscribe<F>(&self, id: impl Into<SubscriberId>, filter: Option<Topic>, handler: F)
    where
        F: Fn(&Event) -> anyhow::Result<()> + 'static,
    {
        let id = id.into();
        let handler: Handler = Rc::new(handler);
        let mut subscriptions = self.subscriptions.borrow_mut();

        if let Some(existing) = subscriptions.iter_mut().find(|s| s.id == id) {
            tracing::debug!("Replacing subscription '{}' (filter {:?})", id, filter);
            existing.filter = filter;
            existing.handler = handler;
        } else {
            tracing::debug!("Adding subscription '{}' (filter {:?})", id, filter);
            subscriptions.push(Subscription { id, filter, handler });
        }
    }

    /// Dispatch `event` to every matching subscriber in order
    pub fn publish(&self, event: Event) -> Result<(), RelayError> {
        let topic = event.topic();

        // Snapshot so handlers may publish or subscribe while we dispatch
        let targets: Vec<(SubscriberId, Handler)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.accepts(topic))
            .map(|s| (s.id.clone(), Rc::clone(&s.handler)))
            .collect();

        for (subscriber, handler) in targets {
            if let Err(source) = handler(&event) {
                tracing::error!("Subscriber '{}' failed on '{}': {:#}", subscriber, topic, source);
                return Err(RelayError::Handler { subscriber, topic, source });
            }
            tracing::debug!("Emitted '{}' to '{}'", topic, subscriber);
        }

        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Current filter of a subscriber: `None` if unknown, `Some(None)` if it
    /// receives every topic
    #[cfg(test)]
    pub fn filter_of(&self, id: &SubscriberId) -> Option<Option<Topic>> {
        self.subscriptions
            .borrow()
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.filter)
    }
}

impl fmt::Debug for EventRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .subscriptions
            .borrow()
            .iter()
            .map(|s| s.id.to_string())
            .collect();
        f.debug_struct("EventRelay").field("subscribers", &ids).finish()
    }
}
