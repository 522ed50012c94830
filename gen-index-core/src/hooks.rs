//! # hooks: per-task lifecycle events and their dispatcher
//!
//! This module defines the extension mechanism of the pipeline: a fixed set
//! of lifecycle [`Event`]s, the [`Hook`] trait implemented by handlers, and
//! the [`HookBus`] that dispatches them.
//!
//! ## Contract
//! - Handlers registered for an event run sequentially in registration
//!   order, each fully awaited before the next starts.
//! - Every handler receives `&mut ExecutionContext` and may rewrite `paths`,
//!   `codes`, `content` or the config itself; mutations are visible to
//!   subsequent handlers and to later pipeline stages.
//! - A [`HookBus`] is built fresh for each task from the config's
//!   registration list and dropped when the task ends (success, empty-exit
//!   or error). No hook state persists across tasks.
//!
//! Ordering and mutation visibility are load-bearing guarantees here, which
//! is why this is an explicit map from event to handler list rather than a
//! general-purpose event-emitter crate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ResolvedConfig;
use crate::error::{HookError, TaskError};

/// Lifecycle events, listed in the order a task fires them. `Empty` fires
/// instead of the remaining events when the empty-set policy triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    ConfigureResolved,
    PathsResolved,
    Empty,
    CodesGenerated,
    ContentGenerated,
    BeforeWrite,
    AfterWrite,
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Event::ConfigureResolved => "configureResolved",
            Event::PathsResolved => "pathsResolved",
            Event::Empty => "empty",
            Event::CodesGenerated => "codesGenerated",
            Event::ContentGenerated => "contentGenerated",
            Event::BeforeWrite => "beforeWrite",
            Event::AfterWrite => "afterWrite",
        }
    }
}

/// Per-task mutable state shared with every hook handler.
///
/// `paths` holds forward-slash-normalized path strings, `codes` the
/// generated source lines, `content` the assembled file content once the
/// assembly stage has run. `ext_name` is computed exactly once per task.
pub struct ExecutionContext {
    pub config: ResolvedConfig,
    pub paths: Vec<String>,
    pub codes: Vec<String>,
    pub content: Option<String>,
    pub ext_name: Option<String>,
}

pub type HookResult = Result<(), HookError>;

/// A lifecycle handler. Implement this directly for handlers that need to
/// await, or register a plain closure through [`Hooks::on_fn`].
#[async_trait]
pub trait Hook: Send + Sync {
    async fn run(&self, ctx: &mut ExecutionContext) -> HookResult;
}

/// Adapter so synchronous closures can be registered without boilerplate.
struct FnHook<F>(F);

#[async_trait]
impl<F> Hook for FnHook<F>
where
    F: Fn(&mut ExecutionContext) -> HookResult + Send + Sync,
{
    async fn run(&self, ctx: &mut ExecutionContext) -> HookResult {
        (self.0)(ctx)
    }
}

/// Ordered registration list carried on a config. Handlers are `Arc`-shared
/// so a list cloned into several tasks reuses the same (stateless) handler
/// objects while each task still gets its own [`HookBus`].
#[derive(Clone, Default)]
pub struct Hooks {
    entries: Vec<(Event, Arc<dyn Hook>)>,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field(
                "entries",
                &self.entries.iter().map(|(event, _)| event).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `event`, keeping registration order.
    pub fn on(mut self, event: Event, hook: impl Hook + 'static) -> Self {
        self.entries.push((event, Arc::new(hook)));
        self
    }

    /// Register a synchronous closure for `event`.
    pub fn on_fn<F>(self, event: Event, f: F) -> Self
    where
        F: Fn(&mut ExecutionContext) -> HookResult + Send + Sync + 'static,
    {
        self.on(event, FnHook(f))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Event, Arc<dyn Hook>)> {
        self.entries.iter()
    }
}

/// Per-task event dispatcher. Built once per task, dropped at task end.
#[derive(Default)]
pub struct HookBus {
    handlers: HashMap<Event, Vec<Arc<dyn Hook>>>,
}

impl HookBus {
    /// Seed a fresh bus from a config's registration list.
    pub fn from_registrations(hooks: &Hooks) -> Self {
        let mut bus = Self::default();
        for (event, handler) in hooks.iter() {
            bus.register(*event, Arc::clone(handler));
        }
        bus
    }

    pub fn register(&mut self, event: Event, handler: Arc<dyn Hook>) {
        self.handlers.entry(event).or_default().push(handler);
    }

    /// Run every handler registered for `event`, one at a time, in
    /// registration order. A failing handler aborts dispatch for this event
    /// and surfaces as a task error.
    pub async fn emit(
        &self,
        event: Event,
        ctx: &mut ExecutionContext,
    ) -> Result<(), TaskError> {
        let Some(handlers) = self.handlers.get(&event) else {
            return Ok(());
        };
        tracing::debug!(event = event.as_str(), handlers = handlers.len(), "dispatching hooks");
        for handler in handlers {
            handler.run(ctx).await.map_err(|source| TaskError::Hook {
                event: event.as_str(),
                source,
            })?;
        }
        Ok(())
    }
}
