//! Ticketed resource state.
//!
//! A hook tracks one remote resource keyed by id. Starting a fetch hands out
//! a [`FetchTicket`]; only the ticket from the most recent start can settle
//! the hook, so a slow response for an old id never overwrites a newer one.

/// Lifecycle of a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// Identifies one fetch started by a hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub id: String,
    pub generation: u64,
}

/// Borrowed `{data, is_loading, error}` triple for views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookView<'a, T> {
    pub data: Option<&'a T>,
    pub is_loading: bool,
    pub error: Option<&'a str>,
}

/// State of a single id-keyed resource.
///
/// # Examples
///
/// ```
/// use jobboard::resource::ResourceHook;
///
/// let mut hook: ResourceHook<String> = ResourceHook::new();
/// let first = hook.activate(Some("a")).unwrap();
/// let second = hook.activate(Some("b")).unwrap();
///
/// assert!(hook.settle(&second, Ok("B".to_string())));
/// assert!(!hook.settle(&first, Ok("A".to_string())));
/// assert_eq!(hook.data().map(String::as_str), Some("B"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHook<T> {
    id: Option<String>,
    generation: u64,
    state: ResourceState<T>,
}

impl<T> Default for ResourceHook<T> {
    fn default() -> Self {
        Self {
            id: None,
            generation: 0,
            state: ResourceState::Idle,
        }
    }
}

impl<T> ResourceHook<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the hook at `id`.
    ///
    /// Returns a ticket when a fetch must start: on first activation or when
    /// the id changed. Re-activating with the current id is a no-op. `None`
    /// resets the hook to idle.
    pub fn activate(&mut self, id: Option<&str>) -> Option<FetchTicket> {
        let Some(id) = id else {
            if self.id.is_some() {
                self.reset();
            }
            return None;
        };

        if self.id.as_deref() == Some(id) && !matches!(self.state, ResourceState::Idle) {
            return None;
        }
        Some(self.start(id.to_string()))
    }

    /// Restarts the fetch for the current id, discarding any in flight.
    pub fn reload(&mut self) -> Option<FetchTicket> {
        let id = self.id.clone()?;
        Some(self.start(id))
    }

    fn start(&mut self, id: String) -> FetchTicket {
        self.generation += 1;
        self.id = Some(id.clone());
        self.state = ResourceState::Loading;
        tracing::trace!(id = %id, generation = self.generation, "fetch started");
        FetchTicket {
            id,
            generation: self.generation,
        }
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.id = None;
        self.state = ResourceState::Idle;
    }

    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation && self.id.as_deref() == Some(ticket.id.as_str())
    }

    /// Applies a fetch result. Returns `false` and leaves the hook unchanged
    /// if `ticket` is stale.
    pub fn settle(&mut self, ticket: &FetchTicket, result: Result<T, String>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                id = %ticket.id,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }
        self.state = match result {
            Ok(data) => ResourceState::Ready(data),
            Err(message) => ResourceState::Failed(message),
        };
        true
    }

    /// Forgets the resource and invalidates every outstanding ticket.
    pub fn unmount(&mut self) {
        self.reset();
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub const fn state(&self) -> &ResourceState<T> {
        &self.state
    }

    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match &self.state {
            ResourceState::Ready(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            ResourceState::Ready(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, ResourceState::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ResourceState::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn view(&self) -> HookView<'_, T> {
        HookView {
            data: self.data(),
            is_loading: self.is_loading(),
            error: self.error(),
        }
    }
}
