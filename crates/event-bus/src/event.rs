//! Event and subscription types.

/// Trait for events carried by an [`EventBus`](crate::EventBus).
///
/// Each event belongs to exactly one kind out of a closed set, so
/// subscriptions are checked at compile time instead of matching strings.
pub trait BusEvent: 'static {
    /// The closed set of event kinds handlers subscribe to.
    type Kind: Copy + Eq + std::hash::Hash + std::fmt::Debug + 'static;

    /// Returns the kind of this event.
    fn kind(&self) -> Self::Kind;

    /// Returns the stable wire name of this event, used for logging.
    fn name(&self) -> &'static str;
}

/// Which events a subscription receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic<K> {
    /// Only events of exactly this kind.
    Exact(K),
    /// Every event published on the bus.
    All,
}

impl<K: PartialEq> Topic<K> {
    /// Returns true if an event of `kind` is delivered to this topic.
    pub fn matches(&self, kind: &K) -> bool {
        match self {
            Topic::Exact(k) => k == kind,
            Topic::All => true,
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}
