//! Live properties: typed get/set indirection with change notification.
//!
//! A [`Property`] decouples the observed value from its storage. Reads and
//! writes go through handlers; by default those handlers use the
//! property's own cached storage, but a host can install handlers that
//! reach into a device, a bus, or any other backend.
//!
//! Setting a value notifies every current subscriber synchronously, in
//! subscription order, on the caller's thread. Subscribers must avoid
//! long-running work inline; a panicking subscriber propagates into the
//! setter.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ValueError;
use crate::value::{DataType, ElementValue};

/// Notification payload delivered to subscribers on every `set`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub id_short: String,
    pub value: serde_json::Value,
    pub value_type: DataType,
}

/// Handler invoked by [`Property::get`].
pub type GetHandler = Box<dyn Fn() -> ElementValue + Send>;
/// Handler invoked by [`Property::set`] before notification.
pub type SetHandler = Box<dyn FnMut(ElementValue) + Send>;

type Subscriber = Arc<dyn Fn(&ValueChange) + Send + Sync>;

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, Subscriber)>,
}

/// A panicking subscriber must not wedge the list for later calls.
fn relock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Scoped handle for one subscription. Dropping it releases the
/// subscription; [`unsubscribe`](Subscription::unsubscribe) does the same
/// explicitly.
pub struct Subscription {
    list: Weak<Mutex<SubscriberList>>,
    id: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(list) = self.list.upgrade() {
            relock(&list).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// A leaf value with handler-based access and change notification.
///
/// # Example
///
/// ```rust
/// use twinreg_model::{DataType, ElementValue, Property};
///
/// let mut temperature = Property::new("Temperature", DataType::Double);
/// let _watch = temperature.subscribe(|change| {
///     println!("{} -> {}", change.id_short, change.value);
/// });
///
/// temperature.set(Some(ElementValue::from_json(21.5.into())));
/// assert_eq!(temperature.get().value, serde_json::json!(21.5));
/// ```
pub struct Property {
    id_short: String,
    value_type: DataType,
    get: GetHandler,
    set: SetHandler,
    subscribers: Arc<Mutex<SubscriberList>>,
}

impl Property {
    /// A property backed by its own cached storage, initially unset.
    pub fn new(id_short: impl Into<String>, value_type: DataType) -> Self {
        Self::with_initial(id_short, value_type, serde_json::Value::Null)
    }

    /// A self-stored property with an initial value.
    pub fn with_initial(
        id_short: impl Into<String>,
        value_type: DataType,
        initial: serde_json::Value,
    ) -> Self {
        let storage = Arc::new(Mutex::new(initial));
        let read = Arc::clone(&storage);
        let get: GetHandler = Box::new(move || {
            let value = relock(&read).clone();
            ElementValue::new(value, value_type)
        });
        let set: SetHandler = Box::new(move |element: ElementValue| {
            *relock(&storage) = element.value;
        });
        Self::with_handlers(id_short, value_type, get, set)
    }

    /// A property whose reads and writes go through custom handlers.
    pub fn with_handlers(
        id_short: impl Into<String>,
        value_type: DataType,
        get: GetHandler,
        set: SetHandler,
    ) -> Self {
        Self {
            id_short: id_short.into(),
            value_type,
            get,
            set,
            subscribers: Arc::new(Mutex::new(SubscriberList::default())),
        }
    }

    pub fn id_short(&self) -> &str {
        &self.id_short
    }

    pub fn value_type(&self) -> DataType {
        self.value_type
    }

    /// Invoke the get handler.
    pub fn get(&self) -> ElementValue {
        (self.get)()
    }

    /// Invoke the set handler, then notify every current subscriber in
    /// subscription order. `None` is a no-op: no storage mutation, no
    /// notification.
    pub fn set(&mut self, value: Option<ElementValue>) {
        let Some(value) = value else {
            return;
        };
        (self.set)(value.clone());

        let change = ValueChange {
            id_short: self.id_short.clone(),
            value: value.value,
            value_type: value.value_type,
        };
        // Snapshot under the lock, call outside it, so a subscriber may
        // itself subscribe or unsubscribe.
        let snapshot: Vec<Subscriber> = relock(&self.subscribers)
            .entries
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in snapshot {
            subscriber(&change);
        }
    }

    /// Register a subscriber. The returned guard releases the
    /// subscription on drop.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe<F>(&self, subscriber: F) -> Subscription
    where
        F: Fn(&ValueChange) + Send + Sync + 'static,
    {
        let mut list = relock(&self.subscribers);
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, Arc::new(subscriber)));
        Subscription {
            list: Arc::downgrade(&self.subscribers),
            id,
        }
    }

    /// A typed view over this property. Both views observe the same
    /// handlers, storage, and notification stream.
    pub fn typed<T>(&mut self) -> TypedProperty<'_, T> {
        TypedProperty {
            property: self,
            _marker: PhantomData,
        }
    }
}

/// Typed accessor wrapping a [`Property`].
pub struct TypedProperty<'a, T> {
    property: &'a mut Property,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> TypedProperty<'_, T> {
    /// Read through the general get handler, converting via serde.
    /// An unset (null) value reads as `None`.
    pub fn get(&self) -> Result<Option<T>, ValueError> {
        let element = self.property.get();
        if element.is_null() {
            return Ok(None);
        }
        element.to_typed().map(Some)
    }

    /// Write through the general set handler; subscribers see the same
    /// notification a general `set` would produce. `None` is a no-op.
    pub fn set(&mut self, value: Option<T>) -> Result<(), ValueError> {
        let Some(value) = value else {
            return Ok(());
        };
        let element = ElementValue::new(serde_json::to_value(&value)?, self.property.value_type);
        self.property.set(Some(element));
        Ok(())
    }
}
