//! Change notification fan-out between the book and its consumers.

use crate::book::OrderBook;
use crate::events::BookUpdate;

/// A consumer of book change notifications.
///
/// `on_change` runs synchronously on the publishing thread; the mutation
/// that produced `update` has fully completed, so observers may read any
/// part of the book.
pub trait BookObserver {
    /// Called once per published update.
    fn on_change(&mut self, book: &OrderBook, update: &BookUpdate);
}

/// Synchronous publish/subscribe channel for [`BookUpdate`]s.
///
/// Observers are invoked in registration order, once per publish, with no
/// buffering. There is no unsubscribe.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Vec<Box<dyn BookObserver>>,
}

impl ChangeNotifier {
    /// Creates a notifier with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Duplicates are not detected.
    pub fn subscribe(&mut self, observer: Box<dyn BookObserver>) {
        self.observers.push(observer);
    }

    /// Delivers `update` to every observer, in registration order.
    pub fn publish(&mut self, book: &OrderBook, update: &BookUpdate) {
        for observer in &mut self.observers {
            observer.on_change(book, update);
        }
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
