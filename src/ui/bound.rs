//! Non-owning handles onto caller-owned widget state
//!
//! A widget is a view onto a value the application owns. The application
//! keeps the value in an `Rc<RefCell<T>>` and hands the widget a [`Bound`],
//! which holds only a `Weak`. Contract for callers:
//!
//! - keep the `Rc` alive for as long as the widget should do anything;
//!   once it is dropped the widget silently stops updating;
//! - do not bind the same storage to two widgets. Updates run one after
//!   another in panel order, so the last writer of a frame wins.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared storage for a bound value, owned by the application
pub type Shared<T> = Rc<RefCell<T>>;

/// Create shared storage for a value that widgets will bind to
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Non-owning reference to caller-owned state
#[derive(Debug)]
pub struct Bound<T> {
    target: Weak<RefCell<T>>,
}

impl<T> Bound<T> {
    pub fn new(storage: &Shared<T>) -> Self {
        Self { target: Rc::downgrade(storage) }
    }

    /// A binding to nothing; widgets holding it no-op
    pub fn detached() -> Self {
        Self { target: Weak::new() }
    }

    pub fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }

    /// Run `f` on the bound value, or return `None` if it is gone
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let rc = self.target.upgrade()?;
        let mut value = rc.try_borrow_mut().ok()?;
        Some(f(&mut value))
    }
}

impl<T: Clone> Bound<T> {
    pub fn get(&self) -> Option<T> {
        self.with(|v| v.clone())
    }
}

impl<T> Clone for Bound<T> {
    fn clone(&self) -> Self {
        Self { target: self.target.clone() }
    }
}

impl<T> From<&Shared<T>> for Bound<T> {
    fn from(storage: &Shared<T>) -> Self {
        Self::new(storage)
    }
}
