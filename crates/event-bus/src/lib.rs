//! In-process publish/subscribe mediator.
//!
//! This crate provides:
//! - [`BusEvent`] trait tying an event type to its closed set of kinds
//! - [`EventBus`] for synchronous, depth-first, re-entrant dispatch
//! - [`Topic`] and [`SubscriptionId`] for managing subscriptions

pub mod bus;
pub mod event;

pub use bus::EventBus;
pub use event::{BusEvent, SubscriptionId, Topic};
