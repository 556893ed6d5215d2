use std::time::{Duration, Instant};

use uuid::Uuid;

use super::metadata::MetadataItem;
use super::time::MediaTime;

/// Transport status, derived from whatever the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    WaitingToPlayAtRate,
}

/// Readiness of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Unknown,
    ReadyToPlay,
    Failed,
}

/// A change to one of the observable player properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange {
    Status(PlayerStatus),
    Rate(f32),
    TimeControl(PlaybackState),
}

/// Opaque token returned by observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverHandle(Uuid);

impl ObserverHandle {
    pub(crate) fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

pub type TimeCallback = Box<dyn FnMut(MediaTime)>;
pub type StateCallback = Box<dyn FnMut(StateChange)>;

/// The unified interface for every playback engine 🎵
///
/// Implementations are confined to the thread that created them; callbacks
/// are invoked synchronously, in registration order, from `tick` or from a
/// transport call.
pub trait PlayerTrait {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, to: MediaTime);

    /// Registers `callback` to receive the current position. Any number of
    /// observers may coexist.
    fn add_periodic_time_observer(
        &mut self,
        interval: Duration,
        callback: TimeCallback,
    ) -> ObserverHandle;

    /// Registers `callback` for status/rate/time-control changes.
    fn add_state_observer(&mut self, callback: StateCallback) -> ObserverHandle;

    /// Unregisters a time or state observer. Unknown handles are ignored.
    fn remove_observer(&mut self, handle: ObserverHandle);

    /// 0.0 – 1.0
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);

    fn waits_to_minimize_stalling(&self) -> bool;
    fn set_waits_to_minimize_stalling(&mut self, waits: bool);

    fn rate(&self) -> f32;
    fn status(&self) -> PlayerStatus;
    fn time_control_status(&self) -> PlaybackState;

    /// `None` when nothing is loaded or the duration cannot be read;
    /// `Some(MediaTime::INDEFINITE)` when the item has no known length.
    fn current_duration(&self) -> Option<MediaTime>;
    fn current_metadata(&self) -> Vec<MetadataItem>;

    /// True for adapters driving another application.
    fn is_remote_controlled(&self) -> bool;

    fn previous_track(&mut self) {}
    fn next_track(&mut self) {}

    /// When the next timer is due, if any timer is running.
    fn next_deadline(&self) -> Option<Instant>;

    /// Fires every timer due at `now`.
    fn tick(&mut self, now: Instant);
}

/// Registered observers in registration order.
pub(crate) struct ObserverList<F> {
    entries: Vec<(ObserverHandle, F)>,
}

impl<F> Default for ObserverList<F> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F> ObserverList<F> {
    pub fn insert(&mut self, callback: F) -> ObserverHandle {
        let handle = ObserverHandle::fresh();
        self.entries.push((handle, callback));
        handle
    }

    /// Returns true if `handle` was registered.
    pub fn remove(&mut self, handle: ObserverHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(h, _)| *h != handle);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut F> {
        self.entries.iter_mut().map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.entries.iter().map(|(_, f)| f)
    }
}

impl ObserverList<StateCallback> {
    pub fn notify(&mut self, change: StateChange) {
        for callback in self.iter_mut() {
            callback(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_unique() {
        let mut list: ObserverList<u8> = ObserverList::default();
        let a = list.insert(1);
        let b = list.insert(2);
        assert_ne!(a, b);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut list: ObserverList<u8> = ObserverList::default();
        let kept = list.insert(1);
        let gone = list.insert(2);
        assert!(list.remove(gone));
        assert!(!list.remove(gone));
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1]);
        assert!(list.remove(kept));
    }
}
