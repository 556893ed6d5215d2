//! The in-process engine: `rodio` for output, `lofty` for tags.

mod observers;

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use std::time::{Duration, Instant};

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::Accessor;
use rodio::{Decoder, OutputStream, Sink, Source};
use tracing::{debug, info, warn};

use crate::player::error::PlayerError;
use crate::player::metadata::{MetadataItem, MetadataKey};
use crate::player::source::MediaSource;
use crate::player::time::MediaTime;
use crate::player::traits::{
    ObserverHandle, ObserverList, PlaybackState, PlayerStatus, PlayerTrait, StateCallback,
    StateChange, TimeCallback,
};

pub use observers::PeriodicObservers;

/// What we learned about the loaded item when it was opened.
#[derive(Debug, Clone, Default)]
struct LoadedItem {
    duration: Option<MediaTime>,
    metadata: Vec<MetadataItem>,
}

pub struct NativePlayer {
    // Dropping the stream silences the sink
    _stream: OutputStream,
    sink: Sink,
    item: Option<LoadedItem>,
    status: PlayerStatus,
    waits_to_minimize_stalling: bool,
    last_state: (PlaybackState, f32),
    time_observers: PeriodicObservers,
    state_observers: ObserverList<StateCallback>,
}

impl NativePlayer {
    /// Opens the default output device. Nothing is loaded yet.
    pub fn new() -> Result<Self, PlayerError> {
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.pause();
        Ok(Self {
            _stream: stream,
            sink,
            item: None,
            status: PlayerStatus::Unknown,
            waits_to_minimize_stalling: true,
            last_state: (PlaybackState::Paused, 0.0),
            time_observers: PeriodicObservers::default(),
            state_observers: ObserverList::default(),
        })
    }

    /// Replaces the current item, paused at the start.
    pub fn open(&mut self, source: &MediaSource) -> Result<(), PlayerError> {
        self.sink.clear();
        self.item = None;

        let result = self.load_source(source);

        let status = if result.is_ok() {
            info!(source = %source, "opened");
            PlayerStatus::ReadyToPlay
        } else {
            PlayerStatus::Failed
        };
        if self.status != status {
            self.status = status;
            self.state_observers.notify(StateChange::Status(status));
        }
        self.refresh_state();
        result
    }

    fn load_source(&mut self, source: &MediaSource) -> Result<(), PlayerError> {
        match source {
            MediaSource::File(path) => {
                let item = read_tags(BufReader::new(open_file(path)?));
                self.load(BufReader::new(open_file(path)?), item)
            }
            MediaSource::Stream(url) => {
                debug!(url = %url, "fetching stream");
                let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
                let item = read_tags(Cursor::new(bytes.clone()));
                self.load(Cursor::new(bytes), item)
            }
            MediaSource::Remote(app) => Err(PlayerError::NotNative(app.clone())),
        }
    }

    fn load<R>(&mut self, reader: R, mut item: LoadedItem) -> Result<(), PlayerError>
    where
        R: Read + Seek + Send + Sync + 'static,
    {
        let decoder = Decoder::new(reader)?;
        if let Some(total) = decoder.total_duration() {
            item.duration = Some(MediaTime::from(total));
        }
        self.sink.append(decoder);
        self.item = Some(item);
        Ok(())
    }

    fn position(&self) -> MediaTime {
        MediaTime::from(self.sink.get_pos())
    }

    fn refresh_state(&mut self) {
        let derived = derive_state(
            self.status,
            self.sink.is_paused(),
            self.sink.empty(),
            self.sink.speed(),
        );
        let (old_state, old_rate) = self.last_state;
        self.last_state = derived;
        if derived.0 != old_state {
            self.state_observers.notify(StateChange::TimeControl(derived.0));
        }
        if derived.1 != old_rate {
            self.state_observers.notify(StateChange::Rate(derived.1));
        }
    }
}

fn open_file(path: &Path) -> Result<File, PlayerError> {
    File::open(path).map_err(|source| PlayerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Transport state and effective rate from the sink's flags.
pub fn derive_state(
    status: PlayerStatus,
    is_paused: bool,
    is_empty: bool,
    speed: f32,
) -> (PlaybackState, f32) {
    if status != PlayerStatus::ReadyToPlay || is_paused || is_empty {
        (PlaybackState::Paused, 0.0)
    } else {
        (PlaybackState::Playing, speed)
    }
}

/// Tags and container duration. Unreadable tags are not an error: the
/// decoder may still handle the stream.
fn read_tags<R: Read + Seek>(reader: R) -> LoadedItem {
    let tagged = match Probe::new(reader).guess_file_type().map(|p| p.read()) {
        Ok(Ok(tagged)) => tagged,
        Ok(Err(e)) => {
            debug!(error = %e, "no readable tags");
            return LoadedItem::default();
        }
        Err(e) => {
            debug!(error = %e, "could not probe file type");
            return LoadedItem::default();
        }
    };

    let duration = tagged.properties().duration();
    let mut metadata = Vec::new();
    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = tag.title() {
            metadata.push(MetadataItem::new(MetadataKey::Title, title));
        }
        if let Some(artist) = tag.artist() {
            metadata.push(MetadataItem::new(MetadataKey::Artist, artist));
        }
        if let Some(album) = tag.album() {
            metadata.push(MetadataItem::new(MetadataKey::AlbumName, album));
        }
    }

    LoadedItem {
        duration: (!duration.is_zero()).then(|| MediaTime::from(duration)),
        metadata,
    }
}

impl PlayerTrait for NativePlayer {
    fn play(&mut self) {
        self.sink.play();
        self.refresh_state();
    }

    fn pause(&mut self) {
        self.sink.pause();
        self.refresh_state();
    }

    fn seek(&mut self, to: MediaTime) {
        if let Err(e) = self.sink.try_seek(to.to_duration()) {
            warn!(to = %to, error = %e, "seek failed");
        }
    }

    fn add_periodic_time_observer(
        &mut self,
        interval: Duration,
        callback: TimeCallback,
    ) -> ObserverHandle {
        self.time_observers.insert(interval, callback, Instant::now())
    }

    fn add_state_observer(&mut self, callback: StateCallback) -> ObserverHandle {
        self.state_observers.insert(callback)
    }

    fn remove_observer(&mut self, handle: ObserverHandle) {
        if !self.time_observers.remove(handle) {
            self.state_observers.remove(handle);
        }
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn waits_to_minimize_stalling(&self) -> bool {
        self.waits_to_minimize_stalling
    }

    // The whole item is buffered before decoding starts, so this only
    // records the preference.
    fn set_waits_to_minimize_stalling(&mut self, waits: bool) {
        self.waits_to_minimize_stalling = waits;
    }

    fn rate(&self) -> f32 {
        derive_state(
            self.status,
            self.sink.is_paused(),
            self.sink.empty(),
            self.sink.speed(),
        )
        .1
    }

    fn status(&self) -> PlayerStatus {
        self.status
    }

    fn time_control_status(&self) -> PlaybackState {
        derive_state(
            self.status,
            self.sink.is_paused(),
            self.sink.empty(),
            self.sink.speed(),
        )
        .0
    }

    fn current_duration(&self) -> Option<MediaTime> {
        self.item.as_ref()?.duration
    }

    fn current_metadata(&self) -> Vec<MetadataItem> {
        self.item
            .as_ref()
            .map(|item| item.metadata.clone())
            .unwrap_or_default()
    }

    fn is_remote_controlled(&self) -> bool {
        false
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.time_observers.next_deadline()
    }

    fn tick(&mut self, now: Instant) {
        let position = self.position();
        self.time_observers.fire_due(now, position);
        self.refresh_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_state() {
        let ready = PlayerStatus::ReadyToPlay;
        assert_eq!(
            derive_state(ready, false, false, 1.0),
            (PlaybackState::Playing, 1.0)
        );
        assert_eq!(
            derive_state(ready, true, false, 1.0),
            (PlaybackState::Paused, 0.0)
        );
        // Finished items read as paused
        assert_eq!(
            derive_state(ready, false, true, 1.0),
            (PlaybackState::Paused, 0.0)
        );
        assert_eq!(
            derive_state(PlayerStatus::Failed, false, false, 1.0),
            (PlaybackState::Paused, 0.0)
        );
    }

    #[test]
    fn test_unreadable_tags_yield_empty_item() {
        let item = read_tags(Cursor::new(b"definitely not audio".to_vec()));
        assert!(item.metadata.is_empty());
        assert!(item.duration.is_none());
    }
}
