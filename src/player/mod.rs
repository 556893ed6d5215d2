pub mod error;
pub mod metadata;
pub mod native;
pub mod remote;
pub mod source;
pub mod time;
pub mod timer;
pub mod traits;

pub use error::PlayerError;
pub use metadata::{MetadataItem, MetadataKey};
pub use native::NativePlayer;
pub use remote::ScriptedRemotePlayer;
pub use source::MediaSource;
pub use time::MediaTime;
pub use traits::{
    ObserverHandle, PlaybackState, PlayerStatus, PlayerTrait, StateCallback, StateChange,
    TimeCallback,
};

/// Factory: a remote adapter for `osascript:` sources, the native engine
/// for everything else.
pub fn open_player(source: &MediaSource) -> Result<Box<dyn PlayerTrait>, PlayerError> {
    match source {
        MediaSource::Remote(app_name) => Ok(Box::new(ScriptedRemotePlayer::new(app_name.clone()))),
        _ => {
            let mut player = NativePlayer::new()?;
            player.open(source)?;
            Ok(Box::new(player))
        }
    }
}
