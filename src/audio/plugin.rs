//! Audio plugin - plays music and sound cues through Kira channels.

use bevy::prelude::*;
use bevy_kira_audio::{AudioApp, AudioChannel, AudioControl, AudioSource};

use super::chase_music::{ChaseMusic, MusicTrack};
use crate::core::{GameState, SoundCue, SoundEvent};

/// Looping background / chase music.
#[derive(Resource)]
pub struct MusicChannel;

/// One-shot gameplay effects.
#[derive(Resource)]
pub struct EffectsChannel;

/// Elevator ride music, stopped on arrival without touching the background track.
#[derive(Resource)]
pub struct LiftChannel;

/// Loaded audio clips.
#[derive(Resource)]
pub struct AudioHandles {
    pub background: Handle<AudioSource>,
    pub chase: Handle<AudioSource>,
    pub dash: Handle<AudioSource>,
    pub dash_denied: Handle<AudioSource>,
    pub lift_music: Handle<AudioSource>,
    pub lift_arrival: Handle<AudioSource>,
}

/// Track currently on the music channel, if any.
#[derive(Resource, Default)]
pub struct NowPlaying(pub Option<MusicTrack>);

/// Audio plugin - music switching and sound cues.
///
/// Kira's own `AudioPlugin` must be added to the app alongside this one.
pub struct AudioCuesPlugin;

impl Plugin for AudioCuesPlugin {
    fn build(&self, app: &mut App) {
        app.add_audio_channel::<MusicChannel>()
            .add_audio_channel::<EffectsChannel>()
            .add_audio_channel::<LiftChannel>()
            .init_resource::<ChaseMusic>()
            .init_resource::<NowPlaying>()
            .add_systems(Startup, load_audio)
            .add_systems(
                Update,
                (switch_music, play_sound_cues).run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::InGame), stop_music);
    }
}

/// Load all clips once at startup.
fn load_audio(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(AudioHandles {
        background: asset_server.load("audio/background.ogg"),
        chase: asset_server.load("audio/chase.ogg"),
        dash: asset_server.load("audio/dash.wav"),
        dash_denied: asset_server.load("audio/dash_denied.wav"),
        lift_music: asset_server.load("audio/lift_music.ogg"),
        lift_arrival: asset_server.load("audio/lift_arrival.wav"),
    });
}

/// Keep the music channel on the track the chase tracker asks for.
fn switch_music(
    chase_music: Res<ChaseMusic>,
    handles: Option<Res<AudioHandles>>,
    channel: Res<AudioChannel<MusicChannel>>,
    mut now_playing: ResMut<NowPlaying>,
) {
    let Some(handles) = handles else {
        return;
    };

    let wanted = chase_music.track();
    if now_playing.0 == Some(wanted) {
        return;
    }

    let clip = match wanted {
        MusicTrack::Background => handles.background.clone(),
        MusicTrack::Chase => handles.chase.clone(),
    };
    channel.stop();
    channel.play(clip).looped();
    now_playing.0 = Some(wanted);
}

/// Play one-shot cues raised by gameplay.
fn play_sound_cues(
    mut events: EventReader<SoundEvent>,
    handles: Option<Res<AudioHandles>>,
    effects: Res<AudioChannel<EffectsChannel>>,
    lift: Res<AudioChannel<LiftChannel>>,
) {
    let Some(handles) = handles else {
        events.clear();
        return;
    };

    for event in events.read() {
        match event.cue {
            SoundCue::Dash => {
                effects.play(handles.dash.clone());
            }
            SoundCue::DashDenied => {
                effects.play(handles.dash_denied.clone());
            }
            SoundCue::ElevatorDeparted => {
                lift.play(handles.lift_music.clone());
            }
            SoundCue::ElevatorArrived => {
                lift.stop();
                effects.play(handles.lift_arrival.clone());
            }
        }
    }
}

/// Silence everything when gameplay ends.
fn stop_music(
    music: Res<AudioChannel<MusicChannel>>,
    lift: Res<AudioChannel<LiftChannel>>,
    mut now_playing: ResMut<NowPlaying>,
) {
    music.stop();
    lift.stop();
    now_playing.0 = None;
}
