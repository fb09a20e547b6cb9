//! Hotspot connection and the download that wins the level.

use bevy::prelude::*;

use super::components::{DownloadProgress, Player, PlayerConfig, PlayerStatus};
use crate::core::GameSession;
use crate::world::{best_available, Hotspot, MIN_SIGNAL};

/// Pull one frame of data from the connected hotspot.
///
/// Returns false when the connection should drop: the hotspot is drained or
/// the signal is too weak.
pub fn pull_data(download: &mut DownloadProgress, hotspot: &mut Hotspot, strength: f32, delta_secs: f32) -> bool {
    if hotspot.is_drained() || strength < MIN_SIGNAL {
        download.disconnect();
        return false;
    }
    download.signal = strength;
    download.receive(hotspot.transfer(strength, delta_secs));
    true
}

/// Connect (C) to the strongest hotspot in range, or disconnect.
pub fn handle_connect_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player_query: Query<(&Transform, &PlayerStatus, &mut DownloadProgress), With<Player>>,
    hotspots: Query<(Entity, &Transform, &Hotspot)>,
) {
    if !keyboard.just_pressed(KeyCode::KeyC) {
        return;
    }
    let Ok((transform, status, mut download)) = player_query.get_single_mut() else {
        return;
    };

    if download.connected.is_some() {
        download.disconnect();
        info!("Disconnected from hotspot.");
        return;
    }

    let position = transform.translation.truncate();
    let candidates = hotspots
        .iter()
        .map(|(entity, transform, hotspot)| (entity, transform.translation.truncate(), hotspot));
    match best_available(candidates, position, status.floor) {
        Some(hotspot) => {
            download.connect(hotspot);
            info!("Connected to hotspot {:?}.", hotspot);
        }
        None => debug!("No hotspot in range."),
    }
}

/// Transfer data while connected and win once the goal is reached.
pub fn download_data(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut session: ResMut<GameSession>,
    mut player_query: Query<(&Transform, &PlayerStatus, &mut DownloadProgress), With<Player>>,
    mut hotspots: Query<(&Transform, &mut Hotspot), Without<Player>>,
) {
    let Ok((transform, status, mut download)) = player_query.get_single_mut() else {
        return;
    };

    if let Some(connected) = download.connected {
        match hotspots.get_mut(connected) {
            Ok((hotspot_transform, mut hotspot)) => {
                let strength = hotspot.signal_strength(
                    hotspot_transform.translation.truncate(),
                    transform.translation.truncate(),
                    status.floor,
                );
                if !pull_data(&mut download, &mut hotspot, strength, time.delta_secs()) {
                    info!("Lost connection to hotspot.");
                }
            }
            Err(_) => download.disconnect(),
        }
    }

    if download.try_complete(config.rounding_margin) && session.trigger_win() {
        info!("Downloaded {:.1} of {:.1}", download.downloaded, download.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::SignalCurve;

    fn hotspot(available: f32) -> Hotspot {
        Hotspot::new(5.0, 0.4, SignalCurve::default(), 0.5, available, 0)
    }

    #[test]
    fn test_pull_adds_transferred_data() {
        let mut download = DownloadProgress::new(10.0);
        let mut source = hotspot(4.0);
        download.connect(Entity::from_raw(1));

        assert!(pull_data(&mut download, &mut source, 1.0, 0.5));
        // 1.0 * 0.5 * 6.0 * 0.5
        assert!((download.downloaded - 1.5).abs() < 1e-6);
        assert!((source.available() - 2.5).abs() < 1e-6);
        assert_eq!(download.signal, 1.0);
    }

    #[test]
    fn test_weak_signal_disconnects() {
        let mut download = DownloadProgress::new(10.0);
        let mut source = hotspot(4.0);
        download.connect(Entity::from_raw(1));

        assert!(!pull_data(&mut download, &mut source, 0.0005, 0.5));
        assert_eq!(download.connected, None);
        assert_eq!(download.downloaded, 0.0);
        assert_eq!(source.available(), 4.0);
    }

    #[test]
    fn test_drained_hotspot_disconnects() {
        let mut download = DownloadProgress::new(10.0);
        let mut source = hotspot(1.0);
        download.connect(Entity::from_raw(1));

        assert!(pull_data(&mut download, &mut source, 1.0, 1.0));
        assert_eq!(download.downloaded, 1.0);
        assert!(source.is_drained());
        assert!(!pull_data(&mut download, &mut source, 1.0, 1.0));
        assert_eq!(download.connected, None);
    }
}
