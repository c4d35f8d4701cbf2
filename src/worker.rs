use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::player_store::PlayerStore;
use crate::state::{Delta, PlayerCommand};

/// Runs every command on its own thread so a slow request never blocks the next one.
/// Same-key reads still share one request through the store.
pub fn spawn_player_worker(
    store: Arc<PlayerStore>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<PlayerCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            let store = store.clone();
            let tx = tx.clone();
            thread::spawn(move || run_command(&store, cmd, &tx));
        }
        tracing::debug!("player worker stopped");
    })
}

pub fn run_command(store: &PlayerStore, cmd: PlayerCommand, tx: &Sender<Delta>) {
    match cmd {
        PlayerCommand::FetchPlayers { filters } => match store.players(&filters) {
            Ok(players) => {
                let _ = tx.send(Delta::SetPlayers {
                    filters,
                    players: players.as_ref().clone(),
                });
            }
            Err(err) => {
                let _ = tx.send(Delta::PlayersFailed {
                    filters,
                    message: format!("{err:#}"),
                });
            }
        },
        PlayerCommand::CreatePlayer(player) => match store.create_player(&player) {
            Ok(saved) => {
                let _ = tx.send(Delta::Saved(saved));
            }
            Err(err) => {
                let _ = tx.send(Delta::SaveFailed(format!("{err:#}")));
            }
        },
        PlayerCommand::UpdatePlayer(player) => match store.update_player(&player) {
            Ok(saved) => {
                let _ = tx.send(Delta::Saved(saved));
            }
            Err(err) => {
                let _ = tx.send(Delta::SaveFailed(format!("{err:#}")));
            }
        },
        PlayerCommand::DeletePlayer { name } => match store.delete_player(&name) {
            Ok(()) => {
                let _ = tx.send(Delta::Deleted(name));
            }
            Err(err) => {
                let _ = tx.send(Delta::DeleteFailed(format!("{err:#}")));
            }
        },
    }
}
