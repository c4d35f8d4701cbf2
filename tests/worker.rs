use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};

use pl_dashboard::player::{Player, PlayerFilters};
use pl_dashboard::player_api::PlayerApi;
use pl_dashboard::player_store::PlayerStore;
use pl_dashboard::state::{Delta, PlayerCommand};
use pl_dashboard::worker::{run_command, spawn_player_worker};

struct MemoryApi {
    players: Mutex<Vec<Player>>,
}

impl PlayerApi for MemoryApi {
    fn list_players(&self, _filters: &PlayerFilters) -> Result<Vec<Player>> {
        Ok(self.players.lock().unwrap().clone())
    }

    fn create_player(&self, player: &Player) -> Result<Player> {
        let saved = Player {
            id: Some(99),
            ..player.clone()
        };
        self.players.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    fn update_player(&self, _player: &Player) -> Result<Player> {
        Err(anyhow!("player not found"))
    }

    fn delete_player(&self, name: &str) -> Result<()> {
        self.players.lock().unwrap().retain(|p| p.player != name);
        Ok(())
    }
}

fn store() -> Arc<PlayerStore> {
    let api = MemoryApi {
        players: Mutex::new(vec![Player {
            id: Some(1),
            player: "Cole Palmer".to_string(),
            team: "Chelsea".to_string(),
            number: 20,
            nation: "ENG".to_string(),
            position: "MF".to_string(),
            age: 22,
            date: "2024-05-19".to_string(),
            ..Player::default()
        }]),
    };
    Arc::new(PlayerStore::new(Arc::new(api)))
}

#[test]
fn fetch_command_yields_players_for_its_filters() {
    let store = store();
    let (tx, rx) = mpsc::channel();
    let filters = PlayerFilters {
        team: Some("Chelsea".to_string()),
        ..PlayerFilters::default()
    };
    run_command(&store, PlayerCommand::FetchPlayers { filters: filters.clone() }, &tx);

    match rx.try_recv().expect("delta") {
        Delta::SetPlayers { filters: got, players } => {
            assert_eq!(got, filters);
            assert_eq!(players.len(), 1);
        }
        other => panic!("unexpected delta {other:?}"),
    }
}

#[test]
fn failed_update_yields_save_failed() {
    let store = store();
    let (tx, rx) = mpsc::channel();
    let player = store
        .players(&PlayerFilters::default())
        .expect("list")[0]
        .clone();
    run_command(&store, PlayerCommand::UpdatePlayer(player), &tx);

    match rx.try_recv().expect("delta") {
        Delta::SaveFailed(message) => assert_eq!(message, "player not found"),
        other => panic!("unexpected delta {other:?}"),
    }
}

#[test]
fn spawned_worker_answers_every_command() {
    let store = store();
    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let handle = spawn_player_worker(store, tx, cmd_rx);

    cmd_tx
        .send(PlayerCommand::DeletePlayer {
            name: "Cole Palmer".to_string(),
        })
        .expect("send");
    let delta = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("worker should answer");
    assert!(matches!(delta, Delta::Deleted(ref name) if name == "Cole Palmer"));

    drop(cmd_tx);
    handle.join().expect("worker thread should stop");
}
