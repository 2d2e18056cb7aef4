const COMMANDS: &[&str] = &[
    "start_monitoring",
    "stop_monitoring",
    "get_state",
    "check_now",
    "ping_ack",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}
