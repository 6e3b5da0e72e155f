//! Help text for shell commands.

use crate::target::TargetKind;

const COMMANDS: [(&str, &str); 7] = [
    ("target_create", "Creates a new target."),
    ("target_destroy", "Destroys an existing target."),
    ("target_list", "Lists live targets."),
    ("bdev_map", "Maps a new block device to an existing target."),
    ("bdev_unmap", "Unmaps an existing block device from its target."),
    ("help", "Shows help for all commands or for one command."),
    ("exit", "Quits the shell. Shorthand: x q Ctrl-D."),
];

const TARGET_CREATE: &str = "\
Creates a new target.
  target_create name=<str> capacity_sectors=<uint> type=<kind>
                [cache_len_sectors=<uint>] [cache_write_through_enable=<0|1>]
                [<type-specific fields>]
  default:        path=<path>
  raid0, raid5:   strip_len_sectors=<uint> paths=<path>,<path>...
  raid1:          paths=<path>,<path>... [read_len_sectors_per_path=<uint>]
  raid4:          strip_len_sectors=<uint> data_paths=<path>,... parity_path=<path>
  raid10/40/50:   strip_len_sectors=<uint> raid1s|raid4s|raid5s=<leg>:<leg>...
                  where each leg is \"field=value;field=value\"";

const TARGET_DESTROY: &str = "\
Destroys an existing target that has no mapped block devices.
  target_destroy name=<str>";

const BDEV_MAP: &str = "\
Maps a new block device to an existing target.
  bdev_map bdev_suffix=<str> target_name=<str> [read_only=<0|1>]";

const BDEV_UNMAP: &str = "\
Unmaps an existing block device from its target.
  bdev_unmap bdev_suffix=<str>";

/// Lists every command with a one-line description.
pub(crate) fn overview() -> String {
    let mut text = String::from("Commands:");
    for (name, summary) in COMMANDS {
        text.push_str(&format!("\n  {name:<16}{summary}"));
    }
    text
}

/// Returns detailed help for `name`, or `None` when no such command exists.
pub(crate) fn topic(name: &str) -> Option<String> {
    match name {
        "target_create" => {
            let kinds: Vec<_> = TargetKind::ALL.iter().map(|kind| kind.as_str()).collect();
            Some(format!("{TARGET_CREATE}\n  kinds: {}", kinds.join(", ")))
        }
        "target_destroy" => Some(TARGET_DESTROY.to_owned()),
        "bdev_map" => Some(BDEV_MAP.to_owned()),
        "bdev_unmap" => Some(BDEV_UNMAP.to_owned()),
        "x" | "q" => topic("exit"),
        "?" => topic("help"),
        other => COMMANDS
            .iter()
            .find(|(command, _)| *command == other)
            .map(|(_, summary)| (*summary).to_owned()),
    }
}
