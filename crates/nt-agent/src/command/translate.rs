//! Command translation
//!
//! Maps a protocol command and target onto the argument vector of the host's
//! diagnostic utility. Pure: no I/O and no validation of the target, which is
//! left to the utility itself.

use nt_core::traits::CommandSpec;
use nt_core::OsFamily;
use nt_protocol::CommandKind;

/// Number of echo requests sent by `ping`
pub const PING_COUNT: u32 = 4;

/// Resolve a command for the given OS family
pub fn translate(command: CommandKind, target: &str, os: OsFamily) -> CommandSpec {
    match command {
        CommandKind::Ping => ping_command(target, os),
        CommandKind::Traceroute => traceroute_command(target, os),
    }
}

/// `ping -n 4 <target>` on Windows, `ping -c 4 <target>` elsewhere
pub fn ping_command(target: &str, os: OsFamily) -> CommandSpec {
    let count_flag = match os {
        OsFamily::Windows => "-n",
        OsFamily::Posix => "-c",
    };
    CommandSpec::new("ping", [count_flag.to_string(), PING_COUNT.to_string(), target.to_string()])
}

/// `tracert <target>` on Windows, `traceroute <target>` elsewhere
pub fn traceroute_command(target: &str, os: OsFamily) -> CommandSpec {
    let program = match os {
        OsFamily::Windows => "tracert",
        OsFamily::Posix => "traceroute",
    };
    CommandSpec::new(program, [target])
}
