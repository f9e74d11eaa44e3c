use std::{env, path::Path, process::Stdio};

use anyhow::{Result, anyhow};
use sysinfo::{Signal, System, get_current_pid};
use tracing::info;

/// Terminates every other process started from the `name` executable, including a monitor
/// started by `init`.
pub fn kill_previous_instances(name: &Path) -> Result<usize> {
    let system = System::new_all();
    let current_id = get_current_pid().map_err(|e| anyhow!("Failed to get current pid {e}"))?;
    let mut killed = 0;
    for (pid, process) in system.processes().iter() {
        if *pid == current_id {
            continue;
        }
        if matches!(process.parent(), Some(p) if p == current_id) {
            continue;
        }

        if process
            .exe()
            .filter(|v| v.exists())
            .filter(|v| name == *v)
            .is_some()
        {
            info!("Stopping previous instance {pid}");
            // This will forcefully terminate the process on Windows. Anything better will require a
            // lot more work.
            if process.kill_with(Signal::Term).is_none() {
                process.kill();
            }
            process.wait();
            killed += 1;
        }
    }
    Ok(killed)
}

/// Stops a running monitor and starts a new detached `serve` process with `serve_args`.
pub fn restart_monitor(serve_args: Vec<String>) -> Result<()> {
    let process_name = env::current_exe()?;
    kill_previous_instances(&process_name)?;
    let mut command = std::process::Command::new(process_name);
    command.arg("serve").args(serve_args);

    #[cfg(feature = "win")]
    {
        use std::os::windows::process::CommandExt;
        use windows::Win32::System::Threading::DETACHED_PROCESS;
        command.creation_flags(DETACHED_PROCESS.0);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command.stdin(Stdio::null());
    command.stdout(Stdio::null());
    command.stderr(Stdio::null());

    #[allow(clippy::zombie_processes)]
    let child = command.spawn()?;
    info!("Spawned monitor {}", child.id());
    Ok(())
}
